//! CRM Risk Engine CLI
//!
//! `crm-risk run` executes the one-shot assessment pipeline;
//! `crm-risk report` prints the stored overview and audit trail.

use anyhow::Result;
use clap::{Parser, Subcommand};
use crm_risk_engine::data::BybitClient;
use crm_risk_engine::pipeline::{default_universe, Pipeline};
use crm_risk_engine::report::print_report;
use crm_risk_engine::storage::AuditStore;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "crm-risk")]
#[command(about = "Institutional crypto risk engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch market data, assess risk and append to the audit trail
    Run {
        /// Directory holding the CSV store
        #[arg(short, long, default_value = "data")]
        data_dir: String,

        /// Number of daily closes to fetch per instrument
        #[arg(long, default_value = "30")]
        history: u32,

        /// Skip the simulated fat-finger trade
        #[arg(long)]
        clean: bool,
    },

    /// Print the portfolio overview and trade audit log
    Report {
        /// Directory holding the CSV store
        #[arg(short, long, default_value = "data")]
        data_dir: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level: Level = cli.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            data_dir,
            history,
            clean,
        } => {
            let store = AuditStore::open(&data_dir)?;
            let pipeline = Pipeline::new(BybitClient::new(), store);

            let mut universe = default_universe();
            if clean {
                for asset in &mut universe {
                    asset.simulate_fat_finger = false;
                }
            }

            let summary = pipeline.run(&universe, history)?;
            info!(
                processed = summary.processed,
                skipped = summary.skipped,
                "tasks complete, ready for report view"
            );
        }
        Commands::Report { data_dir } => {
            let store = AuditStore::open(&data_dir)?;
            print_report(&store)?;
        }
    }

    Ok(())
}
