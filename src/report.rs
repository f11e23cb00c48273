//! Terminal report over the stored snapshots and audit trail

use crate::risk::{esg_rating, ConformityStatus, ConsensusMechanism};
use crate::storage::{AuditStore, MarketSnapshot};
use crate::Result;
use colored::Colorize;
use std::collections::HashMap;

/// Latest snapshot per ticker, ordered by ticker for stable output.
pub fn latest_per_ticker(snapshots: &[MarketSnapshot]) -> Vec<&MarketSnapshot> {
    let mut latest: HashMap<&str, &MarketSnapshot> = HashMap::new();
    for snap in snapshots {
        latest
            .entry(snap.ticker.as_str())
            .and_modify(|held| {
                if snap.timestamp > held.timestamp {
                    *held = snap;
                }
            })
            .or_insert(snap);
    }
    let mut rows: Vec<&MarketSnapshot> = latest.into_values().collect();
    rows.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    rows
}

/// Print the portfolio overview and the trade audit log.
pub fn print_report(store: &AuditStore) -> Result<()> {
    let snapshots = store.load_snapshots()?;
    let audits = store.load_audits()?;

    println!("{}", "=== Portfolio Risk Overview ===".bold());
    if snapshots.is_empty() {
        println!("{}", "No market data found. Run the pipeline first.".yellow());
    }
    for snap in latest_per_ticker(&snapshots) {
        let mechanism = snap
            .consensus_mech
            .parse()
            .unwrap_or(ConsensusMechanism::Unknown);
        let esg = esg_rating(mechanism);
        println!(
            "{} ({}): ${:.2} | Range: ${:.2} - ${:.2} | ESG: {} [{}]",
            snap.ticker.cyan().bold(),
            snap.asset_class,
            snap.price,
            snap.low,
            snap.high,
            esg.rating,
            esg.score,
        );
    }

    println!();
    println!("{}", "=== Trade Conformity Audit ===".bold());
    if audits.is_empty() {
        println!("{}", "No trades audited yet.".yellow());
    }
    for audit in &audits {
        let status = match audit.conformity_status {
            ConformityStatus::Pass => "PASS".green(),
            ConformityStatus::Fail => "FAIL".red().bold(),
        };
        println!(
            "{} {} @ ${:.2} [{}] {}",
            audit.execution_time.format("%Y-%m-%d %H:%M:%S"),
            audit.ticker.cyan(),
            audit.trade_price,
            status,
            audit.remarks,
        );
    }

    Ok(())
}
