//! # CRM Risk Engine
//!
//! A small institutional risk engine for crypto and crypto-adjacent
//! instruments. It fetches market context from the Bybit public API,
//! estimates one-step Value at Risk with a Monte Carlo simulation,
//! assigns an ESG impact rating keyed by consensus mechanism, and audits
//! executed trade prices against the day's fair-market-value band.
//!
//! # Modules
//!
//! - `risk`: Monte Carlo VaR, ESG ratings and the market conformity check
//! - `data`: Bybit API client and per-instrument market context
//! - `storage`: append-only CSV store for snapshots and the audit trail
//! - `pipeline`: fetch -> persist -> assess -> audit orchestration
//! - `report`: terminal rendering of the stored snapshots and audit log
//!
//! # Example
//!
//! ```no_run
//! use crm_risk_engine::data::BybitClient;
//! use crm_risk_engine::pipeline::{default_universe, Pipeline};
//! use crm_risk_engine::storage::AuditStore;
//!
//! fn main() -> crm_risk_engine::Result<()> {
//!     let store = AuditStore::open("data")?;
//!     let pipeline = Pipeline::new(BybitClient::new(), store);
//!     let summary = pipeline.run(&default_universe(), 30)?;
//!     println!("processed {} instruments", summary.processed);
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod storage;

pub use data::{AssetClass, AssetSpec, BybitClient, Kline, MarketContext};
pub use pipeline::{default_universe, Pipeline, RunSummary};
pub use risk::{
    check_market_conformity, esg_rating, estimate_var, ConformityResult, ConformityStatus,
    ConsensusMechanism, EsgRating, FairValueBounds, VarConfig,
};
pub use storage::{AuditStore, MarketSnapshot, TradeAuditRecord};

/// Error types for the crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("API error: {0}")]
    Api(String),

    #[error("no data available for instrument {symbol}")]
    NoData { symbol: String },

    #[error("storage error: {0}")]
    Storage(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
