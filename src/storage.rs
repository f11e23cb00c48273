//! Append-only CSV store for market snapshots and the trade audit trail
//!
//! The store is an explicit handle passed to whoever needs persistence;
//! each append opens, writes and flushes the file, so there is no shared
//! connection state between units of work. Two files live under the data
//! directory: `market_data.csv` and `trade_audit.csv`.

use crate::data::MarketContext;
use crate::risk::ConformityStatus;
use crate::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, WriterBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

const SNAPSHOT_FILE: &str = "market_data.csv";
const AUDIT_FILE: &str = "trade_audit.csv";

/// One persisted market observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub timestamp: DateTime<Utc>,
    pub ticker: String,
    pub asset_class: String,
    pub price: f64,
    pub high: f64,
    pub low: f64,
    pub consensus_mech: String,
    pub data_source: String,
}

impl MarketSnapshot {
    /// Build a snapshot row from fetched market context, stamped now.
    pub fn from_context(ctx: &MarketContext) -> Self {
        Self {
            timestamp: Utc::now(),
            ticker: ctx.ticker.clone(),
            asset_class: ctx.asset_class.to_string(),
            price: ctx.price,
            high: ctx.high,
            low: ctx.low,
            consensus_mech: ctx.consensus.to_string(),
            data_source: ctx.data_source.clone(),
        }
    }
}

/// One persisted trade audit row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAuditRecord {
    pub execution_time: DateTime<Utc>,
    pub ticker: String,
    pub trade_price: f64,
    pub conformity_status: ConformityStatus,
    pub remarks: String,
}

/// Storage handle owning the snapshot and audit files
#[derive(Debug, Clone)]
pub struct AuditStore {
    snapshot_path: PathBuf,
    audit_path: PathBuf,
}

impl AuditStore {
    /// Open (creating if necessary) the store under the given directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "audit store opened");
        Ok(Self {
            snapshot_path: dir.join(SNAPSHOT_FILE),
            audit_path: dir.join(AUDIT_FILE),
        })
    }

    pub fn append_snapshot(&self, snapshot: &MarketSnapshot) -> Result<()> {
        append_record(&self.snapshot_path, snapshot)
    }

    pub fn append_audit(&self, record: &TradeAuditRecord) -> Result<()> {
        append_record(&self.audit_path, record)
    }

    /// All snapshots in append order; an absent file reads as empty.
    pub fn load_snapshots(&self) -> Result<Vec<MarketSnapshot>> {
        load_records(&self.snapshot_path)
    }

    /// All audit rows in append order; an absent file reads as empty.
    pub fn load_audits(&self) -> Result<Vec<TradeAuditRecord>> {
        load_records(&self.audit_path)
    }
}

fn append_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    // Header only on the first write of the file's lifetime
    let write_headers = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(write_headers)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
