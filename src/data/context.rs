//! Asset universe descriptors and fetched market context

use crate::data::Kline;
use crate::risk::{round4, ConsensusMechanism};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Regulatory asset classification used in snapshots and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    /// Native chain asset (BTC, ETH, ...)
    Native,
    /// Derivative tracking a native asset one-for-one
    DeltaOne,
    /// Tokenized traditional instrument
    Tokenized,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "Native"),
            Self::DeltaOne => write!(f, "Delta-1"),
            Self::Tokenized => write!(f, "Tokenized"),
        }
    }
}

/// One instrument the pipeline tracks
#[derive(Debug, Clone)]
pub struct AssetSpec {
    /// Bybit spot symbol, e.g. "BTCUSDT"
    pub symbol: String,
    pub asset_class: AssetClass,
    pub consensus: ConsensusMechanism,
    /// Price the demo trade 3% above the daily high so the conformity
    /// check has a deliberate failure to audit
    pub simulate_fat_finger: bool,
}

impl AssetSpec {
    pub fn new(symbol: &str, asset_class: AssetClass, consensus: ConsensusMechanism) -> Self {
        Self {
            symbol: symbol.to_string(),
            asset_class,
            consensus,
            simulate_fat_finger: false,
        }
    }

    pub fn with_fat_finger(mut self) -> Self {
        self.simulate_fat_finger = true;
        self
    }
}

/// Everything the risk assessments need for one instrument, assembled
/// from the latest daily klines
#[derive(Debug, Clone, Serialize)]
pub struct MarketContext {
    pub ticker: String,
    pub asset_class: AssetClass,
    /// Latest close, rounded to 4 digits
    pub price: f64,
    /// Latest daily high
    pub high: f64,
    /// Latest daily low
    pub low: f64,
    pub consensus: ConsensusMechanism,
    /// Chronological close-price history, oldest first
    pub history: Vec<f64>,
    pub data_source: String,
}

impl MarketContext {
    /// Assemble the context for one instrument from its chronological
    /// daily klines: latest close (rounded to 4 digits), the day's
    /// high/low and the close-price history for the VaR estimator.
    ///
    /// An empty kline list is reported as [`Error::NoData`] so callers
    /// can skip the instrument instead of crashing.
    pub fn from_klines(asset: &AssetSpec, klines: &[Kline]) -> Result<Self> {
        let latest = klines.last().ok_or_else(|| Error::NoData {
            symbol: asset.symbol.clone(),
        })?;

        Ok(Self {
            ticker: asset.symbol.clone(),
            asset_class: asset.asset_class,
            price: round4(latest.close),
            high: round4(latest.high),
            low: round4(latest.low),
            consensus: asset.consensus,
            history: klines.iter().map(|k| k.close).collect(),
            data_source: super::bybit::DATA_SOURCE.to_string(),
        })
    }
}
