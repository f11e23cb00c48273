//! Market conformity check against the fair-market-value band
//!
//! An executed trade price is conform if it falls within the day's trading
//! range widened by a small tolerance buffer on each side. The computed
//! bounds are returned alongside the verdict so audit remarks can cite them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default tolerance outside the daily range (1%)
pub const DEFAULT_BUFFER: f64 = 0.01;

/// Verdict of the conformity check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConformityStatus {
    Pass,
    Fail,
}

impl fmt::Display for ConformityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Fair-market-value band the trade price was checked against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairValueBounds {
    pub lower: f64,
    pub upper: f64,
}

/// Verdict plus the band it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConformityResult {
    pub status: ConformityStatus,
    pub bounds: FairValueBounds,
}

/// Check a trade price against the daily range with the default 1% buffer.
pub fn check_market_conformity(
    trade_price: f64,
    daily_high: f64,
    daily_low: f64,
) -> ConformityResult {
    check_market_conformity_with_buffer(trade_price, daily_high, daily_low, DEFAULT_BUFFER)
}

/// Check a trade price against the daily range with an explicit buffer.
///
/// Both band edges are inclusive. `daily_low <= daily_high` is the caller's
/// responsibility; the check is not validated here and an inverted range
/// simply produces a band no price can satisfy.
pub fn check_market_conformity_with_buffer(
    trade_price: f64,
    daily_high: f64,
    daily_low: f64,
    buffer: f64,
) -> ConformityResult {
    let lower = daily_low * (1.0 - buffer);
    let upper = daily_high * (1.0 + buffer);

    let status = if lower <= trade_price && trade_price <= upper {
        ConformityStatus::Pass
    } else {
        ConformityStatus::Fail
    };

    ConformityResult {
        status,
        bounds: FairValueBounds { lower, upper },
    }
}
