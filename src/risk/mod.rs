//! Risk assessment module
//!
//! Provides the three pure assessments the engine runs per instrument:
//! - Monte Carlo Value at Risk estimation from a close-price history
//! - ESG impact rating keyed by consensus mechanism
//! - Market conformity check of a trade price against the daily range

mod conformity;
mod esg;
mod var;

pub use conformity::*;
pub use esg::*;
pub use var::*;

pub(crate) use var::round4;
