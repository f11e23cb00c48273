//! Data module for fetching and handling market data
//!
//! This module provides:
//! - Bybit public API client for klines
//! - Per-instrument market context (price, daily range, close history)
//! - The asset universe descriptors consumed by the pipeline

mod bybit;
mod context;

pub use bybit::*;
pub use context::*;
