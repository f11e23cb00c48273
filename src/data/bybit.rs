//! Bybit API client for fetching cryptocurrency market data

use crate::data::{AssetSpec, MarketContext};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub(crate) const DATA_SOURCE: &str = "Bybit";

/// Kline (candlestick) data from Bybit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kline {
    /// Start timestamp
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Bybit API response wrapper
#[derive(Debug, Deserialize)]
struct BybitResponse {
    #[serde(rename = "retCode")]
    ret_code: i32,
    #[serde(rename = "retMsg")]
    ret_msg: String,
    result: KlineResult,
}

#[derive(Debug, Deserialize)]
struct KlineResult {
    list: Vec<Vec<String>>,
}

/// Bybit public API client
#[derive(Debug, Clone)]
pub struct BybitClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl Default for BybitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BybitClient {
    /// Create a new client against the production endpoint
    pub fn new() -> Self {
        Self::with_base_url("https://api.bybit.com")
    }

    /// Create a client with a custom base URL (testnet, mock server)
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: reqwest::blocking::Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Fetch historical klines for a spot symbol.
    ///
    /// # Arguments
    /// * `symbol` - Trading pair symbol (e.g., "BTCUSDT")
    /// * `interval` - Time interval ("60", "240", "D", ...)
    /// * `limit` - Number of candles to fetch (capped at 1000)
    ///
    /// # Returns
    /// Klines sorted by timestamp, oldest first.
    pub fn fetch_klines(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Kline>> {
        let url = format!("{}/v5/market/kline", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("category", "spot"),
                ("symbol", symbol),
                ("interval", interval),
                ("limit", &limit.min(1000).to_string()),
            ])
            .timeout(self.timeout)
            .send()
            .map_err(|e| Error::Api(e.to_string()))?;

        let data: BybitResponse = response.json().map_err(|e| Error::Api(e.to_string()))?;

        if data.ret_code != 0 {
            return Err(Error::Api(data.ret_msg));
        }

        // Bybit returns rows in reverse chronological order
        let mut klines: Vec<Kline> = data
            .result
            .list
            .iter()
            .filter_map(|row| parse_kline(row))
            .collect();
        klines.sort_by_key(|k| k.timestamp);

        debug!(symbol, count = klines.len(), "fetched klines");
        Ok(klines)
    }

    /// Assemble the market context for one instrument: latest close, the
    /// day's high/low and the daily close-price history used by the VaR
    /// estimator.
    ///
    /// An empty kline list is reported as [`Error::NoData`] so callers can
    /// skip the instrument instead of crashing.
    pub fn fetch_market_context(
        &self,
        asset: &AssetSpec,
        history_len: u32,
    ) -> Result<MarketContext> {
        let klines = self.fetch_klines(&asset.symbol, "D", history_len)?;
        MarketContext::from_klines(asset, &klines)
    }
}

fn parse_kline(row: &[String]) -> Option<Kline> {
    if row.len() < 6 {
        return None;
    }
    let timestamp_ms: i64 = row[0].parse().ok()?;
    Some(Kline {
        timestamp: DateTime::from_timestamp_millis(timestamp_ms)?,
        open: row[1].parse().ok()?,
        high: row[2].parse().ok()?,
        low: row[3].parse().ok()?,
        close: row[4].parse().ok()?,
        volume: row[5].parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_a_well_formed_row() {
        let kline = parse_kline(&row(&[
            "1700000000000",
            "37000.1",
            "37500.5",
            "36800.2",
            "37210.9",
            "1234.5",
            "45800000",
        ]))
        .unwrap();
        assert_eq!(kline.open, 37000.1);
        assert_eq!(kline.high, 37500.5);
        assert_eq!(kline.low, 36800.2);
        assert_eq!(kline.close, 37210.9);
        assert_eq!(kline.volume, 1234.5);
        assert_eq!(kline.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn rejects_short_or_malformed_rows() {
        assert!(parse_kline(&row(&["1700000000000", "1.0"])).is_none());
        assert!(parse_kline(&row(&[
            "not-a-timestamp",
            "1.0",
            "1.0",
            "1.0",
            "1.0",
            "1.0"
        ]))
        .is_none());
    }

    #[test]
    fn deserializes_the_response_envelope() {
        let body = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "list": [
                    ["1700086400000", "2.0", "2.2", "1.9", "2.1", "10.0", "21.0"],
                    ["1700000000000", "1.9", "2.1", "1.8", "2.0", "12.0", "24.0"]
                ]
            }
        }"#;
        let parsed: BybitResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.ret_code, 0);
        assert_eq!(parsed.result.list.len(), 2);
    }

    #[test]
    fn error_envelope_carries_the_message() {
        let body = r#"{"retCode": 10001, "retMsg": "params error", "result": {"list": []}}"#;
        let parsed: BybitResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.ret_code, 10001);
        assert_eq!(parsed.ret_msg, "params error");
    }
}
