//! Binance API Type Definitions
//!
//! Response types for the USDⓈ-M futures market data endpoints and their
//! conversion into the snapshot model.

use crate::error::ApiError;
use crate::orderbook::types::{PriceLevel, Snapshot};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Response from /fapi/v1/ticker/price endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerPrice {
    /// Trading pair symbol (e.g., "BTCUSDT")
    pub symbol: String,
    /// Current price as string to preserve precision
    pub price: String,
    /// Transaction time (milliseconds)
    #[serde(default)]
    pub time: Option<i64>,
}

impl TickerPrice {
    pub fn price_decimal(&self) -> Result<Decimal, ApiError> {
        parse_decimal("price", &self.price)
    }
}

/// Response from /fapi/v1/depth endpoint
///
/// # Example Response
/// ```json
/// {
///   "lastUpdateId": 1027024,
///   "E": 1589436922972,
///   "T": 1589436922959,
///   "bids": [["4.00000000", "431.00000000"]],
///   "asks": [["4.00000200", "12.00000000"]]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthResponse {
    /// Last update ID
    pub last_update_id: i64,
    /// Message output time (milliseconds)
    #[serde(rename = "E", default)]
    pub event_time: Option<i64>,
    /// Transaction time (milliseconds)
    #[serde(rename = "T", default)]
    pub transaction_time: Option<i64>,
    /// Bid levels [price, quantity], best first
    pub bids: Vec<(String, String)>,
    /// Ask levels [price, quantity], best first
    pub asks: Vec<(String, String)>,
}

impl DepthResponse {
    /// Convert into a snapshot, keeping exchange level order
    ///
    /// `fetched_at` is used when the response carries no transaction time.
    pub fn into_snapshot(self, fetched_at: DateTime<Utc>) -> Result<Snapshot, ApiError> {
        let observed_at = self
            .transaction_time
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or(fetched_at);

        Ok(Snapshot::new(
            parse_levels(&self.bids)?,
            parse_levels(&self.asks)?,
            observed_at,
        ))
    }
}

fn parse_levels(raw: &[(String, String)]) -> Result<Vec<PriceLevel>, ApiError> {
    raw.iter()
        .map(|(price, qty)| {
            Ok(PriceLevel::new(
                parse_decimal("price", price)?,
                parse_decimal("quantity", qty)?,
            ))
        })
        .collect()
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(value)
        .map_err(|e| ApiError::ParseError(format!("Invalid {} {:?}: {}", field, value, e)))
}
