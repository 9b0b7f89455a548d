//! Observation records - one flattened row per tick

use crate::orderbook::sentiment::SentimentLabel;
use crate::orderbook::types::Analysis;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Timestamp layout of the persisted `timestamp` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column names, in write order
pub const COLUMNS: [&str; 11] = [
    "timestamp",
    "btc_price",
    "total_bid_volume",
    "total_ask_volume",
    "largest_buy_wall_price",
    "largest_buy_wall_volume",
    "largest_sell_wall_price",
    "largest_sell_wall_volume",
    "spread",
    "prediction",
    "whale_alert",
];

/// One persisted observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRecord {
    pub timestamp: DateTime<Utc>,
    pub reference_price: Decimal,
    pub total_bid_volume: Decimal,
    pub total_ask_volume: Decimal,
    pub largest_buy_wall_price: Decimal,
    pub largest_buy_wall_volume: Decimal,
    pub largest_sell_wall_price: Decimal,
    pub largest_sell_wall_volume: Decimal,
    pub spread: Decimal,
    pub sentiment: SentimentLabel,

    /// Approved alert bodies for this tick, empty when none fired
    pub alert_text: String,
}

impl ObservationRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        reference_price: Decimal,
        analysis: &Analysis,
        sentiment: SentimentLabel,
        alert_text: String,
    ) -> Self {
        Self {
            timestamp,
            reference_price,
            total_bid_volume: analysis.total_bid_volume,
            total_ask_volume: analysis.total_ask_volume,
            largest_buy_wall_price: analysis.largest_buy_wall.price,
            largest_buy_wall_volume: analysis.largest_buy_wall.volume,
            largest_sell_wall_price: analysis.largest_sell_wall.price,
            largest_sell_wall_volume: analysis.largest_sell_wall.volume,
            spread: analysis.spread,
            sentiment,
            alert_text,
        }
    }

    /// Field values in [`COLUMNS`] order
    pub fn fields(&self) -> [String; 11] {
        [
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.reference_price.normalize().to_string(),
            self.total_bid_volume.normalize().to_string(),
            self.total_ask_volume.normalize().to_string(),
            self.largest_buy_wall_price.normalize().to_string(),
            self.largest_buy_wall_volume.normalize().to_string(),
            self.largest_sell_wall_price.normalize().to_string(),
            self.largest_sell_wall_volume.normalize().to_string(),
            self.spread.normalize().to_string(),
            self.sentiment.to_string(),
            self.alert_text.clone(),
        ]
    }
}
