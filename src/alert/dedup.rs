//! Whale alert suppression
//!
//! Alerts fire only when a wall's volume moves into a higher 10-unit bucket
//! than the last volume alerted on that side. The baseline becomes the
//! alerted volume itself, not the bucket floor, and nothing fires when a
//! wall shrinks or disappears.

use crate::orderbook::types::Side;
use rust_decimal::Decimal;

/// Width of one alert bucket
pub const BUCKET_SIZE: Decimal = Decimal::TEN;

/// Last alerted wall volume per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertThresholdState {
    pub last_alerted_buy_volume: Decimal,
    pub last_alerted_sell_volume: Decimal,
}

impl AlertThresholdState {
    pub fn last_alerted(&self, side: Side) -> Decimal {
        match side {
            Side::Buy => self.last_alerted_buy_volume,
            Side::Sell => self.last_alerted_sell_volume,
        }
    }
}

fn bucket(volume: Decimal) -> Decimal {
    (volume / BUCKET_SIZE).floor()
}

/// Per-side bucket-crossing deduplicator
#[derive(Debug, Clone, Default)]
pub struct AlertDeduplicator {
    state: AlertThresholdState,
}

impl AlertDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a known threshold state
    pub fn with_state(state: AlertThresholdState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AlertThresholdState {
        &self.state
    }

    /// Whether `volume` crosses into a bucket above the last alerted one
    pub fn should_alert(&self, side: Side, volume: Decimal) -> bool {
        bucket(volume) > bucket(self.state.last_alerted(side))
    }

    /// Make `volume` the new baseline for `side`
    pub fn record_alert(&mut self, side: Side, volume: Decimal) {
        match side {
            Side::Buy => self.state.last_alerted_buy_volume = volume,
            Side::Sell => self.state.last_alerted_sell_volume = volume,
        }
    }
}
