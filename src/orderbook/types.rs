//! Order book data structures and types
//!
//! Core entities for single-snapshot analysis: the normalized book read, the
//! derived analysis, and the whale candidates handed to the alert layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Side of the book a wall or alert belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Bid side (buy wall, support)
    Buy,

    /// Ask side (sell wall, resistance)
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// One resting price level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    pub price: Decimal,
    pub volume: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, volume: Decimal) -> Self {
        Self { price, volume }
    }
}

/// One order book read
///
/// Bids are ordered best (highest) first and asks best (lowest) first, as
/// the exchange returns them. The snapshot is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
    observed_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>, observed_at: DateTime<Utc>) -> Self {
        Self {
            bids,
            asks,
            observed_at,
        }
    }

    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// The largest resting level on one side
pub type Wall = PriceLevel;

/// A wall large enough to be considered for a whale alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateAlert {
    pub side: Side,

    /// Volume resting at the wall
    pub volume: Decimal,

    /// Price of the wall level
    pub wall_price: Decimal,

    /// Best price on the opposite side (best ask for buys, best bid for sells)
    pub market_price: Decimal,
}

/// Aggregates derived from one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub total_bid_volume: Decimal,
    pub total_ask_volume: Decimal,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub largest_buy_wall: Wall,
    pub largest_sell_wall: Wall,

    /// best_ask - best_bid; non-positive on a crossed or locked book
    pub spread: Decimal,

    /// At most one candidate per side, buy first
    pub candidates: Vec<CandidateAlert>,
}

impl Analysis {
    pub fn candidate(&self, side: Side) -> Option<&CandidateAlert> {
        self.candidates.iter().find(|c| c.side == side)
    }
}
