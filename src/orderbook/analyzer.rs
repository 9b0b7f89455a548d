//! Order book analysis
//!
//! Single-pass aggregation over one snapshot:
//! - Total resting volume per side
//! - Largest wall per side (first level wins on ties)
//! - Best bid/ask and spread
//! - Whale candidates for walls at or above the configured floor

use crate::error::AnalysisError;
use crate::orderbook::types::{Analysis, CandidateAlert, PriceLevel, Side, Snapshot, Wall};
use rust_decimal::Decimal;

/// Default minimum wall volume for a whale candidate
pub const DEFAULT_WHALE_FLOOR: Decimal = Decimal::TEN;

/// Stateless snapshot analyzer
#[derive(Debug, Clone, Copy)]
pub struct OrderBookAnalyzer {
    whale_floor: Decimal,
}

impl OrderBookAnalyzer {
    pub fn new(whale_floor: Decimal) -> Self {
        Self { whale_floor }
    }

    pub fn whale_floor(&self) -> Decimal {
        self.whale_floor
    }

    /// Analyze one snapshot
    ///
    /// # Errors
    /// `AnalysisError::EmptyBook` if either side has no levels.
    pub fn analyze(&self, snapshot: &Snapshot) -> Result<Analysis, AnalysisError> {
        let bids = snapshot.bids();
        let asks = snapshot.asks();

        let best_bid = bids
            .first()
            .ok_or(AnalysisError::EmptyBook { side: Side::Buy })?
            .price;
        let best_ask = asks
            .first()
            .ok_or(AnalysisError::EmptyBook { side: Side::Sell })?
            .price;

        let (total_bid_volume, largest_buy_wall) = aggregate_side(bids);
        let (total_ask_volume, largest_sell_wall) = aggregate_side(asks);

        let mut candidates = Vec::with_capacity(2);
        if largest_buy_wall.volume >= self.whale_floor {
            candidates.push(CandidateAlert {
                side: Side::Buy,
                volume: largest_buy_wall.volume,
                wall_price: largest_buy_wall.price,
                market_price: best_ask,
            });
        }
        if largest_sell_wall.volume >= self.whale_floor {
            candidates.push(CandidateAlert {
                side: Side::Sell,
                volume: largest_sell_wall.volume,
                wall_price: largest_sell_wall.price,
                market_price: best_bid,
            });
        }

        Ok(Analysis {
            total_bid_volume,
            total_ask_volume,
            best_bid,
            best_ask,
            largest_buy_wall,
            largest_sell_wall,
            spread: best_ask - best_bid,
            candidates,
        })
    }
}

impl Default for OrderBookAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_WHALE_FLOOR)
    }
}

/// Sum volumes and pick the largest level of a non-empty ladder
///
/// Only a strictly larger volume replaces the current wall, so ties keep
/// the level closest to the top of the book.
fn aggregate_side(levels: &[PriceLevel]) -> (Decimal, Wall) {
    let mut total = Decimal::ZERO;
    let mut wall = levels[0];

    for level in levels {
        total += level.volume;
        if level.volume > wall.volume {
            wall = *level;
        }
    }

    (total, wall)
}
