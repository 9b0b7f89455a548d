//! Order book snapshot analysis
//!
//! Pure computation over one exchange snapshot per tick:
//! - Snapshot model (bid/ask ladders as the exchange returns them)
//! - Volume aggregation, wall detection and spread
//! - Whale candidates for walls above the configured floor
//! - Bid/ask volume sentiment

pub mod analyzer;
pub mod sentiment;
pub mod types;

pub use analyzer::{OrderBookAnalyzer, DEFAULT_WHALE_FLOOR};
pub use sentiment::{classify, SentimentLabel};
pub use types::{Analysis, CandidateAlert, PriceLevel, Side, Snapshot, Wall};
