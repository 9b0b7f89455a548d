//! Fixed-cadence order book monitor
//!
//! One tick = fetch → analyze → deduplicate/notify → classify → persist.
//! Ticks never overlap, and a failed tick is logged and skipped without
//! stopping the loop.

pub mod orchestrator;

use crate::error::FetchError;
use crate::orderbook::types::Snapshot;
use async_trait::async_trait;
use rust_decimal::Decimal;

pub use orchestrator::{next_delay, TickOrchestrator, TickReport};

/// Source of the reference price and order book for the watched symbol
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Latest traded price
    ///
    /// # Errors
    /// `FetchError::Price` when the exchange cannot be reached or replies badly.
    async fn reference_price(&self) -> Result<Decimal, FetchError>;

    /// Order book with up to `depth_limit` levels per side
    ///
    /// # Errors
    /// `FetchError::Book` when the exchange cannot be reached or replies badly.
    async fn order_book(&self, depth_limit: u32) -> Result<Snapshot, FetchError>;
}
