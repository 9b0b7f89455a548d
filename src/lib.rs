// Library exports for whale-sentinel

pub mod error;

pub mod alert; // Whale alert deduplication and delivery
pub mod binance; // Binance futures API client
pub mod config; // Configuration management
pub mod monitor; // Fixed-cadence tick loop
pub mod orderbook; // Snapshot analysis and sentiment
pub mod storage; // Observation persistence

#[cfg(test)]
mod test_support;
