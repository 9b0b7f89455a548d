//! Binance API Client
//!
//! This module contains the HTTP client for the Binance futures market data
//! endpoints and its adapter to the monitor's market data source.

pub mod client;
pub mod market;
pub mod types;

// Re-export commonly used types
pub use client::BinanceClient;
pub use market::BinanceMarketData;
pub use types::{DepthResponse, TickerPrice};
