//! Binance futures as the monitor's market data source

use crate::binance::client::BinanceClient;
use crate::error::FetchError;
use crate::monitor::MarketDataSource;
use crate::orderbook::types::Snapshot;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Market data for one futures symbol
#[derive(Debug, Clone)]
pub struct BinanceMarketData {
    client: BinanceClient,
    symbol: String,
}

impl BinanceMarketData {
    pub fn new(client: BinanceClient, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into().to_uppercase(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[async_trait]
impl MarketDataSource for BinanceMarketData {
    async fn reference_price(&self) -> Result<Decimal, FetchError> {
        self.client
            .get_ticker_price(&self.symbol)
            .await
            .and_then(|ticker| ticker.price_decimal())
            .map_err(FetchError::Price)
    }

    async fn order_book(&self, depth_limit: u32) -> Result<Snapshot, FetchError> {
        let fetched_at = chrono::Utc::now();
        self.client
            .get_order_book(&self.symbol, depth_limit)
            .await
            .and_then(|depth| depth.into_snapshot(fetched_at))
            .map_err(FetchError::Book)
    }
}
