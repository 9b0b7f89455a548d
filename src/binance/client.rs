//! Binance HTTP Client
//!
//! HTTP client wrapper for the Binance USDⓈ-M futures public market data API.
//! Provides timeout configuration, user-agent headers, and the optional API
//! key header.

use crate::binance::types::{DepthResponse, TickerPrice};
use crate::config::credentials::SecretString;
use crate::error::ApiError;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// Binance futures REST API HTTP client
///
/// Requests are made once; a failed call is reported to the caller and not
/// retried.
#[derive(Clone)]
pub struct BinanceClient {
    /// HTTP client for making requests
    pub(crate) client: Client,
    /// Base URL for the futures API (default: https://fapi.binance.com)
    pub(crate) base_url: String,
    /// Optional API key sent as `X-MBX-APIKEY`
    pub(crate) api_key: Option<SecretString>,
}

impl std::fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl BinanceClient {
    /// Creates a client for the given base URL
    ///
    /// Default configuration:
    /// - Timeout: 10 seconds
    /// - User-Agent: whale-sentinel/<version>
    pub fn new(base_url: &str, api_key: Option<SecretString>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(10))
    }

    /// Creates a client with custom timeout
    pub fn with_timeout(
        base_url: &str,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("whale-sentinel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path_and_query: &str) -> RequestBuilder {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, path_and_query));

        match &self.api_key {
            Some(key) => request.header("X-MBX-APIKEY", key.expose_secret()),
            None => request,
        }
    }

    fn check_status(response: Response) -> Result<Response, ApiError> {
        response.error_for_status().map_err(ApiError::from)
    }

    /// Get latest price for a symbol
    ///
    /// Calls GET /fapi/v1/ticker/price
    ///
    /// # Arguments
    /// * `symbol` - Trading pair symbol (e.g., "BTCUSDT")
    pub async fn get_ticker_price(&self, symbol: &str) -> Result<TickerPrice, ApiError> {
        let response = self
            .get(&format!("/fapi/v1/ticker/price?symbol={}", symbol))
            .send()
            .await?;

        let ticker: TickerPrice = Self::check_status(response)?.json().await?;
        Ok(ticker)
    }

    /// Get order book depth
    ///
    /// Calls GET /fapi/v1/depth
    ///
    /// # Arguments
    /// * `symbol` - Trading pair symbol (e.g., "BTCUSDT")
    /// * `limit` - Levels per side (valid: 5, 10, 20, 50, 100, 500, 1000)
    pub async fn get_order_book(&self, symbol: &str, limit: u32) -> Result<DepthResponse, ApiError> {
        let response = self
            .get(&format!("/fapi/v1/depth?symbol={}&limit={}", symbol, limit))
            .send()
            .await?;

        let depth: DepthResponse = Self::check_status(response)?.json().await?;
        Ok(depth)
    }
}
