use thiserror::Error;

use crate::orderbook::types::Side;

/// Exchange API errors (HTTP transport and response decoding)
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::ConnectionError(_) => "connection_error",
            ApiError::RateLimitError(_) => "rate_limit",
            ApiError::ParseError(_) => "parse_error",
            ApiError::InternalError(_) => "internal_error",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::ConnectionError(
                "Request timeout. Please check your internet connection.".to_string(),
            )
        } else if err.is_connect() {
            ApiError::ConnectionError(
                "Failed to connect to Binance API. Please check your internet connection."
                    .to_string(),
            )
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => ApiError::RateLimitError(
                    "Too many requests to Binance API. Retry after 60 seconds.".to_string(),
                ),
                418 => ApiError::ConnectionError(
                    "IP address banned by Binance. Please contact support.".to_string(),
                ),
                403 => ApiError::ConnectionError(
                    "WAF limit violated. Please reduce request frequency.".to_string(),
                ),
                500..=599 => ApiError::ConnectionError(format!(
                    "Binance server error (HTTP {}). Please try again later.",
                    status.as_u16()
                )),
                _ => ApiError::InternalError(format!("HTTP error: {}", status)),
            }
        } else if err.is_decode() {
            ApiError::ParseError(format!("Response decoding failed: {}", err))
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ParseError(format!("JSON parsing failed: {}", err))
    }
}

/// Market data could not be obtained for this tick
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("reference price fetch failed: {0}")]
    Price(#[source] ApiError),

    #[error("order book fetch failed: {0}")]
    Book(#[source] ApiError),
}

/// Snapshot could not be analyzed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("order book has no {side} levels")]
    EmptyBook { side: Side },
}

/// Notification was not delivered
///
/// Transport errors must have their request URL stripped before wrapping,
/// since chat transports may carry credentials in the path.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("notification transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("notification rejected (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Observation could not be persisted
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("persistence task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Invalid or missing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Incomplete(String),
}

/// Failure that ends a single tick early
///
/// Delivery failures are not tick errors; they are reported on the
/// successful [`TickReport`](crate::monitor::TickReport).
#[derive(Error, Debug)]
pub enum TickError {
    #[error("fetch step failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("analysis step failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("persist step failed: {0}")]
    Persist(#[from] WriteError),
}

impl TickError {
    /// Short name of the step that failed, used as a log field
    pub fn step(&self) -> &'static str {
        match self {
            TickError::Fetch(_) => "fetch",
            TickError::Analysis(_) => "analyze",
            TickError::Persist(_) => "persist",
        }
    }
}
