//! Monitor Configuration
//!
//! Polling cadence, whale floor, depth and output location for the monitor.

use crate::error::ConfigError;
use crate::orderbook::analyzer::DEFAULT_WHALE_FLOOR;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_SYMBOL: &str = "BTCUSDT";
const DEFAULT_INTERVAL_SECS: u64 = 10;
const DEFAULT_DEPTH_LIMIT: u32 = 100;
const DEFAULT_CSV_PATH: &str = "order_book_predictions.csv";

/// Default Binance USDⓈ-M futures REST endpoint
pub const DEFAULT_FUTURES_BASE_URL: &str = "https://fapi.binance.com";

/// Quote assets stripped from the symbol to name the base asset in alerts
const QUOTE_ASSETS: [&str; 4] = ["USDT", "USDC", "BUSD", "USD"];

/// Monitor configuration
///
/// ## Environment Variables
///
/// - `SENTINEL_SYMBOL`: Futures symbol to watch (default: BTCUSDT)
/// - `SENTINEL_INTERVAL_SECS`: Seconds between tick starts (default: 10)
/// - `SENTINEL_WHALE_FLOOR`: Minimum wall volume for an alert candidate (default: 10)
/// - `SENTINEL_DEPTH_LIMIT`: Levels requested per side (default: 100)
/// - `SENTINEL_CSV_PATH`: Observation log (default: order_book_predictions.csv)
/// - `BINANCE_FUTURES_BASE_URL`: REST base URL (default: https://fapi.binance.com)
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub symbol: String,
    pub interval: Duration,
    pub whale_floor: Decimal,
    pub depth_limit: u32,
    pub csv_path: PathBuf,
    pub base_url: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            whale_floor: DEFAULT_WHALE_FLOOR,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            base_url: DEFAULT_FUTURES_BASE_URL.to_string(),
        }
    }
}

impl MonitorConfig {
    /// Load monitor configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an unparsable or out-of-range value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| super::credentials::non_empty_var(name))
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let symbol = lookup("SENTINEL_SYMBOL")
            .map(|s| s.to_uppercase())
            .unwrap_or(defaults.symbol);

        let interval_secs: u64 = parse_var(&lookup, "SENTINEL_INTERVAL_SECS")?
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(invalid("SENTINEL_INTERVAL_SECS", "0", "must be at least 1"));
        }

        let whale_floor: Decimal =
            parse_var(&lookup, "SENTINEL_WHALE_FLOOR")?.unwrap_or(defaults.whale_floor);
        if whale_floor <= Decimal::ZERO {
            return Err(invalid(
                "SENTINEL_WHALE_FLOOR",
                &whale_floor.to_string(),
                "must be positive",
            ));
        }

        let depth_limit: u32 =
            parse_var(&lookup, "SENTINEL_DEPTH_LIMIT")?.unwrap_or(DEFAULT_DEPTH_LIMIT);
        if depth_limit == 0 {
            return Err(invalid("SENTINEL_DEPTH_LIMIT", "0", "must be at least 1"));
        }

        let csv_path = lookup("SENTINEL_CSV_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.csv_path);

        let base_url = lookup("BINANCE_FUTURES_BASE_URL").unwrap_or(defaults.base_url);

        Ok(Self {
            symbol,
            interval: Duration::from_secs(interval_secs),
            whale_floor,
            depth_limit,
            csv_path,
            base_url,
        })
    }

    /// Asset the wall volume is denominated in (e.g. "BTC" for BTCUSDT)
    pub fn base_asset(&self) -> &str {
        QUOTE_ASSETS
            .iter()
            .find_map(|quote| self.symbol.strip_suffix(quote))
            .filter(|base| !base.is_empty())
            .unwrap_or(self.symbol.as_str())
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| invalid(name, &raw, &e.to_string())),
    }
}

fn invalid(name: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
