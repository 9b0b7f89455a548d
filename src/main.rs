use anyhow::Context;
use tracing_subscriber::EnvFilter;
use whale_sentinel::alert::{LogNotifier, NotificationSink};
use whale_sentinel::binance::{BinanceClient, BinanceMarketData};
use whale_sentinel::config::{credentials, MonitorConfig, TelegramCredentials};
use whale_sentinel::monitor::TickOrchestrator;
use whale_sentinel::storage::CsvSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().skip(1).any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let config = MonitorConfig::from_env().context("Invalid monitor configuration")?;
    tracing::info!("Starting whale-sentinel for {}...", config.symbol);

    let api_key = credentials::binance_api_key_from_env();
    if api_key.is_none() {
        tracing::info!("BINANCE_API_KEY not set - using anonymous public market data access");
    }
    let client = BinanceClient::new(&config.base_url, api_key)
        .context("Failed to create Binance client")?;
    let source = BinanceMarketData::new(client, config.symbol.clone());

    let notifier = build_notifier()?;

    let sink = CsvSink::initialize(&config.csv_path)
        .await
        .with_context(|| format!("Failed to initialize {}", config.csv_path.display()))?;

    // Create graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel::<()>(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received shutdown signal (Ctrl+C)");
                let _ = shutdown_tx.send(());
            }
            Err(err) => {
                tracing::error!("Failed to listen for shutdown signal: {}", err);
                // Keep the sender alive so the monitor is not stopped by a closed channel
                std::future::pending::<()>().await;
            }
        }
    });

    TickOrchestrator::new(&config, source, notifier, sink)
        .run(shutdown_rx)
        .await;

    tracing::info!("Monitor stopped");
    Ok(())
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Telegram when configured, log-only otherwise
fn build_notifier() -> anyhow::Result<Box<dyn NotificationSink>> {
    match TelegramCredentials::from_env()? {
        #[cfg(feature = "telegram")]
        Some(creds) => {
            tracing::info!(chat_id = %creds.chat_id, "Telegram alerts enabled");
            let notifier =
                whale_sentinel::alert::TelegramNotifier::new(creds.bot_token, creds.chat_id)
                    .context("Failed to create Telegram client")?;
            Ok(Box::new(notifier))
        }
        #[cfg(not(feature = "telegram"))]
        Some(_) => {
            tracing::warn!("Telegram credentials set but the telegram feature is disabled");
            Ok(Box::new(LogNotifier))
        }
        None => {
            tracing::warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID not set - alerts go to the log only");
            Ok(Box::new(LogNotifier))
        }
    }
}

/// Print usage information
fn print_usage() {
    println!("whale-sentinel - Binance futures order book whale monitor");
    println!();
    println!("USAGE:");
    println!("    whale-sentinel");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    SENTINEL_SYMBOL             Futures symbol to watch (default: BTCUSDT)");
    println!("    SENTINEL_INTERVAL_SECS      Seconds between tick starts (default: 10)");
    println!("    SENTINEL_WHALE_FLOOR        Minimum wall volume for an alert (default: 10)");
    println!("    SENTINEL_DEPTH_LIMIT        Order book levels per side (default: 100)");
    println!("    SENTINEL_CSV_PATH           Observation log (default: order_book_predictions.csv)");
    println!("    BINANCE_FUTURES_BASE_URL    REST base URL (default: https://fapi.binance.com)");
    println!("    BINANCE_API_KEY             Binance API key (optional)");
    println!("    TELEGRAM_BOT_TOKEN          Telegram bot token (optional)");
    println!("    TELEGRAM_CHAT_ID            Telegram chat to alert (required with token)");
    println!("    RUST_LOG                    Logging level (default: info)");
}
