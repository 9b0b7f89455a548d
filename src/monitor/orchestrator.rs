//! Tick orchestration and loop cadence
//!
//! The loop waits `interval - elapsed` after each tick, measured from the
//! tick's start, so ticks stay on a fixed cadence. A tick that overruns the
//! interval is followed immediately by the next one.

use super::MarketDataSource;
use crate::alert::dedup::{AlertDeduplicator, AlertThresholdState};
use crate::alert::message::{format_whale_alert, with_header};
use crate::alert::notifier::NotificationSink;
use crate::config::MonitorConfig;
use crate::error::{DeliveryError, TickError};
use crate::orderbook::analyzer::OrderBookAnalyzer;
use crate::orderbook::sentiment::classify;
use crate::orderbook::types::{CandidateAlert, Side};
use crate::storage::{ObservationRecord, PersistenceSink};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Separator between alert bodies when both sides alert in one tick
const ALERT_SEPARATOR: &str = "\n\n";

/// Time to wait before the next tick starts
pub fn next_delay(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Outcome of a tick that reached persistence
#[derive(Debug)]
pub struct TickReport {
    /// Row written for this tick
    pub record: ObservationRecord,

    /// Candidates that crossed a new bucket and were dispatched
    pub approved: Vec<CandidateAlert>,

    /// Candidates held back by the deduplicator
    pub suppressed: Vec<CandidateAlert>,

    /// Dispatches that failed; the threshold was still recorded
    pub delivery_failures: Vec<(Side, DeliveryError)>,
}

/// Drives ticks against a market data source, notification sink and
/// persistence sink
pub struct TickOrchestrator<M, N, P> {
    source: M,
    notifier: N,
    sink: P,
    analyzer: OrderBookAnalyzer,
    dedup: AlertDeduplicator,
    symbol: String,
    base_asset: String,
    depth_limit: u32,
    interval: Duration,
}

impl<M, N, P> TickOrchestrator<M, N, P>
where
    M: MarketDataSource,
    N: NotificationSink,
    P: PersistenceSink,
{
    pub fn new(config: &MonitorConfig, source: M, notifier: N, sink: P) -> Self {
        Self {
            source,
            notifier,
            sink,
            analyzer: OrderBookAnalyzer::new(config.whale_floor),
            dedup: AlertDeduplicator::new(),
            symbol: config.symbol.clone(),
            base_asset: config.base_asset().to_string(),
            depth_limit: config.depth_limit,
            interval: config.interval,
        }
    }

    /// Start from a previously known alert state instead of zero
    pub fn with_threshold_state(mut self, state: AlertThresholdState) -> Self {
        self.dedup = AlertDeduplicator::with_state(state);
        self
    }

    pub fn threshold_state(&self) -> &AlertThresholdState {
        self.dedup.state()
    }

    /// Run one tick to completion
    ///
    /// # Errors
    /// - `TickError::Fetch` if the price or the book could not be fetched
    /// - `TickError::Analysis` if the book has an empty side
    /// - `TickError::Persist` if the observation could not be written
    ///
    /// Notification failures do not fail the tick; they are listed in
    /// [`TickReport::delivery_failures`].
    pub async fn tick(&mut self) -> Result<TickReport, TickError> {
        let (reference_price, snapshot) = tokio::try_join!(
            self.source.reference_price(),
            self.source.order_book(self.depth_limit)
        )?;

        let analysis = self.analyzer.analyze(&snapshot)?;

        let mut approved = Vec::new();
        let mut suppressed = Vec::new();
        let mut delivery_failures = Vec::new();
        let mut alert_bodies = Vec::new();

        for candidate in &analysis.candidates {
            if !self.dedup.should_alert(candidate.side, candidate.volume) {
                debug!(
                    side = %candidate.side,
                    volume = %candidate.volume,
                    last_alerted = %self.dedup.state().last_alerted(candidate.side),
                    "Whale candidate within alerted bucket, suppressed"
                );
                suppressed.push(*candidate);
                continue;
            }

            let body = format_whale_alert(candidate, &self.base_asset);
            warn!(
                symbol = %self.symbol,
                side = %candidate.side,
                volume = %candidate.volume,
                wall_price = %candidate.wall_price,
                market_price = %candidate.market_price,
                "Whale order detected"
            );

            if let Err(e) = self.notifier.send(&with_header(candidate.side, &body)).await {
                error!(side = %candidate.side, error = %e, "Failed to deliver whale alert");
                delivery_failures.push((candidate.side, e));
            }

            self.dedup.record_alert(candidate.side, candidate.volume);
            approved.push(*candidate);
            alert_bodies.push(body);
        }

        let sentiment = classify(analysis.total_bid_volume, analysis.total_ask_volume);

        let record = ObservationRecord::new(
            snapshot.observed_at(),
            reference_price,
            &analysis,
            sentiment,
            alert_bodies.join(ALERT_SEPARATOR),
        );

        self.sink.append(&record).await?;

        info!(
            symbol = %self.symbol,
            price = %reference_price,
            buy_wall = %analysis.largest_buy_wall.volume,
            sell_wall = %analysis.largest_sell_wall.volume,
            spread = %analysis.spread,
            "{} {}",
            sentiment,
            sentiment.indicator()
        );

        Ok(TickReport {
            record,
            approved,
            suppressed,
            delivery_failures,
        })
    }

    /// Tick forever on a fixed cadence until `shutdown` fires or closes
    ///
    /// Shutdown is only observed between ticks; an in-flight tick always
    /// completes.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        info!(
            symbol = %self.symbol,
            interval_secs = self.interval.as_secs(),
            depth_limit = self.depth_limit,
            whale_floor = %self.analyzer.whale_floor(),
            "Starting order book monitor"
        );

        loop {
            let started = Instant::now();

            match self.tick().await {
                Ok(report) => {
                    if !report.delivery_failures.is_empty() {
                        warn!(
                            failed = report.delivery_failures.len(),
                            "Tick completed with undelivered alerts"
                        );
                    }
                }
                Err(e) => {
                    error!(step = e.step(), error = %e, "Tick failed");
                }
            }

            let delay = next_delay(self.interval, started.elapsed());
            if delay.is_zero() {
                debug!("Tick overran interval, starting next tick immediately");
            }

            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!("Shutting down order book monitor...");
                    break;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
