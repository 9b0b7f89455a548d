//! Shared fakes for monitor tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use whale_sentinel::alert::NotificationSink;
use whale_sentinel::error::{ApiError, DeliveryError, FetchError, WriteError};
use whale_sentinel::monitor::MarketDataSource;
use whale_sentinel::orderbook::{PriceLevel, Snapshot};
use whale_sentinel::storage::{ObservationRecord, PersistenceSink};

/// Builds a snapshot from `(price, volume)` pairs.
pub fn book(bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> Snapshot {
    let levels = |raw: &[(Decimal, Decimal)]| -> Vec<PriceLevel> {
        raw.iter()
            .map(|&(price, volume)| PriceLevel::new(price, volume))
            .collect()
    };
    Snapshot::new(
        levels(bids),
        levels(asks),
        Utc.with_ymd_and_hms(2025, 1, 18, 12, 0, 0).unwrap(),
    )
}

/// One scripted tick worth of market data.
pub enum Scripted {
    Ok(Decimal, Snapshot),
    PriceDown,
    BookDown,
}

/// Market data source replaying scripted responses.
///
/// Once the script runs out the last successful response repeats.
#[derive(Clone)]
pub struct FakeSource {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    last: Arc<Mutex<Option<(Decimal, Snapshot)>>>,
    current: Arc<Mutex<Option<Scripted>>>,
    book_delay: Duration,
    tick_starts: Arc<Mutex<Vec<Instant>>>,
    depth_requests: Arc<Mutex<Vec<u32>>>,
}

impl FakeSource {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            last: Arc::new(Mutex::new(None)),
            current: Arc::new(Mutex::new(None)),
            book_delay: Duration::ZERO,
            tick_starts: Arc::new(Mutex::new(Vec::new())),
            depth_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Makes every order book fetch take `delay`.
    pub fn with_book_delay(mut self, delay: Duration) -> Self {
        self.book_delay = delay;
        self
    }

    pub fn tick_starts(&self) -> Vec<Instant> {
        self.tick_starts.lock().unwrap().clone()
    }

    pub fn depth_requests(&self) -> Vec<u32> {
        self.depth_requests.lock().unwrap().clone()
    }

    /// Advances the script; called at the start of each tick.
    fn advance(&self) {
        let next = self.script.lock().unwrap().pop_front();
        let next = next.or_else(|| {
            self.last
                .lock()
                .unwrap()
                .clone()
                .map(|(price, snapshot)| Scripted::Ok(price, snapshot))
        });
        if let Some(Scripted::Ok(price, snapshot)) = &next {
            *self.last.lock().unwrap() = Some((*price, snapshot.clone()));
        }
        *self.current.lock().unwrap() = next;
    }
}

fn unavailable() -> ApiError {
    ApiError::ConnectionError("exchange unavailable".to_string())
}

#[async_trait]
impl MarketDataSource for FakeSource {
    async fn reference_price(&self) -> Result<Decimal, FetchError> {
        self.tick_starts.lock().unwrap().push(Instant::now());
        self.advance();

        match self.current.lock().unwrap().as_ref() {
            Some(Scripted::Ok(price, _)) => Ok(*price),
            Some(Scripted::PriceDown) => Err(FetchError::Price(unavailable())),
            Some(Scripted::BookDown) => Ok(Decimal::ONE),
            None => Err(FetchError::Price(unavailable())),
        }
    }

    async fn order_book(&self, depth_limit: u32) -> Result<Snapshot, FetchError> {
        self.depth_requests.lock().unwrap().push(depth_limit);
        if !self.book_delay.is_zero() {
            tokio::time::sleep(self.book_delay).await;
        }

        match self.current.lock().unwrap().as_ref() {
            Some(Scripted::Ok(_, snapshot)) => Ok(snapshot.clone()),
            Some(Scripted::PriceDown) => Ok(book(&[], &[])),
            Some(Scripted::BookDown) | None => Err(FetchError::Book(unavailable())),
        }
    }
}

/// Notification sink recording every message; optionally failing.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn send(&self, message: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(DeliveryError::Rejected {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        Ok(())
    }
}

/// In-memory persistence sink; optionally failing.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<ObservationRecord>>>,
    fail: bool,
}

impl MemorySink {
    pub fn failing() -> Self {
        Self {
            records: Arc::default(),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<ObservationRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistenceSink for MemorySink {
    async fn append(&self, record: &ObservationRecord) -> Result<(), WriteError> {
        if self.fail {
            return Err(WriteError::Io {
                path: "memory".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
