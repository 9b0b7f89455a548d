//! Whale alerts
//!
//! Bucket-based deduplication of whale candidates, alert text formatting,
//! and the sinks alerts are delivered to.

pub mod dedup;
pub mod message;
pub mod notifier;

pub use dedup::{AlertDeduplicator, AlertThresholdState};
pub use message::{format_whale_alert, with_header};
pub use notifier::{LogNotifier, NotificationSink};

#[cfg(feature = "telegram")]
pub use notifier::TelegramNotifier;
