//! Volume-based market sentiment

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

/// Sentiment derived from resting bid vs ask volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    /// Colored marker used in log lines and notifications
    pub fn indicator(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "🟢",
            SentimentLabel::Bearish => "🔴",
            SentimentLabel::Neutral => "⚪",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Bullish => "Bullish",
            SentimentLabel::Bearish => "Bearish",
            SentimentLabel::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

pub fn classify(total_bid_volume: Decimal, total_ask_volume: Decimal) -> SentimentLabel {
    match total_bid_volume.cmp(&total_ask_volume) {
        Ordering::Greater => SentimentLabel::Bullish,
        Ordering::Less => SentimentLabel::Bearish,
        Ordering::Equal => SentimentLabel::Neutral,
    }
}
