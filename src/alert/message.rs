//! Whale alert text, in Telegram Markdown

use crate::orderbook::types::{CandidateAlert, Side};

/// Marker appended to an alert body and used in the notification header
pub fn side_emoji(side: Side) -> &'static str {
    match side {
        Side::Buy => "🟢",
        Side::Sell => "🔴",
    }
}

/// Build the alert body for an approved candidate
///
/// `base_asset` is the unit the wall volume is quoted in (e.g. "BTC").
pub fn format_whale_alert(candidate: &CandidateAlert, base_asset: &str) -> String {
    let trend = match candidate.side {
        Side::Buy => "📈",
        Side::Sell => "📉",
    };

    format!(
        "💰 *Volume:* `{} {}`\n📍 *Price:* `{}`\n{} *Market Price:* `{}`\n{}",
        candidate.volume.normalize(),
        base_asset,
        candidate.wall_price.normalize(),
        trend,
        candidate.market_price.normalize(),
        side_emoji(candidate.side)
    )
}

/// Wrap an alert body with the notification header
pub fn with_header(side: Side, body: &str) -> String {
    format!("🚨 *{} Whale Alert!*\n\n{}", side_emoji(side), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_alert_body() {
        let candidate = CandidateAlert {
            side: Side::Buy,
            volume: dec!(12.500),
            wall_price: dec!(50000.00),
            market_price: dec!(50010.10),
        };

        let body = format_whale_alert(&candidate, "BTC");
        assert_eq!(
            body,
            "💰 *Volume:* `12.5 BTC`\n📍 *Price:* `50000`\n📈 *Market Price:* `50010.1`\n🟢"
        );
    }

    #[test]
    fn test_sell_alert_header() {
        let candidate = CandidateAlert {
            side: Side::Sell,
            volume: dec!(40),
            wall_price: dec!(50100),
            market_price: dec!(50000),
        };

        let message = with_header(Side::Sell, &format_whale_alert(&candidate, "ETH"));
        assert!(message.starts_with("🚨 *🔴 Whale Alert!*\n\n"));
        assert!(message.contains("📉 *Market Price:* `50000`"));
        assert!(message.contains("`40 ETH`"));
    }
}
