//! Notification sinks
//!
//! Delivery is fire-and-forget from the monitor's point of view: a failed
//! send is logged and reported, never retried.

use crate::error::DeliveryError;
use async_trait::async_trait;
use tracing::{info, warn};

#[cfg(feature = "telegram")]
use crate::config::credentials::SecretString;
#[cfg(feature = "telegram")]
use reqwest::Client;
#[cfg(feature = "telegram")]
use serde::Serialize;
#[cfg(feature = "telegram")]
use std::time::Duration;

/// Destination for approved whale alerts
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: &str) -> Result<(), DeliveryError>;
}

#[async_trait]
impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    async fn send(&self, message: &str) -> Result<(), DeliveryError> {
        (**self).send(message).await
    }
}

/// Sink that only writes alerts to the log
///
/// Used when no chat transport is configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn send(&self, message: &str) -> Result<(), DeliveryError> {
        warn!(target: "whale_alert", "{}", message);
        Ok(())
    }
}

/// Default Telegram Bot API endpoint
#[cfg(feature = "telegram")]
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Request body for the Bot API sendMessage method
#[cfg(feature = "telegram")]
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Telegram Bot API sink
#[cfg(feature = "telegram")]
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    base_url: String,
    bot_token: SecretString,
    chat_id: String,
}

#[cfg(feature = "telegram")]
impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("base_url", &self.base_url)
            .field("bot_token", &self.bot_token)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[cfg(feature = "telegram")]
impl TelegramNotifier {
    /// Creates a notifier against the public Bot API
    pub fn new(bot_token: SecretString, chat_id: String) -> Result<Self, reqwest::Error> {
        Self::with_base_url(TELEGRAM_API_URL, bot_token, chat_id)
    }

    /// Creates a notifier against a custom Bot API host
    pub fn with_base_url(
        base_url: &str,
        bot_token: SecretString,
        chat_id: String,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("whale-sentinel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token,
            chat_id,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url,
            self.bot_token.expose_secret()
        )
    }
}

#[cfg(feature = "telegram")]
#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<(), DeliveryError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: message,
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(chat_id = %self.chat_id, "Telegram alert sent");
        Ok(())
    }
}
