//! Secret handling for exchange and chat credentials
//!
//! Secrets are loaded from environment variables, never logged, and masked
//! when displayed.

use crate::error::ConfigError;
use std::fmt;

/// Secure string wrapper that masks sensitive data in logs
///
/// Debug output shows only `SecretString(***)` and Display shows the
/// truncated form `first4...last4`.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns a reference to the inner string
    ///
    /// Only use this when building the outgoing request.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Format: `first4...last4` (e.g., "abcd...wxyz")
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.len() <= 8 || !s.is_char_boundary(4) || !s.is_char_boundary(s.len() - 4) {
            return "***".to_string();
        }
        format!("{}...{}", &s[..4], &s[s.len() - 4..])
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

/// Telegram bot credentials
#[derive(Clone, Debug)]
pub struct TelegramCredentials {
    pub bot_token: SecretString,
    pub chat_id: String,
}

impl TelegramCredentials {
    /// Loads `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`
    ///
    /// Returns `Ok(None)` when neither is set.
    ///
    /// # Errors
    /// `ConfigError::Incomplete` when only one of the two is set.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let bot_token = non_empty_var("TELEGRAM_BOT_TOKEN");
        let chat_id = non_empty_var("TELEGRAM_CHAT_ID");

        match (bot_token, chat_id) {
            (Some(bot_token), Some(chat_id)) => Ok(Some(Self {
                bot_token: SecretString::new(bot_token),
                chat_id,
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::Incomplete(
                "TELEGRAM_BOT_TOKEN is set but TELEGRAM_CHAT_ID is missing".to_string(),
            )),
            (None, Some(_)) => Err(ConfigError::Incomplete(
                "TELEGRAM_CHAT_ID is set but TELEGRAM_BOT_TOKEN is missing".to_string(),
            )),
        }
    }
}

/// Optional Binance API key, sent with public requests for higher limits
pub fn binance_api_key_from_env() -> Option<SecretString> {
    non_empty_var("BINANCE_API_KEY").map(SecretString::new)
}

/// Returns the trimmed value of an environment variable if it is non-empty
pub(crate) fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_masking() {
        let secret = SecretString::new("abcdefghijklmnop".to_string());
        assert_eq!(secret.masked(), "abcd...mnop");
        assert_eq!(format!("{:?}", secret), "SecretString(***)");
        assert_eq!(SecretString::new("short".to_string()).to_string(), "***");
    }

    #[test]
    fn test_telegram_credentials_pairing() {
        // SAFETY: Test-only code; these variables are only touched by this test
        unsafe {
            std::env::remove_var("TELEGRAM_BOT_TOKEN");
            std::env::remove_var("TELEGRAM_CHAT_ID");
        }
        assert!(TelegramCredentials::from_env().unwrap().is_none());

        unsafe {
            std::env::set_var("TELEGRAM_BOT_TOKEN", "123456:token-value");
        }
        assert!(matches!(
            TelegramCredentials::from_env(),
            Err(ConfigError::Incomplete(_))
        ));

        unsafe {
            std::env::set_var("TELEGRAM_CHAT_ID", " -4695344604 ");
        }
        let creds = TelegramCredentials::from_env().unwrap().unwrap();
        assert_eq!(creds.chat_id, "-4695344604");
        assert_eq!(creds.bot_token.expose_secret(), "123456:token-value");

        unsafe {
            std::env::remove_var("TELEGRAM_BOT_TOKEN");
            std::env::remove_var("TELEGRAM_CHAT_ID");
        }
    }
}
