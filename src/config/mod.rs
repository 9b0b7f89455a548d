//! Configuration Management
//!
//! This module handles loading the monitor settings and optional credentials
//! from the environment.

pub mod credentials;
pub mod monitor;

// Re-export
pub use credentials::{SecretString, TelegramCredentials};
pub use monitor::MonitorConfig;
