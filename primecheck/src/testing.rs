//! Module with testing utility functions.

#![allow(clippy::unwrap_in_result, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::config::Settings;

/// The path for the configuration file that we should use during testing.
pub const DEFAULT_CONFIG_PATH: Option<&str> = Some("./src/config/default");

impl Settings {
    /// Create a new `Settings` instance from the default configuration file.
    /// This is useful for testing.
    pub fn new_from_default_config() -> Result<Self, config::ConfigError> {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that read or write `PRIMECHECK_` environment variables.
/// `cargo test` runs tests in threads, and environment variables are
/// per-process.
pub fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears all primecheck-specific configuration environment variables.
pub fn clear_env() {
    for var in std::env::vars() {
        if var.0.starts_with("PRIMECHECK_") {
            std::env::remove_var(var.0);
        }
    }
}
