//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default environment name.
pub const ENVIRONMENT: &str = "production";

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default number of retries after a network failure.
pub const MAX_RETRIES: u32 = 3;

/// Default delay before the first retry, in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Directory below the user configuration directory holding the config file.
pub const CONFIG_DIR_NAME: &str = "xrpl-sale";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default retry delay as Duration.
#[must_use]
pub const fn retry_delay() -> Duration {
    Duration::from_millis(RETRY_DELAY_MS)
}

/// Default location of the configuration file, if the platform has a
/// user configuration directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
