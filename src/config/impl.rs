use std::sync::{Arc, OnceLock};

use super::{DEFAULT_CONFIG_PATH, StaticConfig};

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to loading [`DEFAULT_CONFIG_PATH`] if [`init_config`] was never
/// called.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| Arc::new(StaticConfig::load(DEFAULT_CONFIG_PATH)))
        .clone()
}

/// Initialize the global configuration from `path`
///
/// Only the first call has an effect.
///
/// # Examples
/// ```no_run
/// use shorty::config::init_config;
/// init_config("config.toml");
/// ```
pub fn init_config(path: &str) {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load(path)));
}
