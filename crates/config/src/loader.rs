//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

/// Load settings from the default `config/config.{toml,yaml,json}` file,
/// falling back to defaults for anything unset
pub fn load_config() -> Result<Settings, ConfigError> {
	load_config_from("config/config")
}

/// Load settings from a specific file stem
///
/// The file is optional; `SWAPKIT_`-prefixed environment variables
/// override it either way (`SWAPKIT_TIMEOUTS__GLOBAL_MS=5000`).
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(Environment::with_prefix("SWAPKIT").separator("__"))
		.build()?
		.try_deserialize()
}
