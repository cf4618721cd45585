//! Swapkit Config
//!
//! Settings model and file loading for the swap engine.

pub mod loader;
pub mod settings;

pub use loader::{load_config, load_config_from};
pub use settings::{
	LogFormat, LoggingSettings, QuoteSettings, Settings, SettingsError, TimeoutSettings,
};
