//! Configuration settings structures

use serde::{Deserialize, Serialize};
use swapkit_types::constants::limits::{
	DEFAULT_CANCEL_GRACE_MS, DEFAULT_GLOBAL_TIMEOUT_MS, DEFAULT_SLIPPAGE, MAX_CANCEL_GRACE_MS,
	MAX_GLOBAL_TIMEOUT_MS, MAX_SLIPPAGE_PERCENT, MIN_GLOBAL_TIMEOUT_MS,
};
use thiserror::Error;

/// Main engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub timeouts: TimeoutSettings,
	pub quotes: QuoteSettings,
	pub logging: LoggingSettings,
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Aggregation deadline for a quote fan-out, in milliseconds
	pub global_ms: u64,
	/// Grace period for cancelled provider calls to settle before their
	/// futures are dropped, in milliseconds
	pub cancel_grace_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			global_ms: DEFAULT_GLOBAL_TIMEOUT_MS,
			cancel_grace_ms: DEFAULT_CANCEL_GRACE_MS,
		}
	}
}

/// Quote policy defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
	/// Slippage tolerance applied when the caller does not pass one,
	/// percent string
	pub default_slippage: String,
}

impl Default for QuoteSettings {
	fn default() -> Self {
		Self {
			default_slippage: DEFAULT_SLIPPAGE.to_string(),
		}
	}
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Compact,
			structured: false,
		}
	}
}

/// Log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Settings rejected at engine construction
#[derive(Error, Debug)]
pub enum SettingsError {
	#[error("invalid timeout: {reason}")]
	InvalidTimeout { reason: String },

	#[error("invalid default slippage: {value}")]
	InvalidSlippage { value: String },
}

impl Settings {
	/// Applied validations:
	/// - **timeouts.global_ms**: within the allowed aggregation window
	/// - **timeouts.cancel_grace_ms**: bounded, and below the global
	///   deadline
	/// - **quotes.default_slippage**: parses as a percentage within range
	pub fn validate(&self) -> Result<(), SettingsError> {
		let global = self.timeouts.global_ms;
		if !(MIN_GLOBAL_TIMEOUT_MS..=MAX_GLOBAL_TIMEOUT_MS).contains(&global) {
			return Err(SettingsError::InvalidTimeout {
				reason: format!(
					"global_ms {global} outside {MIN_GLOBAL_TIMEOUT_MS}-{MAX_GLOBAL_TIMEOUT_MS}"
				),
			});
		}

		let grace = self.timeouts.cancel_grace_ms;
		if grace > MAX_CANCEL_GRACE_MS {
			return Err(SettingsError::InvalidTimeout {
				reason: format!("cancel_grace_ms {grace} above {MAX_CANCEL_GRACE_MS}"),
			});
		}
		if grace >= global {
			return Err(SettingsError::InvalidTimeout {
				reason: format!("cancel_grace_ms {grace} must be below global_ms {global}"),
			});
		}

		let slippage = &self.quotes.default_slippage;
		let parsed: f64 = slippage
			.parse()
			.map_err(|_| SettingsError::InvalidSlippage {
				value: slippage.clone(),
			})?;
		if !(0.0..=MAX_SLIPPAGE_PERCENT).contains(&parsed) {
			return Err(SettingsError::InvalidSlippage {
				value: slippage.clone(),
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		assert!(Settings::default().validate().is_ok());
	}

	#[test]
	fn test_timeout_bounds() {
		let mut settings = Settings::default();
		settings.timeouts.global_ms = 10;
		assert!(settings.validate().is_err());

		settings.timeouts.global_ms = 5_000;
		settings.timeouts.cancel_grace_ms = 5_000;
		assert!(settings.validate().is_err());

		settings.timeouts.cancel_grace_ms = 200;
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_slippage_bounds() {
		let mut settings = Settings::default();
		settings.quotes.default_slippage = "150".to_string();
		assert!(settings.validate().is_err());

		settings.quotes.default_slippage = "1.5".to_string();
		assert!(settings.validate().is_ok());
	}
}
