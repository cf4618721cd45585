//! Error types for provider operations

use super::ProviderId;
use thiserror::Error;

/// Failures a provider call can settle with
///
/// `Cancelled` is the mandatory settlement for a call whose cancellation
/// signal fired; it is never logged as a provider failure. A provider
/// that has no route reports that through a `None` result, not an error.
#[derive(Error, Debug)]
pub enum ProviderError {
	#[error("provider initialization failed: {provider} - {reason}")]
	Init { provider: ProviderId, reason: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("call cancelled")]
	Cancelled,

	#[error("invalid provider response: {reason}")]
	InvalidResponse { reason: String },

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("unsupported operation: {operation} for provider {provider}")]
	Unsupported {
		operation: String,
		provider: ProviderId,
	},
}

impl ProviderError {
	pub fn is_cancelled(&self) -> bool {
		matches!(self, ProviderError::Cancelled)
	}

	pub fn invalid_response(reason: impl Into<String>) -> Self {
		Self::InvalidResponse {
			reason: reason.into(),
		}
	}
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
