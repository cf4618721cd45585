//! Error types for quote validation

use thiserror::Error;

/// Validation errors for quote requests and normalized responses
#[derive(Error, Debug)]
pub enum QuoteValidationError {
	#[error("invalid amount: {field} - {reason}")]
	InvalidAmount { field: String, reason: String },

	#[error("invalid recipient address for {network}: {address}")]
	InvalidRecipient { network: String, address: String },

	#[error("network mismatch: {field} is {found}, expected {expected}")]
	NetworkMismatch {
		field: String,
		expected: String,
		found: String,
	},

	#[error("{field} {value} outside declared bounds [{minimum}, {maximum}]")]
	OutOfBounds {
		field: String,
		value: String,
		minimum: String,
		maximum: String,
	},

	#[error("invalid slippage tolerance: {value} (percent, 0-{maximum})")]
	InvalidSlippage { value: String, maximum: f64 },
}

/// Result type for quote validation operations
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;
