//! Swap status models
//!
//! Status polling is stateless: everything needed to resume after a
//! process restart lives in the `StatusOptions` bag.

use crate::providers::ProviderId;
use serde::{Deserialize, Serialize};

/// Externally reported status of a submitted swap
///
/// `Pending` is the only non-terminal state; there is no transition out
/// of `Success` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
	Pending,
	Success,
	Failed,
}

impl TransactionStatus {
	pub fn is_terminal(&self) -> bool {
		!matches!(self, TransactionStatus::Pending)
	}
}

impl std::fmt::Display for TransactionStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			TransactionStatus::Pending => "pending",
			TransactionStatus::Success => "success",
			TransactionStatus::Failed => "failed",
		};
		f.write_str(name)
	}
}

/// Provider-defined resume state for status lookups
///
/// The transaction hashes are mandatory; anything else a provider needs
/// to resume a lookup rides in the flattened extra bag and round-trips
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusOptions {
	pub transaction_hashes: Vec<String>,
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StatusOptions {
	pub fn new(transaction_hashes: Vec<String>) -> Self {
		Self {
			transaction_hashes,
			extra: serde_json::Map::new(),
		}
	}

	pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
		self.extra.insert(key.into(), value);
		self
	}
}

/// Resumable polling handle: the options bag plus the provider that owns
/// the swap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusHandle {
	pub options: StatusOptions,
	pub provider: ProviderId,
}
