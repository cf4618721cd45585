//! Swap status polling
//!
//! The tracker is stateless between calls: everything needed to resume,
//! including after a process restart, lives in the handle. The layer
//! above owns interval, backoff and the stop condition.

use std::sync::Arc;

use swapkit_providers::ProviderRegistry;
use swapkit_types::{ProviderId, StatusHandle, TransactionStatus};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Failures of a single poll attempt
#[derive(Error, Debug)]
pub enum StatusError {
	#[error("no registered provider for {0}")]
	ProviderNotFound(ProviderId),

	#[error("status options must carry at least one transaction hash")]
	MissingTransactionHashes,

	/// A single failed poll; the caller retries on its next scheduled
	/// attempt, this is never fatal by itself.
	#[error("status poll against {provider} failed: {reason}")]
	Poll { provider: ProviderId, reason: String },

	#[error("status poll cancelled by caller")]
	Cancelled,
}

/// Result type for status operations
pub type StatusResult<T> = Result<T, StatusError>;

/// Stateless poller for asynchronous swap settlement
pub struct StatusTracker {
	registry: Arc<ProviderRegistry>,
}

impl StatusTracker {
	pub fn new(registry: Arc<ProviderRegistry>) -> Self {
		Self { registry }
	}

	/// Perform exactly one status lookup against the owning provider
	///
	/// Idempotent: polling a swap already in a terminal state returns the
	/// same terminal status again.
	pub async fn poll(&self, handle: &StatusHandle) -> StatusResult<TransactionStatus> {
		if handle.options.transaction_hashes.is_empty() {
			return Err(StatusError::MissingTransactionHashes);
		}

		let provider = self
			.registry
			.get(handle.provider)
			.ok_or(StatusError::ProviderNotFound(handle.provider))?;

		provider.get_status(&handle.options).await.map_err(|err| {
			warn!("status poll against {} failed: {err}", handle.provider);
			StatusError::Poll {
				provider: handle.provider,
				reason: err.to_string(),
			}
		})
	}

	/// Poll with a caller-supplied cancellation signal
	///
	/// Convenience for drivers that race a poll against shutdown; the
	/// underlying lookup itself stays a single idempotent read.
	pub async fn poll_with_signal(
		&self,
		handle: &StatusHandle,
		signal: &CancellationToken,
	) -> StatusResult<TransactionStatus> {
		if signal.is_cancelled() {
			return Err(StatusError::Cancelled);
		}

		tokio::select! {
			_ = signal.cancelled() => Err(StatusError::Cancelled),
			status = self.poll(handle) => status,
		}
	}
}
