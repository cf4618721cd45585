//! Core provider trait for liquidity backend implementations

use super::{ProviderId, ProviderResult};
use crate::models::{FromTokenCatalog, SupportedNetwork, ToTokenCatalog, Token};
use crate::quotes::{ProviderQuote, QuoteMeta, QuoteOptions, SwapQuote};
use crate::status::{StatusHandle, StatusOptions, TransactionStatus};
use crate::swaps::ProviderSwap;
use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

/// Per-call context shared by every concurrent provider call of one
/// request; the signal is the only cancellation mechanism providers see
#[derive(Debug, Clone, Default)]
pub struct ProviderContext {
	pub signal: CancellationToken,
}

impl ProviderContext {
	pub fn new(signal: CancellationToken) -> Self {
		Self { signal }
	}

	/// Derive a context whose signal also fires when this one is cancelled
	pub fn child(&self) -> Self {
		Self {
			signal: self.signal.child_token(),
		}
	}

	pub fn is_cancelled(&self) -> bool {
		self.signal.is_cancelled()
	}
}

/// Contract every liquidity/bridge backend implements
///
/// Cancellation contract: `get_quote` and `get_swap` must observe
/// `ctx.signal`, abort their in-flight I/O when it fires, and settle with
/// `ProviderError::Cancelled` rather than a value.
#[async_trait]
pub trait SwapProvider: Send + Sync + Debug {
	fn id(&self) -> ProviderId;

	/// The source network this provider instance serves
	fn network(&self) -> SupportedNetwork;

	/// One-time setup, e.g. fetching the provider's supported-token
	/// catalog. Failure disables the provider for the session. Must be
	/// safe to call once before first use.
	async fn init(&self, token_list: &[Token]) -> ProviderResult<()>;

	/// Snapshot of the cached source-side token catalog
	fn get_from_tokens(&self) -> FromTokenCatalog;

	/// Snapshot of the cached destination-side token catalog
	fn get_to_tokens(&self) -> ToTokenCatalog;

	/// Price the requested pair. `None` means the provider has no route
	/// for it, which is a normal outcome, not a failure.
	async fn get_quote(
		&self,
		options: &QuoteOptions,
		meta: &QuoteMeta,
		ctx: &ProviderContext,
	) -> ProviderResult<Option<ProviderQuote>>;

	/// Materialize the unsigned transaction sequence for a previously
	/// issued quote. `None` means the quote is no longer executable and
	/// the caller must re-quote.
	async fn get_swap(
		&self,
		quote: &SwapQuote,
		ctx: &ProviderContext,
	) -> ProviderResult<Option<ProviderSwap>>;

	/// Current status of a submitted swap. Idempotent read, safe to call
	/// repeatedly.
	async fn get_status(&self, options: &StatusOptions) -> ProviderResult<TransactionStatus>;

	/// Wrap resume state into a handle `poll` can be driven with later.
	/// Providers that need more than the transaction hashes add it to the
	/// options bag before returning.
	async fn get_status_object(&self, options: StatusOptions) -> ProviderResult<StatusHandle> {
		Ok(StatusHandle {
			options,
			provider: self.id(),
		})
	}
}
