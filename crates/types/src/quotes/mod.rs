//! Quote domain models
//!
//! A `SwapQuote` is the self-sufficient tuple needed to re-request a swap
//! from the provider that issued it; `ProviderQuote` is the normalized,
//! comparable result of a quote fan-out.

use crate::providers::ProviderId;
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod request;
pub mod response;

pub use errors::{QuoteValidationError, QuoteValidationResult};
pub use request::{QuoteMeta, QuoteOptions, WalletIdentifier};
pub use response::{MinMax, ProviderQuote};

/// Everything needed to ask the originating provider for the swap later.
/// Self-sufficient: any provider-side session state lives in
/// `meta.provider_data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
	pub options: QuoteOptions,
	pub meta: QuoteMeta,
	pub provider: ProviderId,
}
