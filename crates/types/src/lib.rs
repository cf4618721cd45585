//! Swapkit Types
//!
//! Shared models and traits for the cross-chain swap aggregation engine.
//! This crate contains all domain models organized by business entity.

pub mod constants;
pub mod models;
pub mod providers;
pub mod quotes;
pub mod status;
pub mod swaps;
pub mod transactions;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use models::{
	AddressValidator, Amount, AmountParseError, AnyAddress, DestinationToken, FromTokenCatalog,
	NetworkInfo, NetworkType, SignerType, SupportedNetwork, ToTokenCatalog, Token, TokenNetwork,
	EVM_NATIVE_ADDRESS,
};

pub use providers::{ProviderContext, ProviderError, ProviderId, ProviderResult, SwapProvider};

pub use quotes::{
	MinMax, ProviderQuote, QuoteMeta, QuoteOptions, QuoteValidationError, QuoteValidationResult,
	SwapQuote, WalletIdentifier,
};

pub use status::{StatusHandle, StatusOptions, TransactionStatus};

pub use swaps::ProviderSwap;

pub use transactions::{
	EvmTransaction, GenericTransaction, SolanaTransaction, SwapTransaction, TransactionType,
};
