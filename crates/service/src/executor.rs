//! Swap construction service
//!
//! Turns a chosen quote into the provider's unsigned transaction
//! sequence and enforces that every element has the shape its network
//! requires. Nothing here signs or broadcasts.

use std::sync::Arc;

use swapkit_providers::ProviderRegistry;
use swapkit_types::{
	NetworkType, ProviderContext, ProviderError, ProviderId, ProviderSwap, SwapQuote,
	SwapTransaction, TransactionType,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Failures while materializing a swap from a quote
#[derive(Error, Debug)]
pub enum SwapError {
	#[error("no registered provider for {0}")]
	ProviderNotFound(ProviderId),

	#[error("quote from {0} is no longer executable; request a fresh quote")]
	QuoteExpired(ProviderId),

	#[error("transaction {index} from {provider} has shape {found}, expected {expected}")]
	TransactionShapeMismatch {
		provider: ProviderId,
		index: usize,
		expected: TransactionType,
		found: TransactionType,
	},

	#[error("provider {provider} violated the swap contract: {reason}")]
	ContractViolation { provider: ProviderId, reason: String },

	#[error("swap construction cancelled by caller")]
	Cancelled,

	#[error("provider error: {0}")]
	Provider(ProviderError),
}

/// Result type for swap construction
pub type SwapResult<T> = Result<T, SwapError>;

/// Service that re-requests a chosen quote as an executable swap
pub struct SwapExecutor {
	registry: Arc<ProviderRegistry>,
}

impl SwapExecutor {
	pub fn new(registry: Arc<ProviderRegistry>) -> Self {
		Self { registry }
	}

	/// Ask the quote's provider for the unsigned transaction sequence and
	/// validate it against the route's network shapes
	pub async fn build_swap(
		&self,
		quote: &SwapQuote,
		signal: &CancellationToken,
	) -> SwapResult<ProviderSwap> {
		let provider = self
			.registry
			.get(quote.provider)
			.ok_or(SwapError::ProviderNotFound(quote.provider))?;

		if signal.is_cancelled() {
			return Err(SwapError::Cancelled);
		}

		let ctx = ProviderContext::new(signal.child_token());
		let swap = match provider.get_swap(quote, &ctx).await {
			Ok(Some(swap)) => swap,
			Ok(None) => {
				info!("provider {} reports the quote as stale", quote.provider);
				return Err(SwapError::QuoteExpired(quote.provider));
			},
			Err(err) if err.is_cancelled() => return Err(SwapError::Cancelled),
			Err(err) => return Err(SwapError::Provider(err)),
		};

		if swap.provider != quote.provider {
			error!(
				"provider {} answered a swap attributed to {}",
				quote.provider, swap.provider
			);
			return Err(SwapError::ContractViolation {
				provider: quote.provider,
				reason: format!("swap attributed to {}", swap.provider),
			});
		}

		validate_transaction_shapes(
			quote.provider,
			quote.options.from_token.network_type,
			quote.options.to_token.token.network_type,
			&swap.transactions,
		)?;

		Ok(swap)
	}
}

/// Every element before the last must use the source network's shape;
/// the final element must use the destination network's shape. For a
/// same-family route that collapses to "all elements match".
fn validate_transaction_shapes(
	provider: ProviderId,
	from: NetworkType,
	to: NetworkType,
	transactions: &[SwapTransaction],
) -> SwapResult<()> {
	if transactions.is_empty() {
		error!("provider {provider} returned a swap without transactions");
		return Err(SwapError::ContractViolation {
			provider,
			reason: "empty transaction sequence".to_string(),
		});
	}

	let source_shape = TransactionType::for_network(from);
	let final_shape = TransactionType::for_network(to);
	let last = transactions.len() - 1;

	for (index, transaction) in transactions.iter().enumerate() {
		let expected = if index == last { final_shape } else { source_shape };
		let found = transaction.transaction_type();
		if found != expected {
			error!(
				"provider {provider} emitted a {found} transaction at position {index}, expected {expected}"
			);
			return Err(SwapError::TransactionShapeMismatch {
				provider,
				index,
				expected,
				found,
			});
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use swapkit_types::{EvmTransaction, GenericTransaction, SolanaTransaction};

	fn evm_tx() -> SwapTransaction {
		SwapTransaction::Evm(EvmTransaction {
			from: "0x1111111111111111111111111111111111111111".to_string(),
			to: "0x2222222222222222222222222222222222222222".to_string(),
			value: "0".to_string(),
			data: "0x".to_string(),
			gas_limit: "21000".to_string(),
		})
	}

	fn solana_tx() -> SwapTransaction {
		SwapTransaction::Solana(SolanaTransaction {
			from: "From1111111111111111111111111111".to_string(),
			to: "To111111111111111111111111111111".to_string(),
			serialized: "AQID".to_string(),
		})
	}

	fn generic_tx() -> SwapTransaction {
		SwapTransaction::Generic(GenericTransaction {
			from: "bc1qsender".to_string(),
			to: "bc1qrecipient".to_string(),
			value: "5000".to_string(),
		})
	}

	#[test]
	fn test_same_family_route_accepts_matching_shapes() {
		let txs = vec![evm_tx(), evm_tx()];
		assert!(validate_transaction_shapes(
			ProviderId::OneInch,
			NetworkType::Evm,
			NetworkType::Evm,
			&txs
		)
		.is_ok());
	}

	#[test]
	fn test_same_family_route_rejects_foreign_shape() {
		let txs = vec![evm_tx(), solana_tx()];
		let err = validate_transaction_shapes(
			ProviderId::OneInch,
			NetworkType::Evm,
			NetworkType::Evm,
			&txs,
		)
		.unwrap_err();
		assert!(matches!(
			err,
			SwapError::TransactionShapeMismatch { index: 1, .. }
		));
	}

	#[test]
	fn test_cross_chain_final_element_must_match_destination() {
		// evm -> solana bridge: a lone evm-only sequence is rejected
		let txs = vec![evm_tx()];
		assert!(validate_transaction_shapes(
			ProviderId::Rango,
			NetworkType::Evm,
			NetworkType::Solana,
			&txs
		)
		.is_err());

		let txs = vec![evm_tx(), solana_tx()];
		assert!(validate_transaction_shapes(
			ProviderId::Rango,
			NetworkType::Evm,
			NetworkType::Solana,
			&txs
		)
		.is_ok());
	}

	#[test]
	fn test_cross_chain_to_utxo_uses_generic_shape() {
		let txs = vec![evm_tx(), generic_tx()];
		assert!(validate_transaction_shapes(
			ProviderId::Changelly,
			NetworkType::Evm,
			NetworkType::Bitcoin,
			&txs
		)
		.is_ok());
	}

	#[test]
	fn test_empty_sequence_is_a_contract_violation() {
		let err = validate_transaction_shapes(
			ProviderId::OneInch,
			NetworkType::Evm,
			NetworkType::Evm,
			&[],
		)
		.unwrap_err();
		assert!(matches!(err, SwapError::ContractViolation { .. }));
	}
}
