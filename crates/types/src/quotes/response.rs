//! Normalized quote response models

use super::{QuoteValidationError, QuoteValidationResult, SwapQuote};
use crate::models::Amount;
use crate::providers::ProviderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bounds a provider declares for acceptable input and output amounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MinMax {
	pub minimum_from: Amount,
	pub maximum_from: Amount,
	pub minimum_to: Amount,
	pub maximum_to: Amount,
}

impl MinMax {
	/// Unbounded range; for providers that do not publish limits
	pub fn open() -> Self {
		let unbounded = Amount::from(u128::MAX);
		Self {
			minimum_from: Amount::zero(),
			maximum_from: unbounded.clone(),
			minimum_to: Amount::zero(),
			maximum_to: unbounded,
		}
	}
}

/// A provider's quote, normalized into the engine's comparable shape
///
/// Both amounts are already denominated in the smallest unit of their
/// respective token; the engine validates consistency but never re-scales.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderQuote {
	/// Input amount, in `from_token`'s smallest unit
	pub from_token_amount: Amount,
	/// Output amount, in `to_token`'s smallest unit
	pub to_token_amount: Amount,
	/// Network fee estimate; its unit depends on the network type (gas
	/// units on EVM, a fee class elsewhere)
	pub total_gas_limit: u64,
	/// Fees payable in the source network's native asset on top of gas,
	/// e.g. bridge or relayer charges
	pub additional_native_fees: Amount,
	pub provider: ProviderId,
	/// Everything needed to re-request this swap from the same provider
	pub quote: SwapQuote,
	pub min_max: MinMax,
	/// How long the provider took to answer
	pub response_time_ms: u64,
	pub fetched_at: DateTime<Utc>,
}

impl ProviderQuote {
	pub fn new(
		from_token_amount: Amount,
		to_token_amount: Amount,
		provider: ProviderId,
		quote: SwapQuote,
		min_max: MinMax,
	) -> Self {
		Self {
			from_token_amount,
			to_token_amount,
			total_gas_limit: 0,
			additional_native_fees: Amount::zero(),
			provider,
			quote,
			min_max,
			response_time_ms: 0,
			fetched_at: Utc::now(),
		}
	}

	pub fn with_total_gas_limit(mut self, gas_limit: u64) -> Self {
		self.total_gas_limit = gas_limit;
		self
	}

	pub fn with_additional_native_fees(mut self, fees: Amount) -> Self {
		self.additional_native_fees = fees;
		self
	}

	/// Check this quote against its own declared bounds
	///
	/// A response outside them is self-inconsistent and gets discarded
	/// during aggregation.
	pub fn validate_bounds(&self) -> QuoteValidationResult<()> {
		if self.from_token_amount < self.min_max.minimum_from
			|| self.from_token_amount > self.min_max.maximum_from
		{
			return Err(QuoteValidationError::OutOfBounds {
				field: "fromTokenAmount".to_string(),
				value: self.from_token_amount.to_string(),
				minimum: self.min_max.minimum_from.to_string(),
				maximum: self.min_max.maximum_from.to_string(),
			});
		}

		if self.to_token_amount < self.min_max.minimum_to
			|| self.to_token_amount > self.min_max.maximum_to
		{
			return Err(QuoteValidationError::OutOfBounds {
				field: "toTokenAmount".to_string(),
				value: self.to_token_amount.to_string(),
				minimum: self.min_max.minimum_to.to_string(),
				maximum: self.min_max.maximum_to.to_string(),
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::{DestinationToken, NetworkType, SupportedNetwork, Token, TokenNetwork};
	use crate::quotes::{QuoteMeta, QuoteOptions};

	fn test_quote(amount: u64, min_to: u64, max_to: u64) -> ProviderQuote {
		let token = Token {
			address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
			symbol: "USDC".to_string(),
			decimals: 6,
			name: "USD Coin".to_string(),
			logo_uri: String::new(),
			network_type: NetworkType::Evm,
			rank: None,
			price_id: None,
			balance: None,
			price: None,
		};
		let options = QuoteOptions {
			from_address: "0x1111111111111111111111111111111111111111".to_string(),
			to_address: "0x2222222222222222222222222222222222222222".to_string(),
			amount: Amount::from(1_000_000u64),
			from_token: token.clone(),
			to_token: DestinationToken {
				token,
				network_info: TokenNetwork::permissive(SupportedNetwork::Ethereum),
			},
		};
		let swap_quote = SwapQuote {
			options,
			meta: QuoteMeta::default(),
			provider: ProviderId::OneInch,
		};
		ProviderQuote::new(
			Amount::from(1_000_000u64),
			Amount::from(amount),
			ProviderId::OneInch,
			swap_quote,
			MinMax {
				minimum_from: Amount::zero(),
				maximum_from: Amount::from(u128::MAX),
				minimum_to: Amount::from(min_to),
				maximum_to: Amount::from(max_to),
			},
		)
	}

	#[test]
	fn test_bounds_accept_in_range() {
		assert!(test_quote(500, 100, 1_000).validate_bounds().is_ok());
	}

	#[test]
	fn test_bounds_reject_out_of_range() {
		let below = test_quote(50, 100, 1_000);
		assert!(matches!(
			below.validate_bounds(),
			Err(QuoteValidationError::OutOfBounds { .. })
		));

		let above = test_quote(5_000, 100, 1_000);
		assert!(above.validate_bounds().is_err());
	}

	#[test]
	fn test_quote_serde_round_trip() {
		let quote = test_quote(500, 100, 1_000);
		let json = serde_json::to_string(&quote).unwrap();
		let back: ProviderQuote = serde_json::from_str(&json).unwrap();
		assert_eq!(back.to_token_amount, quote.to_token_amount);
		assert_eq!(back.provider, quote.provider);
	}
}
