//! Quote request models and validation

use super::{QuoteValidationError, QuoteValidationResult};
use crate::constants::limits::MAX_SLIPPAGE_PERCENT;
use crate::models::{Amount, DestinationToken, Token};
use serde::{Deserialize, Serialize};

/// What the caller wants priced: a pair, an amount and the two addresses
/// involved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteOptions {
	pub from_address: String,
	pub to_address: String,
	/// Denominated in `from_token`'s smallest unit
	pub amount: Amount,
	pub from_token: Token,
	pub to_token: DestinationToken,
}

impl QuoteOptions {
	/// Applied validations:
	/// - **amount**: must be greater than zero
	pub fn validate(&self) -> QuoteValidationResult<()> {
		if self.amount.is_zero() {
			return Err(QuoteValidationError::InvalidAmount {
				field: "amount".to_string(),
				reason: "must be greater than zero".to_string(),
			});
		}

		Ok(())
	}
}

/// Wallet attribution tag passed through to providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletIdentifier {
	#[default]
	Extension,
	Mobile,
}

/// Cross-cutting quote policy carried alongside the pair options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMeta {
	/// EVM allowance strategy: approve unlimited spend instead of the
	/// exact swap amount
	pub infinite_approval: bool,
	pub wallet_identifier: WalletIdentifier,
	/// Slippage tolerance as a percentage string, e.g. "0.5"
	#[serde(skip_serializing_if = "Option::is_none")]
	pub slippage: Option<String>,
	/// Opaque provider continuation data (a previously issued quote id, a
	/// priced route, ...); round-tripped untouched
	#[serde(skip_serializing_if = "Option::is_none")]
	pub provider_data: Option<serde_json::Value>,
}

impl QuoteMeta {
	/// Applied validations:
	/// - **slippage**: when present, must parse as a percentage within
	///   0 to `MAX_SLIPPAGE_PERCENT`
	pub fn validate(&self) -> QuoteValidationResult<()> {
		if let Some(slippage) = &self.slippage {
			let parsed: f64 =
				slippage
					.parse()
					.map_err(|_| QuoteValidationError::InvalidSlippage {
						value: slippage.clone(),
						maximum: MAX_SLIPPAGE_PERCENT,
					})?;
			if !(0.0..=MAX_SLIPPAGE_PERCENT).contains(&parsed) {
				return Err(QuoteValidationError::InvalidSlippage {
					value: slippage.clone(),
					maximum: MAX_SLIPPAGE_PERCENT,
				});
			}
		}

		Ok(())
	}
}
