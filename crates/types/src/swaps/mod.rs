//! Provider swap response models

use crate::models::Amount;
use crate::providers::ProviderId;
use crate::transactions::SwapTransaction;
use serde::{Deserialize, Serialize};

/// The materialized swap: unsigned transactions plus final pricing
///
/// `transactions` is in execution order; the caller signs and broadcasts
/// each element in sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSwap {
	pub transactions: Vec<SwapTransaction>,
	/// Input amount, in the source token's smallest unit
	pub from_token_amount: Amount,
	/// Output amount, in the destination token's smallest unit
	pub to_token_amount: Amount,
	/// Fees payable in the source network's native asset on top of gas
	pub additional_native_fees: Amount,
	pub provider: ProviderId,
	/// Slippage tolerance the swap was built with, percent string
	pub slippage: String,
	/// Display-only aggregate provider fee in percent (0-100). Never used
	/// in settlement arithmetic.
	pub fee_percent: f64,
}
