//! Unsigned transaction shapes handed back to the signing layer
//!
//! One shape per network family; a swap is an ordered sequence of these
//! and the array order is execution order.

use crate::models::NetworkType;
use serde::{Deserialize, Serialize};

/// Shape discriminant for unsigned swap transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
	Evm,
	Solana,
	Generic,
}

impl TransactionType {
	/// The shape transactions on a network family must use
	pub fn for_network(network_type: NetworkType) -> Self {
		match network_type {
			NetworkType::Evm => TransactionType::Evm,
			NetworkType::Solana => TransactionType::Solana,
			NetworkType::Bitcoin | NetworkType::Substrate => TransactionType::Generic,
		}
	}
}

impl std::fmt::Display for TransactionType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			TransactionType::Evm => "evm",
			TransactionType::Solana => "solana",
			TransactionType::Generic => "generic",
		};
		f.write_str(name)
	}
}

/// Raw unsigned EVM call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvmTransaction {
	pub from: String,
	pub to: String,
	pub value: String,
	pub data: String,
	pub gas_limit: String,
}

/// Unsigned Solana transaction, pre-serialized by the provider
///
/// Solana transaction construction needs provider-side state (recent
/// blockhash, program accounts) the engine does not own, so the provider
/// ships the whole thing base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolanaTransaction {
	pub from: String,
	pub to: String,
	/// base64-serialized unsigned transaction
	pub serialized: String,
}

/// Minimal native-asset transfer for UTXO and Substrate style chains
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenericTransaction {
	pub from: String,
	pub to: String,
	pub value: String,
}

/// Closed, tagged union of unsigned transaction shapes
///
/// Exactly one variant per element; consumers match exhaustively so a
/// provider emitting the wrong shape for a route is caught, not ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SwapTransaction {
	Evm(EvmTransaction),
	Solana(SolanaTransaction),
	Generic(GenericTransaction),
}

impl SwapTransaction {
	pub fn transaction_type(&self) -> TransactionType {
		match self {
			SwapTransaction::Evm(_) => TransactionType::Evm,
			SwapTransaction::Solana(_) => TransactionType::Solana,
			SwapTransaction::Generic(_) => TransactionType::Generic,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_network_shape_mapping() {
		assert_eq!(
			TransactionType::for_network(NetworkType::Evm),
			TransactionType::Evm
		);
		assert_eq!(
			TransactionType::for_network(NetworkType::Solana),
			TransactionType::Solana
		);
		assert_eq!(
			TransactionType::for_network(NetworkType::Bitcoin),
			TransactionType::Generic
		);
		assert_eq!(
			TransactionType::for_network(NetworkType::Substrate),
			TransactionType::Generic
		);
	}

	#[test]
	fn test_transaction_serde_tag() {
		let tx = SwapTransaction::Evm(EvmTransaction {
			from: "0x1111111111111111111111111111111111111111".to_string(),
			to: "0x2222222222222222222222222222222222222222".to_string(),
			value: "0".to_string(),
			data: "0x".to_string(),
			gas_limit: "21000".to_string(),
		});

		let json = serde_json::to_value(&tx).unwrap();
		assert_eq!(json["type"], "evm");
		assert_eq!(json["gasLimit"], "21000");

		let back: SwapTransaction = serde_json::from_value(json).unwrap();
		assert_eq!(back.transaction_type(), TransactionType::Evm);
	}

	#[test]
	fn test_solana_variant_carries_serialized_payload() {
		let tx = SwapTransaction::Solana(SolanaTransaction {
			from: "From1111111111111111111111111111".to_string(),
			to: "To111111111111111111111111111111".to_string(),
			serialized: "AQID".to_string(),
		});

		let json = serde_json::to_value(&tx).unwrap();
		assert_eq!(json["type"], "solana");
		assert_eq!(json["serialized"], "AQID");
	}
}
