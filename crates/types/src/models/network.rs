//! Network identity and capability models
//!
//! The set of supported networks is closed: every network the wallet can
//! swap on has exactly one immutable `NetworkInfo` entry in the
//! process-wide registry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closed enumeration of networks the engine can quote on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedNetwork {
	Ethereum,
	Binance,
	Litecoin,
	Dogecoin,
	Matic,
	Optimism,
	Polkadot,
	Kusama,
	Bitcoin,
	EthereumClassic,
	Moonbeam,
	Arbitrum,
	Gnosis,
	Avalanche,
	Fantom,
	Klaytn,
	Aurora,
	Zksync,
	Base,
	MaticZK,
	Solana,
}

/// Architecture family of a network; drives address validation and the
/// unsigned-transaction shape a swap on it must use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
	Evm,
	Substrate,
	Bitcoin,
	Solana,
}

/// Signer kinds valid for addresses on a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignerType {
	Secp256k1,
	Ecdsa,
	Ed25519,
	Sr25519,
}

/// Immutable identity record for a supported network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInfo {
	pub id: SupportedNetwork,
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
	pub rank: u32,
	/// Reference id in the external price catalog
	pub price_id: String,
	pub network_type: NetworkType,
	pub signer_types: Vec<SignerType>,
}

#[allow(clippy::too_many_arguments)]
fn entry(
	id: SupportedNetwork,
	name: &str,
	symbol: &str,
	decimals: u8,
	rank: u32,
	price_id: &str,
	network_type: NetworkType,
	signer_types: &[SignerType],
) -> (SupportedNetwork, NetworkInfo) {
	(
		id,
		NetworkInfo {
			id,
			name: name.to_string(),
			symbol: symbol.to_string(),
			decimals,
			rank,
			price_id: price_id.to_string(),
			network_type,
			signer_types: signer_types.to_vec(),
		},
	)
}

static NETWORK_REGISTRY: Lazy<HashMap<SupportedNetwork, NetworkInfo>> = Lazy::new(|| {
	use NetworkType::{Bitcoin as Btc, Evm, Solana as Sol, Substrate};
	use SignerType::{Ecdsa, Ed25519, Secp256k1, Sr25519};
	use SupportedNetwork::*;

	HashMap::from([
		entry(Ethereum, "Ethereum", "ETH", 18, 1, "ethereum", Evm, &[Secp256k1]),
		entry(Binance, "BNB Smart Chain", "BNB", 18, 2, "binancecoin", Evm, &[Secp256k1]),
		entry(Litecoin, "Litecoin", "LTC", 8, 12, "litecoin", Btc, &[Secp256k1]),
		entry(Dogecoin, "Dogecoin", "DOGE", 8, 13, "dogecoin", Btc, &[Secp256k1]),
		entry(Matic, "Polygon", "MATIC", 18, 4, "matic-network", Evm, &[Secp256k1]),
		entry(Optimism, "Optimism", "ETH", 18, 6, "ethereum", Evm, &[Secp256k1]),
		entry(Polkadot, "Polkadot", "DOT", 10, 10, "polkadot", Substrate, &[Sr25519, Ed25519]),
		entry(Kusama, "Kusama", "KSM", 12, 15, "kusama", Substrate, &[Sr25519, Ed25519]),
		entry(Bitcoin, "Bitcoin", "BTC", 8, 3, "bitcoin", Btc, &[Secp256k1]),
		entry(EthereumClassic, "Ethereum Classic", "ETC", 18, 17, "ethereum-classic", Evm, &[Secp256k1]),
		entry(Moonbeam, "Moonbeam", "GLMR", 18, 16, "moonbeam", Evm, &[Secp256k1, Ecdsa]),
		entry(Arbitrum, "Arbitrum", "ETH", 18, 5, "ethereum", Evm, &[Secp256k1]),
		entry(Gnosis, "Gnosis", "xDAI", 18, 14, "xdai", Evm, &[Secp256k1]),
		entry(Avalanche, "Avalanche C-Chain", "AVAX", 18, 7, "avalanche-2", Evm, &[Secp256k1]),
		entry(Fantom, "Fantom", "FTM", 18, 11, "fantom", Evm, &[Secp256k1]),
		entry(Klaytn, "Klaytn", "KLAY", 18, 18, "klay-token", Evm, &[Secp256k1]),
		entry(Aurora, "Aurora", "ETH", 18, 19, "ethereum", Evm, &[Secp256k1]),
		entry(Zksync, "zkSync Era", "ETH", 18, 9, "ethereum", Evm, &[Secp256k1]),
		entry(Base, "Base", "ETH", 18, 8, "ethereum", Evm, &[Secp256k1]),
		entry(MaticZK, "Polygon zkEVM", "ETH", 18, 20, "ethereum", Evm, &[Secp256k1]),
		entry(Solana, "Solana", "SOL", 9, 21, "solana", Sol, &[Ed25519]),
	])
});

impl SupportedNetwork {
	/// Look up the immutable registry entry for this network
	pub fn info(&self) -> &'static NetworkInfo {
		NETWORK_REGISTRY
			.get(self)
			.expect("every supported network has a registry entry")
	}

	pub fn network_type(&self) -> NetworkType {
		self.info().network_type
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			SupportedNetwork::Ethereum => "ethereum",
			SupportedNetwork::Binance => "binance",
			SupportedNetwork::Litecoin => "litecoin",
			SupportedNetwork::Dogecoin => "dogecoin",
			SupportedNetwork::Matic => "matic",
			SupportedNetwork::Optimism => "optimism",
			SupportedNetwork::Polkadot => "polkadot",
			SupportedNetwork::Kusama => "kusama",
			SupportedNetwork::Bitcoin => "bitcoin",
			SupportedNetwork::EthereumClassic => "ethereumclassic",
			SupportedNetwork::Moonbeam => "moonbeam",
			SupportedNetwork::Arbitrum => "arbitrum",
			SupportedNetwork::Gnosis => "gnosis",
			SupportedNetwork::Avalanche => "avalanche",
			SupportedNetwork::Fantom => "fantom",
			SupportedNetwork::Klaytn => "klaytn",
			SupportedNetwork::Aurora => "aurora",
			SupportedNetwork::Zksync => "zksync",
			SupportedNetwork::Base => "base",
			SupportedNetwork::MaticZK => "maticzk",
			SupportedNetwork::Solana => "solana",
		}
	}
}

impl std::fmt::Display for SupportedNetwork {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::fmt::Display for NetworkType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			NetworkType::Evm => "evm",
			NetworkType::Substrate => "substrate",
			NetworkType::Bitcoin => "bitcoin",
			NetworkType::Solana => "solana",
		};
		f.write_str(name)
	}
}
