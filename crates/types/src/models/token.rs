//! Token models and provider catalogs

use crate::models::amount::Amount;
use crate::models::network::{NetworkType, SupportedNetwork};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Sentinel address EVM token lists use for the chain's native asset
pub const EVM_NATIVE_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// A token on one network
///
/// Invariant: `decimals` must match the authoritative on-chain value,
/// otherwise smallest-unit amounts for this token are meaningless.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
	/// Network-specific identifier; a sentinel for the native asset
	pub address: String,
	pub symbol: String,
	pub decimals: u8,
	pub name: String,
	pub logo_uri: String,
	#[serde(rename = "type")]
	pub network_type: NetworkType,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rank: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub balance: Option<Amount>,
	/// Display-only reference price. Never used in settlement arithmetic.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
}

impl Token {
	/// Whether this token is the native asset of its network
	pub fn is_native(&self) -> bool {
		self.address.is_empty() || self.address.eq_ignore_ascii_case(EVM_NATIVE_ADDRESS)
	}
}

/// Async address-validity predicate for a destination network
///
/// Validation rules differ per network family (EIP-55 checksums, bech32,
/// base58, SS58), and some implementations need the network layer, so the
/// check is async and injected by the wallet.
#[async_trait]
pub trait AddressValidator: Send + Sync {
	async fn is_address(&self, address: &str) -> bool;
}

/// Accepts any non-empty address; stand-in when no validator is wired up
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyAddress;

#[async_trait]
impl AddressValidator for AnyAddress {
	async fn is_address(&self, address: &str) -> bool {
		!address.is_empty()
	}
}

/// Destination-network identity plus its address validator
#[derive(Clone)]
pub struct TokenNetwork {
	pub name: SupportedNetwork,
	validator: Arc<dyn AddressValidator>,
}

impl TokenNetwork {
	pub fn new(name: SupportedNetwork, validator: Arc<dyn AddressValidator>) -> Self {
		Self { name, validator }
	}

	/// Network identity with the permissive default validator
	pub fn permissive(name: SupportedNetwork) -> Self {
		Self::new(name, Arc::new(AnyAddress))
	}

	pub async fn is_address(&self, address: &str) -> bool {
		self.validator.is_address(address).await
	}
}

impl std::fmt::Debug for TokenNetwork {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TokenNetwork")
			.field("name", &self.name)
			.finish()
	}
}

impl PartialEq for TokenNetwork {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

// The validator is dropped on the wire; deserialized values get the
// permissive default back.
#[derive(Serialize, Deserialize)]
struct TokenNetworkRepr {
	name: SupportedNetwork,
}

impl Serialize for TokenNetwork {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		TokenNetworkRepr { name: self.name }.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for TokenNetwork {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let repr = TokenNetworkRepr::deserialize(deserializer)?;
		Ok(TokenNetwork::permissive(repr.name))
	}
}

/// A token enriched with the destination network it lives on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationToken {
	#[serde(flatten)]
	pub token: Token,
	pub network_info: TokenNetwork,
}

impl DestinationToken {
	pub fn network(&self) -> SupportedNetwork {
		self.network_info.name
	}
}

/// Source-side token catalog, partitioned for display
///
/// `top` and `trending` are subsets of `all`; eligibility lookups go
/// through `all`, keyed by address.
#[derive(Debug, Clone, Default)]
pub struct FromTokenCatalog {
	pub top: Vec<Token>,
	pub trending: Vec<Token>,
	pub all: HashMap<String, Token>,
}

impl FromTokenCatalog {
	pub fn contains(&self, address: &str) -> bool {
		self.all.contains_key(address)
	}

	pub fn is_empty(&self) -> bool {
		self.all.is_empty()
	}
}

/// Destination-side token catalog, further partitioned per network
#[derive(Debug, Clone, Default)]
pub struct ToTokenCatalog {
	pub top: HashMap<SupportedNetwork, Vec<DestinationToken>>,
	pub trending: HashMap<SupportedNetwork, Vec<DestinationToken>>,
	pub all: HashMap<SupportedNetwork, HashMap<String, DestinationToken>>,
}

impl ToTokenCatalog {
	pub fn contains(&self, network: SupportedNetwork, address: &str) -> bool {
		self.all
			.get(&network)
			.is_some_and(|tokens| tokens.contains_key(address))
	}

	pub fn is_empty(&self) -> bool {
		self.all.values().all(|tokens| tokens.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn usdc() -> Token {
		Token {
			address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
			symbol: "USDC".to_string(),
			decimals: 6,
			name: "USD Coin".to_string(),
			logo_uri: String::new(),
			network_type: NetworkType::Evm,
			rank: Some(4),
			price_id: Some("usd-coin".to_string()),
			balance: None,
			price: Some(1.0),
		}
	}

	#[test]
	fn test_native_sentinel() {
		let mut token = usdc();
		assert!(!token.is_native());

		token.address = EVM_NATIVE_ADDRESS.to_uppercase();
		assert!(token.is_native());

		token.address = String::new();
		assert!(token.is_native());
	}

	#[test]
	fn test_token_serde_uses_type_tag() {
		let json = serde_json::to_value(usdc()).unwrap();
		assert_eq!(json["type"], "evm");
		assert_eq!(json["logoUri"], "");
	}

	#[tokio::test]
	async fn test_permissive_validator() {
		let network = TokenNetwork::permissive(SupportedNetwork::Solana);
		assert!(network.is_address("9wFF...").await);
		assert!(!network.is_address("").await);
	}

	#[test]
	fn test_catalog_lookup() {
		let token = usdc();
		let mut catalog = FromTokenCatalog::default();
		catalog.all.insert(token.address.clone(), token.clone());

		assert!(catalog.contains(&token.address));
		assert!(!catalog.contains("0xdead"));

		let destination = DestinationToken {
			token,
			network_info: TokenNetwork::permissive(SupportedNetwork::Ethereum),
		};
		let mut to_catalog = ToTokenCatalog::default();
		to_catalog
			.all
			.entry(SupportedNetwork::Ethereum)
			.or_default()
			.insert(destination.token.address.clone(), destination.clone());

		assert!(to_catalog.contains(SupportedNetwork::Ethereum, &destination.token.address));
		assert!(!to_catalog.contains(SupportedNetwork::Solana, &destination.token.address));
	}
}
