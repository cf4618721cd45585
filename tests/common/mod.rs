//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use swapkit::config::TimeoutSettings;
use swapkit::mocks::{test_destination, test_token, MockProvider};
use swapkit::{
	DestinationToken, NetworkType, ProviderId, ProviderRegistry, QuoteAggregator, QuoteOptions,
	SupportedNetwork, SwapProvider, Token, EVM_NATIVE_ADDRESS,
};

pub const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
pub const USDT: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";
pub const WSOL: &str = "So11111111111111111111111111111111111111112";

pub const TEST_TIMEOUT: Duration = Duration::from_millis(2_000);

pub fn usdc() -> Token {
	test_token(USDC, "USDC", 6, NetworkType::Evm)
}

pub fn usdt_on_ethereum() -> DestinationToken {
	test_destination(USDT, "USDT", 6, SupportedNetwork::Ethereum)
}

pub fn eth_native_on_ethereum() -> DestinationToken {
	test_destination(EVM_NATIVE_ADDRESS, "ETH", 18, SupportedNetwork::Ethereum)
}

pub fn sol_on_solana() -> DestinationToken {
	test_destination(WSOL, "SOL", 9, SupportedNetwork::Solana)
}

/// Quote options for 1 USDC into the given destination token
pub fn quote_options(to_token: DestinationToken) -> QuoteOptions {
	let to_address = match to_token.token.network_type {
		NetworkType::Evm => "0x2222222222222222222222222222222222222222",
		_ => "9wzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM",
	}
	.to_string();

	QuoteOptions {
		from_address: "0x1111111111111111111111111111111111111111".to_string(),
		to_address,
		amount: 1_000_000u64.into(),
		from_token: usdc(),
		to_token,
	}
}

/// Ethereum provider whose catalogs contain the USDC -> USDT pair
pub fn eth_provider(id: ProviderId) -> MockProvider {
	MockProvider::new(id, SupportedNetwork::Ethereum).with_pair(usdc(), usdt_on_ethereum())
}

/// Ethereum provider bridging USDC -> SOL
pub fn bridge_provider(id: ProviderId) -> MockProvider {
	MockProvider::new(id, SupportedNetwork::Ethereum).with_pair(usdc(), sol_on_solana())
}

pub fn aggregator() -> QuoteAggregator {
	QuoteAggregator::new(
		SupportedNetwork::Ethereum,
		Arc::new(ProviderRegistry::new()),
		&TimeoutSettings::default(),
	)
}

pub fn registry_with(mocks: &[Arc<MockProvider>]) -> Arc<ProviderRegistry> {
	let mut registry = ProviderRegistry::new();
	for mock in mocks {
		registry.register(mock.clone());
	}
	Arc::new(registry)
}

pub fn as_providers(mocks: &[Arc<MockProvider>]) -> Vec<Arc<dyn SwapProvider>> {
	mocks
		.iter()
		.map(|mock| mock.clone() as Arc<dyn SwapProvider>)
		.collect()
}
