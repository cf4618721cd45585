//! Swapkit Providers
//!
//! Registry of liquidity-provider instances. Concrete backends live in
//! their own crates and plug in through the `SwapProvider` trait.

use std::collections::HashMap;
use std::sync::Arc;

use swapkit_types::{ProviderError, ProviderId, SupportedNetwork, SwapProvider, Token};
use tracing::{info, warn};

pub use swapkit_types::{ProviderResult, SwapProvider as Provider};

/// Holds the provider instances registered for this engine session
///
/// Read-only after startup: registration and initialization happen while
/// the engine is being built, then the registry is shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
	providers: HashMap<ProviderId, Arc<dyn SwapProvider>>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self {
			providers: HashMap::new(),
		}
	}

	/// Register a provider instance under its own id. Re-registering an
	/// id replaces the previous instance.
	pub fn register(&mut self, provider: Arc<dyn SwapProvider>) {
		let id = provider.id();
		if self.providers.insert(id, provider).is_some() {
			warn!("provider {id} registered twice; replacing previous instance");
		}
	}

	pub fn get(&self, id: ProviderId) -> Option<Arc<dyn SwapProvider>> {
		self.providers.get(&id).cloned()
	}

	pub fn all(&self) -> Vec<Arc<dyn SwapProvider>> {
		let mut providers: Vec<_> = self.providers.values().cloned().collect();
		providers.sort_by_key(|provider| provider.id());
		providers
	}

	/// Providers serving the given source network, in ordinal order
	pub fn for_network(&self, network: SupportedNetwork) -> Vec<Arc<dyn SwapProvider>> {
		let mut providers: Vec<_> = self
			.providers
			.values()
			.filter(|provider| provider.network() == network)
			.cloned()
			.collect();
		providers.sort_by_key(|provider| provider.id());
		providers
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}

	/// Initialize every registered provider with the wallet's token list
	///
	/// A failing `init` is fatal for that provider for the session: it is
	/// removed from the registry and reported back, while healthy
	/// providers stay registered.
	pub async fn init_all(&mut self, token_list: &[Token]) -> Vec<(ProviderId, ProviderError)> {
		let mut failed = Vec::new();

		for (id, provider) in &self.providers {
			match provider.init(token_list).await {
				Ok(()) => info!("provider {id} initialized"),
				Err(err) => {
					warn!("provider {id} failed to initialize and is disabled: {err}");
					failed.push((*id, err));
				},
			}
		}

		for (id, _) in &failed {
			self.providers.remove(id);
		}

		failed
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use swapkit_types::{
		FromTokenCatalog, ProviderContext, ProviderQuote, ProviderSwap, QuoteMeta, QuoteOptions,
		StatusOptions, SwapQuote, ToTokenCatalog, TransactionStatus,
	};

	#[derive(Debug)]
	struct StubProvider {
		id: ProviderId,
		network: SupportedNetwork,
		fail_init: bool,
	}

	impl StubProvider {
		fn new(id: ProviderId, network: SupportedNetwork) -> Arc<Self> {
			Arc::new(Self {
				id,
				network,
				fail_init: false,
			})
		}

		fn failing_init(id: ProviderId, network: SupportedNetwork) -> Arc<Self> {
			Arc::new(Self {
				id,
				network,
				fail_init: true,
			})
		}
	}

	#[async_trait]
	impl SwapProvider for StubProvider {
		fn id(&self) -> ProviderId {
			self.id
		}

		fn network(&self) -> SupportedNetwork {
			self.network
		}

		async fn init(&self, _token_list: &[Token]) -> ProviderResult<()> {
			if self.fail_init {
				return Err(ProviderError::Init {
					provider: self.id,
					reason: "stub".to_string(),
				});
			}
			Ok(())
		}

		fn get_from_tokens(&self) -> FromTokenCatalog {
			FromTokenCatalog::default()
		}

		fn get_to_tokens(&self) -> ToTokenCatalog {
			ToTokenCatalog::default()
		}

		async fn get_quote(
			&self,
			_options: &QuoteOptions,
			_meta: &QuoteMeta,
			_ctx: &ProviderContext,
		) -> ProviderResult<Option<ProviderQuote>> {
			Ok(None)
		}

		async fn get_swap(
			&self,
			_quote: &SwapQuote,
			_ctx: &ProviderContext,
		) -> ProviderResult<Option<ProviderSwap>> {
			Ok(None)
		}

		async fn get_status(&self, _options: &StatusOptions) -> ProviderResult<TransactionStatus> {
			Ok(TransactionStatus::Pending)
		}
	}

	#[test]
	fn test_register_and_lookup() {
		let mut registry = ProviderRegistry::new();
		registry.register(StubProvider::new(
			ProviderId::OneInch,
			SupportedNetwork::Ethereum,
		));

		assert_eq!(registry.len(), 1);
		assert!(registry.get(ProviderId::OneInch).is_some());
		assert!(registry.get(ProviderId::Rango).is_none());
	}

	#[test]
	fn test_for_network_filters_and_orders_by_ordinal() {
		let mut registry = ProviderRegistry::new();
		registry.register(StubProvider::new(
			ProviderId::Rango,
			SupportedNetwork::Ethereum,
		));
		registry.register(StubProvider::new(
			ProviderId::Jupiter,
			SupportedNetwork::Solana,
		));
		registry.register(StubProvider::new(
			ProviderId::OneInch,
			SupportedNetwork::Ethereum,
		));

		let ethereum = registry.for_network(SupportedNetwork::Ethereum);
		let ids: Vec<ProviderId> = ethereum.iter().map(|provider| provider.id()).collect();
		assert_eq!(ids, vec![ProviderId::OneInch, ProviderId::Rango]);
	}

	#[tokio::test]
	async fn test_init_failure_removes_only_the_failing_provider() {
		let mut registry = ProviderRegistry::new();
		registry.register(StubProvider::new(
			ProviderId::OneInch,
			SupportedNetwork::Ethereum,
		));
		registry.register(StubProvider::failing_init(
			ProviderId::Paraswap,
			SupportedNetwork::Ethereum,
		));

		let failed = registry.init_all(&[]).await;

		assert_eq!(failed.len(), 1);
		assert_eq!(failed[0].0, ProviderId::Paraswap);
		assert_eq!(registry.len(), 1);
		assert!(registry.get(ProviderId::OneInch).is_some());
		assert!(registry.get(ProviderId::Paraswap).is_none());
	}
}
