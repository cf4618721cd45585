//! Swapkit
//!
//! Cross-chain swap aggregation engine for a multi-network wallet: fans
//! quote requests out to independent liquidity providers, normalizes
//! their answers into one comparable shape, materializes the chosen
//! quote into unsigned transactions and polls swap status to a terminal
//! state. Signing, broadcasting and key custody stay with the caller.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

// Core domain types - the most commonly used surface
pub use swapkit_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	AddressValidator,
	Amount,
	AnyAddress,
	DestinationToken,
	FromTokenCatalog,
	MinMax,
	NetworkInfo,
	NetworkType,
	ProviderContext,
	ProviderError,
	ProviderId,
	ProviderQuote,
	ProviderSwap,
	QuoteMeta,
	QuoteOptions,
	QuoteValidationError,
	StatusHandle,
	StatusOptions,
	SupportedNetwork,
	SwapProvider,
	SwapQuote,
	SwapTransaction,
	ToTokenCatalog,
	Token,
	TokenNetwork,
	TransactionStatus,
	TransactionType,
	WalletIdentifier,
	EVM_NATIVE_ADDRESS,
};

// Service layer
pub use swapkit_service::{
	AggregationError, ProviderFailure, QuoteAggregator, StatusError, StatusTracker, SwapError,
	SwapExecutor,
};

// Providers
pub use swapkit_providers::ProviderRegistry;

// Config
pub use swapkit_config::{load_config, LogFormat, LoggingSettings, Settings, SettingsError};

// Cancellation primitive shared with callers
pub use tokio_util::sync::CancellationToken;

// Module aliases for qualified access
pub mod models {
	pub use swapkit_types::*;
}

pub mod providers {
	pub use swapkit_providers::*;
}

pub mod service {
	pub use swapkit_service::*;
}

pub mod config {
	pub use swapkit_config::*;
}

pub mod mocks;

// Re-export external dependencies used at the plug-in boundary
pub use async_trait;

/// Errors while assembling an engine
#[derive(Error, Debug)]
pub enum EngineError {
	#[error("settings rejected: {0}")]
	Settings(#[from] SettingsError),

	#[error("provider {provider} serves {provider_network}, engine is for {engine_network}")]
	NetworkMismatch {
		provider: ProviderId,
		provider_network: SupportedNetwork,
		engine_network: SupportedNetwork,
	},

	#[error("no providers registered")]
	NoProviders,

	#[error("every provider failed to initialize: {failures:?}")]
	AllProvidersFailedInit { failures: Vec<(ProviderId, String)> },
}

/// Builder wiring providers and settings into a per-network engine
pub struct SwapEngineBuilder {
	network: SupportedNetwork,
	settings: Option<Settings>,
	providers: Vec<Arc<dyn SwapProvider>>,
}

impl SwapEngineBuilder {
	/// Start building an engine for one source network
	pub fn for_network(network: SupportedNetwork) -> Self {
		Self {
			network,
			settings: None,
			providers: Vec::new(),
		}
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Register a provider instance for this engine's network
	pub fn with_provider(mut self, provider: Arc<dyn SwapProvider>) -> Self {
		self.providers.push(provider);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Validate settings, initialize every provider and assemble the
	/// engine
	///
	/// A provider whose `init` fails is dropped for the session; the
	/// build only fails when none survives.
	pub async fn build(self, token_list: &[Token]) -> Result<SwapEngine, EngineError> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let mut registry = ProviderRegistry::new();
		for provider in self.providers {
			if provider.network() != self.network {
				return Err(EngineError::NetworkMismatch {
					provider: provider.id(),
					provider_network: provider.network(),
					engine_network: self.network,
				});
			}
			registry.register(provider);
		}

		if registry.is_empty() {
			return Err(EngineError::NoProviders);
		}

		let dropped = registry.init_all(token_list).await;
		if registry.is_empty() {
			return Err(EngineError::AllProvidersFailedInit {
				failures: dropped
					.into_iter()
					.map(|(id, err)| (id, err.to_string()))
					.collect(),
			});
		}

		info!(
			"swap engine for {} ready with {} provider(s)",
			self.network,
			registry.len()
		);

		let registry = Arc::new(registry);
		Ok(SwapEngine {
			aggregator: QuoteAggregator::new(
				self.network,
				Arc::clone(&registry),
				&settings.timeouts,
			),
			executor: SwapExecutor::new(Arc::clone(&registry)),
			tracker: StatusTracker::new(Arc::clone(&registry)),
			registry,
			network: self.network,
			settings,
		})
	}
}

/// The assembled engine for one source network
pub struct SwapEngine {
	network: SupportedNetwork,
	settings: Settings,
	registry: Arc<ProviderRegistry>,
	pub aggregator: QuoteAggregator,
	pub executor: SwapExecutor,
	pub tracker: StatusTracker,
}

impl SwapEngine {
	pub fn network(&self) -> SupportedNetwork {
		self.network
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn registry(&self) -> &Arc<ProviderRegistry> {
		&self.registry
	}

	/// Fan a quote request out across the registered providers
	///
	/// A missing slippage tolerance is filled in from the configured
	/// default before the request reaches any provider.
	pub async fn request_quotes(
		&self,
		options: &QuoteOptions,
		meta: &QuoteMeta,
		signal: &CancellationToken,
	) -> Result<Vec<ProviderQuote>, AggregationError> {
		let mut meta = meta.clone();
		if meta.slippage.is_none() {
			meta.slippage = Some(self.settings.quotes.default_slippage.clone());
		}

		self.aggregator
			.request_quotes_all(options, &meta, signal)
			.await
	}

	/// Materialize a chosen quote into unsigned transactions
	pub async fn build_swap(
		&self,
		quote: &SwapQuote,
		signal: &CancellationToken,
	) -> Result<ProviderSwap, SwapError> {
		self.executor.build_swap(quote, signal).await
	}

	/// One status lookup against the provider owning the swap
	pub async fn poll(&self, handle: &StatusHandle) -> Result<TransactionStatus, StatusError> {
		self.tracker.poll(handle).await
	}

	/// Wallet-facing source catalog: the union of every provider's
	/// catalog, deduplicated by address and sorted by rank
	pub fn get_from_tokens(&self) -> FromTokenCatalog {
		let mut catalog = FromTokenCatalog::default();
		let mut seen_top = HashSet::new();
		let mut seen_trending = HashSet::new();

		for provider in self.registry.for_network(self.network) {
			let tokens = provider.get_from_tokens();
			for token in tokens.top {
				if seen_top.insert(token.address.clone()) {
					catalog.top.push(token);
				}
			}
			for token in tokens.trending {
				if seen_trending.insert(token.address.clone()) {
					catalog.trending.push(token);
				}
			}
			for (address, token) in tokens.all {
				catalog.all.entry(address).or_insert(token);
			}
		}

		sort_by_rank(&mut catalog.top);
		sort_by_rank(&mut catalog.trending);
		catalog
	}

	/// Wallet-facing destination catalog, merged per network
	pub fn get_to_tokens(&self) -> ToTokenCatalog {
		let mut catalog = ToTokenCatalog::default();
		let mut seen_top: HashSet<(SupportedNetwork, String)> = HashSet::new();
		let mut seen_trending: HashSet<(SupportedNetwork, String)> = HashSet::new();

		for provider in self.registry.for_network(self.network) {
			let tokens = provider.get_to_tokens();
			for (network, entries) in tokens.top {
				let bucket = catalog.top.entry(network).or_default();
				for token in entries {
					if seen_top.insert((network, token.token.address.clone())) {
						bucket.push(token);
					}
				}
			}
			for (network, entries) in tokens.trending {
				let bucket = catalog.trending.entry(network).or_default();
				for token in entries {
					if seen_trending.insert((network, token.token.address.clone())) {
						bucket.push(token);
					}
				}
			}
			for (network, entries) in tokens.all {
				let bucket = catalog.all.entry(network).or_default();
				for (address, token) in entries {
					bucket.entry(address).or_insert(token);
				}
			}
		}

		for bucket in catalog.top.values_mut() {
			bucket.sort_by_key(|token| token.token.rank.unwrap_or(u32::MAX));
		}
		for bucket in catalog.trending.values_mut() {
			bucket.sort_by_key(|token| token.token.rank.unwrap_or(u32::MAX));
		}
		catalog
	}
}

fn sort_by_rank(tokens: &mut [Token]) {
	tokens.sort_by_key(|token| token.rank.unwrap_or(u32::MAX));
}

/// Initialize tracing from logging settings
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.level));

	match settings.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()?;
			} else {
				subscriber.try_init()?;
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()?;
			} else {
				subscriber.try_init()?;
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()?;
			} else {
				subscriber.try_init()?;
			}
		},
	}

	Ok(())
}
