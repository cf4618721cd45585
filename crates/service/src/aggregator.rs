//! Core quote aggregation logic
//!
//! Fans a quote request out to every eligible provider concurrently,
//! normalizes the settlements and returns the survivors ranked best
//! first. One shared cancellation token governs the whole fan-out; the
//! deadline is a wrapper around that same token, not a second mechanism.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use swapkit_config::TimeoutSettings;
use swapkit_providers::ProviderRegistry;
use swapkit_types::{
	Amount, ProviderContext, ProviderId, ProviderQuote, QuoteMeta, QuoteOptions,
	QuoteValidationError, SupportedNetwork, SwapProvider,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One provider's failure during a fan-out, kept for diagnostics
#[derive(Debug, Clone)]
pub struct ProviderFailure {
	pub provider: ProviderId,
	pub reason: String,
}

/// Aggregate outcomes of a quote fan-out
///
/// Per-provider failures never surface here on their own; only the two
/// all-providers outcomes do. `NoRouteFound` is a normal answer from the
/// user's perspective, `AllProvidersFailed` is transient and retryable.
#[derive(Error, Debug)]
pub enum AggregationError {
	#[error("quote validation failed: {0}")]
	Validation(#[from] QuoteValidationError),

	#[error("no provider has a route for this pair")]
	NoRouteFound,

	#[error("every provider call failed ({} failure(s))", .failures.len())]
	AllProvidersFailed { failures: Vec<ProviderFailure> },

	#[error("aggregation cancelled by caller")]
	Cancelled,
}

/// Result type for aggregation operations
pub type AggregationResult<T> = Result<T, AggregationError>;

/// Service fanning quote requests out across the registered providers
/// of one source network
pub struct QuoteAggregator {
	network: SupportedNetwork,
	registry: Arc<ProviderRegistry>,
	global_timeout_ms: u64,
	cancel_grace_ms: u64,
}

impl QuoteAggregator {
	pub fn new(
		network: SupportedNetwork,
		registry: Arc<ProviderRegistry>,
		timeouts: &TimeoutSettings,
	) -> Self {
		Self {
			network,
			registry,
			global_timeout_ms: timeouts.global_ms,
			cancel_grace_ms: timeouts.cancel_grace_ms,
		}
	}

	/// Fan out to every registered provider of this network with the
	/// configured timeout
	pub async fn request_quotes_all(
		&self,
		options: &QuoteOptions,
		meta: &QuoteMeta,
		signal: &CancellationToken,
	) -> AggregationResult<Vec<ProviderQuote>> {
		let providers = self.registry.for_network(self.network);
		self.request_quotes(
			options,
			meta,
			&providers,
			Duration::from_millis(self.global_timeout_ms),
			signal,
		)
		.await
	}

	/// Fan the request out to the given providers concurrently and return
	/// the surviving quotes ranked best first
	///
	/// Outcome classification:
	/// - at least one valid quote: `Ok`, ranked by effective output
	///   descending, provider ordinal ascending on exact ties
	/// - every provider had no route (or none was eligible): `NoRouteFound`
	/// - no quote and at least one failure: `AllProvidersFailed`
	/// - caller cancellation: `Cancelled`, after propagating to every
	///   in-flight call
	pub async fn request_quotes(
		&self,
		options: &QuoteOptions,
		meta: &QuoteMeta,
		providers: &[Arc<dyn SwapProvider>],
		timeout: Duration,
		signal: &CancellationToken,
	) -> AggregationResult<Vec<ProviderQuote>> {
		let request_id = Uuid::new_v4();

		options.validate()?;
		meta.validate()?;
		self.validate_route(options).await?;

		if signal.is_cancelled() {
			return Err(AggregationError::Cancelled);
		}

		let eligible: Vec<_> = providers
			.iter()
			.filter(|provider| self.is_eligible(provider.as_ref(), options))
			.cloned()
			.collect();

		debug!(
			"request {request_id}: {} of {} provider(s) eligible for {} -> {}",
			eligible.len(),
			providers.len(),
			options.from_token.symbol,
			options.to_token.token.symbol,
		);

		if eligible.is_empty() {
			return Err(AggregationError::NoRouteFound);
		}

		let eligible_ids: Vec<ProviderId> = eligible.iter().map(|provider| provider.id()).collect();
		let settled = self
			.fan_out(request_id, &eligible, options, meta, timeout, signal)
			.await?;

		self.classify(request_id, options, eligible_ids, settled, timeout)
	}

	/// Recipient and network checks that need no provider call
	async fn validate_route(&self, options: &QuoteOptions) -> AggregationResult<()> {
		let engine_type = self.network.network_type();
		if options.from_token.network_type != engine_type {
			return Err(QuoteValidationError::NetworkMismatch {
				field: "fromToken".to_string(),
				expected: engine_type.to_string(),
				found: options.from_token.network_type.to_string(),
			}
			.into());
		}

		let destination = &options.to_token.network_info;
		if !destination.is_address(&options.to_address).await {
			return Err(QuoteValidationError::InvalidRecipient {
				network: destination.name.to_string(),
				address: options.to_address.clone(),
			}
			.into());
		}

		Ok(())
	}

	/// Cheap local check: right network and both tokens in the provider's
	/// cached catalogs. Failing providers are skipped without a network
	/// call.
	fn is_eligible(&self, provider: &dyn SwapProvider, options: &QuoteOptions) -> bool {
		provider.network() == self.network
			&& provider.get_from_tokens().contains(&options.from_token.address)
			&& provider.get_to_tokens().contains(
				options.to_token.network(),
				&options.to_token.token.address,
			)
	}

	/// Run all provider calls concurrently under one child token
	///
	/// External cancellation aborts the whole fan-out. The deadline
	/// cancels the child token instead, keeps whatever already settled
	/// and grants still-pending calls a short grace period to settle
	/// with their cancellation outcome before the futures are dropped.
	async fn fan_out(
		&self,
		request_id: Uuid,
		eligible: &[Arc<dyn SwapProvider>],
		options: &QuoteOptions,
		meta: &QuoteMeta,
		timeout: Duration,
		signal: &CancellationToken,
	) -> AggregationResult<Vec<SettledCall>> {
		let cancel = signal.child_token();

		let mut calls: FuturesUnordered<_> = eligible
			.iter()
			.map(|provider| {
				let provider = Arc::clone(provider);
				let options = options.clone();
				let meta = meta.clone();
				let ctx = ProviderContext::new(cancel.clone());
				async move {
					let started = Instant::now();
					let result = provider.get_quote(&options, &meta, &ctx).await;
					SettledCall {
						provider: provider.id(),
						result,
						elapsed_ms: started.elapsed().as_millis() as u64,
					}
				}
			})
			.collect();

		let mut settled = Vec::with_capacity(eligible.len());
		let deadline = tokio::time::sleep(timeout);
		tokio::pin!(deadline);
		let mut timed_out = false;

		loop {
			tokio::select! {
				_ = signal.cancelled() => {
					cancel.cancel();
					info!("request {request_id}: cancelled by caller with {} call(s) in flight", calls.len());
					return Err(AggregationError::Cancelled);
				}
				_ = &mut deadline => {
					timed_out = true;
					cancel.cancel();
					warn!(
						"request {request_id}: {}ms deadline reached, cancelling {} pending call(s)",
						timeout.as_millis(),
						calls.len()
					);
					break;
				}
				next = calls.next() => match next {
					Some(outcome) => settled.push(outcome),
					None => break,
				}
			}
		}

		if timed_out && !calls.is_empty() {
			let grace = Duration::from_millis(self.cancel_grace_ms);
			let drain = async {
				while let Some(outcome) = calls.next().await {
					settled.push(outcome);
				}
			};
			// Calls that do not settle within the grace period are dropped
			// along with their in-flight I/O.
			let _ = tokio::time::timeout(grace, drain).await;
		}

		Ok(settled)
	}

	fn classify(
		&self,
		request_id: Uuid,
		options: &QuoteOptions,
		eligible_ids: Vec<ProviderId>,
		settled: Vec<SettledCall>,
		timeout: Duration,
	) -> AggregationResult<Vec<ProviderQuote>> {
		let settled_ids: HashSet<ProviderId> =
			settled.iter().map(|call| call.provider).collect();

		let mut quotes = Vec::new();
		let mut failures = Vec::new();
		let mut no_route = 0usize;

		for call in settled {
			let provider = call.provider;
			match call.result {
				Ok(Some(mut quote)) => {
					if let Err(violation) = quote.validate_bounds() {
						warn!("request {request_id}: discarding quote from {provider}: {violation}");
						failures.push(ProviderFailure {
							provider,
							reason: violation.to_string(),
						});
						continue;
					}
					quote.response_time_ms = call.elapsed_ms;
					debug!(
						"request {request_id}: {provider} quoted {} in {}ms",
						quote.to_token_amount, call.elapsed_ms
					);
					quotes.push(quote);
				},
				Ok(None) => {
					debug!("request {request_id}: {provider} has no route");
					no_route += 1;
				},
				Err(err) if err.is_cancelled() => {
					failures.push(ProviderFailure {
						provider,
						reason: format!("no quote within {}ms", timeout.as_millis()),
					});
				},
				Err(err) => {
					warn!("request {request_id}: {provider} returned error: {err}");
					failures.push(ProviderFailure {
						provider,
						reason: err.to_string(),
					});
				},
			}
		}

		// Calls dropped at the deadline without settling at all
		for id in eligible_ids.iter().filter(|id| !settled_ids.contains(id)) {
			failures.push(ProviderFailure {
				provider: *id,
				reason: format!("no response within {}ms", timeout.as_millis()),
			});
		}

		if quotes.is_empty() {
			return if failures.is_empty() {
				info!("request {request_id}: no provider has a route ({no_route} asked)");
				Err(AggregationError::NoRouteFound)
			} else {
				warn!(
					"request {request_id}: no quotes, {} provider(s) failed",
					failures.len()
				);
				Err(AggregationError::AllProvidersFailed { failures })
			};
		}

		let ranked = self.rank(quotes, options);
		info!(
			"request {request_id}: {} quote(s), {} no-route, {} failure(s); best from {}",
			ranked.len(),
			no_route,
			failures.len(),
			ranked[0].provider
		);
		Ok(ranked)
	}

	/// Order by effective output descending; exact ties break on the
	/// provider ordinal so the result is deterministic regardless of
	/// completion order.
	fn rank(&self, quotes: Vec<ProviderQuote>, options: &QuoteOptions) -> Vec<ProviderQuote> {
		// additional_native_fees is denominated in the source network's
		// native asset; it is only comparable with the output when the
		// destination token is that same asset.
		let deduct_fees =
			options.to_token.network() == self.network && options.to_token.token.is_native();

		let mut keyed: Vec<(Amount, ProviderQuote)> = quotes
			.into_iter()
			.map(|quote| {
				let effective = if deduct_fees {
					quote
						.to_token_amount
						.saturating_sub(&quote.additional_native_fees)
				} else {
					quote.to_token_amount.clone()
				};
				(effective, quote)
			})
			.collect();

		keyed.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.provider.cmp(&b.1.provider)));
		keyed.into_iter().map(|(_, quote)| quote).collect()
	}
}

struct SettledCall {
	provider: ProviderId,
	result: swapkit_types::ProviderResult<Option<ProviderQuote>>,
	elapsed_ms: u64,
}
