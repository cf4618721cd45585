//! Cancellation and timeout E2E tests
//!
//! One shared signal governs a whole fan-out: external cancellation must
//! reach every in-flight provider call, and the deadline must keep what
//! settled in time while cancelling the rest.

mod common;

use common::*;
use std::sync::Arc;
use std::time::Duration;
use swapkit::{AggregationError, CancellationToken, ProviderId, QuoteMeta};

#[tokio::test]
async fn test_cancel_mid_fan_out_stops_every_provider() {
	let mocks = vec![
		Arc::new(eth_provider(ProviderId::OneInch).with_quote(100).with_delay(500)),
		Arc::new(eth_provider(ProviderId::Paraswap).with_quote(90).with_delay(500)),
		Arc::new(eth_provider(ProviderId::Changelly).with_quote(80).with_delay(500)),
	];

	let signal = CancellationToken::new();
	let canceller = signal.clone();
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(50)).await;
		canceller.cancel();
	});

	let err = aggregator()
		.request_quotes(
			&quote_options(usdt_on_ethereum()),
			&QuoteMeta::default(),
			&as_providers(&mocks),
			TEST_TIMEOUT,
			&signal,
		)
		.await
		.unwrap_err();

	assert!(matches!(err, AggregationError::Cancelled));

	// No provider call ran to completion, regardless of which one would
	// have finished first
	for mock in &mocks {
		assert_eq!(mock.completed_quotes(), 0);
	}
}

#[tokio::test]
async fn test_already_cancelled_signal_short_circuits() {
	let mock = Arc::new(eth_provider(ProviderId::OneInch).with_quote(100));
	let signal = CancellationToken::new();
	signal.cancel();

	let err = aggregator()
		.request_quotes(
			&quote_options(usdt_on_ethereum()),
			&QuoteMeta::default(),
			&as_providers(&[mock.clone()]),
			TEST_TIMEOUT,
			&signal,
		)
		.await
		.unwrap_err();

	assert!(matches!(err, AggregationError::Cancelled));
	assert_eq!(mock.completed_quotes(), 0);
}

#[tokio::test]
async fn test_deadline_keeps_quotes_settled_in_time() {
	let fast = Arc::new(eth_provider(ProviderId::OneInch).with_quote(100));
	let slow = Arc::new(
		eth_provider(ProviderId::Paraswap)
			.with_quote(200)
			.with_delay(5_000),
	);
	let mocks = vec![fast, slow.clone()];

	let quotes = aggregator()
		.request_quotes(
			&quote_options(usdt_on_ethereum()),
			&QuoteMeta::default(),
			&as_providers(&mocks),
			Duration::from_millis(200),
			&CancellationToken::new(),
		)
		.await
		.unwrap();

	assert_eq!(quotes.len(), 1);
	assert_eq!(quotes[0].provider, ProviderId::OneInch);
	assert_eq!(slow.completed_quotes(), 0);
}

#[tokio::test]
async fn test_deadline_with_nothing_settled_is_a_failure() {
	let mocks = vec![
		Arc::new(eth_provider(ProviderId::OneInch).with_quote(100).with_delay(5_000)),
		Arc::new(eth_provider(ProviderId::Paraswap).with_quote(90).with_delay(5_000)),
	];

	let err = aggregator()
		.request_quotes(
			&quote_options(usdt_on_ethereum()),
			&QuoteMeta::default(),
			&as_providers(&mocks),
			Duration::from_millis(100),
			&CancellationToken::new(),
		)
		.await
		.unwrap_err();

	match err {
		AggregationError::AllProvidersFailed { failures } => {
			assert_eq!(failures.len(), 2);
		},
		other => panic!("expected AllProvidersFailed, got {other}"),
	}
}
