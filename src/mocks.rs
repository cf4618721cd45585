//! Mock providers for examples and testing
//!
//! Configurable stand-ins for real liquidity backends: call tracking,
//! response delays for timeout testing, failure and no-route modes, and
//! canned transaction sequences for shape validation testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use swapkit_types::{
	Amount, DestinationToken, EvmTransaction, FromTokenCatalog, GenericTransaction, MinMax,
	NetworkType, ProviderContext, ProviderError, ProviderId, ProviderQuote, ProviderResult,
	QuoteMeta, QuoteOptions, SolanaTransaction, StatusOptions, SupportedNetwork, SwapProvider,
	SwapQuote, SwapTransaction, ToTokenCatalog, Token, TokenNetwork, TransactionStatus,
	TransactionType,
};

/// What a mock provider answers when asked for a quote
#[derive(Debug, Clone)]
pub enum QuoteBehavior {
	/// Quote paying out this amount in the destination token's smallest
	/// unit
	Quote { to_amount: u64 },
	/// Report no route for the pair
	NoRoute,
	/// Fail with an invalid-response error
	Fail,
}

/// Configurable mock liquidity provider
///
/// Honors the cancellation contract: a delayed call races its sleep
/// against the context signal and settles with `Cancelled` when the
/// signal wins. `completed_quotes` counts only calls that ran to
/// completion, which is what cancellation tests assert on.
#[derive(Debug, Clone)]
pub struct MockProvider {
	id: ProviderId,
	network: SupportedNetwork,
	quote_behavior: QuoteBehavior,
	response_delay: Duration,
	min_max: MinMax,
	additional_native_fees: Amount,
	/// `None` makes `get_swap` report the quote as stale
	swap_transactions: Option<Vec<SwapTransaction>>,
	status: TransactionStatus,
	fail_status: bool,
	fail_init: bool,
	from_tokens: Vec<Token>,
	to_tokens: Vec<DestinationToken>,
	completed_quotes: Arc<AtomicUsize>,
	polls: Arc<AtomicUsize>,
}

impl MockProvider {
	pub fn new(id: ProviderId, network: SupportedNetwork) -> Self {
		let shape = TransactionType::for_network(network.network_type());
		Self {
			id,
			network,
			quote_behavior: QuoteBehavior::Quote { to_amount: 1_000 },
			response_delay: Duration::ZERO,
			min_max: MinMax::open(),
			additional_native_fees: Amount::zero(),
			swap_transactions: Some(vec![transaction_of(shape)]),
			status: TransactionStatus::Pending,
			fail_status: false,
			fail_init: false,
			from_tokens: Vec::new(),
			to_tokens: Vec::new(),
			completed_quotes: Arc::new(AtomicUsize::new(0)),
			polls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn with_quote(mut self, to_amount: u64) -> Self {
		self.quote_behavior = QuoteBehavior::Quote { to_amount };
		self
	}

	pub fn no_route(mut self) -> Self {
		self.quote_behavior = QuoteBehavior::NoRoute;
		self
	}

	pub fn failing(mut self) -> Self {
		self.quote_behavior = QuoteBehavior::Fail;
		self
	}

	pub fn with_delay(mut self, delay_ms: u64) -> Self {
		self.response_delay = Duration::from_millis(delay_ms);
		self
	}

	pub fn with_min_max(mut self, min_max: MinMax) -> Self {
		self.min_max = min_max;
		self
	}

	pub fn with_fees(mut self, fees: u64) -> Self {
		self.additional_native_fees = Amount::from(fees);
		self
	}

	pub fn with_transactions(mut self, transactions: Vec<SwapTransaction>) -> Self {
		self.swap_transactions = Some(transactions);
		self
	}

	/// Make `get_swap` report the quote as no longer executable
	pub fn stale_swap(mut self) -> Self {
		self.swap_transactions = None;
		self
	}

	pub fn with_status(mut self, status: TransactionStatus) -> Self {
		self.status = status;
		self
	}

	pub fn failing_status(mut self) -> Self {
		self.fail_status = true;
		self
	}

	pub fn failing_init(mut self) -> Self {
		self.fail_init = true;
		self
	}

	/// Put a pair into this provider's catalogs so the eligibility
	/// filter lets it participate
	pub fn with_pair(mut self, from: Token, to: DestinationToken) -> Self {
		self.from_tokens.push(from);
		self.to_tokens.push(to);
		self
	}

	/// Quote calls that ran to completion (not cancelled mid-flight)
	pub fn completed_quotes(&self) -> usize {
		self.completed_quotes.load(Ordering::Relaxed)
	}

	/// Number of status lookups served
	pub fn polls(&self) -> usize {
		self.polls.load(Ordering::Relaxed)
	}

	async fn simulate_latency(&self, ctx: &ProviderContext) -> ProviderResult<()> {
		if !self.response_delay.is_zero() {
			tokio::select! {
				_ = ctx.signal.cancelled() => return Err(ProviderError::Cancelled),
				_ = tokio::time::sleep(self.response_delay) => {},
			}
		}
		if ctx.is_cancelled() {
			return Err(ProviderError::Cancelled);
		}
		Ok(())
	}
}

#[async_trait]
impl SwapProvider for MockProvider {
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
				reason: "configured to fail".to_string(),
			});
		}
		Ok(())
	}

	fn get_from_tokens(&self) -> FromTokenCatalog {
		let mut catalog = FromTokenCatalog::default();
		for token in &self.from_tokens {
			catalog.top.push(token.clone());
			catalog.all.insert(token.address.clone(), token.clone());
		}
		catalog
	}

	fn get_to_tokens(&self) -> ToTokenCatalog {
		let mut catalog = ToTokenCatalog::default();
		for token in &self.to_tokens {
			let network = token.network();
			catalog
				.top
				.entry(network)
				.or_default()
				.push(token.clone());
			catalog
				.all
				.entry(network)
				.or_default()
				.insert(token.token.address.clone(), token.clone());
		}
		catalog
	}

	async fn get_quote(
		&self,
		options: &QuoteOptions,
		meta: &QuoteMeta,
		ctx: &ProviderContext,
	) -> ProviderResult<Option<ProviderQuote>> {
		self.simulate_latency(ctx).await?;
		self.completed_quotes.fetch_add(1, Ordering::Relaxed);

		match &self.quote_behavior {
			QuoteBehavior::Fail => Err(ProviderError::invalid_response(format!(
				"mock {} configured to fail",
				self.id
			))),
			QuoteBehavior::NoRoute => Ok(None),
			QuoteBehavior::Quote { to_amount } => {
				let swap_quote = SwapQuote {
					options: options.clone(),
					meta: meta.clone(),
					provider: self.id,
				};
				Ok(Some(
					ProviderQuote::new(
						options.amount.clone(),
						Amount::from(*to_amount),
						self.id,
						swap_quote,
						self.min_max.clone(),
					)
					.with_total_gas_limit(21_000)
					.with_additional_native_fees(self.additional_native_fees.clone()),
				))
			},
		}
	}

	async fn get_swap(
		&self,
		quote: &SwapQuote,
		ctx: &ProviderContext,
	) -> ProviderResult<Option<swapkit_types::ProviderSwap>> {
		self.simulate_latency(ctx).await?;

		let Some(transactions) = &self.swap_transactions else {
			return Ok(None);
		};

		let to_amount = match &self.quote_behavior {
			QuoteBehavior::Quote { to_amount } => Amount::from(*to_amount),
			_ => Amount::zero(),
		};

		Ok(Some(swapkit_types::ProviderSwap {
			transactions: transactions.clone(),
			from_token_amount: quote.options.amount.clone(),
			to_token_amount: to_amount,
			additional_native_fees: self.additional_native_fees.clone(),
			provider: self.id,
			slippage: quote.meta.slippage.clone().unwrap_or_else(|| "0.5".to_string()),
			fee_percent: 0.0,
		}))
	}

	async fn get_status(&self, _options: &StatusOptions) -> ProviderResult<TransactionStatus> {
		self.polls.fetch_add(1, Ordering::Relaxed);
		if self.fail_status {
			return Err(ProviderError::invalid_response("mock status failure"));
		}
		Ok(self.status)
	}
}

/// A canned transaction of the given shape
pub fn transaction_of(shape: TransactionType) -> SwapTransaction {
	match shape {
		TransactionType::Evm => SwapTransaction::Evm(EvmTransaction {
			from: "0x1111111111111111111111111111111111111111".to_string(),
			to: "0x2222222222222222222222222222222222222222".to_string(),
			value: "0".to_string(),
			data: "0x".to_string(),
			gas_limit: "21000".to_string(),
		}),
		TransactionType::Solana => SwapTransaction::Solana(SolanaTransaction {
			from: "MockFrom1111111111111111111111111".to_string(),
			to: "MockTo111111111111111111111111111".to_string(),
			serialized: "AQIDBA==".to_string(),
		}),
		TransactionType::Generic => SwapTransaction::Generic(GenericTransaction {
			from: "bc1qmocksender".to_string(),
			to: "bc1qmockrecipient".to_string(),
			value: "5000".to_string(),
		}),
	}
}

/// Build a bare token for tests
pub fn test_token(address: &str, symbol: &str, decimals: u8, network_type: NetworkType) -> Token {
	Token {
		address: address.to_string(),
		symbol: symbol.to_string(),
		decimals,
		name: symbol.to_string(),
		logo_uri: String::new(),
		network_type,
		rank: None,
		price_id: None,
		balance: None,
		price: None,
	}
}

/// Build a destination token on the given network, with the permissive
/// address validator
pub fn test_destination(
	address: &str,
	symbol: &str,
	decimals: u8,
	network: SupportedNetwork,
) -> DestinationToken {
	DestinationToken {
		token: test_token(address, symbol, decimals, network.network_type()),
		network_info: TokenNetwork::permissive(network),
	}
}
