//! Global limits and defaults for configuration and runtime

/// Minimum allowed aggregation timeout in milliseconds
pub const MIN_GLOBAL_TIMEOUT_MS: u64 = 100;

/// Maximum allowed aggregation timeout in milliseconds
pub const MAX_GLOBAL_TIMEOUT_MS: u64 = 120_000;

/// Default aggregation timeout in milliseconds
pub const DEFAULT_GLOBAL_TIMEOUT_MS: u64 = 30_000;

/// Default grace period granted to cancelled provider calls to settle
pub const DEFAULT_CANCEL_GRACE_MS: u64 = 250;

/// Maximum allowed cancellation grace period
pub const MAX_CANCEL_GRACE_MS: u64 = 5_000;

/// Default slippage tolerance, percent
pub const DEFAULT_SLIPPAGE: &str = "0.5";

/// Maximum accepted slippage tolerance, percent
pub const MAX_SLIPPAGE_PERCENT: f64 = 50.0;
