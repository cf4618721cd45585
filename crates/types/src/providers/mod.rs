//! Provider contract: the polymorphic capability every liquidity,
//! bridge or DEX backend plugs into the engine through

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod traits;

pub use errors::{ProviderError, ProviderResult};
pub use traits::{ProviderContext, SwapProvider};

/// Closed enumeration of known liquidity providers
///
/// Declaration order doubles as the deterministic tie-break ordinal when
/// two quotes rank equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
	OneInch,
	Paraswap,
	Zerox,
	Changelly,
	Rango,
	Jupiter,
}

impl ProviderId {
	pub fn as_str(&self) -> &'static str {
		match self {
			ProviderId::OneInch => "oneinch",
			ProviderId::Paraswap => "paraswap",
			ProviderId::Zerox => "zerox",
			ProviderId::Changelly => "changelly",
			ProviderId::Rango => "rango",
			ProviderId::Jupiter => "jupiter",
		}
	}
}

impl std::fmt::Display for ProviderId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
