//! Amount model for on-chain quantities
//!
//! Every balance, quoted amount and fee in the engine is an `Amount`:
//! an arbitrary-precision unsigned integer denominated in a token's
//! smallest unit. Floating point never enters this path.

use num_bigint::BigUint;
use serde;
use thiserror::Error;

/// Arbitrary-precision unsigned amount in a token's smallest unit
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

/// Errors raised when parsing an amount from its string form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
	#[error("amount cannot be empty")]
	Empty,

	#[error("amount must contain only digits: {value}")]
	NonDigit { value: String },
}

impl Amount {
	/// Create a new amount from a raw big integer
	pub fn new(value: BigUint) -> Self {
		Self(value)
	}

	pub fn zero() -> Self {
		Self(BigUint::default())
	}

	/// Parse a base-10 digit string (the wire representation)
	pub fn parse(value: &str) -> Result<Self, AmountParseError> {
		if value.is_empty() {
			return Err(AmountParseError::Empty);
		}

		if !value.chars().all(|c| c.is_ascii_digit()) {
			return Err(AmountParseError::NonDigit {
				value: value.to_string(),
			});
		}

		// Digits are validated above, radix parsing cannot fail here
		let parsed = BigUint::parse_bytes(value.as_bytes(), 10).ok_or(AmountParseError::NonDigit {
			value: value.to_string(),
		})?;
		Ok(Self(parsed))
	}

	pub fn is_zero(&self) -> bool {
		self.0 == BigUint::default()
	}

	/// Subtraction that fails on underflow instead of wrapping
	pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
		if other.0 > self.0 {
			None
		} else {
			Some(Amount(&self.0 - &other.0))
		}
	}

	/// Subtraction clamped at zero; used when a fee may exceed the output
	pub fn saturating_sub(&self, other: &Amount) -> Amount {
		self.checked_sub(other).unwrap_or_else(Amount::zero)
	}

	/// Access the underlying big integer
	pub fn as_biguint(&self) -> &BigUint {
		&self.0
	}
}

impl std::fmt::Display for Amount {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for Amount {
	type Err = AmountParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl From<BigUint> for Amount {
	fn from(value: BigUint) -> Self {
		Self(value)
	}
}

impl From<u64> for Amount {
	fn from(value: u64) -> Self {
		Self(BigUint::from(value))
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Self(BigUint::from(value))
	}
}

// Serialized as a decimal string to preserve precision across the wallet boundary
impl serde::Serialize for Amount {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0.to_string())
	}
}

impl<'de> serde::Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		Amount::parse(&value).map_err(serde::de::Error::custom)
	}
}
