//! Shared domain models used across providers and services

pub mod amount;
pub mod network;
pub mod token;

pub use amount::{Amount, AmountParseError};
pub use network::{NetworkInfo, NetworkType, SignerType, SupportedNetwork};
pub use token::{
	AddressValidator, AnyAddress, DestinationToken, FromTokenCatalog, ToTokenCatalog, Token,
	TokenNetwork, EVM_NATIVE_ADDRESS,
};
