#![cfg_attr(not(feature = "std"), no_std)]

pub mod errors;
pub mod utils;

pub use scale::{Decode, Encode};

/// Identifier of a non-fungible asset, assigned sequentially by the
/// asset registry and never reused.
pub type TokenId = u128;
