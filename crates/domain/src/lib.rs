//! Core AMM domain types.
//!
//! This crate holds the exact-arithmetic building blocks of the swap engine:
//! - Tokens, native currencies and per-chain asset roles
//! - Fractions, currency amounts, prices and percentages
//! - Pool math for constant-product, stability fund and queue pools
//! - The [`Pair`] snapshot and its quotes

/// Per-chain asset roles and ordering.
pub mod chain;
/// Protocol constants.
pub mod constants;
/// Pairs and tokens.
pub mod entities;
/// Shared enums.
pub mod enums;
/// Error type.
pub mod error;
/// Pool math.
pub mod math;
/// Exact value types.
pub mod value_objects;

pub use chain::{CanonicalOrdering, ChainConfig};
pub use entities::{Currency, NativeCurrency, Pair, PairOptions, Token};
pub use enums::{PoolType, Rounding, TradeType};
pub use error::{AmmError, AmmResult};
pub use value_objects::{CurrencyAmount, Fraction, Percent, Price};
