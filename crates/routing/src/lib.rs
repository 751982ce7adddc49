//! Multi-hop trade routing over AMM pairs.
//!
//! This crate provides:
//! - Validated routes through a chain of pairs, with cached mid prices
//! - Exact-input and exact-output trades simulated hop by hop
//! - Slippage bounds and price impact
//! - Depth-limited best trade search
//! - On-chain path encoding for the router contract

/// Prelude module for convenient imports.
pub mod prelude;

/// Best trade search.
pub mod best_trade;
/// Router path encoding.
pub mod path;
/// Routes through pairs.
pub mod route;
/// Trades over routes.
pub mod trade;

pub use balanced_amm_domain::{AmmError, AmmResult};
