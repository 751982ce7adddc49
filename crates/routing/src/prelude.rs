//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use balanced_amm_routing::prelude::*;
//! ```

// Search
pub use crate::best_trade::{BestTradeOptions, best_trade_exact_in, best_trade_exact_out};

// Path encoding
pub use crate::path::{PathSegment, RouteAction, RouteActionType};

// Routes and trades
pub use crate::route::Route;
pub use crate::trade::{Trade, trade_comparator};

// Domain
pub use balanced_amm_domain::{
    AmmError, AmmResult, ChainConfig, Currency, CurrencyAmount, Fraction, NativeCurrency, Pair,
    PairOptions, Percent, PoolType, Price, Token, TradeType,
};
