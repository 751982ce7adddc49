use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rounding {
    RoundDown,
    #[default]
    RoundHalfUp,
    RoundUp,
}

/// Swap model a pair follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolType {
    /// x * y = k with a 0.3% fee.
    ConstantProduct,
    /// Fixed-rate mint/burn between pegged assets, rescaled by decimals only.
    StabilityFund,
    /// One side is the chain's native placeholder asset.
    Queue,
}
