use thiserror::Error;

/// Errors raised by the pair math and the routing engine.
///
/// None of these are retried internally: they describe malformed input or a
/// trading path that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    #[error("token mismatch: {0}")]
    TokenMismatch(String),

    #[error("insufficient reserves: {0}")]
    InsufficientReserves(String),

    #[error("insufficient input amount: {0}")]
    InsufficientInputAmount(String),

    #[error("no pairs supplied")]
    PairsEmpty,

    #[error("pairs span more than one chain: {0}")]
    ChainMismatch(String),

    #[error("route is not connected: {0}")]
    RouteConnectivity(String),

    #[error("max hops must be at least 1, got {0}")]
    MaxHops(usize),

    #[error("slippage tolerance must not be negative")]
    InvalidSlippageTolerance,

    #[error("division by zero")]
    DivisionByZero,

    #[error("liquidity {liquidity} exceeds total supply {total_supply}")]
    LiquidityExceedsSupply {
        liquidity: String,
        total_supply: String,
    },

    #[error("k_last is required when the protocol fee is on")]
    MissingKLast,

    #[error("amount does not fit in 256 bits: {0}")]
    AmountOverflow(String),

    #[error("decimal conversion failed: {0}")]
    DecimalConversion(String),
}

pub type AmmResult<T> = Result<T, AmmError>;
