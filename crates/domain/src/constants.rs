/// Liquidity burned on the first deposit into an empty pool.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Constant-product fee: 997 / 1000 of the input is swapped (0.3% fee).
pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1_000;

/// Queue pool fee charged when selling into the native asset (1%).
pub const QUEUE_FEE_NUMERATOR: u64 = 99;
pub const QUEUE_FEE_DENOMINATOR: u64 = 100;

/// Symbol and name given to pool share tokens.
pub const LIQUIDITY_TOKEN_SYMBOL: &str = "BALN-V2";
pub const LIQUIDITY_TOKEN_NAME: &str = "Balanced V2";
