pub mod constant_product;
pub mod fixed_rate;
pub mod liquidity;
pub mod queue;
