//! Pool share accounting.

use crate::constants::MINIMUM_LIQUIDITY;
use crate::error::{AmmError, AmmResult};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Shares minted for depositing `amount0`/`amount1`.
///
/// The first deposit mints sqrt(amount0 * amount1) minus a permanently burned
/// [`MINIMUM_LIQUIDITY`]; later deposits mint in proportion to the smaller
/// side's contribution.
pub fn liquidity_minted(
    total_supply: &BigInt,
    amount0: &BigInt,
    amount1: &BigInt,
    reserve0: &BigInt,
    reserve1: &BigInt,
) -> AmmResult<BigInt> {
    let liquidity = if total_supply.is_zero() {
        let product = amount0 * amount1;
        if product.is_negative() {
            return Err(AmmError::InsufficientInputAmount(
                "deposit amounts must not be negative".to_string(),
            ));
        }
        product.sqrt() - MINIMUM_LIQUIDITY
    } else {
        if reserve0.is_zero() || reserve1.is_zero() {
            return Err(AmmError::InsufficientReserves(
                "pool has supply but no reserves".to_string(),
            ));
        }
        let by0 = amount0 * total_supply / reserve0;
        let by1 = amount1 * total_supply / reserve1;
        by0.min(by1)
    };

    if !liquidity.is_positive() {
        return Err(AmmError::InsufficientInputAmount(format!(
            "deposit mints {liquidity} shares"
        )));
    }
    Ok(liquidity)
}

/// Total supply after minting the protocol's share of fees accrued since
/// `k_last`: supply × (√k − √k_last) / (5√k + √k_last).
pub fn fee_adjusted_supply(
    total_supply: &BigInt,
    reserve0: &BigInt,
    reserve1: &BigInt,
    k_last: &BigInt,
) -> BigInt {
    let k = reserve0 * reserve1;
    if !k_last.is_positive() || !k.is_positive() {
        return total_supply.clone();
    }
    let root_k = k.sqrt();
    let root_k_last = k_last.sqrt();
    if root_k <= root_k_last {
        return total_supply.clone();
    }
    let numerator = total_supply * (&root_k - &root_k_last);
    let denominator = &root_k * 5u8 + &root_k_last;
    total_supply + numerator / denominator
}

/// The amount of one reserve that `liquidity` shares redeem for.
pub fn liquidity_value(
    reserve: &BigInt,
    total_supply: &BigInt,
    liquidity: &BigInt,
) -> AmmResult<BigInt> {
    if liquidity > total_supply {
        return Err(AmmError::LiquidityExceedsSupply {
            liquidity: liquidity.to_string(),
            total_supply: total_supply.to_string(),
        });
    }
    if total_supply.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    Ok(reserve * liquidity / total_supply)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(v: u64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn test_first_deposit_burns_minimum_liquidity() {
        let minted = liquidity_minted(&b(0), &b(2000), &b(2000), &b(0), &b(0)).unwrap();
        assert_eq!(minted, b(1000));
    }

    #[test]
    fn test_tiny_first_deposit_is_rejected() {
        let err = liquidity_minted(&b(0), &b(1000), &b(1000), &b(0), &b(0)).unwrap_err();
        assert!(matches!(err, AmmError::InsufficientInputAmount(_)));
    }

    #[test]
    fn test_proportional_deposit() {
        let minted = liquidity_minted(&b(10_000), &b(2000), &b(1000), &b(10_000), &b(10_000)).unwrap();
        assert_eq!(minted, b(1000));
    }

    #[test]
    fn test_fee_adjusted_supply() {
        // root_k = 1000, root_k_last = 500
        // 500 * 500 / (5000 + 500) = 45
        let supply = fee_adjusted_supply(&b(500), &b(1000), &b(1000), &b(250_000));
        assert_eq!(supply, b(545));
        assert_eq!(fee_adjusted_supply(&b(500), &b(1000), &b(1000), &b(0)), b(500));
    }

    #[test]
    fn test_liquidity_value() {
        assert_eq!(liquidity_value(&b(1000), &b(1000), &b(500)).unwrap(), b(500));
        assert!(liquidity_value(&b(1000), &b(1000), &b(1001)).is_err());
    }
}
