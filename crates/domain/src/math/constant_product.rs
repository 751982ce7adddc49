use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::error::{AmmError, AmmResult};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Calculates the output amount for a given input amount in a constant product pool (x * y = k).
///
/// formula: dy = y * dx / (x + dx)
/// taking the 0.3% fee into account: dy = y * (dx * 997) / (x * 1000 + dx * 997)
pub fn get_amount_out(
    amount_in: &BigInt,
    reserve_in: &BigInt,
    reserve_out: &BigInt,
) -> AmmResult<BigInt> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientReserves(
            "reserves must be non-zero".to_string(),
        ));
    }

    let amount_in_with_fee = amount_in * FEE_NUMERATOR;
    let numerator = &amount_in_with_fee * reserve_out;
    let denominator = reserve_in * FEE_DENOMINATOR + &amount_in_with_fee;

    let amount_out = numerator / denominator;
    if !amount_out.is_positive() {
        return Err(AmmError::InsufficientInputAmount(format!(
            "{amount_in} yields no output"
        )));
    }
    Ok(amount_out)
}

/// Calculates the input needed to receive `amount_out`, rounded up by one so
/// the pool never loses value to truncation.
///
/// formula: dx = x * dy * 1000 / ((y - dy) * 997) + 1
pub fn get_amount_in(
    amount_out: &BigInt,
    reserve_in: &BigInt,
    reserve_out: &BigInt,
) -> AmmResult<BigInt> {
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientReserves(format!(
            "cannot take {amount_out} out of {reserve_out}"
        )));
    }

    let numerator = reserve_in * amount_out * FEE_DENOMINATOR;
    let denominator = (reserve_out - amount_out) * FEE_NUMERATOR;
    Ok(numerator / denominator + 1u8)
}

/// Calculates the constant product K
pub fn calculate_k(reserve0: &BigInt, reserve1: &BigInt) -> BigInt {
    reserve0 * reserve1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_amount_out() {
        // 1000 reserve0, 1000 reserve1, 10 input, 0.3% fee
        // amount_in_with_fee = 10 * 997 = 9970
        // numerator = 9970 * 1000 = 9,970,000
        // denominator = 1000 * 1000 + 9970 = 1,009,970
        // out = 9,970,000 / 1,009,970 = 9.87... -> 9
        let out = get_amount_out(&BigInt::from(10), &BigInt::from(1000), &BigInt::from(1000)).unwrap();
        assert_eq!(out, BigInt::from(9));
    }

    #[test]
    fn test_zero_output_is_rejected() {
        let err = get_amount_out(&BigInt::from(1), &BigInt::from(1000), &BigInt::from(1000)).unwrap_err();
        assert!(matches!(err, AmmError::InsufficientInputAmount(_)));
    }

    #[test]
    fn test_get_amount_in_rounds_up() {
        // 1000 * 9 * 1000 / (991 * 997) = 9,000,000 / 988,027 = 9.10... -> 9 + 1
        let input = get_amount_in(&BigInt::from(9), &BigInt::from(1000), &BigInt::from(1000)).unwrap();
        assert_eq!(input, BigInt::from(10));
    }

    #[test]
    fn test_get_amount_in_rejects_draining_output() {
        let err = get_amount_in(&BigInt::from(1000), &BigInt::from(1000), &BigInt::from(1000)).unwrap_err();
        assert!(matches!(err, AmmError::InsufficientReserves(_)));
    }

    #[test]
    fn test_calculate_k() {
        assert_eq!(
            calculate_k(&BigInt::from(2000), &BigInt::from(1000)),
            BigInt::from(2_000_000)
        );
    }
}
