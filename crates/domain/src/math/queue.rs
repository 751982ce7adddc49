//! Queue pool quotes. One side of a queue pool is the native placeholder
//! asset: buying into the queue with it is fee-free, selling out of the
//! queue into it costs a flat 1%.

use crate::constants::{QUEUE_FEE_DENOMINATOR, QUEUE_FEE_NUMERATOR};
use crate::error::{AmmError, AmmResult};
use crate::value_objects::fraction::Fraction;

/// output = input × reserve_out / reserve_in, less 1% unless the input is native.
pub fn get_amount_out(
    amount_in: &Fraction,
    reserve_in: &Fraction,
    reserve_out: &Fraction,
    input_is_native: bool,
) -> AmmResult<Fraction> {
    let rate = reserve_out.divide(reserve_in).map_err(|_| {
        AmmError::InsufficientReserves("queue input reserve is zero".to_string())
    })?;
    let gross = amount_in.multiply(&rate);
    if input_is_native {
        Ok(gross)
    } else {
        Ok(gross.multiply(&fee_factor()))
    }
}

/// Inverse of [`get_amount_out`].
pub fn get_amount_in(
    amount_out: &Fraction,
    reserve_in: &Fraction,
    reserve_out: &Fraction,
    input_is_native: bool,
) -> AmmResult<Fraction> {
    let rate = reserve_in.divide(reserve_out).map_err(|_| {
        AmmError::InsufficientReserves("queue output reserve is zero".to_string())
    })?;
    let gross = amount_out.multiply(&rate);
    if input_is_native {
        Ok(gross)
    } else {
        gross.divide(&fee_factor())
    }
}

fn fee_factor() -> Fraction {
    Fraction::ratio(QUEUE_FEE_NUMERATOR, QUEUE_FEE_DENOMINATOR)
}
