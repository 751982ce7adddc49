//! Stability fund swaps: pegged assets exchanged 1:1, adjusted only for
//! differing decimal precision.

use crate::value_objects::amount::decimal_scale;
use crate::value_objects::fraction::Fraction;

/// Re-expresses a raw amount with `from_decimals` in raw units of `to_decimals`.
pub fn rescale(amount: &Fraction, from_decimals: u8, to_decimals: u8) -> Fraction {
    amount.multiply(&Fraction::ratio(
        decimal_scale(to_decimals),
        decimal_scale(from_decimals),
    ))
}
