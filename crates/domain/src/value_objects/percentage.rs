use crate::enums::Rounding;
use crate::error::AmmResult;
use crate::value_objects::fraction::Fraction;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ratio rendered as a percentage. `Percent::new(1, 100)` is 1%.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percent(pub Fraction);

impl Percent {
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> AmmResult<Self> {
        Ok(Self(Fraction::new(numerator, denominator)?))
    }

    pub fn zero() -> Self {
        Self(Fraction::zero())
    }

    pub fn from_bps(bps: u32) -> Self {
        Self(Fraction::ratio(bps, 10_000))
    }

    /// Basis points, truncated. Returns `None` for negative or oversized values.
    pub fn to_bps(&self) -> Option<u32> {
        self.0
            .multiply(&Fraction::from_integer(10_000u32))
            .quotient()
            .to_u32()
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn to_significant(&self, significant_digits: u32) -> String {
        self.0
            .multiply(&Fraction::from_integer(100u8))
            .to_significant(significant_digits, Rounding::RoundHalfUp)
    }

    pub fn to_fixed(&self, decimal_places: u32) -> String {
        self.0
            .multiply(&Fraction::from_integer(100u8))
            .to_fixed(decimal_places, Rounding::RoundHalfUp)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.to_significant(4))
    }
}
