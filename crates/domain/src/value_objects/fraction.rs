//! Exact rational numbers over arbitrary-precision integers.

use crate::enums::Rounding;
use crate::error::{AmmError, AmmResult};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A numerator/denominator pair. The denominator is always positive.
///
/// Equality and ordering compare values, so `1/2 == 2/4`. Deserialized
/// values go through [`Fraction::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawFraction")]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

#[derive(Deserialize)]
struct RawFraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl TryFrom<RawFraction> for Fraction {
    type Error = AmmError;

    fn try_from(raw: RawFraction) -> AmmResult<Self> {
        Fraction::new(raw.numerator, raw.denominator)
    }
}

impl Fraction {
    /// Creates a fraction, failing on a zero denominator.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> AmmResult<Self> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        if denominator.is_negative() {
            return Ok(Self {
                numerator: -numerator,
                denominator: -denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    /// Builds `numerator / denominator` for a known non-zero denominator.
    pub(crate) fn ratio(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        let denominator = denominator.into();
        debug_assert!(denominator.is_positive());
        Self {
            numerator: numerator.into(),
            denominator,
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0u8)
    }

    pub fn one() -> Self {
        Self::from_integer(1u8)
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Integer part, truncated toward zero.
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// What is left after removing the quotient.
    pub fn remainder(&self) -> Fraction {
        Fraction {
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
    }

    pub fn invert(&self) -> AmmResult<Fraction> {
        Fraction::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn add(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction {
                numerator: &self.numerator + &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Fraction {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn subtract(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction {
                numerator: &self.numerator - &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Fraction {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn multiply(&self, other: &Fraction) -> Fraction {
        Fraction {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }

    pub fn divide(&self, other: &Fraction) -> AmmResult<Fraction> {
        Fraction::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    /// Renders the value with exactly `decimal_places` digits after the point.
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        let scale = BigInt::from(10u8).pow(decimal_places);
        let scaled = round_div(&(self.numerator.abs() * scale), &self.denominator, rounding);
        let negative = self.is_negative() && !scaled.is_zero();
        let digits = scaled.to_string();

        let body = if decimal_places == 0 {
            digits
        } else {
            let places = decimal_places as usize;
            let padded = format!("{:0>width$}", digits, width = places + 1);
            let (int_part, frac_part) = padded.split_at(padded.len() - places);
            format!("{int_part}.{frac_part}")
        };

        if negative { format!("-{body}") } else { body }
    }

    /// Renders the value with at most `significant_digits` significant digits,
    /// trimming trailing fractional zeros.
    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> String {
        if self.numerator.is_zero() {
            return "0".to_string();
        }
        let significant_digits = i64::from(significant_digits.max(1));
        let abs = Fraction {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        };
        let places = significant_digits - 1 - abs.magnitude();

        let body = if places >= 0 {
            trim_fraction_zeros(abs.to_fixed(places as u32, rounding))
        } else {
            let factor = BigInt::from(10u8).pow((-places) as u32);
            let rounded = round_div(&abs.numerator, &(&abs.denominator * &factor), rounding);
            (rounded * factor).to_string()
        };

        if self.is_negative() && body != "0" {
            format!("-{body}")
        } else {
            body
        }
    }

    /// Converts to a `Decimal` rounded half-up at `decimal_places`.
    pub fn to_decimal(&self, decimal_places: u32) -> AmmResult<Decimal> {
        let text = self.to_fixed(decimal_places, Rounding::RoundHalfUp);
        Decimal::from_str(&text).map_err(|e| AmmError::DecimalConversion(format!("{text}: {e}")))
    }

    /// floor(log10(|self|)) for a non-zero value.
    fn magnitude(&self) -> i64 {
        let integer = &self.numerator / &self.denominator;
        if !integer.is_zero() {
            return integer.to_string().len() as i64 - 1;
        }
        let mut exponent = 0i64;
        let mut scaled = self.numerator.clone();
        let ten = BigInt::from(10u8);
        while scaled < self.denominator {
            scaled *= &ten;
            exponent -= 1;
        }
        exponent
    }
}

/// Divides two non-negative integers with the requested rounding.
fn round_div(numerator: &BigInt, denominator: &BigInt, rounding: Rounding) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.is_zero() {
        return quotient;
    }
    match rounding {
        Rounding::RoundDown => quotient,
        Rounding::RoundUp => quotient + 1,
        Rounding::RoundHalfUp => {
            if remainder * 2 >= *denominator {
                quotient + 1
            } else {
                quotient
            }
        }
    }
}

fn trim_fraction_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl From<u64> for Fraction {
    fn from(v: u64) -> Self {
        Self::from_integer(v)
    }
}

impl From<BigInt> for Fraction {
    fn from(v: BigInt) -> Self {
        Self::from_integer(v)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
