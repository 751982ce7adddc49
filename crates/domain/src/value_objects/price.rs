use crate::entities::token::Currency;
use crate::enums::Rounding;
use crate::error::{AmmError, AmmResult};
use crate::value_objects::amount::{CurrencyAmount, decimal_scale};
use crate::value_objects::fraction::Fraction;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many raw units of `quote` one raw unit of `base` is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub base: Currency,
    pub quote: Currency,
    /// quote raw / base raw.
    pub value: Fraction,
}

impl Price {
    pub fn new(
        base: Currency,
        quote: Currency,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> AmmResult<Self> {
        Ok(Self {
            base,
            quote,
            value: Fraction::new(numerator, denominator)?,
        })
    }

    pub fn from_fraction(base: Currency, quote: Currency, value: Fraction) -> Self {
        Self { base, quote, value }
    }

    /// The price implied by trading `base_amount` for `quote_amount`.
    pub fn from_amounts(base_amount: &CurrencyAmount, quote_amount: &CurrencyAmount) -> AmmResult<Self> {
        let value = quote_amount
            .as_fraction()
            .divide(base_amount.as_fraction())?;
        Ok(Self {
            base: base_amount.currency().clone(),
            quote: quote_amount.currency().clone(),
            value,
        })
    }

    pub fn invert(&self) -> AmmResult<Self> {
        Ok(Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
            value: self.value.invert()?,
        })
    }

    /// Chains `self` (A→B) with `other` (B→C) into A→C.
    pub fn multiply(&self, other: &Price) -> AmmResult<Self> {
        if self.quote.wrapped() != other.base.wrapped() {
            return Err(AmmError::TokenMismatch(format!(
                "cannot chain {}/{} with {}/{}",
                self.base, self.quote, other.base, other.quote
            )));
        }
        Ok(Self {
            base: self.base.clone(),
            quote: other.quote.clone(),
            value: self.value.multiply(&other.value),
        })
    }

    /// Converts an amount of `base` into `quote` at this price.
    pub fn quote(&self, amount: &CurrencyAmount) -> AmmResult<CurrencyAmount> {
        if amount.currency().wrapped() != self.base.wrapped() {
            return Err(AmmError::TokenMismatch(format!(
                "price base is {}, amount is {}",
                self.base,
                amount.currency()
            )));
        }
        Ok(CurrencyAmount::from_fraction(
            self.quote.clone(),
            amount.as_fraction().multiply(&self.value),
        ))
    }

    /// The price in human units: raw price × 10^base_decimals / 10^quote_decimals.
    pub fn adjusted_for_decimals(&self) -> Fraction {
        let scalar = Fraction::ratio(
            decimal_scale(self.base.decimals()),
            decimal_scale(self.quote.decimals()),
        );
        self.value.multiply(&scalar)
    }

    pub fn to_significant(&self, significant_digits: u32) -> String {
        self.adjusted_for_decimals()
            .to_significant(significant_digits, Rounding::RoundHalfUp)
    }

    pub fn to_fixed(&self, decimal_places: u32) -> String {
        self.adjusted_for_decimals()
            .to_fixed(decimal_places, Rounding::RoundHalfUp)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.to_significant(6), self.quote, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::token::Token;

    fn t(address: &str, decimals: u8) -> Currency {
        Token::new(1, address, decimals, address, address).into()
    }

    #[test]
    fn test_quote_and_invert() {
        let price = Price::new(t("cx1", 18), t("cx2", 18), 1, 2).unwrap();
        let amount = CurrencyAmount::from_raw_amount(t("cx1", 18), 10u64);
        let quoted = price.quote(&amount).unwrap();
        assert_eq!(quoted.quotient(), BigInt::from(20));
        assert_eq!(price.invert().unwrap().value, Fraction::new(1, 2).unwrap());
    }

    #[test]
    fn test_multiply_chains_prices() {
        let ab = Price::new(t("cx1", 18), t("cx2", 18), 1, 2).unwrap();
        let bc = Price::new(t("cx2", 18), t("cx3", 18), 1, 3).unwrap();
        let ac = ab.multiply(&bc).unwrap();
        assert_eq!(ac.value, Fraction::from_integer(6u8));
        assert!(bc.multiply(&ab).is_err());
    }

    #[test]
    fn test_adjusted_for_decimals() {
        // 1 raw unit of an 18-decimal token buys 1e-12 raw units of a 6-decimal token
        // when both are pegged 1:1.
        let price = Price::new(t("cx1", 18), t("cx2", 6), 1_000_000_000_000i64, 1).unwrap();
        assert_eq!(price.adjusted_for_decimals(), Fraction::one());
        assert_eq!(price.to_significant(4), "1");
    }
}
