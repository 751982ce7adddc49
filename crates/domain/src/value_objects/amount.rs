use crate::entities::token::{Currency, Token};
use crate::enums::Rounding;
use crate::error::{AmmError, AmmResult};
use crate::value_objects::fraction::Fraction;
use num_bigint::BigInt;
use num_traits::Signed;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An exact amount of a currency, held in raw on-chain units as a fraction.
///
/// Most amounts are whole raw integers; fixed-rate and queue quotes may be
/// fractional and keep their exact value until rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyAmount {
    currency: Currency,
    raw: Fraction,
}

impl CurrencyAmount {
    pub fn from_raw_amount(currency: impl Into<Currency>, raw: impl Into<BigInt>) -> Self {
        Self {
            currency: currency.into(),
            raw: Fraction::from_integer(raw),
        }
    }

    pub fn from_fractional_amount(
        currency: impl Into<Currency>,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> AmmResult<Self> {
        Ok(Self {
            currency: currency.into(),
            raw: Fraction::new(numerator, denominator)?,
        })
    }

    pub fn from_fraction(currency: impl Into<Currency>, raw: Fraction) -> Self {
        Self {
            currency: currency.into(),
            raw,
        }
    }

    pub fn from_u256(currency: impl Into<Currency>, raw: U256) -> AmmResult<Self> {
        let value = BigInt::from_str(&raw.to_string())
            .map_err(|e| AmmError::AmountOverflow(e.to_string()))?;
        Ok(Self::from_raw_amount(currency, value))
    }

    /// Parses a human-readable decimal such as `"1.5"` into raw units,
    /// truncating digits beyond the currency's precision.
    pub fn from_decimal(currency: impl Into<Currency>, value: Decimal) -> AmmResult<Self> {
        let currency = currency.into();
        let numerator = BigInt::from_str(&value.mantissa().to_string())
            .map_err(|e| AmmError::DecimalConversion(e.to_string()))?;
        let scaled = Fraction::new(numerator, BigInt::from(10u8).pow(value.scale()))?
            .multiply(&Fraction::from_integer(decimal_scale(currency.decimals())));
        Ok(Self::from_raw_amount(currency, scaled.quotient()))
    }

    pub fn zero(currency: impl Into<Currency>) -> Self {
        Self::from_raw_amount(currency, 0u8)
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// The raw amount as an exact fraction.
    pub fn as_fraction(&self) -> &Fraction {
        &self.raw
    }

    /// Raw integer amount, truncated.
    pub fn quotient(&self) -> BigInt {
        self.raw.quotient()
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    pub fn to_u256(&self) -> AmmResult<U256> {
        let quotient = self.quotient();
        if quotient.is_negative() {
            return Err(AmmError::AmountOverflow(quotient.to_string()));
        }
        U256::from_dec_str(&quotient.to_string())
            .map_err(|_| AmmError::AmountOverflow(quotient.to_string()))
    }

    /// The same amount re-denominated in the pool-side token.
    pub fn wrapped(&self) -> CurrencyAmount {
        match &self.currency {
            Currency::Token(_) => self.clone(),
            Currency::Native(n) => Self::from_fraction(n.wrapped.clone(), self.raw.clone()),
        }
    }

    pub fn is_of(&self, token: &Token) -> bool {
        matches!(&self.currency, Currency::Token(t) if t == token)
    }

    pub fn add(&self, other: &CurrencyAmount) -> AmmResult<CurrencyAmount> {
        self.ensure_same_currency(other)?;
        Ok(Self::from_fraction(self.currency.clone(), self.raw.add(&other.raw)))
    }

    pub fn subtract(&self, other: &CurrencyAmount) -> AmmResult<CurrencyAmount> {
        self.ensure_same_currency(other)?;
        Ok(Self::from_fraction(
            self.currency.clone(),
            self.raw.subtract(&other.raw),
        ))
    }

    pub fn multiply(&self, by: &Fraction) -> CurrencyAmount {
        Self::from_fraction(self.currency.clone(), self.raw.multiply(by))
    }

    pub fn divide(&self, by: &Fraction) -> AmmResult<CurrencyAmount> {
        Ok(Self::from_fraction(self.currency.clone(), self.raw.divide(by)?))
    }

    /// Human-readable value (raw / 10^decimals).
    pub fn to_fraction(&self) -> Fraction {
        self.raw
            .multiply(&Fraction::ratio(1u8, decimal_scale(self.currency.decimals())))
    }

    pub fn to_significant(&self, significant_digits: u32) -> String {
        self.to_fraction()
            .to_significant(significant_digits, Rounding::RoundDown)
    }

    pub fn to_fixed(&self, decimal_places: u32) -> AmmResult<String> {
        if decimal_places > u32::from(self.currency.decimals()) {
            return Err(AmmError::DecimalConversion(format!(
                "{} has only {} decimals",
                self.currency,
                self.currency.decimals()
            )));
        }
        Ok(self
            .to_fraction()
            .to_fixed(decimal_places, Rounding::RoundDown))
    }

    /// Every digit the currency can represent.
    pub fn to_exact(&self) -> String {
        let exact = self
            .to_fraction()
            .to_fixed(u32::from(self.currency.decimals()), Rounding::RoundDown);
        if exact.contains('.') {
            exact.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            exact
        }
    }

    pub fn to_decimal(&self) -> AmmResult<Decimal> {
        self.to_fraction()
            .to_decimal(u32::from(self.currency.decimals()))
    }

    fn ensure_same_currency(&self, other: &CurrencyAmount) -> AmmResult<()> {
        if self.currency != other.currency {
            return Err(AmmError::TokenMismatch(format!(
                "{} vs {}",
                self.currency, other.currency
            )));
        }
        Ok(())
    }
}

/// 10^decimals.
pub fn decimal_scale(decimals: u8) -> BigInt {
    BigInt::from(10u8).pow(u32::from(decimals))
}

impl PartialEq for CurrencyAmount {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.raw == other.raw
    }
}

impl Eq for CurrencyAmount {}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn token(decimals: u8) -> Token {
        Token::new(1, "cx0001", decimals, "TKN", "Token")
    }

    #[test]
    fn test_add_requires_same_currency() {
        let a = CurrencyAmount::from_raw_amount(token(18), 10u64);
        let b = CurrencyAmount::from_raw_amount(Token::new(1, "cx0002", 18, "OTH", "Other"), 5u64);
        assert!(matches!(a.add(&b), Err(AmmError::TokenMismatch(_))));
        assert_eq!(
            a.add(&a).unwrap(),
            CurrencyAmount::from_raw_amount(token(18), 20u64)
        );
    }

    #[test]
    fn test_rendering() {
        let amount = CurrencyAmount::from_raw_amount(token(6), 1_234_567u64);
        assert_eq!(amount.to_exact(), "1.234567");
        assert_eq!(amount.to_fixed(2).unwrap(), "1.23");
        assert_eq!(amount.to_significant(3), "1.23");
        assert!(amount.to_fixed(7).is_err());
        assert_eq!(amount.to_decimal().unwrap(), dec!(1.234567));
    }

    #[test]
    fn test_from_decimal_truncates_to_precision() {
        let amount = CurrencyAmount::from_decimal(token(2), dec!(1.239)).unwrap();
        assert_eq!(amount.quotient(), BigInt::from(123));
    }

    #[test]
    fn test_u256_boundary() {
        let amount = CurrencyAmount::from_u256(token(18), U256::from(1_000u64)).unwrap();
        assert_eq!(amount.quotient(), BigInt::from(1_000));
        assert_eq!(amount.to_u256().unwrap(), U256::from(1_000u64));

        let negative = CurrencyAmount::from_raw_amount(token(18), -1i64);
        assert!(negative.to_u256().is_err());
    }

    #[test]
    fn test_fractional_amount_keeps_exact_value() {
        let amount = CurrencyAmount::from_fractional_amount(token(6), 100, 1_000_000_000_000i64).unwrap();
        assert_eq!(amount.quotient(), BigInt::from(0));
        assert!(!amount.is_zero());
    }
}
