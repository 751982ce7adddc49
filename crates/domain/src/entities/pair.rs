//! Two-asset liquidity pools.
//!
//! A [`Pair`] is an immutable snapshot of pool reserves. Every quote returns a
//! fresh `Pair` holding the post-trade reserves, so a multi-hop simulation
//! threads the returned pairs forward without touching shared state.

use crate::chain::ChainConfig;
use crate::constants::{LIQUIDITY_TOKEN_NAME, LIQUIDITY_TOKEN_SYMBOL};
use crate::entities::token::{Currency, Token};
use crate::enums::PoolType;
use crate::error::{AmmError, AmmResult};
use crate::math::{constant_product, fixed_rate, liquidity, queue};
use crate::value_objects::amount::{CurrencyAmount, decimal_scale};
use crate::value_objects::fraction::Fraction;
use crate::value_objects::price::Price;
use num_bigint::BigInt;
use num_traits::Signed;
use std::fmt;

/// Optional metadata supplied alongside the reserves.
#[derive(Debug, Clone, Default)]
pub struct PairOptions {
    pub pool_id: Option<u64>,
    /// Raw total supply of pool shares.
    pub total_supply: Option<BigInt>,
    /// Address to give the liquidity token.
    pub base_address: Option<String>,
    pub is_stability_fund: bool,
}

impl PairOptions {
    #[must_use]
    pub fn with_pool_id(mut self, pool_id: u64) -> Self {
        self.pool_id = Some(pool_id);
        self
    }

    #[must_use]
    pub fn with_total_supply(mut self, total_supply: impl Into<BigInt>) -> Self {
        self.total_supply = Some(total_supply.into());
        self
    }

    #[must_use]
    pub fn with_base_address(mut self, address: impl Into<String>) -> Self {
        self.base_address = Some(address.into());
        self
    }

    #[must_use]
    pub fn stability_fund(mut self) -> Self {
        self.is_stability_fund = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    token_amounts: [CurrencyAmount; 2],
    liquidity_token: Token,
    total_supply: Option<CurrencyAmount>,
    pool_id: Option<u64>,
    pool_type: PoolType,
    /// Slot holding the chain's native placeholder, for queue pools.
    native_slot: Option<usize>,
}

impl Pair {
    /// Builds a pair from two reserve amounts, placing them in canonical slot
    /// order according to `chain.ordering`. Stability fund pairs keep the
    /// given order.
    pub fn new(
        amount_a: CurrencyAmount,
        amount_b: CurrencyAmount,
        chain: &ChainConfig,
        options: PairOptions,
    ) -> AmmResult<Self> {
        let amount_a = amount_a.wrapped();
        let amount_b = amount_b.wrapped();
        let (token_a, token_b) = (amount_a.currency().wrapped(), amount_b.currency().wrapped());

        if token_a.chain_id != chain.chain_id || token_b.chain_id != chain.chain_id {
            return Err(AmmError::ChainMismatch(format!(
                "{} on {}, {} on {}, pair on {}",
                token_a, token_a.chain_id, token_b, token_b.chain_id, chain.chain_id
            )));
        }
        if token_a == token_b {
            return Err(AmmError::TokenMismatch(format!(
                "both sides of the pair are {token_a}"
            )));
        }

        let token_amounts = if !options.is_stability_fund
            && chain.ordering.should_swap(token_a, token_b)
        {
            [amount_b, amount_a]
        } else {
            [amount_a, amount_b]
        };

        let (token0, token1) = (
            token_amounts[0].currency().wrapped(),
            token_amounts[1].currency().wrapped(),
        );

        let native_slot = if options.is_stability_fund {
            None
        } else {
            [token0, token1].iter().position(|t| chain.is_native(t))
        };

        let pool_type = if options.is_stability_fund {
            PoolType::StabilityFund
        } else if native_slot.is_some() {
            PoolType::Queue
        } else {
            PoolType::ConstantProduct
        };

        let liquidity_token = Token::new(
            chain.chain_id,
            options
                .base_address
                .clone()
                .unwrap_or_else(|| liquidity_token_address(options.pool_id, token0, token1)),
            liquidity_decimals(token0.decimals, token1.decimals),
            LIQUIDITY_TOKEN_SYMBOL,
            LIQUIDITY_TOKEN_NAME,
        );

        let total_supply = options
            .total_supply
            .map(|raw| CurrencyAmount::from_raw_amount(liquidity_token.clone(), raw));

        Ok(Self {
            token_amounts,
            liquidity_token,
            total_supply,
            pool_id: options.pool_id,
            pool_type,
            native_slot,
        })
    }

    pub fn token0(&self) -> &Token {
        self.token_amounts[0].currency().wrapped()
    }

    pub fn token1(&self) -> &Token {
        self.token_amounts[1].currency().wrapped()
    }

    pub fn reserve0(&self) -> &CurrencyAmount {
        &self.token_amounts[0]
    }

    pub fn reserve1(&self) -> &CurrencyAmount {
        &self.token_amounts[1]
    }

    pub fn chain_id(&self) -> u64 {
        self.token0().chain_id
    }

    pub fn pool_id(&self) -> Option<u64> {
        self.pool_id
    }

    pub fn pool_type(&self) -> PoolType {
        self.pool_type
    }

    pub fn is_stability_fund(&self) -> bool {
        self.pool_type == PoolType::StabilityFund
    }

    pub fn is_queue(&self) -> bool {
        self.pool_type == PoolType::Queue
    }

    pub fn liquidity_token(&self) -> &Token {
        &self.liquidity_token
    }

    pub fn total_supply(&self) -> Option<&CurrencyAmount> {
        self.total_supply.as_ref()
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        self.token0() == token || self.token1() == token
    }

    /// The other side of the pair from `token`.
    pub fn other_token(&self, token: &Token) -> AmmResult<&Token> {
        let slot = self.slot_of(token)?;
        Ok(self.token_amounts[1 - slot].currency().wrapped())
    }

    pub fn reserve_of(&self, token: &Token) -> AmmResult<&CurrencyAmount> {
        let slot = self.slot_of(token)?;
        Ok(&self.token_amounts[slot])
    }

    /// Whether both reserves are non-zero. Stability funds hold no reserves
    /// that matter and always count as funded.
    pub fn has_liquidity(&self) -> bool {
        self.is_stability_fund()
            || (!self.token_amounts[0].is_zero() && !self.token_amounts[1].is_zero())
    }

    /// Price of token0 expressed in token1.
    pub fn token0_price(&self) -> AmmResult<Price> {
        let (token0, token1) = (self.token0(), self.token1());
        let value = if self.is_stability_fund() {
            Fraction::new(decimal_scale(token1.decimals), decimal_scale(token0.decimals))?
        } else {
            self.token_amounts[1]
                .as_fraction()
                .divide(self.token_amounts[0].as_fraction())
                .map_err(|_| AmmError::InsufficientReserves(format!("{self} has no {token0}")))?
        };
        Ok(Price::from_fraction(
            Currency::Token(token0.clone()),
            Currency::Token(token1.clone()),
            value,
        ))
    }

    /// Price of token1 expressed in token0.
    pub fn token1_price(&self) -> AmmResult<Price> {
        self.token0_price()?
            .invert()
            .map_err(|_| AmmError::InsufficientReserves(format!("{self} has no {}", self.token1())))
    }

    pub fn price_of(&self, token: &Token) -> AmmResult<Price> {
        match self.slot_of(token)? {
            0 => self.token0_price(),
            _ => self.token1_price(),
        }
    }

    /// Output for selling `input_amount` into the pool, without building the
    /// post-trade pair.
    pub fn quote_output(&self, input_amount: &CurrencyAmount) -> AmmResult<CurrencyAmount> {
        let input_amount = input_amount.wrapped();
        let slot_in = self.slot_of(input_amount.currency().wrapped())?;
        let slot_out = 1 - slot_in;
        let (reserve_in, reserve_out) = (&self.token_amounts[slot_in], &self.token_amounts[slot_out]);
        let token_out = reserve_out.currency().clone();

        match self.pool_type {
            PoolType::StabilityFund => Ok(CurrencyAmount::from_fraction(
                token_out,
                fixed_rate::rescale(
                    input_amount.as_fraction(),
                    reserve_in.currency().decimals(),
                    reserve_out.currency().decimals(),
                ),
            )),
            PoolType::Queue => {
                self.ensure_reserves()?;
                let output = queue::get_amount_out(
                    input_amount.as_fraction(),
                    reserve_in.as_fraction(),
                    reserve_out.as_fraction(),
                    self.native_slot == Some(slot_in),
                )?;
                if !output.numerator().is_positive() {
                    return Err(AmmError::InsufficientInputAmount(format!(
                        "{input_amount} yields no output from {self}"
                    )));
                }
                if &output >= reserve_out.as_fraction() {
                    return Err(AmmError::InsufficientReserves(format!(
                        "{self} cannot pay out {}",
                        output.to_fixed(0, Default::default())
                    )));
                }
                Ok(CurrencyAmount::from_fraction(token_out, output))
            }
            PoolType::ConstantProduct => {
                let output = constant_product::get_amount_out(
                    &input_amount.quotient(),
                    &reserve_in.quotient(),
                    &reserve_out.quotient(),
                )?;
                Ok(CurrencyAmount::from_raw_amount(token_out, output))
            }
        }
    }

    /// Input needed to buy `output_amount` from the pool, without building the
    /// post-trade pair.
    pub fn quote_input(&self, output_amount: &CurrencyAmount) -> AmmResult<CurrencyAmount> {
        let output_amount = output_amount.wrapped();
        let slot_out = self.slot_of(output_amount.currency().wrapped())?;
        let slot_in = 1 - slot_out;
        let (reserve_in, reserve_out) = (&self.token_amounts[slot_in], &self.token_amounts[slot_out]);
        let token_in = reserve_in.currency().clone();

        match self.pool_type {
            PoolType::StabilityFund => Ok(CurrencyAmount::from_fraction(
                token_in,
                fixed_rate::rescale(
                    output_amount.as_fraction(),
                    reserve_out.currency().decimals(),
                    reserve_in.currency().decimals(),
                ),
            )),
            PoolType::Queue => {
                self.ensure_reserves()?;
                if output_amount.as_fraction() >= reserve_out.as_fraction() {
                    return Err(AmmError::InsufficientReserves(format!(
                        "{self} cannot pay out {output_amount}"
                    )));
                }
                let input = queue::get_amount_in(
                    output_amount.as_fraction(),
                    reserve_in.as_fraction(),
                    reserve_out.as_fraction(),
                    self.native_slot == Some(slot_in),
                )?;
                Ok(CurrencyAmount::from_fraction(token_in, input))
            }
            PoolType::ConstantProduct => {
                let input = constant_product::get_amount_in(
                    &output_amount.quotient(),
                    &reserve_in.quotient(),
                    &reserve_out.quotient(),
                )?;
                Ok(CurrencyAmount::from_raw_amount(token_in, input))
            }
        }
    }

    /// Sells `input_amount` into the pool.
    ///
    /// Returns the output and the pair as it would look after the swap. A
    /// stability fund has no reserve state and returns an identical pair.
    pub fn get_output_amount(&self, input_amount: &CurrencyAmount) -> AmmResult<(CurrencyAmount, Pair)> {
        let output = self.quote_output(input_amount)?;
        let next = self.after_swap(&input_amount.wrapped(), &output)?;
        Ok((output, next))
    }

    /// Buys `output_amount` from the pool.
    ///
    /// Returns the required input and the pair as it would look after the
    /// swap.
    pub fn get_input_amount(&self, output_amount: &CurrencyAmount) -> AmmResult<(CurrencyAmount, Pair)> {
        let input = self.quote_input(output_amount)?;
        let next = self.after_swap(&input, &output_amount.wrapped())?;
        Ok((input, next))
    }

    /// Pool shares minted for depositing `amount_a` and `amount_b`, given the
    /// current `total_supply` of shares.
    pub fn get_liquidity_minted(
        &self,
        total_supply: &CurrencyAmount,
        amount_a: &CurrencyAmount,
        amount_b: &CurrencyAmount,
    ) -> AmmResult<CurrencyAmount> {
        self.ensure_liquidity_token(total_supply)?;
        let (amount_a, amount_b) = (amount_a.wrapped(), amount_b.wrapped());
        let slot_a = self.slot_of(amount_a.currency().wrapped())?;
        let slot_b = self.slot_of(amount_b.currency().wrapped())?;
        if slot_a == slot_b {
            return Err(AmmError::TokenMismatch(format!(
                "both deposits are {}",
                amount_a.currency()
            )));
        }
        let (amount0, amount1) = if slot_a == 0 {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };

        let minted = liquidity::liquidity_minted(
            &total_supply.quotient(),
            &amount0.quotient(),
            &amount1.quotient(),
            &self.token_amounts[0].quotient(),
            &self.token_amounts[1].quotient(),
        )?;
        Ok(CurrencyAmount::from_raw_amount(
            self.liquidity_token.clone(),
            minted,
        ))
    }

    /// Amount of `token` that `liquidity` shares redeem for.
    ///
    /// With `fee_on`, the protocol's accrued fee share is minted into the
    /// supply first, which needs `k_last`, the invariant at the last mint or
    /// burn.
    pub fn get_liquidity_value(
        &self,
        token: &Token,
        total_supply: &CurrencyAmount,
        liquidity_amount: &CurrencyAmount,
        fee_on: bool,
        k_last: Option<&BigInt>,
    ) -> AmmResult<CurrencyAmount> {
        self.ensure_liquidity_token(total_supply)?;
        self.ensure_liquidity_token(liquidity_amount)?;
        let reserve = self.reserve_of(token)?;

        let supply = total_supply.quotient();
        let supply = if fee_on {
            let k_last = k_last.ok_or(AmmError::MissingKLast)?;
            liquidity::fee_adjusted_supply(
                &supply,
                &self.token_amounts[0].quotient(),
                &self.token_amounts[1].quotient(),
                k_last,
            )
        } else {
            supply
        };

        let value = liquidity::liquidity_value(&reserve.quotient(), &supply, &liquidity_amount.quotient())?;
        Ok(CurrencyAmount::from_raw_amount(token.clone(), value))
    }

    fn slot_of(&self, token: &Token) -> AmmResult<usize> {
        if self.token0() == token {
            Ok(0)
        } else if self.token1() == token {
            Ok(1)
        } else {
            Err(AmmError::TokenMismatch(format!("{token} is not in {self}")))
        }
    }

    fn ensure_reserves(&self) -> AmmResult<()> {
        if self.token_amounts.iter().any(|r| r.is_zero()) {
            return Err(AmmError::InsufficientReserves(format!("{self} has an empty reserve")));
        }
        Ok(())
    }

    fn ensure_liquidity_token(&self, amount: &CurrencyAmount) -> AmmResult<()> {
        if !amount.is_of(&self.liquidity_token) {
            return Err(AmmError::TokenMismatch(format!(
                "{} is not the share token of {self}",
                amount.currency()
            )));
        }
        Ok(())
    }

    fn after_swap(&self, input: &CurrencyAmount, output: &CurrencyAmount) -> AmmResult<Pair> {
        if self.is_stability_fund() {
            return Ok(self.clone());
        }
        let slot_in = self.slot_of(input.currency().wrapped())?;
        // constant-product quotes price whole units only
        let (input, output) = if self.pool_type == PoolType::ConstantProduct {
            (whole_units(input), whole_units(output))
        } else {
            (input.clone(), output.clone())
        };
        let mut next = self.clone();
        next.token_amounts[slot_in] = self.token_amounts[slot_in].add(&input)?;
        next.token_amounts[1 - slot_in] = self.token_amounts[1 - slot_in].subtract(&output)?;
        Ok(next)
    }
}

fn whole_units(amount: &CurrencyAmount) -> CurrencyAmount {
    CurrencyAmount::from_raw_amount(amount.currency().clone(), amount.quotient())
}

/// Share token precision: the integer mean of both sides when they differ.
fn liquidity_decimals(decimals0: u8, decimals1: u8) -> u8 {
    if decimals0 == decimals1 {
        decimals0
    } else {
        ((u16::from(decimals0) + u16::from(decimals1)) / 2) as u8
    }
}

fn liquidity_token_address(pool_id: Option<u64>, token0: &Token, token1: &Token) -> String {
    match pool_id {
        Some(id) => format!("pool:{id}"),
        None => format!("{}/{}", token0.address, token1.address),
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0(), self.token1())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::CanonicalOrdering;
    use proptest::prelude::*;

    const NATIVE: &str = "cx0000000000000000000000000000000000000000";

    fn chain() -> ChainConfig {
        ChainConfig::new(1, NATIVE).with_ordering(CanonicalOrdering {
            stablecoins: vec!["cxbnusd".into()],
            wrapped_native: vec!["cxsicx".into()],
            exceptions: vec![],
        })
    }

    fn token(address: &str, decimals: u8) -> Token {
        Token::new(1, address, decimals, address.trim_start_matches("cx").to_uppercase(), address)
    }

    fn amount(token: &Token, raw: u64) -> CurrencyAmount {
        CurrencyAmount::from_raw_amount(token.clone(), raw)
    }

    fn standard(r0: u64, r1: u64) -> (Pair, Token, Token) {
        let (a, b) = (token("cxa", 18), token("cxb", 18));
        let pair = Pair::new(amount(&a, r0), amount(&b, r1), &chain(), PairOptions::default()).unwrap();
        (pair, a, b)
    }

    #[test]
    fn test_canonical_order_puts_stablecoin_second() {
        let (usd, other) = (token("cxbnusd", 18), token("cxother", 18));
        let pair = Pair::new(amount(&usd, 5), amount(&other, 7), &chain(), PairOptions::default()).unwrap();
        assert_eq!(pair.token0(), &other);
        assert_eq!(pair.token1(), &usd);
        assert_eq!(pair.reserve_of(&usd).unwrap().quotient(), BigInt::from(5));
        assert_eq!(pair.pool_type(), PoolType::ConstantProduct);
    }

    #[test]
    fn test_rejects_identical_and_foreign_tokens() {
        let a = token("cxa", 18);
        let err = Pair::new(amount(&a, 1), amount(&a, 1), &chain(), PairOptions::default()).unwrap_err();
        assert!(matches!(err, AmmError::TokenMismatch(_)));

        let foreign = Token::new(2, "cxa", 18, "A", "A");
        let err = Pair::new(amount(&foreign, 1), amount(&token("cxb", 18), 1), &chain(), PairOptions::default())
            .unwrap_err();
        assert!(matches!(err, AmmError::ChainMismatch(_)));
    }

    #[test]
    fn test_exact_input_swap_moves_reserves() {
        let (pair, a, b) = standard(1_000, 1_000);
        let (out, next) = pair.get_output_amount(&amount(&a, 10)).unwrap();
        assert_eq!(out, amount(&b, 9));
        assert_eq!(next.reserve_of(&a).unwrap().quotient(), BigInt::from(1_010));
        assert_eq!(next.reserve_of(&b).unwrap().quotient(), BigInt::from(991));
        // the original snapshot is untouched
        assert_eq!(pair.reserve0().quotient(), BigInt::from(1_000));
    }

    #[test]
    fn test_exact_output_swap() {
        let (pair, a, b) = standard(1_000, 1_000);
        let (input, next) = pair.get_input_amount(&amount(&b, 9)).unwrap();
        assert_eq!(input, amount(&a, 10));
        assert_eq!(next.reserve_of(&b).unwrap().quotient(), BigInt::from(991));
    }

    #[test]
    fn test_fractional_input_credits_whole_units() {
        let (pair, a, _) = standard(1_000, 1_000);
        // 100.5 raw, e.g. the output of a queue hop
        let fractional = CurrencyAmount::from_fractional_amount(a.clone(), 201, 2).unwrap();
        let (out, next) = pair.get_output_amount(&fractional).unwrap();
        let (whole_out, whole_next) = pair.get_output_amount(&amount(&a, 100)).unwrap();
        assert_eq!(out, whole_out);
        assert_eq!(next.reserve_of(&a).unwrap(), &amount(&a, 1_100));
        assert_eq!(next.reserve0(), whole_next.reserve0());
        assert_eq!(next.reserve1(), whole_next.reserve1());
    }

    #[test]
    fn test_swap_errors() {
        let (pair, a, b) = standard(1_000, 1_000);
        let stranger = token("cxz", 18);
        assert!(matches!(
            pair.get_output_amount(&amount(&stranger, 10)),
            Err(AmmError::TokenMismatch(_))
        ));
        assert!(matches!(
            pair.get_output_amount(&amount(&a, 1)),
            Err(AmmError::InsufficientInputAmount(_))
        ));
        assert!(matches!(
            pair.get_input_amount(&amount(&b, 1_000)),
            Err(AmmError::InsufficientReserves(_))
        ));

        let (empty, a, _) = standard(0, 1_000);
        assert!(!empty.has_liquidity());
        assert!(matches!(
            empty.get_output_amount(&amount(&a, 10)),
            Err(AmmError::InsufficientReserves(_))
        ));
    }

    #[test]
    fn test_stability_fund_swaps_at_fixed_rate() {
        let (usd, usdc) = (token("cxbnusd", 18), token("cxusdc", 6));
        let pair = Pair::new(
            amount(&usd, 0),
            amount(&usdc, 0),
            &chain(),
            PairOptions::default().stability_fund(),
        )
        .unwrap();
        // given order is kept even though cxbnusd ranks higher
        assert_eq!(pair.token0(), &usd);
        assert!(pair.has_liquidity());

        let one_usd = amount(&usd, 1_000_000_000_000_000_000);
        let (out, next) = pair.get_output_amount(&one_usd).unwrap();
        assert_eq!(out, amount(&usdc, 1_000_000));
        assert_eq!(next, pair);

        let (input, _) = pair.get_input_amount(&amount(&usdc, 1_000_000)).unwrap();
        assert_eq!(input, one_usd);
        assert_eq!(pair.token0_price().unwrap().to_significant(6), "1");
    }

    #[test]
    fn test_queue_pool_fee_applies_to_non_native_input() {
        let (native, sicx) = (token(NATIVE, 18), token("cxsicx", 18));
        let pair = Pair::new(amount(&sicx, 2_000), amount(&native, 1_000), &chain(), PairOptions::default()).unwrap();
        assert_eq!(pair.pool_type(), PoolType::Queue);

        let (out, _) = pair.get_output_amount(&amount(&native, 100)).unwrap();
        assert_eq!(out, amount(&sicx, 200));

        let (out, next) = pair.get_output_amount(&amount(&sicx, 200)).unwrap();
        assert_eq!(out, amount(&native, 99));
        assert_eq!(next.reserve_of(&native).unwrap().quotient(), BigInt::from(901));

        assert!(matches!(
            pair.get_output_amount(&amount(&native, 1_000)),
            Err(AmmError::InsufficientReserves(_))
        ));
    }

    #[test]
    fn test_prices() {
        let (pair, a, b) = standard(1_000, 2_000);
        assert_eq!(pair.price_of(&a).unwrap().value, Fraction::from_integer(2u8));
        assert_eq!(pair.price_of(&b).unwrap().value, Fraction::new(1, 2).unwrap());
        assert_eq!(pair.other_token(&a).unwrap(), &b);
    }

    #[test]
    fn test_liquidity_token_metadata() {
        let (a, b) = (token("cxa", 18), token("cxb", 9));
        let pair = Pair::new(
            amount(&a, 1),
            amount(&b, 1),
            &chain(),
            PairOptions::default().with_pool_id(4).with_total_supply(100u64),
        )
        .unwrap();
        let lp = pair.liquidity_token();
        assert_eq!(lp.decimals, 13);
        assert_eq!(lp.symbol, LIQUIDITY_TOKEN_SYMBOL);
        assert_eq!(lp.address, "pool:4");
        assert_eq!(pair.total_supply().unwrap().quotient(), BigInt::from(100));

        let named = Pair::new(
            amount(&a, 1),
            amount(&b, 1),
            &chain(),
            PairOptions::default().with_base_address("cxdex"),
        )
        .unwrap();
        assert_eq!(named.liquidity_token().address, "cxdex");
    }

    #[test]
    fn test_liquidity_minted_and_value() {
        let (pair, a, b) = standard(10_000, 10_000);
        let lp = pair.liquidity_token().clone();
        let zero_supply = CurrencyAmount::zero(lp.clone());

        let minted = pair
            .get_liquidity_minted(&zero_supply, &amount(&b, 10_000), &amount(&a, 10_000))
            .unwrap();
        assert_eq!(minted.quotient(), BigInt::from(9_000));

        let supply = CurrencyAmount::from_raw_amount(lp.clone(), 10_000u64);
        let share = CurrencyAmount::from_raw_amount(lp.clone(), 2_500u64);
        let value = pair.get_liquidity_value(&a, &supply, &share, false, None).unwrap();
        assert_eq!(value, amount(&a, 2_500));

        assert_eq!(
            pair.get_liquidity_value(&a, &supply, &share, true, None),
            Err(AmmError::MissingKLast)
        );
        let with_fee = pair
            .get_liquidity_value(&a, &supply, &share, true, Some(&BigInt::from(100_000_000u64)))
            .unwrap();
        assert_eq!(with_fee, value);

        let too_much = CurrencyAmount::from_raw_amount(lp, 10_001u64);
        assert!(matches!(
            pair.get_liquidity_value(&a, &supply, &too_much, false, None),
            Err(AmmError::LiquidityExceedsSupply { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_constant_product_k_never_decreases(
            r0 in 1_000u64..1_000_000_000,
            r1 in 1_000u64..1_000_000_000,
            input in 1_000u64..1_000_000,
        ) {
            let (pair, a, _) = standard(r0, r1);
            if let Ok((_, next)) = pair.get_output_amount(&amount(&a, input)) {
                let before = pair.reserve0().quotient() * pair.reserve1().quotient();
                let after = next.reserve0().quotient() * next.reserve1().quotient();
                prop_assert!(after >= before);
            }
        }

        #[test]
        fn prop_queue_quotes_round_trip(input in 1u64..500_000, native_in in any::<bool>()) {
            let (native, sicx) = (token(NATIVE, 18), token("cxsicx", 18));
            let pair = Pair::new(
                amount(&sicx, 3_000_000),
                amount(&native, 1_000_000),
                &chain(),
                PairOptions::default(),
            )
            .unwrap();
            let sold = if native_in { amount(&native, input) } else { amount(&sicx, input) };
            if let Ok(out) = pair.quote_output(&sold) {
                prop_assert_eq!(pair.quote_input(&out).unwrap(), sold);
            }
        }
    }
}
