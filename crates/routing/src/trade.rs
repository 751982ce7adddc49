//! Swap quotes over a route.

use crate::route::Route;
use balanced_amm_domain::error::{AmmError, AmmResult};
use balanced_amm_domain::{CurrencyAmount, Fraction, Pair, Percent, Price, TradeType};
use std::cmp::Ordering;
use std::fmt;

/// A quote for swapping a fixed amount along a route.
///
/// Simulating the route never touches the route's own pairs: the pool
/// states after each hop are kept separately in `pairs_after`.
#[derive(Debug, Clone)]
pub struct Trade {
    /// The route being traded.
    route: Route,
    /// Whether the input or the output amount is fixed.
    trade_type: TradeType,
    /// Amount sold, in the route's input currency.
    input_amount: CurrencyAmount,
    /// Amount bought, in the route's output currency.
    output_amount: CurrencyAmount,
    /// Pool states once the trade has executed, in route order.
    pairs_after: Vec<Pair>,
}

impl Trade {
    /// Simulates `amount` through `route`.
    ///
    /// For [`TradeType::ExactInput`] `amount` is what is sold and must be in
    /// the route's input currency; for [`TradeType::ExactOutput`] it is what
    /// is bought and must be in the output currency.
    pub fn new(route: Route, amount: CurrencyAmount, trade_type: TradeType) -> AmmResult<Self> {
        let expected = match trade_type {
            TradeType::ExactInput => route.input(),
            TradeType::ExactOutput => route.output(),
        };
        if amount.currency().wrapped() != expected.wrapped() {
            return Err(AmmError::TokenMismatch(format!(
                "trade amount is {}, route expects {expected}",
                amount.currency()
            )));
        }

        let hops = route.pairs().len();
        let mut pairs_after = Vec::with_capacity(hops);
        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                let mut current = amount.wrapped();
                for pair in route.pairs() {
                    let (output, next) = pair.get_output_amount(&current)?;
                    pairs_after.push(next);
                    current = output;
                }
                let output = CurrencyAmount::from_fraction(
                    route.output().clone(),
                    current.as_fraction().clone(),
                );
                (amount, output)
            }
            TradeType::ExactOutput => {
                let mut current = amount.wrapped();
                for pair in route.pairs().iter().rev() {
                    let (input, next) = pair.get_input_amount(&current)?;
                    pairs_after.push(next);
                    current = input;
                }
                pairs_after.reverse();
                let input = CurrencyAmount::from_fraction(
                    route.input().clone(),
                    current.as_fraction().clone(),
                );
                (input, amount)
            }
        };

        Ok(Self {
            route,
            trade_type,
            input_amount,
            output_amount,
            pairs_after,
        })
    }

    /// Sells exactly `amount_in` along `route`.
    pub fn exact_in(route: Route, amount_in: CurrencyAmount) -> AmmResult<Self> {
        Self::new(route, amount_in, TradeType::ExactInput)
    }

    /// Buys exactly `amount_out` along `route`.
    pub fn exact_out(route: Route, amount_out: CurrencyAmount) -> AmmResult<Self> {
        Self::new(route, amount_out, TradeType::ExactOutput)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    pub fn pairs_after(&self) -> &[Pair] {
        &self.pairs_after
    }

    /// Output per unit of input actually received.
    pub fn execution_price(&self) -> AmmResult<Price> {
        Price::from_amounts(&self.input_amount, &self.output_amount)
    }

    /// Shortfall of the output against what the mid price would have paid.
    pub fn price_impact(&self) -> AmmResult<Percent> {
        let quoted = self.route.mid_price()?.quote(&self.input_amount)?;
        let shortfall = quoted
            .as_fraction()
            .subtract(self.output_amount.as_fraction());
        Ok(Percent(shortfall.divide(quoted.as_fraction())?))
    }

    /// The least output accepted under `slippage`.
    pub fn minimum_amount_out(&self, slippage: &Percent) -> AmmResult<CurrencyAmount> {
        ensure_slippage(slippage)?;
        match self.trade_type {
            TradeType::ExactOutput => Ok(self.output_amount.clone()),
            TradeType::ExactInput => self.output_amount.divide(&slippage_factor(slippage)),
        }
    }

    /// The most input spent under `slippage`.
    pub fn maximum_amount_in(&self, slippage: &Percent) -> AmmResult<CurrencyAmount> {
        ensure_slippage(slippage)?;
        match self.trade_type {
            TradeType::ExactInput => Ok(self.input_amount.clone()),
            TradeType::ExactOutput => Ok(self.input_amount.multiply(&slippage_factor(slippage))),
        }
    }

    /// Execution price at the slippage-adjusted amounts.
    pub fn worst_execution_price(&self, slippage: &Percent) -> AmmResult<Price> {
        Price::from_amounts(
            &self.maximum_amount_in(slippage)?,
            &self.minimum_amount_out(slippage)?,
        )
    }
}

fn ensure_slippage(slippage: &Percent) -> AmmResult<()> {
    if slippage.is_negative() {
        return Err(AmmError::InvalidSlippageTolerance);
    }
    Ok(())
}

fn slippage_factor(slippage: &Percent) -> Fraction {
    Fraction::one().add(slippage.as_fraction())
}

/// Ranks trades best first: more output, then less input.
///
/// Equal trades compare as `Equal`, so a stable sort keeps them in discovery
/// order.
pub fn trade_comparator(a: &Trade, b: &Trade) -> Ordering {
    b.output_amount
        .as_fraction()
        .cmp(a.output_amount.as_fraction())
        .then_with(|| {
            a.input_amount
                .as_fraction()
                .cmp(b.input_amount.as_fraction())
        })
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} via {}",
            self.input_amount, self.output_amount, self.route
        )
    }
}
