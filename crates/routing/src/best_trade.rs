//! Depth-limited best trade search.
//!
//! The search walks every simple path through the pair universe up to
//! `max_hops` pairs long, using quote-only pair math so no intermediate pair
//! snapshots are built. A `used` flag per pair and a stack of pair indices
//! track the active path; only complete routes are materialised as trades.

use crate::route::Route;
use crate::trade::{Trade, trade_comparator};
use balanced_amm_domain::error::{AmmError, AmmResult};
use balanced_amm_domain::{Currency, CurrencyAmount, Pair, Token};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Limits for [`best_trade_exact_in`] and [`best_trade_exact_out`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTradeOptions {
    /// How many trades to return at most.
    pub max_num_results: usize,
    /// Longest route to consider, in pairs.
    pub max_hops: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_num_results: 3,
            max_hops: 3,
        }
    }
}

impl BestTradeOptions {
    #[must_use]
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    #[must_use]
    pub fn with_max_num_results(mut self, max_num_results: usize) -> Self {
        self.max_num_results = max_num_results;
        self
    }
}

/// Best trades selling exactly `amount_in` for `currency_out`, best first.
///
/// An empty pair list yields no trades. Routes never reuse a pair.
pub fn best_trade_exact_in(
    pairs: &[Pair],
    amount_in: &CurrencyAmount,
    currency_out: &Currency,
    options: BestTradeOptions,
) -> AmmResult<Vec<Trade>> {
    if options.max_hops < 1 {
        return Err(AmmError::MaxHops(options.max_hops));
    }
    debug!(
        pairs = pairs.len(),
        max_hops = options.max_hops,
        amount_in = %amount_in,
        currency_out = %currency_out,
        "Searching exact-input trades"
    );

    let mut search = Search::new(pairs, options);
    search.forward(&amount_in.wrapped(), amount_in, currency_out)?;
    debug!(found = search.results.len(), "Exact-input search finished");
    Ok(search.results)
}

/// Best trades buying exactly `amount_out` with `currency_in`, cheapest first.
///
/// The mirror of [`best_trade_exact_in`], walking back from the output.
pub fn best_trade_exact_out(
    pairs: &[Pair],
    currency_in: &Currency,
    amount_out: &CurrencyAmount,
    options: BestTradeOptions,
) -> AmmResult<Vec<Trade>> {
    if options.max_hops < 1 {
        return Err(AmmError::MaxHops(options.max_hops));
    }
    debug!(
        pairs = pairs.len(),
        max_hops = options.max_hops,
        currency_in = %currency_in,
        amount_out = %amount_out,
        "Searching exact-output trades"
    );

    let mut search = Search::new(pairs, options);
    search.backward(&amount_out.wrapped(), currency_in, amount_out)?;
    debug!(found = search.results.len(), "Exact-output search finished");
    Ok(search.results)
}

struct Search<'a> {
    pairs: &'a [Pair],
    options: BestTradeOptions,
    used: Vec<bool>,
    /// Indices of the pairs on the active path, in visiting order.
    stack: Vec<usize>,
    results: Vec<Trade>,
}

impl<'a> Search<'a> {
    fn new(pairs: &'a [Pair], options: BestTradeOptions) -> Self {
        Self {
            pairs,
            options,
            used: vec![false; pairs.len()],
            stack: Vec::with_capacity(options.max_hops),
            results: Vec::new(),
        }
    }

    /// Candidate hops out of `token`: unused, funded pairs that hold it.
    fn candidates(&self, token: &Token) -> Vec<usize> {
        self.pairs
            .iter()
            .enumerate()
            .filter(|(i, pair)| !self.used[*i] && pair.has_liquidity() && pair.involves_token(token))
            .map(|(i, _)| i)
            .collect()
    }

    fn forward(
        &mut self,
        current: &CurrencyAmount,
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
    ) -> AmmResult<()> {
        let pairs = self.pairs;
        for index in self.candidates(current.currency().wrapped()) {
            let pair = &pairs[index];
            let output = match pair.quote_output(current) {
                Ok(output) => output,
                Err(e) if is_dead_end(&e) => {
                    trace!(pair = %pair, error = %e, "Skipping pair");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if output.currency().wrapped() == currency_out.wrapped() {
                let mut route_pairs: Vec<Pair> =
                    self.stack.iter().map(|&i| pairs[i].clone()).collect();
                route_pairs.push(pair.clone());
                let route = Route::new(route_pairs, amount_in.currency().clone(), currency_out.clone())?;
                let trade = Trade::exact_in(route, amount_in.clone())?;
                debug!(route = %trade.route(), output = %trade.output_amount(), "Found route");
                self.insert(trade);
            } else if self.stack.len() + 1 < self.options.max_hops {
                self.descend(index);
                let result = self.forward(&output, amount_in, currency_out);
                self.ascend(index);
                result?;
            }
        }
        Ok(())
    }

    fn backward(
        &mut self,
        current: &CurrencyAmount,
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
    ) -> AmmResult<()> {
        let pairs = self.pairs;
        for index in self.candidates(current.currency().wrapped()) {
            let pair = &pairs[index];
            let input = match pair.quote_input(current) {
                Ok(input) => input,
                Err(e) if is_dead_end(&e) => {
                    trace!(pair = %pair, error = %e, "Skipping pair");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if input.currency().wrapped() == currency_in.wrapped() {
                let mut route_pairs = Vec::with_capacity(self.stack.len() + 1);
                route_pairs.push(pair.clone());
                route_pairs.extend(self.stack.iter().rev().map(|&i| pairs[i].clone()));
                let route = Route::new(route_pairs, currency_in.clone(), amount_out.currency().clone())?;
                let trade = Trade::exact_out(route, amount_out.clone())?;
                debug!(route = %trade.route(), input = %trade.input_amount(), "Found route");
                self.insert(trade);
            } else if self.stack.len() + 1 < self.options.max_hops {
                self.descend(index);
                let result = self.backward(&input, currency_in, amount_out);
                self.ascend(index);
                result?;
            }
        }
        Ok(())
    }

    fn descend(&mut self, index: usize) {
        self.used[index] = true;
        self.stack.push(index);
    }

    fn ascend(&mut self, index: usize) {
        self.stack.pop();
        self.used[index] = false;
    }

    /// Keeps `results` sorted and capped at `max_num_results`. A new trade
    /// goes after any trade it ties with.
    fn insert(&mut self, trade: Trade) {
        let max = self.options.max_num_results;
        if max == 0 {
            return;
        }
        let position = self
            .results
            .partition_point(|existing| trade_comparator(existing, &trade) != Ordering::Greater);
        if position >= max {
            return;
        }
        self.results.insert(position, trade);
        self.results.truncate(max);
    }
}

/// Errors that only mean this hop cannot be taken.
fn is_dead_end(error: &AmmError) -> bool {
    matches!(
        error,
        AmmError::InsufficientInputAmount(_) | AmmError::InsufficientReserves(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use balanced_amm_domain::{ChainConfig, PairOptions};

    fn token(address: &str) -> Token {
        Token::new(1, address, 18, address.to_uppercase(), address)
    }

    fn amount(token: &Token, raw: u64) -> CurrencyAmount {
        CurrencyAmount::from_raw_amount(token.clone(), raw)
    }

    fn pair(a: &Token, ra: u64, b: &Token, rb: u64) -> Pair {
        Pair::new(
            amount(a, ra),
            amount(b, rb),
            &ChainConfig::new(1, "cx0000000000000000000000000000000000000000"),
            PairOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_options_default() {
        let options = BestTradeOptions::default();
        assert_eq!(options.max_hops, 3);
        assert_eq!(options.max_num_results, 3);
        assert_eq!(options.with_max_hops(1).max_hops, 1);
    }

    #[test]
    fn test_zero_max_hops_fails_first() {
        let t0 = token("cxa");
        let err = best_trade_exact_in(
            &[],
            &amount(&t0, 1),
            &token("cxb").into(),
            BestTradeOptions::default().with_max_hops(0),
        )
        .unwrap_err();
        assert_eq!(err, AmmError::MaxHops(0));
    }

    #[test]
    fn test_results_are_capped_and_sorted() {
        let (t0, t1, t2) = (token("cxa"), token("cxb"), token("cxc"));
        let pairs = vec![
            pair(&t0, 1_000, &t1, 1_000),
            pair(&t0, 1_000, &t2, 1_100),
            pair(&t1, 1_200, &t2, 1_000),
        ];
        let trades = best_trade_exact_in(
            &pairs,
            &amount(&t0, 100),
            &t2.clone().into(),
            BestTradeOptions::default().with_max_num_results(1),
        )
        .unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].output_amount(), &amount(&t2, 99));
    }

    #[test]
    fn test_skips_empty_pairs() {
        let (t0, t1) = (token("cxa"), token("cxb"));
        let pairs = vec![pair(&t0, 0, &t1, 1_000), pair(&t0, 1_000, &t1, 1_000)];
        let trades =
            best_trade_exact_in(&pairs, &amount(&t0, 100), &t1.clone().into(), BestTradeOptions::default())
                .unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].route().pairs()[0], pairs[1]);
    }

    #[test]
    fn test_insufficient_output_reserve_is_a_dead_end() {
        let (t0, t1) = (token("cxa"), token("cxb"));
        let pairs = vec![pair(&t0, 1_000, &t1, 1_000)];
        let trades = best_trade_exact_out(
            &pairs,
            &t0.clone().into(),
            &amount(&t1, 1_000),
            BestTradeOptions::default(),
        )
        .unwrap();
        assert!(trades.is_empty());
    }
}
