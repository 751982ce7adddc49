//! Routes: ordered chains of pairs from an input to an output currency.

use crate::path::{PathSegment, RouteAction, RouteActionType};
use balanced_amm_domain::error::{AmmError, AmmResult};
use balanced_amm_domain::{ChainConfig, Currency, Pair, Price, Token};
use std::fmt;
use std::sync::OnceLock;

/// A validated, immutable path through one or more pairs.
#[derive(Debug, Clone)]
pub struct Route {
    /// Pairs in swap order.
    pairs: Vec<Pair>,
    /// Tokens visited, `pairs.len() + 1` long.
    path: Vec<Token>,
    /// Currency the route starts from.
    input: Currency,
    /// Currency the route ends in.
    output: Currency,
    /// Mid price, computed on first access.
    mid_price: OnceLock<AmmResult<Price>>,
}

impl Route {
    /// Builds a route after checking it is non-empty, single-chain and
    /// connected from `input` to `output`.
    ///
    /// # Arguments
    ///
    /// * `pairs` - Pairs in swap order
    /// * `input` - Currency sold into the first pair
    /// * `output` - Currency bought from the last pair
    pub fn new(pairs: Vec<Pair>, input: Currency, output: Currency) -> AmmResult<Self> {
        let (first, last) = match (pairs.first(), pairs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(AmmError::PairsEmpty),
        };

        let chain_id = first.chain_id();
        if let Some(other) = pairs.iter().find(|p| p.chain_id() != chain_id) {
            return Err(AmmError::ChainMismatch(format!(
                "{first} is on {chain_id}, {other} is on {}",
                other.chain_id()
            )));
        }

        let (wrapped_in, wrapped_out) = (input.wrapped(), output.wrapped());
        if !first.involves_token(wrapped_in) {
            return Err(AmmError::RouteConnectivity(format!(
                "first pair {first} does not hold {wrapped_in}"
            )));
        }
        if !last.involves_token(wrapped_out) {
            return Err(AmmError::RouteConnectivity(format!(
                "last pair {last} does not hold {wrapped_out}"
            )));
        }

        let mut path = Vec::with_capacity(pairs.len() + 1);
        path.push(wrapped_in.clone());
        for (hop, pair) in pairs.iter().enumerate() {
            let current = &path[hop];
            if !pair.involves_token(current) {
                return Err(AmmError::RouteConnectivity(format!(
                    "hop {hop}: {pair} does not hold {current}"
                )));
            }
            let next = pair.other_token(current)?.clone();
            path.push(next);
        }

        if path.last() != Some(wrapped_out) {
            return Err(AmmError::RouteConnectivity(format!(
                "path ends before reaching {wrapped_out}"
            )));
        }

        Ok(Self {
            pairs,
            path,
            input,
            output,
            mid_price: OnceLock::new(),
        })
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn path(&self) -> &[Token] {
        &self.path
    }

    pub fn input(&self) -> &Currency {
        &self.input
    }

    pub fn output(&self) -> &Currency {
        &self.output
    }

    pub fn chain_id(&self) -> u64 {
        self.path[0].chain_id
    }

    pub fn hops(&self) -> usize {
        self.pairs.len()
    }

    /// Marginal price of the output in terms of the input across all hops.
    ///
    /// Stability fund hops contribute their fixed decimal-rescaling rate.
    pub fn mid_price(&self) -> AmmResult<Price> {
        self.mid_price
            .get_or_init(|| self.compute_mid_price())
            .clone()
    }

    fn compute_mid_price(&self) -> AmmResult<Price> {
        let mut hops = self.pairs.iter().zip(&self.path);
        let (pair, token) = hops.next().ok_or(AmmError::PairsEmpty)?;
        let mut price = pair.price_of(token)?;
        for (pair, token) in hops {
            price = price.multiply(&pair.price_of(token)?)?;
        }
        Ok(Price::from_fraction(
            self.input.clone(),
            self.output.clone(),
            price.value,
        ))
    }

    /// Tokens after the input, in the form the router contract expects.
    ///
    /// The native placeholder becomes a null entry and assets bridged from
    /// another chain carry their origin address as well.
    pub fn path_for_swap(&self, chain: &ChainConfig) -> Vec<PathSegment> {
        self.path[1..]
            .iter()
            .map(|token| PathSegment::for_token(token, chain))
            .collect()
    }

    /// One router action per hop, tagging stability fund hops.
    pub fn route_action_path(&self, chain: &ChainConfig) -> Vec<RouteAction> {
        self.pairs
            .iter()
            .zip(&self.path[1..])
            .map(|(pair, token)| RouteAction {
                action: if pair.is_stability_fund() {
                    RouteActionType::StabilityFund
                } else {
                    RouteActionType::Swap
                },
                to: PathSegment::for_token(token, chain),
            })
            .collect()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<&str> = self.path.iter().map(|t| t.symbol.as_str()).collect();
        write!(f, "{}", symbols.join(" -> "))
    }
}
