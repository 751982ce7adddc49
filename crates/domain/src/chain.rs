//! Per-chain asset table.
//!
//! Pair slot ordering and swap-path encoding depend on which assets play a
//! special role on a chain. Those roles are declared here, keyed by token
//! address, rather than inferred from symbols.

use crate::entities::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared ordering roles. An asset with a higher rank is placed in the
/// second slot of a pair; equal ranks keep the caller's order.
///
/// | role           | rank |
/// |----------------|------|
/// | other          | 0    |
/// | stablecoin     | 1    |
/// | wrapped native | 2    |
/// | exception      | 3    |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalOrdering {
    #[serde(default)]
    pub stablecoins: Vec<String>,
    #[serde(default)]
    pub wrapped_native: Vec<String>,
    #[serde(default)]
    pub exceptions: Vec<String>,
}

impl CanonicalOrdering {
    pub fn rank(&self, token: &Token) -> u8 {
        let listed = |list: &[String]| list.iter().any(|a| a.eq_ignore_ascii_case(&token.address));
        if listed(&self.exceptions) {
            3
        } else if listed(&self.wrapped_native) {
            2
        } else if listed(&self.stablecoins) {
            1
        } else {
            0
        }
    }

    /// Whether `(first, second)` must be flipped to reach canonical order.
    pub fn should_swap(&self, first: &Token, second: &Token) -> bool {
        self.rank(first) > self.rank(second)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    /// Address of the placeholder token that stands for the native coin
    /// inside pools. Pairs holding it are queue pools.
    pub native_address: String,
    #[serde(default)]
    pub ordering: CanonicalOrdering,
    /// Assets bridged from other chains, mapped to their address on the
    /// origin chain. Swap paths carry both addresses for these.
    #[serde(default)]
    pub external_assets: HashMap<String, String>,
}

impl ChainConfig {
    pub fn new(chain_id: u64, native_address: impl Into<String>) -> Self {
        Self {
            chain_id,
            native_address: native_address.into(),
            ordering: CanonicalOrdering::default(),
            external_assets: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: CanonicalOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    #[must_use]
    pub fn with_external_asset(
        mut self,
        address: impl Into<String>,
        origin_address: impl Into<String>,
    ) -> Self {
        self.external_assets
            .insert(address.into(), origin_address.into());
        self
    }

    pub fn is_native(&self, token: &Token) -> bool {
        token.chain_id == self.chain_id && token.address.eq_ignore_ascii_case(&self.native_address)
    }

    pub fn external_origin(&self, token: &Token) -> Option<&str> {
        self.external_assets
            .iter()
            .find(|(address, _)| address.eq_ignore_ascii_case(&token.address))
            .map(|(_, origin)| origin.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(address: &str) -> Token {
        Token::new(1, address, 18, address, address)
    }

    fn ordering() -> CanonicalOrdering {
        CanonicalOrdering {
            stablecoins: vec!["cxusd".into()],
            wrapped_native: vec!["cxsicx".into()],
            exceptions: vec!["cxbtcb".into()],
        }
    }

    #[test]
    fn test_ordering_is_independent_of_input_order() {
        let ordering = ordering();
        let pairs = [
            ("cxusd", "cxother"),
            ("cxsicx", "cxusd"),
            ("cxbtcb", "cxsicx"),
            ("cxusd", "cxbtcb"),
        ];
        for (a, b) in pairs {
            let (a, b) = (token(a), token(b));
            let forward = if ordering.should_swap(&a, &b) { (&b, &a) } else { (&a, &b) };
            let backward = if ordering.should_swap(&b, &a) { (&a, &b) } else { (&b, &a) };
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn test_stablecoin_goes_second_against_plain_asset() {
        let ordering = ordering();
        assert!(ordering.should_swap(&token("cxusd"), &token("cxother")));
        assert!(!ordering.should_swap(&token("cxother"), &token("cxusd")));
    }

    #[test]
    fn test_plain_assets_keep_given_order() {
        let ordering = ordering();
        assert!(!ordering.should_swap(&token("cxa"), &token("cxb")));
        assert!(!ordering.should_swap(&token("cxb"), &token("cxa")));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "chain_id": 1,
            "native_address": "cx0000000000000000000000000000000000000000",
            "ordering": { "stablecoins": ["cxusd"] },
            "external_assets": { "cxeth": "0xeth" }
        }"#;
        let config: ChainConfig = serde_json::from_str(json).unwrap();
        assert!(config.is_native(&token("CX0000000000000000000000000000000000000000")));
        assert_eq!(config.external_origin(&token("cxETH")), Some("0xeth"));
        assert_eq!(config.ordering.rank(&token("cxusd")), 1);
    }
}
