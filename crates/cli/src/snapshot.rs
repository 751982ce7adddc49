//! Pair snapshot files.
//!
//! ```json
//! {
//!   "chain": { "chain_id": 1, "native_address": "cx0000..." },
//!   "native": { "decimals": 18, "symbol": "ICX", "name": "ICON" },
//!   "tokens": [{ "address": "cx88fd...", "decimals": 18, "symbol": "sICX" }],
//!   "pairs": [{ "token0": "cx0000...", "token1": "cx88fd...",
//!               "reserve0": "1000000000000000000000", "reserve1": "..." }]
//! }
//! ```
//!
//! Reserves and total supplies are raw integer strings.

use anyhow::{Context, Result, anyhow, bail};
use balanced_amm_domain::{ChainConfig, Currency, CurrencyAmount, NativeCurrency, Pair, PairOptions, Token};
use num_bigint::BigInt;
use primitive_types::U256;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
pub struct NativeSpec {
    pub decimals: u8,
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSpec {
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairSpec {
    pub token0: String,
    pub token1: String,
    pub reserve0: String,
    pub reserve1: String,
    #[serde(default)]
    pub pool_id: Option<u64>,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(default)]
    pub stability_fund: bool,
}

/// File contents as written.
#[derive(Debug, Clone, Deserialize)]
pub struct PairSnapshot {
    pub chain: ChainConfig,
    #[serde(default)]
    pub native: Option<NativeSpec>,
    pub tokens: Vec<TokenSpec>,
    pub pairs: Vec<PairSpec>,
}

/// A loaded snapshot: resolved tokens and constructed pairs.
#[derive(Debug, Clone)]
pub struct Market {
    pub chain: ChainConfig,
    pub native: Option<NativeCurrency>,
    pub tokens: Vec<Token>,
    pub pairs: Vec<Pair>,
}

impl Market {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading pair snapshot {}", path.display()))?;
        let snapshot: PairSnapshot = serde_json::from_str(&json)
            .with_context(|| format!("parsing pair snapshot {}", path.display()))?;
        let market = Self::from_snapshot(snapshot)?;
        info!(
            path = %path.display(),
            tokens = market.tokens.len(),
            pairs = market.pairs.len(),
            "Loaded pair snapshot"
        );
        Ok(market)
    }

    pub fn from_snapshot(snapshot: PairSnapshot) -> Result<Self> {
        let chain = snapshot.chain;
        let tokens: Vec<Token> = snapshot
            .tokens
            .into_iter()
            .map(|t| {
                let name = t.name.unwrap_or_else(|| t.symbol.clone());
                Token::new(chain.chain_id, t.address, t.decimals, t.symbol, name)
            })
            .collect();

        let native = snapshot.native.map(|n| {
            let wrapped = tokens
                .iter()
                .find(|t| chain.is_native(t))
                .cloned()
                .unwrap_or_else(|| {
                    Token::new(chain.chain_id, chain.native_address.clone(), n.decimals, n.symbol.clone(), n.symbol.clone())
                });
            let name = n.name.unwrap_or_else(|| n.symbol.clone());
            NativeCurrency::new(chain.chain_id, n.decimals, n.symbol, name, wrapped)
        });

        let mut market = Self {
            chain,
            native,
            tokens,
            pairs: Vec::new(),
        };
        for (index, spec) in snapshot.pairs.into_iter().enumerate() {
            let pair = market
                .build_pair(&spec)
                .with_context(|| format!("pair #{index} ({}/{})", spec.token0, spec.token1))?;
            debug!(pair = %pair, pool_type = ?pair.pool_type(), "Pair loaded");
            market.pairs.push(pair);
        }
        Ok(market)
    }

    /// Finds a currency by address or symbol, case-insensitively. The native
    /// symbol resolves to the native currency rather than its pool token.
    pub fn resolve(&self, query: &str) -> Result<Currency> {
        if let Some(native) = &self.native {
            if native.symbol.eq_ignore_ascii_case(query) {
                return Ok(native.clone().into());
            }
        }
        self.find_token(query)
            .or_else(|_| {
                self.tokens
                    .iter()
                    .find(|t| t.symbol.eq_ignore_ascii_case(query))
                    .cloned()
                    .ok_or_else(|| anyhow!("unknown token {query}"))
            })
            .map(Currency::from)
    }

    fn find_token(&self, address: &str) -> Result<Token> {
        self.tokens
            .iter()
            .find(|t| t.address.eq_ignore_ascii_case(address))
            .cloned()
            .ok_or_else(|| anyhow!("unknown token {address}"))
    }

    fn build_pair(&self, spec: &PairSpec) -> Result<Pair> {
        let token0 = self.find_token(&spec.token0)?;
        let token1 = self.find_token(&spec.token1)?;
        let reserve0 = CurrencyAmount::from_u256(token0, parse_raw(&spec.reserve0)?)?;
        let reserve1 = CurrencyAmount::from_u256(token1, parse_raw(&spec.reserve1)?)?;

        let mut options = PairOptions::default();
        if let Some(pool_id) = spec.pool_id {
            options = options.with_pool_id(pool_id);
        }
        if let Some(total_supply) = &spec.total_supply {
            let raw = parse_raw(total_supply)?;
            options = options.with_total_supply(BigInt::from_str(&raw.to_string())?);
        }
        if spec.stability_fund {
            options = options.stability_fund();
        }
        Ok(Pair::new(reserve0, reserve1, &self.chain, options)?)
    }
}

fn parse_raw(value: &str) -> Result<U256> {
    let value = value.trim();
    if value.is_empty() {
        bail!("empty raw amount");
    }
    U256::from_dec_str(value).map_err(|e| anyhow!("invalid raw amount {value:?}: {e:?}"))
}
