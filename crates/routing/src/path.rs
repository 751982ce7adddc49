//! Router call encoding.
//!
//! The router contract takes the tokens to swap through as a JSON list. The
//! chain's native placeholder is written as `null`, and bridged assets as an
//! `[address, origin]` pair.

use balanced_amm_domain::{ChainConfig, Token};
use serde::{Deserialize, Serialize};

/// One entry of a router path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Native,
    Token(String),
    /// Local address and the asset's address on its origin chain.
    External(String, String),
}

impl PathSegment {
    pub fn for_token(token: &Token, chain: &ChainConfig) -> Self {
        if chain.is_native(token) {
            Self::Native
        } else if let Some(origin) = chain.external_origin(token) {
            Self::External(token.address.clone(), origin.to_string())
        } else {
            Self::Token(token.address.clone())
        }
    }
}

/// Router action codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RouteActionType {
    Swap = 1,
    StabilityFund = 2,
}

impl From<RouteActionType> for u8 {
    fn from(action: RouteActionType) -> Self {
        action as u8
    }
}

impl TryFrom<u8> for RouteActionType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Swap),
            2 => Ok(Self::StabilityFund),
            other => Err(format!("unknown route action {other}")),
        }
    }
}

/// A single router hop: what to do and which token comes out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAction {
    pub action: RouteActionType,
    #[serde(rename = "toAddress")]
    pub to: PathSegment,
}
