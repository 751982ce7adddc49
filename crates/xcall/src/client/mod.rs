//! Per-chain public clients.
//!
//! Every chain family exposes the same read-only capabilities through
//! [`XPublicClient`]; the differences in log layout live in an
//! [`EventLogDecoder`].

mod decoder;
mod memory;
mod registry;

pub use decoder::*;
pub use memory::*;
pub use registry::*;

use crate::error::XCallResult;
use crate::types::{XCallEvent, XChainId};
use async_trait::async_trait;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// An undecoded contract log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventLog {
    /// Transaction hash.
    pub tx_hash: String,
    /// Block the log was emitted in.
    pub block_height: u64,
    /// Emitting contract.
    pub address: String,
    /// Event signature or name.
    pub signature: String,
    /// Indexed arguments, hex encoded.
    pub indexed: Vec<String>,
    /// Non-indexed arguments, hex encoded.
    pub data: Vec<String>,
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash.
    pub tx_hash: String,
    /// Block the transaction was included in.
    pub block_height: u64,
    /// Whether execution succeeded.
    pub success: bool,
    /// Logs emitted.
    pub logs: Vec<RawEventLog>,
}

/// Read access to one chain.
#[async_trait]
pub trait XPublicClient: Send + Sync {
    fn chain_id(&self) -> &XChainId;

    /// Decoder for this chain's log layout.
    fn decoder(&self) -> &dyn EventLogDecoder;

    /// Fee charged by xCall for sending to `dst`.
    async fn get_xcall_fee(&self, dst: &XChainId, with_rollback: bool) -> XCallResult<BigInt>;

    async fn get_block_height(&self) -> XCallResult<u64>;

    /// Receipt of `tx_hash`, or `None` while it is not mined.
    async fn get_tx_receipt(&self, tx_hash: &str) -> XCallResult<Option<TxReceipt>>;

    /// xCall logs emitted in `block_height`.
    async fn get_block_event_logs(&self, block_height: u64) -> XCallResult<Vec<RawEventLog>>;

    /// Decodes the xCall events among `logs`, skipping anything else.
    fn parse_event_logs(&self, logs: &[RawEventLog]) -> Vec<XCallEvent> {
        logs.iter().filter_map(|log| self.decoder().decode(log)).collect()
    }
}
