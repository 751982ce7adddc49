//! Chain ids, statuses and xCall events.

use crate::codec;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a chain in xCall network terms, e.g. `0x1.icon` or
/// `0xa4b1.arbitrum`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XChainId(pub String);

impl XChainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for XChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for XChainId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Progress of a single cross-chain message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XMessageStatus {
    /// Built locally, source transaction not yet sent.
    Requested,
    /// Source transaction sent, waiting for its `CallMessageSent` event.
    AwaitingCallMessageSent,
    /// Source chain emitted `CallMessageSent`.
    CallMessageSent,
    /// Destination chain received the message.
    CallMessage,
    /// Destination chain executed the call successfully.
    CallExecuted,
    /// Source chain rolled the message back.
    Rollbacked,
    /// Execution failed or tracking gave up.
    Failed,
}

impl XMessageStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::CallExecuted | Self::Rollbacked | Self::Failed)
    }
}

impl fmt::Display for XMessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XTransactionStatus {
    Pending,
    Success,
    Failure,
}

/// Result code xCall reports for a successful execution.
pub const CALL_EXECUTED_SUCCESS: i64 = 1;

/// Payload of an xCall contract event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum XCallEventData {
    CallMessageSent {
        #[serde(with = "codec::bigint")]
        sn: BigInt,
    },
    CallMessage {
        #[serde(with = "codec::bigint")]
        sn: BigInt,
        #[serde(with = "codec::bigint")]
        req_id: BigInt,
    },
    CallExecuted {
        #[serde(with = "codec::bigint")]
        req_id: BigInt,
        code: i64,
    },
    RollbackMessage {
        #[serde(with = "codec::bigint")]
        sn: BigInt,
    },
}

impl XCallEventData {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CallMessageSent { .. } => "CallMessageSent",
            Self::CallMessage { .. } => "CallMessage",
            Self::CallExecuted { .. } => "CallExecuted",
            Self::RollbackMessage { .. } => "RollbackMessage",
        }
    }
}

/// An xCall event as observed on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XCallEvent {
    pub tx_hash: String,
    pub block_height: u64,
    #[serde(flatten)]
    pub data: XCallEventData,
}

impl XCallEvent {
    pub fn new(tx_hash: impl Into<String>, block_height: u64, data: XCallEventData) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            block_height,
            data,
        }
    }
}

impl fmt::Display for XCallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.data.name(), self.block_height)
    }
}
