//! Cross-chain message state machine.

use crate::codec;
use crate::error::{XCallError, XCallResult};
use crate::types::{CALL_EXECUTED_SUCCESS, XCallEvent, XCallEventData, XChainId, XMessageStatus};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// One xCall message from a source to a destination chain.
///
/// Messages are advanced only through [`XMessage::apply`], which returns a new
/// value and leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XMessage {
    /// Message ID.
    pub id: String,
    /// Chain the message was sent from.
    pub src_chain_id: XChainId,
    /// Chain the message is delivered to.
    pub dst_chain_id: XChainId,
    /// Transaction that sent the message, once submitted.
    pub src_tx_hash: Option<String>,
    /// Destination transaction that delivered the message.
    pub dst_tx_hash: Option<String>,
    /// Destination transaction that executed the call.
    pub execution_tx_hash: Option<String>,
    /// Source-chain sequence number.
    #[serde(default, with = "codec::option_bigint")]
    pub sn: Option<BigInt>,
    /// Destination-chain request id.
    #[serde(default, with = "codec::option_bigint")]
    pub req_id: Option<BigInt>,
    /// Current status.
    pub status: XMessageStatus,
    /// Every event applied so far.
    #[serde(default)]
    pub events: Vec<XCallEvent>,
    /// Why the message failed, if it did.
    pub failure_reason: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

impl XMessage {
    /// A message whose source transaction has not been sent yet.
    pub fn requested(src_chain_id: XChainId, dst_chain_id: XChainId) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            src_chain_id,
            dst_chain_id,
            src_tx_hash: None,
            dst_tx_hash: None,
            execution_tx_hash: None,
            sn: None,
            req_id: None,
            status: XMessageStatus::Requested,
            events: Vec::new(),
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A message whose source transaction is already on chain.
    pub fn sent(src_chain_id: XChainId, dst_chain_id: XChainId, src_tx_hash: impl Into<String>) -> Self {
        let mut message = Self::requested(src_chain_id, dst_chain_id);
        message.src_tx_hash = Some(src_tx_hash.into());
        message.status = XMessageStatus::AwaitingCallMessageSent;
        message
    }

    /// Sets the message ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Records the source transaction of a requested message.
    pub fn submit(&self, src_tx_hash: impl Into<String>) -> XCallResult<Self> {
        if self.status != XMessageStatus::Requested {
            return Err(self.invalid("submit"));
        }
        let mut next = self.clone();
        next.src_tx_hash = Some(src_tx_hash.into());
        next.status = XMessageStatus::AwaitingCallMessageSent;
        next.updated_at = Utc::now();
        Ok(next)
    }

    /// Marks a non-terminal message as failed.
    pub fn fail(&self, reason: impl Into<String>) -> XCallResult<Self> {
        if self.status.is_terminal() {
            return Err(self.invalid("fail"));
        }
        let mut next = self.clone();
        next.status = XMessageStatus::Failed;
        next.failure_reason = Some(reason.into());
        next.updated_at = Utc::now();
        Ok(next)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether `event` belongs to this message in its current state.
    ///
    /// `CallMessageSent` is matched by source transaction, `CallMessage` and
    /// `RollbackMessage` by sequence number, `CallExecuted` by request id.
    pub fn correlates(&self, event: &XCallEvent) -> bool {
        match (&event.data, self.status) {
            (XCallEventData::CallMessageSent { .. }, XMessageStatus::AwaitingCallMessageSent) => {
                self.src_tx_hash.as_deref() == Some(event.tx_hash.as_str())
            }
            (XCallEventData::CallMessage { sn, .. }, XMessageStatus::CallMessageSent) => {
                self.sn.as_ref() == Some(sn)
            }
            (XCallEventData::CallExecuted { req_id, .. }, XMessageStatus::CallMessage) => {
                self.req_id.as_ref() == Some(req_id)
            }
            (
                XCallEventData::RollbackMessage { sn },
                XMessageStatus::CallMessageSent | XMessageStatus::CallMessage,
            ) => self.sn.as_ref() == Some(sn),
            _ => false,
        }
    }

    /// Advances the message by one observed event.
    ///
    /// Fails with [`XCallError::InvalidTransition`] when the event does not
    /// belong to this message or is not allowed from the current status.
    pub fn apply(&self, event: &XCallEvent) -> XCallResult<Self> {
        if !self.correlates(event) {
            return Err(self.invalid(event.data.name()));
        }

        let mut next = self.clone();
        match &event.data {
            XCallEventData::CallMessageSent { sn } => {
                next.sn = Some(sn.clone());
                next.status = XMessageStatus::CallMessageSent;
            }
            XCallEventData::CallMessage { req_id, .. } => {
                next.req_id = Some(req_id.clone());
                next.dst_tx_hash = Some(event.tx_hash.clone());
                next.status = XMessageStatus::CallMessage;
            }
            XCallEventData::CallExecuted { code, .. } => {
                next.execution_tx_hash = Some(event.tx_hash.clone());
                if *code == CALL_EXECUTED_SUCCESS {
                    next.status = XMessageStatus::CallExecuted;
                } else {
                    next.status = XMessageStatus::Failed;
                    next.failure_reason = Some(format!("call executed with code {code}"));
                }
            }
            XCallEventData::RollbackMessage { .. } => {
                next.status = XMessageStatus::Rollbacked;
            }
        }
        next.events.push(event.clone());
        next.updated_at = Utc::now();
        Ok(next)
    }

    fn invalid(&self, event: &str) -> XCallError {
        XCallError::InvalidTransition {
            message: self.id.clone(),
            from: self.status.to_string(),
            event: event.to_string(),
        }
    }
}
