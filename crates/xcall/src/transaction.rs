//! User-level cross-chain transactions.
//!
//! A transaction between two spokes travels spoke → hub → spoke, so it is
//! made of a primary message and, once the hub executes, a secondary message
//! to the final destination.

use crate::error::{XCallError, XCallResult};
use crate::message::XMessage;
use crate::types::{XChainId, XMessageStatus, XTransactionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XTransactionKind {
    Swap,
    Bridge,
    Deposit,
    Withdraw,
    Borrow,
    Repay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XTransaction {
    /// Transaction ID.
    pub id: String,
    /// Requested action.
    pub kind: XTransactionKind,
    /// Chain the user signed on.
    pub source_chain_id: XChainId,
    /// Chain the user's funds end up on.
    pub final_destination_chain_id: XChainId,
    /// First leg.
    pub primary_message_id: String,
    /// Second leg, created once the first one executes on the hub.
    pub secondary_message_id: Option<String>,
    /// Overall status.
    pub status: XTransactionStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl XTransaction {
    /// Starts a transaction whose first leg is `primary`.
    pub fn new(kind: XTransactionKind, primary: &XMessage, final_destination_chain_id: XChainId) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            source_chain_id: primary.src_chain_id.clone(),
            final_destination_chain_id,
            primary_message_id: primary.id.clone(),
            secondary_message_id: None,
            status: XTransactionStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_multi_leg(&self, primary: &XMessage) -> bool {
        primary.dst_chain_id != self.final_destination_chain_id
    }

    /// Whether `primary` has executed on the hub and the second leg is not
    /// tracked yet.
    pub fn needs_secondary(&self, primary: &XMessage) -> bool {
        self.secondary_message_id.is_none()
            && self.is_multi_leg(primary)
            && primary.status == XMessageStatus::CallExecuted
    }

    /// Builds the second leg from the hub execution of `primary`.
    ///
    /// The hub sends the onward message from the same transaction that
    /// executed the first leg, so that transaction is the new source.
    pub fn create_secondary(&mut self, primary: &XMessage) -> XCallResult<XMessage> {
        if !self.needs_secondary(primary) {
            return Err(XCallError::InvalidTransition {
                message: primary.id.clone(),
                from: primary.status.to_string(),
                event: "create secondary".to_string(),
            });
        }
        let hub_tx = primary
            .execution_tx_hash
            .clone()
            .ok_or_else(|| XCallError::Decode(format!("message {} has no execution tx", primary.id)))?;
        let secondary = XMessage::sent(
            primary.dst_chain_id.clone(),
            self.final_destination_chain_id.clone(),
            hub_tx,
        );
        self.secondary_message_id = Some(secondary.id.clone());
        Ok(secondary)
    }

    /// Recomputes `status` from the legs.
    pub fn refresh_status(&mut self, primary: &XMessage, secondary: Option<&XMessage>) {
        self.status = derive_status(self, primary, secondary);
    }
}

/// Overall status of `transaction` given its legs.
pub fn derive_status(
    transaction: &XTransaction,
    primary: &XMessage,
    secondary: Option<&XMessage>,
) -> XTransactionStatus {
    match primary.status {
        XMessageStatus::Failed | XMessageStatus::Rollbacked => XTransactionStatus::Failure,
        XMessageStatus::CallExecuted if !transaction.is_multi_leg(primary) => XTransactionStatus::Success,
        XMessageStatus::CallExecuted => match secondary.map(|s| s.status) {
            Some(XMessageStatus::CallExecuted) => XTransactionStatus::Success,
            Some(XMessageStatus::Failed | XMessageStatus::Rollbacked) => XTransactionStatus::Failure,
            _ => XTransactionStatus::Pending,
        },
        _ => XTransactionStatus::Pending,
    }
}
