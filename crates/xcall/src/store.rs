//! Shared message and transaction store.
//!
//! Readers take snapshots or subscribe to change notifications; writers
//! replace whole records. State round-trips through JSON with big integers
//! written in the tagged form from [`crate::codec`].

use crate::error::{XCallError, XCallResult};
use crate::message::XMessage;
use crate::transaction::XTransaction;
use crate::types::XMessageStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

const CHANNEL_CAPACITY: usize = 256;

/// Point-in-time copy of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XCallSnapshot {
    #[serde(default)]
    pub messages: BTreeMap<String, XMessage>,
    #[serde(default)]
    pub transactions: BTreeMap<String, XTransaction>,
}

/// Change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    MessageUpdated(XMessage),
    MessageRemoved(String),
    TransactionUpdated(XTransaction),
    TransactionRemoved(String),
}

/// Cloneable handle to the shared state.
#[derive(Debug, Clone)]
pub struct XCallStore {
    state: Arc<RwLock<XCallSnapshot>>,
    events: broadcast::Sender<StoreEvent>,
}

impl XCallStore {
    #[must_use]
    pub fn new() -> Self {
        Self::from_snapshot(XCallSnapshot::default())
    }

    pub fn from_snapshot(snapshot: XCallSnapshot) -> Self {
        let (events, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(snapshot)),
            events,
        }
    }

    /// Receives every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> XCallSnapshot {
        self.state.read().await.clone()
    }

    pub async fn upsert_message(&self, message: XMessage) {
        debug!(message = %message.id, status = %message.status, "Message updated");
        self.state
            .write()
            .await
            .messages
            .insert(message.id.clone(), message.clone());
        self.notify(StoreEvent::MessageUpdated(message));
    }

    pub async fn upsert_transaction(&self, transaction: XTransaction) {
        debug!(transaction = %transaction.id, status = ?transaction.status, "Transaction updated");
        self.state
            .write()
            .await
            .transactions
            .insert(transaction.id.clone(), transaction.clone());
        self.notify(StoreEvent::TransactionUpdated(transaction));
    }

    /// Removes a transaction and the messages it owns.
    pub async fn remove_transaction(&self, id: &str) -> XCallResult<XTransaction> {
        let (removed, messages) = {
            let mut state = self.state.write().await;
            let transaction = state
                .transactions
                .remove(id)
                .ok_or_else(|| XCallError::UnknownTransaction(id.to_string()))?;
            let messages: Vec<String> = std::iter::once(&transaction.primary_message_id)
                .chain(transaction.secondary_message_id.as_ref())
                .filter(|m| state.messages.remove(m.as_str()).is_some())
                .cloned()
                .collect();
            (transaction, messages)
        };
        debug!(transaction = %id, messages = messages.len(), "Transaction removed");
        for message in messages {
            self.notify(StoreEvent::MessageRemoved(message));
        }
        self.notify(StoreEvent::TransactionRemoved(id.to_string()));
        Ok(removed)
    }

    pub async fn get_message(&self, id: &str) -> XCallResult<XMessage> {
        self.state
            .read()
            .await
            .messages
            .get(id)
            .cloned()
            .ok_or_else(|| XCallError::UnknownMessage(id.to_string()))
    }

    pub async fn get_transaction(&self, id: &str) -> XCallResult<XTransaction> {
        self.state
            .read()
            .await
            .transactions
            .get(id)
            .cloned()
            .ok_or_else(|| XCallError::UnknownTransaction(id.to_string()))
    }

    /// Messages with a source transaction that have not settled yet.
    pub async fn pending_messages(&self) -> Vec<XMessage> {
        self.state
            .read()
            .await
            .messages
            .values()
            .filter(|m| !m.is_terminal() && m.status != XMessageStatus::Requested)
            .cloned()
            .collect()
    }

    /// Transactions that have `message_id` as one of their legs.
    pub async fn transactions_for_message(&self, message_id: &str) -> Vec<XTransaction> {
        self.state
            .read()
            .await
            .transactions
            .values()
            .filter(|t| {
                t.primary_message_id == message_id
                    || t.secondary_message_id.as_deref() == Some(message_id)
            })
            .cloned()
            .collect()
    }

    pub async fn to_json(&self) -> XCallResult<String> {
        Ok(serde_json::to_string(&*self.state.read().await)?)
    }

    pub fn from_json(json: &str) -> XCallResult<Self> {
        Ok(Self::from_snapshot(serde_json::from_str(json)?))
    }

    fn notify(&self, event: StoreEvent) {
        // no receivers is fine
        let _ = self.events.send(event);
    }
}

impl Default for XCallStore {
    fn default() -> Self {
        Self::new()
    }
}
