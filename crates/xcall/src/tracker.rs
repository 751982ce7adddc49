//! Polling tracker for pending messages.
//!
//! Each poll looks at every pending message once:
//! - awaiting `CallMessageSent`: fetch the source receipt
//! - sent or delivered: scan new destination blocks for `CallMessage` and
//!   `CallExecuted`, and new source blocks for `RollbackMessage`
//!
//! A message that makes no progress for `max_attempts` polls is marked
//! failed, so tracking always terminates.

use crate::client::XClientRegistry;
use crate::error::{XCallError, XCallResult};
use crate::message::XMessage;
use crate::store::XCallStore;
use crate::transaction::derive_status;
use crate::types::{XCallEvent, XCallEventData, XChainId, XMessageStatus};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Configuration for the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Delay between polls.
    pub poll_interval: Duration,
    /// Polls without progress before a message is failed.
    pub max_attempts: u32,
    /// Most blocks scanned per chain per poll.
    pub block_scan_window: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_attempts: 90,
            block_scan_window: 20,
        }
    }
}

impl TrackerConfig {
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_block_scan_window(mut self, block_scan_window: u64) -> Self {
        self.block_scan_window = block_scan_window;
        self
    }
}

/// Next block to scan on each side of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScanCursor {
    src: u64,
    dst: u64,
}

#[derive(Debug, Default)]
struct Progress {
    attempts: u32,
    cursor: Option<ScanCursor>,
}

/// Summary of one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Messages looked at.
    pub checked: usize,
    /// Messages whose status changed.
    pub advanced: usize,
    /// Messages given up on.
    pub failed: usize,
}

/// Advances pending messages in an [`XCallStore`] from on-chain events.
pub struct XCallTracker {
    /// Configuration.
    config: TrackerConfig,
    /// Chain clients.
    registry: Arc<XClientRegistry>,
    /// Shared state.
    store: XCallStore,
    /// Attempts and scan cursors by message.
    progress: Arc<RwLock<HashMap<String, Progress>>>,
}

impl XCallTracker {
    pub fn new(config: TrackerConfig, registry: Arc<XClientRegistry>, store: XCallStore) -> Self {
        Self {
            config,
            registry,
            store,
            progress: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn store(&self) -> &XCallStore {
        &self.store
    }

    /// Polls every pending message once.
    pub async fn poll_once(&self) -> XCallResult<PollReport> {
        let pending = self.store.pending_messages().await;
        self.prune(&pending).await;
        let mut report = PollReport {
            checked: pending.len(),
            ..PollReport::default()
        };

        for message in pending {
            let outcome = self.advance(&message).await;
            let updated = match outcome {
                Ok(Some(updated)) => {
                    self.progress.write().await.entry(message.id.clone()).or_default().attempts = 0;
                    report.advanced += 1;
                    Some(updated)
                }
                Ok(None) => self.record_miss(&message, None).await?,
                Err(e) => self.record_miss(&message, Some(e)).await?,
            };

            if let Some(updated) = updated {
                if updated.status == XMessageStatus::Failed {
                    report.failed += 1;
                }
                if updated.is_terminal() {
                    self.progress.write().await.remove(&updated.id);
                }
                self.store.upsert_message(updated.clone()).await;
                self.sync_transactions(&updated).await?;
            }
        }

        debug!(
            checked = report.checked,
            advanced = report.advanced,
            failed = report.failed,
            "Poll finished"
        );
        Ok(report)
    }

    /// Polls until no message is pending.
    pub async fn run_until_settled(&self) -> XCallResult<()> {
        info!("Tracking pending xCall messages");
        loop {
            self.poll_once().await?;
            if self.store.pending_messages().await.is_empty() {
                info!("All xCall messages settled");
                return Ok(());
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Drops attempts and cursors of messages that are no longer pending,
    /// such as those removed from the store.
    async fn prune(&self, pending: &[XMessage]) {
        let live: HashSet<&str> = pending.iter().map(|m| m.id.as_str()).collect();
        let mut progress = self.progress.write().await;
        let before = progress.len();
        progress.retain(|id, _| live.contains(id.as_str()));
        if progress.len() < before {
            debug!(dropped = before - progress.len(), "Pruned tracker state");
        }
    }

    /// Counts a poll without progress, failing the message once the budget
    /// is spent.
    async fn record_miss(&self, message: &XMessage, error: Option<XCallError>) -> XCallResult<Option<XMessage>> {
        let attempts = {
            let mut progress = self.progress.write().await;
            let entry = progress.entry(message.id.clone()).or_default();
            entry.attempts += 1;
            entry.attempts
        };
        if let Some(e) = &error {
            warn!(message = %message.id, attempts, error = %e, "Polling message failed");
        }
        if attempts < self.config.max_attempts {
            return Ok(None);
        }

        let reason = match error {
            Some(e) => format!("gave up after {attempts} polls: {e}"),
            None => format!("no progress after {attempts} polls"),
        };
        warn!(message = %message.id, reason = %reason, "Giving up on message");
        message.fail(reason).map(Some)
    }

    async fn advance(&self, message: &XMessage) -> XCallResult<Option<XMessage>> {
        match message.status {
            XMessageStatus::AwaitingCallMessageSent => self.check_source_receipt(message).await,
            XMessageStatus::CallMessageSent | XMessageStatus::CallMessage => self.scan_for_events(message).await,
            _ => Ok(None),
        }
    }

    async fn check_source_receipt(&self, message: &XMessage) -> XCallResult<Option<XMessage>> {
        let Some(tx_hash) = message.src_tx_hash.as_deref() else {
            return Ok(None);
        };
        let src = self.registry.get(&message.src_chain_id)?;
        let Some(receipt) = src.get_tx_receipt(tx_hash).await? else {
            return Ok(None);
        };
        if !receipt.success {
            return message.fail("source transaction reverted").map(Some);
        }

        let events = src.parse_event_logs(&receipt.logs);
        let Some(sent) = events.iter().find(|e| message.correlates(e)) else {
            return message
                .fail("source transaction emitted no CallMessageSent")
                .map(Some);
        };
        let next = message.apply(sent)?;

        let dst_height = self.registry.get(&message.dst_chain_id)?.get_block_height().await?;
        let cursor = ScanCursor {
            src: receipt.block_height + 1,
            dst: dst_height.saturating_sub(self.config.block_scan_window) + 1,
        };
        self.progress.write().await.entry(message.id.clone()).or_default().cursor = Some(cursor);
        info!(message = %message.id, sn = ?next.sn, "CallMessageSent observed");
        Ok(Some(next))
    }

    async fn scan_for_events(&self, message: &XMessage) -> XCallResult<Option<XMessage>> {
        let cursor = match self.cursor(message.id.as_str()).await {
            Some(cursor) => cursor,
            None => ScanCursor {
                src: self.window_start(&message.src_chain_id).await?,
                dst: self.window_start(&message.dst_chain_id).await?,
            },
        };

        let (dst_events, next_dst) = self.scan(&message.dst_chain_id, cursor.dst).await?;
        let (src_events, next_src) = self.scan(&message.src_chain_id, cursor.src).await?;
        self.progress.write().await.entry(message.id.clone()).or_default().cursor = Some(ScanCursor {
            src: next_src,
            dst: next_dst,
        });

        let mut current = message.clone();
        for event in dst_events.iter().chain(src_events.iter().filter(|e| is_rollback(e))) {
            if current.correlates(event) {
                current = current.apply(event)?;
                info!(message = %current.id, status = %current.status, tx = %event.tx_hash, "Message advanced");
            }
        }

        Ok((current.status != message.status).then_some(current))
    }

    async fn cursor(&self, id: &str) -> Option<ScanCursor> {
        self.progress.read().await.get(id).and_then(|p| p.cursor)
    }

    async fn window_start(&self, chain: &XChainId) -> XCallResult<u64> {
        let height = self.registry.get(chain)?.get_block_height().await?;
        Ok(height.saturating_sub(self.config.block_scan_window) + 1)
    }

    /// Decoded events from at most `block_scan_window` blocks starting at
    /// `from`, with the next block to scan.
    async fn scan(&self, chain: &XChainId, from: u64) -> XCallResult<(Vec<XCallEvent>, u64)> {
        let client = self.registry.get(chain)?;
        let height = client.get_block_height().await?;
        if from > height {
            return Ok((Vec::new(), from));
        }
        let to = height.min(from + self.config.block_scan_window.max(1) - 1);

        let mut events = Vec::new();
        for block in from..=to {
            let logs = client.get_block_event_logs(block).await?;
            events.extend(client.parse_event_logs(&logs));
        }
        debug!(chain = %chain, from, to, events = events.len(), "Scanned blocks");
        Ok((events, to + 1))
    }

    /// Refreshes transactions that use `message`, creating second legs when
    /// a hub execution completes.
    async fn sync_transactions(&self, message: &XMessage) -> XCallResult<()> {
        for mut transaction in self.store.transactions_for_message(&message.id).await {
            let primary = self.store.get_message(&transaction.primary_message_id).await?;
            if transaction.needs_secondary(&primary) {
                let secondary = transaction.create_secondary(&primary)?;
                info!(
                    transaction = %transaction.id,
                    secondary = %secondary.id,
                    "Tracking second leg"
                );
                self.store.upsert_message(secondary).await;
            }
            let secondary = match &transaction.secondary_message_id {
                Some(id) => Some(self.store.get_message(id).await?),
                None => None,
            };
            let status = derive_status(&transaction, &primary, secondary.as_ref());
            if status != transaction.status {
                info!(transaction = %transaction.id, status = ?status, "Transaction status changed");
            }
            transaction.status = status;
            self.store.upsert_transaction(transaction).await;
        }
        Ok(())
    }
}

fn is_rollback(event: &XCallEvent) -> bool {
    matches!(event.data, XCallEventData::RollbackMessage { .. })
}
