use super::{EventLogDecoder, RawEventLog, TxReceipt, XPublicClient};
use crate::error::XCallResult;
use crate::types::XChainId;
use async_trait::async_trait;
use num_bigint::BigInt;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct ChainState {
    height: u64,
    receipts: HashMap<String, TxReceipt>,
    blocks: HashMap<u64, Vec<RawEventLog>>,
    fees: HashMap<XChainId, BigInt>,
}

/// A chain held in memory, for tests and dry runs.
///
/// Blocks are appended with [`InMemoryClient::mine`]; every log mined is
/// also returned from the block scan.
pub struct InMemoryClient<D> {
    chain_id: XChainId,
    decoder: D,
    state: RwLock<ChainState>,
}

impl<D: EventLogDecoder> InMemoryClient<D> {
    pub fn new(chain_id: XChainId, decoder: D) -> Self {
        Self {
            chain_id,
            decoder,
            state: RwLock::new(ChainState::default()),
        }
    }

    /// Sets the fee quoted for messages to `dst`.
    pub async fn set_fee(&self, dst: XChainId, fee: BigInt) {
        self.state.write().await.fees.insert(dst, fee);
    }

    /// Mines a new block holding one transaction with `logs`, returning the
    /// block height.
    pub async fn mine(&self, tx_hash: &str, success: bool, logs: Vec<RawEventLog>) -> u64 {
        let mut state = self.state.write().await;
        state.height += 1;
        let height = state.height;
        let logs: Vec<RawEventLog> = logs
            .into_iter()
            .map(|log| RawEventLog {
                tx_hash: tx_hash.to_string(),
                block_height: height,
                ..log
            })
            .collect();
        state.blocks.entry(height).or_default().extend(logs.iter().cloned());
        state.receipts.insert(
            tx_hash.to_string(),
            TxReceipt {
                tx_hash: tx_hash.to_string(),
                block_height: height,
                success,
                logs,
            },
        );
        height
    }

    /// Mines empty blocks.
    pub async fn advance(&self, blocks: u64) {
        self.state.write().await.height += blocks;
    }
}

#[async_trait]
impl<D: EventLogDecoder> XPublicClient for InMemoryClient<D> {
    fn chain_id(&self) -> &XChainId {
        &self.chain_id
    }

    fn decoder(&self) -> &dyn EventLogDecoder {
        &self.decoder
    }

    async fn get_xcall_fee(&self, dst: &XChainId, with_rollback: bool) -> XCallResult<BigInt> {
        let fee = self.state.read().await.fees.get(dst).cloned().unwrap_or_default();
        // rollback-enabled messages pay for the return trip as well
        Ok(if with_rollback { fee * 2u8 } else { fee })
    }

    async fn get_block_height(&self) -> XCallResult<u64> {
        Ok(self.state.read().await.height)
    }

    async fn get_tx_receipt(&self, tx_hash: &str) -> XCallResult<Option<TxReceipt>> {
        Ok(self.state.read().await.receipts.get(tx_hash).cloned())
    }

    async fn get_block_event_logs(&self, block_height: u64) -> XCallResult<Vec<RawEventLog>> {
        Ok(self
            .state
            .read()
            .await
            .blocks
            .get(&block_height)
            .cloned()
            .unwrap_or_default())
    }
}
