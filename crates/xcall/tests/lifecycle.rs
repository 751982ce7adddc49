use balanced_amm_xcall::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const ICON: &str = "0x1.icon";
const EVM: &str = "0x38.bsc";

fn log(signature: &str, indexed: &[&str], data: &[&str]) -> RawEventLog {
    RawEventLog {
        tx_hash: String::new(),
        block_height: 0,
        address: "xcall".to_string(),
        signature: signature.to_string(),
        indexed: indexed.iter().map(|s| s.to_string()).collect(),
        data: data.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_subscriber_sees_transaction_settle() {
    let icon = Arc::new(InMemoryClient::new(ICON.into(), IconEventDecoder));
    let evm = Arc::new(InMemoryClient::new(EVM.into(), EvmEventDecoder));
    let registry = XClientRegistry::new().with_client(icon.clone()).with_client(evm.clone());

    icon.mine(
        "0xsend",
        true,
        vec![log("CallMessageSent(Address,str,int)", &["hxuser", "0x38.bsc/0xuser", "0x2a"], &[])],
    )
    .await;
    evm.mine("0xdeliver", true, vec![log("CallMessage", &["a", "b", "0x2a"], &["0x11", "0x"])])
        .await;
    evm.mine("0xexec", true, vec![log("CallExecuted", &["0x11"], &["0x01", ""])])
        .await;

    let store = XCallStore::new();
    let mut updates = store.subscribe();
    let message = XMessage::sent(ICON.into(), EVM.into(), "0xsend");
    let transaction = XTransaction::new(XTransactionKind::Bridge, &message, EVM.into());
    store.upsert_message(message).await;
    store.upsert_transaction(transaction.clone()).await;

    let tracker = XCallTracker::new(
        TrackerConfig::default().with_poll_interval(Duration::from_millis(1)),
        Arc::new(registry),
        store.clone(),
    );
    tracker.run_until_settled().await.unwrap();

    let mut settled = false;
    while let Ok(event) = updates.try_recv() {
        if let StoreEvent::TransactionUpdated(t) = event {
            settled |= t.id == transaction.id && t.status == XTransactionStatus::Success;
        }
    }
    assert!(settled);

    // the settled state survives a JSON round trip
    let restored = XCallStore::from_json(&store.to_json().await.unwrap()).unwrap();
    let message = restored.get_message(&transaction.primary_message_id).await.unwrap();
    assert_eq!(message.status, XMessageStatus::CallExecuted);
    assert_eq!(message.sn, Some(42.into()));
}
