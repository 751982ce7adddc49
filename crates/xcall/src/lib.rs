//! Cross-chain message tracking.
//!
//! This crate follows swaps and transfers that hop between chains through
//! xCall:
//! - Message and transaction state machines driven by on-chain events
//! - A capability trait per chain family with event log decoders
//! - A shared store with snapshot and subscribe semantics
//! - A bounded polling tracker that advances pending messages

/// Prelude module for convenient imports.
pub mod prelude;

/// Chain clients, decoders and the client registry.
pub mod client;
/// Tagged big integer serialization.
pub mod codec;
/// Error type.
pub mod error;
/// Message state machine.
pub mod message;
/// Shared message store.
pub mod store;
/// Polling tracker.
pub mod tracker;
/// Multi-leg transactions.
pub mod transaction;
/// Chain ids, statuses and events.
pub mod types;
