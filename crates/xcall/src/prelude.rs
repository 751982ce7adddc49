//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use balanced_amm_xcall::prelude::*;
//! ```

// Clients
pub use crate::client::{
    EventLogDecoder, EvmEventDecoder, IconEventDecoder, InMemoryClient, RawEventLog, TxReceipt,
    XClientRegistry, XPublicClient,
};

// Errors
pub use crate::error::{XCallError, XCallResult};

// State machines
pub use crate::message::XMessage;
pub use crate::transaction::{XTransaction, XTransactionKind, derive_status};

// Store and tracking
pub use crate::store::{StoreEvent, XCallSnapshot, XCallStore};
pub use crate::tracker::{PollReport, TrackerConfig, XCallTracker};

// Types
pub use crate::types::{XCallEvent, XCallEventData, XChainId, XMessageStatus, XTransactionStatus};
