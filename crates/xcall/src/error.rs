use thiserror::Error;

/// Errors raised while tracking cross-chain messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XCallError {
    #[error("message {message} cannot go from {from} on {event}")]
    InvalidTransition {
        message: String,
        from: String,
        event: String,
    },

    #[error("no client registered for chain {0}")]
    UnknownChain(String),

    #[error("unknown message {0}")]
    UnknownMessage(String),

    #[error("unknown transaction {0}")]
    UnknownTransaction(String),

    #[error("client error: {0}")]
    Client(String),

    #[error("cannot decode {0}")]
    Decode(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type XCallResult<T> = Result<T, XCallError>;

impl From<serde_json::Error> for XCallError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
