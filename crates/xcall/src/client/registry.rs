use super::XPublicClient;
use crate::error::{XCallError, XCallResult};
use crate::types::XChainId;
use std::collections::HashMap;
use std::sync::Arc;

/// Chain id to client lookup.
#[derive(Default, Clone)]
pub struct XClientRegistry {
    clients: HashMap<XChainId, Arc<dyn XPublicClient>>,
}

impl XClientRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `client` under its own chain id, replacing any previous one.
    pub fn register(&mut self, client: Arc<dyn XPublicClient>) {
        self.clients.insert(client.chain_id().clone(), client);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn XPublicClient>) -> Self {
        self.register(client);
        self
    }

    pub fn get(&self, chain_id: &XChainId) -> XCallResult<Arc<dyn XPublicClient>> {
        self.clients
            .get(chain_id)
            .cloned()
            .ok_or_else(|| XCallError::UnknownChain(chain_id.to_string()))
    }

    pub fn chains(&self) -> impl Iterator<Item = &XChainId> {
        self.clients.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{IconEventDecoder, InMemoryClient};

    #[test]
    fn test_lookup_by_chain() {
        let registry = XClientRegistry::new()
            .with_client(Arc::new(InMemoryClient::new("0x1.icon".into(), IconEventDecoder)));
        assert!(registry.get(&"0x1.icon".into()).is_ok());
        assert_eq!(
            registry.get(&"0x2.evm".into()).err(),
            Some(XCallError::UnknownChain("0x2.evm".to_string()))
        );
        assert_eq!(registry.chains().count(), 1);
    }
}
