//! Remote chains accepted as swap destinations

use std::collections::BTreeMap;

use bridge_core::{ChainEntry, ChainId};

#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<ChainId, bool>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the flag for `chain_id`. Returns the previous value.
    pub fn set_active(&mut self, chain_id: ChainId, active: bool) -> Option<bool> {
        self.chains.insert(chain_id, active)
    }

    /// Chains that were never set are inactive
    pub fn is_active(&self, chain_id: ChainId) -> bool {
        self.chains.get(&chain_id).copied().unwrap_or(false)
    }

    /// Every chain ever configured, ascending by id
    pub fn chains(&self) -> Vec<ChainEntry> {
        self.chains
            .iter()
            .map(|(&chain_id, &active)| ChainEntry { chain_id, active })
            .collect()
    }

    pub fn active_chain_ids(&self) -> Vec<ChainId> {
        self.chains
            .iter()
            .filter(|(_, active)| **active)
            .map(|(&id, _)| id)
            .collect()
    }
}
