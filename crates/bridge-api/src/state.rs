//! Application state shared across API handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use bridge_core::{ChainId, NodeConfig};
use bridge_engine::{BootstrapError, Network};
use tokio::sync::Mutex;

/// Shared application state.
///
/// Each hosted network sits behind its own mutex, so transactions on one
/// bridge instance run strictly one after another while the two instances
/// never contend.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: NodeConfig,
    networks: BTreeMap<ChainId, Arc<Mutex<Network>>>,
}

impl AppState {
    /// Bootstrap every network listed in `config`
    pub fn from_config(config: NodeConfig) -> Result<Self, BootstrapError> {
        let mut networks = BTreeMap::new();
        for net in &config.networks {
            let network = Network::bootstrap(net)?;
            networks.insert(net.chain_id, Arc::new(Mutex::new(network)));
        }

        tracing::info!(
            networks = ?networks.keys().collect::<Vec<_>>(),
            "Application state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { config, networks }),
        })
    }

    /// Node configuration the state was built from
    pub fn config(&self) -> &NodeConfig {
        &self.inner.config
    }

    /// Hosted chain ids, ascending
    pub fn chain_ids(&self) -> Vec<ChainId> {
        self.inner.networks.keys().copied().collect()
    }

    pub fn network(&self, chain_id: ChainId) -> Option<Arc<Mutex<Network>>> {
        self.inner.networks.get(&chain_id).cloned()
    }
}
