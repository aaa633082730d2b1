//! Configuration types for Twinbridge

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{Address, Amount, ChainId};

/// Token registered on a bridge at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Ticker used as the registry key (e.g. "Ctm")
    pub symbol: String,

    /// Ledger address of the token on this network
    pub address: Address,
}

/// Initial ledger balance minted by the token owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub symbol: String,
    pub account: Address,
    #[serde(with = "crate::types::decimal_amount")]
    pub amount: Amount,
}

/// One bridge instance and the network it lives on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Chain id of this network, fixed for the lifetime of the bridge
    pub chain_id: ChainId,

    /// Account the bridge acts as when calling the token ledger
    pub bridge_address: Address,

    /// Deployer; receives ADMIN (and VALIDATOR) on the bridge and owns the ledger
    pub admin: Address,

    /// Extra VALIDATOR holders
    #[serde(default)]
    pub validators: Vec<Address>,

    /// Remote chains accepted as swap destinations
    #[serde(default)]
    pub active_chains: Vec<ChainId>,

    #[serde(default)]
    pub tokens: Vec<TokenConfig>,

    #[serde(default)]
    pub balances: Vec<BalanceConfig>,
}

/// Node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Bridge instances hosted by this node
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
}

fn default_api_port() -> u16 {
    18545
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            networks: Vec::new(),
        }
    }
}

impl NodeConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that could never bootstrap
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for network in &self.networks {
            if !seen.insert(network.chain_id) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate chain id {}",
                    network.chain_id
                )));
            }
            if network.admin.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "chain {}: admin must not be the zero address",
                    network.chain_id
                )));
            }
            if network.bridge_address.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "chain {}: bridge_address must not be the zero address",
                    network.chain_id
                )));
            }
            if network.active_chains.contains(&network.chain_id) {
                return Err(ConfigError::Invalid(format!(
                    "chain {}: cannot list itself as an active destination",
                    network.chain_id
                )));
            }
            for balance in &network.balances {
                if !network.tokens.iter().any(|t| t.symbol == balance.symbol) {
                    return Err(ConfigError::Invalid(format!(
                        "chain {}: balance for unconfigured token {}",
                        network.chain_id, balance.symbol
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn network(&self, chain_id: ChainId) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.chain_id == chain_id)
    }
}
