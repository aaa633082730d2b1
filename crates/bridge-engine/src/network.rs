//! A bridge instance paired with its network's token ledger

use bridge_core::{Address, Amount, BridgeError, LedgerError, NetworkConfig, Role};
use thiserror::Error;

use crate::engine::{BridgeEngine, RedeemRequest, SwapRequest};
use crate::events::{SwapInitialized, SwapRedeemed};
use crate::ledger::{InMemoryLedger, TokenLedger};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Bridge setup failed on chain {chain_id}: {source}")]
    Bridge {
        chain_id: u64,
        #[source]
        source: BridgeError,
    },

    #[error("Ledger setup failed on chain {chain_id}: {source}")]
    Ledger {
        chain_id: u64,
        #[source]
        source: LedgerError,
    },
}

/// One network as hosted by a node: the bridge plus the ledger it drives
#[derive(Debug, Clone)]
pub struct Network {
    pub engine: BridgeEngine,
    pub ledger: InMemoryLedger,
}

impl Network {
    /// Deploy tokens and bridge, wire roles, and register chains and tokens.
    ///
    /// Mirrors a fresh deployment: the admin deploys each token, grants the
    /// bridge MINTER and BURNER on it, grants VALIDATOR to the configured
    /// validators, activates the peer chains and adds the tokens.
    pub fn bootstrap(config: &NetworkConfig) -> Result<Self, BootstrapError> {
        let chain_id = config.chain_id;
        let bridge_err = |source| BootstrapError::Bridge { chain_id, source };
        let ledger_err = |source| BootstrapError::Ledger { chain_id, source };

        let admin = config.admin;
        let bridge = config.bridge_address;
        let mut ledger = InMemoryLedger::new();
        let mut engine = BridgeEngine::new(chain_id, bridge, admin);

        for token in &config.tokens {
            // the same contract may be listed under several symbols
            if !ledger.is_registered(&token.address) {
                ledger
                    .register_token(token.address, &token.symbol, admin)
                    .map_err(ledger_err)?;
            }
            for role in [Role::Minter, Role::Burner] {
                ledger
                    .grant_role(&token.address, &admin, role, bridge)
                    .map_err(ledger_err)?;
            }
            engine
                .add_token(&admin, &token.symbol, token.address)
                .map_err(bridge_err)?;
        }

        for validator in &config.validators {
            engine
                .grant_role(&admin, Role::Validator, *validator)
                .map_err(bridge_err)?;
        }

        for &remote in &config.active_chains {
            engine
                .set_chain_active(&admin, remote, true)
                .map_err(bridge_err)?;
        }

        for balance in &config.balances {
            let token = engine.token_by_symbol(&balance.symbol);
            ledger
                .mint(&token.token_address, &admin, &balance.account, balance.amount)
                .map_err(ledger_err)?;
        }

        tracing::info!(
            chain_id,
            tokens = config.tokens.len(),
            validators = config.validators.len(),
            active_chains = ?config.active_chains,
            "Network bootstrapped"
        );

        Ok(Self { engine, ledger })
    }

    pub fn swap(
        &mut self,
        caller: &Address,
        request: &SwapRequest,
    ) -> Result<SwapInitialized, BridgeError> {
        self.engine.swap(&mut self.ledger, caller, request)
    }

    pub fn redeem(
        &mut self,
        caller: &Address,
        request: &RedeemRequest,
    ) -> Result<SwapRedeemed, BridgeError> {
        self.engine.redeem(&mut self.ledger, caller, request)
    }

    /// Balance of `account` in the token registered as `symbol`
    pub fn balance_of_symbol(&self, symbol: &str, account: &Address) -> Amount {
        let token = self.engine.token_by_symbol(symbol);
        self.ledger.balance_of(&token.token_address, account)
    }
}
