//! Bridge state machine
//!
//! One [`BridgeEngine`] is one bridge instance on one network. `swap` burns on
//! the source side, `redeem` mints on the destination side against a
//! validator's signature. Both take `&mut self`, so an instance handles a
//! single operation at a time, and both leave no trace when they fail.

use serde::{Deserialize, Serialize};

use bridge_core::{
    Address, Amount, BridgeError, ChainEntry, ChainId, Nonce, Role, Signature, TokenEntry, H256,
};

use crate::access::AccessControl;
use crate::chains::ChainRegistry;
use crate::events::{BridgeEvent, SwapInitialized, SwapRedeemed};
use crate::fingerprint::{eth_signed_message_hash, fingerprint};
use crate::ledger::TokenLedger;
use crate::replay::ReplayGuard;
use crate::signature::recover_signer;
use crate::tokens::{AddOutcome, TokenRegistry};

/// Parameters of a `swap` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub recipient: Address,
    pub symbol: String,
    #[serde(with = "bridge_core::decimal_amount")]
    pub amount: Amount,
    pub chain_to: ChainId,
    pub nonce: Nonce,
}

/// Parameters of a `redeem` call; the caller is the recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub symbol: String,
    #[serde(with = "bridge_core::decimal_amount")]
    pub amount: Amount,
    pub chain_from: ChainId,
    pub nonce: Nonce,
    pub signature: Signature,
}

/// Everything a bridge instance owns
#[derive(Debug, Clone, Default)]
pub struct BridgeState {
    pub access: AccessControl,
    pub chains: ChainRegistry,
    pub tokens: TokenRegistry,
    pub replay: ReplayGuard,
}

#[derive(Debug, Clone)]
pub struct BridgeEngine {
    local_chain_id: ChainId,
    bridge_address: Address,
    state: BridgeState,
    events: Vec<BridgeEvent>,
}

impl BridgeEngine {
    /// Deploy a bridge for `local_chain_id`.
    ///
    /// `bridge_address` is the account the bridge uses towards the token
    /// ledger. The deployer receives ADMIN and VALIDATOR.
    pub fn new(local_chain_id: ChainId, bridge_address: Address, deployer: Address) -> Self {
        let access = AccessControl::with_roles(deployer, &[Role::Admin, Role::Validator]);

        tracing::info!(
            chain_id = local_chain_id,
            bridge = %bridge_address,
            deployer = %deployer,
            "Bridge instance created"
        );

        Self {
            local_chain_id,
            bridge_address,
            state: BridgeState {
                access,
                ..BridgeState::default()
            },
            events: Vec::new(),
        }
    }

    pub fn local_chain_id(&self) -> ChainId {
        self.local_chain_id
    }

    pub fn bridge_address(&self) -> Address {
        self.bridge_address
    }

    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    /// Ordered event log of this instance
    pub fn events(&self) -> &[BridgeEvent] {
        &self.events
    }

    // =========================================================================
    // Administration
    // =========================================================================

    pub fn set_chain_active(
        &mut self,
        caller: &Address,
        chain_id: ChainId,
        active: bool,
    ) -> Result<(), BridgeError> {
        self.state.access.require_role(Role::Admin, caller)?;
        let previous = self.state.chains.set_active(chain_id, active);
        if previous != Some(active) {
            tracing::info!(chain_id, active, "Chain updated");
        }
        Ok(())
    }

    pub fn add_token(
        &mut self,
        caller: &Address,
        symbol: &str,
        token_address: Address,
    ) -> Result<AddOutcome, BridgeError> {
        self.state.access.require_role(Role::Admin, caller)?;
        let outcome = self.state.tokens.add(symbol, token_address)?;
        tracing::info!(symbol, token = %token_address, ?outcome, "Token registered");
        Ok(outcome)
    }

    pub fn deactivate_token_by_symbol(
        &mut self,
        caller: &Address,
        symbol: &str,
    ) -> Result<bool, BridgeError> {
        self.state.access.require_role(Role::Admin, caller)?;
        let changed = self.state.tokens.deactivate(symbol);
        if changed {
            tracing::info!(symbol, "Token deactivated");
        }
        Ok(changed)
    }

    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> Result<bool, BridgeError> {
        self.state.access.grant_role(caller, role, account)
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, BridgeError> {
        self.state.access.revoke_role(caller, role, account)
    }

    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> bool {
        self.state.access.renounce_role(caller, role)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.access.has_role(role, account)
    }

    pub fn is_chain_active(&self, chain_id: ChainId) -> bool {
        self.state.chains.is_active(chain_id)
    }

    pub fn chains(&self) -> Vec<ChainEntry> {
        self.state.chains.chains()
    }

    pub fn token_by_symbol(&self, symbol: &str) -> TokenEntry {
        self.state.tokens.lookup(symbol)
    }

    pub fn token_list(&self) -> &[TokenEntry] {
        self.state.tokens.list()
    }

    pub fn active_tokens(&self) -> Vec<TokenEntry> {
        self.state.tokens.active_tokens()
    }

    pub fn is_consumed(&self, fingerprint: &H256) -> bool {
        self.state.replay.is_consumed(fingerprint)
    }

    // =========================================================================
    // Protocol
    // =========================================================================

    /// Burn `amount` of `symbol` from `caller` and authorize a redemption on
    /// `chain_to`.
    pub fn swap<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        request: &SwapRequest,
    ) -> Result<SwapInitialized, BridgeError> {
        let result = self.try_swap(ledger, caller, request);
        if let Err(e) = &result {
            tracing::warn!(
                caller = %caller,
                symbol = %request.symbol,
                chain_to = request.chain_to,
                nonce = request.nonce,
                code = e.error_code(),
                "Swap rejected: {}",
                e
            );
        }
        result
    }

    fn try_swap<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        request: &SwapRequest,
    ) -> Result<SwapInitialized, BridgeError> {
        if request.chain_to == self.local_chain_id {
            return Err(BridgeError::InvalidDestination {
                chain_id: request.chain_to,
            });
        }
        if !self.state.chains.is_active(request.chain_to) {
            return Err(BridgeError::ChainInactive {
                chain_id: request.chain_to,
            });
        }
        let token = self.active_token(&request.symbol)?;

        let fp = fingerprint(
            &request.recipient,
            request.amount,
            &request.symbol,
            self.local_chain_id,
            request.chain_to,
            request.nonce,
        );
        if !self.state.replay.consume(fp) {
            return Err(BridgeError::DuplicateTransaction);
        }

        if let Err(e) = ledger.burn(
            &token.token_address,
            &self.bridge_address,
            caller,
            request.amount,
        ) {
            self.state.replay.rollback(&fp);
            return Err(BridgeError::BurnFailed(e));
        }

        let event = SwapInitialized {
            initiator: *caller,
            recipient: request.recipient,
            amount: request.amount,
            symbol: request.symbol.clone(),
            chain_from: self.local_chain_id,
            chain_to: request.chain_to,
            nonce: request.nonce,
        };
        tracing::info!(
            fingerprint = %fp,
            initiator = %event.initiator,
            recipient = %event.recipient,
            amount = %event.amount,
            symbol = %event.symbol,
            chain_from = event.chain_from,
            chain_to = event.chain_to,
            nonce = event.nonce,
            "SwapInitialized"
        );
        self.events.push(event.clone().into());
        Ok(event)
    }

    /// Mint a validator-attested transfer from `chain_from` to `caller`.
    pub fn redeem<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        request: &RedeemRequest,
    ) -> Result<SwapRedeemed, BridgeError> {
        let result = self.try_redeem(ledger, caller, request);
        if let Err(e) = &result {
            tracing::warn!(
                caller = %caller,
                symbol = %request.symbol,
                chain_from = request.chain_from,
                nonce = request.nonce,
                code = e.error_code(),
                "Redeem rejected: {}",
                e
            );
        }
        result
    }

    fn try_redeem<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        request: &RedeemRequest,
    ) -> Result<SwapRedeemed, BridgeError> {
        let token = self.active_token(&request.symbol)?;

        // chain_to is always this chain: a signature made for another
        // destination hashes differently and recovers a stranger.
        let fp = fingerprint(
            caller,
            request.amount,
            &request.symbol,
            request.chain_from,
            self.local_chain_id,
            request.nonce,
        );
        let signer = recover_signer(&eth_signed_message_hash(&fp), &request.signature)?;
        if !self.state.access.has_role(Role::Validator, &signer) {
            return Err(BridgeError::InvalidValidator { signer });
        }

        if !self.state.replay.consume(fp) {
            return Err(BridgeError::DuplicateTransaction);
        }

        if let Err(e) = ledger.mint(
            &token.token_address,
            &self.bridge_address,
            caller,
            request.amount,
        ) {
            self.state.replay.rollback(&fp);
            return Err(BridgeError::MintFailed(e));
        }

        let event = SwapRedeemed {
            initiator: *caller,
            nonce: request.nonce,
        };
        tracing::info!(
            fingerprint = %fp,
            initiator = %caller,
            validator = %signer,
            amount = %request.amount,
            symbol = %request.symbol,
            chain_from = request.chain_from,
            nonce = request.nonce,
            "SwapRedeemed"
        );
        self.events.push(event.clone().into());
        Ok(event)
    }

    fn active_token(&self, symbol: &str) -> Result<TokenEntry, BridgeError> {
        let token = self.state.tokens.lookup(symbol);
        if !token.is_active() {
            return Err(BridgeError::TokenInactive {
                symbol: symbol.to_string(),
            });
        }
        tracing::debug!(symbol, token = %token.token_address, "Token resolved");
        Ok(token)
    }
}
