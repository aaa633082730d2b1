//! Protocol events observed by relayers

use serde::{Deserialize, Serialize};

use bridge_core::{Address, Amount, ChainId, Nonce};

/// Emitted by a successful `swap` on the source chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInitialized {
    pub initiator: Address,
    pub recipient: Address,
    #[serde(with = "bridge_core::decimal_amount")]
    pub amount: Amount,
    pub symbol: String,
    pub chain_from: ChainId,
    pub chain_to: ChainId,
    pub nonce: Nonce,
}

/// Emitted by a successful `redeem` on the destination chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRedeemed {
    pub initiator: Address,
    pub nonce: Nonce,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum BridgeEvent {
    SwapInitialized(SwapInitialized),
    SwapRedeemed(SwapRedeemed),
}

impl From<SwapInitialized> for BridgeEvent {
    fn from(event: SwapInitialized) -> Self {
        Self::SwapInitialized(event)
    }
}

impl From<SwapRedeemed> for BridgeEvent {
    fn from(event: SwapRedeemed) -> Self {
        Self::SwapRedeemed(event)
    }
}
