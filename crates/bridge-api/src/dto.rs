//! Data Transfer Objects for API requests and responses
//!
//! Amounts, in requests as in emitted events, are decimal strings so that values beyond 2^53
//! survive JavaScript clients.
//!
//! Every call body carries a `caller`. The node trusts it as given: there is
//! no signature or session behind it, so any client that can reach the API
//! can act as any account, ADMIN included. Bind the node to localhost only.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use bridge_core::{
    Address, Amount, BridgeError, ChainEntry, ChainId, LedgerError, Nonce, Role, Signature,
};
use bridge_engine::{RedeemRequest, SwapInitialized, SwapRedeemed, SwapRequest};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Overview of one hosted bridge instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummary {
    pub chain_id: ChainId,
    pub bridge_address: Address,
    pub chains: Vec<ChainEntry>,
    pub token_count: usize,
    pub active_token_count: usize,
    pub consumed_fingerprints: usize,
    pub admins: Vec<Address>,
    pub validators: Vec<Address>,
}

/// Body of `POST /networks/:chain_id/swap`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapCall {
    /// Account whose balance is burned. Self-asserted, not authenticated.
    pub caller: Address,
    pub recipient: Address,
    pub symbol: String,
    pub amount: String,
    pub chain_to: ChainId,
    pub nonce: Nonce,
}

impl SwapCall {
    pub fn into_request(self) -> Result<(Address, SwapRequest), ErrorResponse> {
        let amount = parse_amount(&self.amount)?;
        Ok((
            self.caller,
            SwapRequest {
                recipient: self.recipient,
                symbol: self.symbol,
                amount,
                chain_to: self.chain_to,
                nonce: self.nonce,
            },
        ))
    }
}

/// Body of `POST /networks/:chain_id/redeem`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemCall {
    /// Recipient the attestation was signed for. Self-asserted, but a wrong
    /// caller changes the fingerprint and fails signature checks.
    pub caller: Address,
    pub symbol: String,
    pub amount: String,
    pub chain_from: ChainId,
    pub nonce: Nonce,
    pub signature: Signature,
}

impl RedeemCall {
    pub fn into_request(self) -> Result<(Address, RedeemRequest), ErrorResponse> {
        let amount = parse_amount(&self.amount)?;
        Ok((
            self.caller,
            RedeemRequest {
                symbol: self.symbol,
                amount,
                chain_from: self.chain_from,
                nonce: self.nonce,
                signature: self.signature,
            },
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub event: SwapInitialized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemResponse {
    pub event: SwapRedeemed,
}

/// Body of `POST /networks/:chain_id/admin/chains`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainUpdateCall {
    /// Must hold ADMIN. Self-asserted, not authenticated.
    pub caller: Address,
    pub chain_id: ChainId,
    pub active: bool,
}

/// Body of `POST /networks/:chain_id/admin/tokens`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTokenCall {
    pub caller: Address,
    pub symbol: String,
    pub token_address: Address,
}

/// Body of admin calls that carry nothing but the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerOnly {
    pub caller: Address,
}

/// Body of role grant/revoke calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCall {
    pub caller: Address,
    pub role: Role,
    pub account: Address,
}

/// Body of `POST /networks/:chain_id/admin/roles/renounce`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenounceCall {
    pub caller: Address,
    pub role: Role,
}

/// Body of `POST /networks/:chain_id/ledger/mint`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintCall {
    pub caller: Address,
    pub symbol: String,
    pub account: Address,
    pub amount: String,
}

/// Outcome of an admin mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeResponse {
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStatusResponse {
    pub chain_id: ChainId,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleStatusResponse {
    pub role: Role,
    pub account: Address,
    pub has_role: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub token: Address,
    pub account: Address,
    pub balance: String,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Error half of every handler result
pub type ErrorResponse = (StatusCode, Json<ApiError>);

pub fn bad_request(message: impl Into<String>) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::bad_request(message)),
    )
}

pub fn not_found(message: impl Into<String>) -> ErrorResponse {
    (StatusCode::NOT_FOUND, Json(ApiError::not_found(message)))
}

/// Map a ledger refusal onto an HTTP error
pub fn ledger_error(e: LedgerError) -> ErrorResponse {
    let (status, code) = match e {
        LedgerError::MissingRole { .. } => (StatusCode::FORBIDDEN, "missing_role"),
        LedgerError::UnknownToken { .. } => (StatusCode::NOT_FOUND, "unknown_token"),
        LedgerError::Overflow => (StatusCode::UNPROCESSABLE_ENTITY, "overflow"),
        _ => (StatusCode::UNPROCESSABLE_ENTITY, "ledger_error"),
    };
    (status, Json(ApiError::new(code, e.to_string())))
}

/// Map a protocol rejection onto its HTTP status and stable code
pub fn bridge_error(e: BridgeError) -> ErrorResponse {
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}

pub fn parse_amount(raw: &str) -> Result<Amount, ErrorResponse> {
    raw.trim()
        .parse::<Amount>()
        .map_err(|e| bad_request(format!("Invalid amount '{}': {}", raw, e)))
}
