//! Administrative endpoints
//!
//! Every call names its `caller`; the engine decides whether that account
//! holds ADMIN. The name itself is not authenticated, so any client that
//! knows an admin address can administer the bridge. Dev-node surface only.

use axum::{extract::State, Json};

use bridge_core::ChainId;
use bridge_engine::{AddOutcome, TokenLedger};

use crate::dto::{
    bridge_error, ledger_error, not_found, parse_amount, AddTokenCall, BalanceResponse,
    CallerOnly, ChainUpdateCall, ChangeResponse, ErrorResponse, MintCall, RenounceCall, RoleCall,
};
use crate::extract::{ApiJson, ApiPath};
use crate::routes::lock_network;
use crate::AppState;

/// POST /networks/:chain_id/admin/chains - Activate or deactivate a destination
pub async fn set_chain(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
    ApiJson(call): ApiJson<ChainUpdateCall>,
) -> Result<Json<ChangeResponse>, ErrorResponse> {
    let mut network = lock_network(&state, chain_id).await?;
    let before = network.engine.is_chain_active(call.chain_id);
    network
        .engine
        .set_chain_active(&call.caller, call.chain_id, call.active)
        .map_err(bridge_error)?;

    Ok(Json(ChangeResponse {
        changed: before != call.active,
    }))
}

/// POST /networks/:chain_id/admin/tokens - Register or reactivate a token
pub async fn add_token(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
    ApiJson(call): ApiJson<AddTokenCall>,
) -> Result<Json<ChangeResponse>, ErrorResponse> {
    let mut network = lock_network(&state, chain_id).await?;
    let outcome = network
        .engine
        .add_token(&call.caller, &call.symbol, call.token_address)
        .map_err(bridge_error)?;

    Ok(Json(ChangeResponse {
        changed: outcome != AddOutcome::AlreadyActive,
    }))
}

/// POST /networks/:chain_id/admin/tokens/:symbol/deactivate
pub async fn deactivate_token(
    State(state): State<AppState>,
    ApiPath((chain_id, symbol)): ApiPath<(ChainId, String)>,
    ApiJson(call): ApiJson<CallerOnly>,
) -> Result<Json<ChangeResponse>, ErrorResponse> {
    let mut network = lock_network(&state, chain_id).await?;
    let changed = network
        .engine
        .deactivate_token_by_symbol(&call.caller, &symbol)
        .map_err(bridge_error)?;

    Ok(Json(ChangeResponse { changed }))
}

/// POST /networks/:chain_id/admin/roles/grant
pub async fn grant_role(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
    ApiJson(call): ApiJson<RoleCall>,
) -> Result<Json<ChangeResponse>, ErrorResponse> {
    let mut network = lock_network(&state, chain_id).await?;
    let changed = network
        .engine
        .grant_role(&call.caller, call.role, call.account)
        .map_err(bridge_error)?;

    Ok(Json(ChangeResponse { changed }))
}

/// POST /networks/:chain_id/admin/roles/revoke
pub async fn revoke_role(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
    ApiJson(call): ApiJson<RoleCall>,
) -> Result<Json<ChangeResponse>, ErrorResponse> {
    let mut network = lock_network(&state, chain_id).await?;
    let changed = network
        .engine
        .revoke_role(&call.caller, call.role, &call.account)
        .map_err(bridge_error)?;

    Ok(Json(ChangeResponse { changed }))
}

/// POST /networks/:chain_id/admin/roles/renounce - Drop one of the caller's own roles
pub async fn renounce_role(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
    ApiJson(call): ApiJson<RenounceCall>,
) -> Result<Json<ChangeResponse>, ErrorResponse> {
    let mut network = lock_network(&state, chain_id).await?;
    let changed = network.engine.renounce_role(&call.caller, call.role);

    Ok(Json(ChangeResponse { changed }))
}

/// POST /networks/:chain_id/ledger/mint - Faucet for accounts holding MINTER on the token
pub async fn ledger_mint(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
    ApiJson(call): ApiJson<MintCall>,
) -> Result<Json<BalanceResponse>, ErrorResponse> {
    let amount = parse_amount(&call.amount)?;

    let mut network = lock_network(&state, chain_id).await?;
    let token = network.engine.token_by_symbol(&call.symbol).token_address;
    if token.is_zero() {
        return Err(not_found(format!("Token '{}' is not registered", call.symbol)));
    }

    network
        .ledger
        .mint(&token, &call.caller, &call.account, amount)
        .map_err(ledger_error)?;

    tracing::info!(chain_id, symbol = %call.symbol, account = %call.account, %amount, "Faucet mint");

    Ok(Json(BalanceResponse {
        token,
        account: call.account,
        balance: network.ledger.balance_of(&token, &call.account).to_string(),
    }))
}
