//! Read-only bridge endpoints

use axum::{extract::State, Json};

use bridge_core::{Address, ChainId, Role, TokenEntry};
use bridge_engine::{BridgeEvent, Network, TokenLedger};

use crate::dto::{
    bad_request, BalanceResponse, ChainStatusResponse, ErrorResponse, NetworkSummary,
    RoleStatusResponse,
};
use crate::extract::ApiPath;
use crate::routes::lock_network;
use crate::AppState;

fn summarize(network: &Network) -> NetworkSummary {
    let engine = &network.engine;
    let state = engine.state();
    NetworkSummary {
        chain_id: engine.local_chain_id(),
        bridge_address: engine.bridge_address(),
        chains: engine.chains(),
        token_count: engine.token_list().len(),
        active_token_count: engine.active_tokens().len(),
        consumed_fingerprints: state.replay.len(),
        admins: state.access.members(Role::Admin),
        validators: state.access.members(Role::Validator),
    }
}

fn parse_address(raw: &str) -> Result<Address, ErrorResponse> {
    raw.parse()
        .map_err(|e| bad_request(format!("Invalid address '{}': {}", raw, e)))
}

/// GET /networks - Summaries of every hosted bridge
pub async fn list_networks(
    State(state): State<AppState>,
) -> Result<Json<Vec<NetworkSummary>>, ErrorResponse> {
    let mut summaries = Vec::new();
    for chain_id in state.chain_ids() {
        let network = lock_network(&state, chain_id).await?;
        summaries.push(summarize(&network));
    }
    Ok(Json(summaries))
}

/// GET /networks/:chain_id - Summary of one bridge
pub async fn get_network(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
) -> Result<Json<NetworkSummary>, ErrorResponse> {
    let network = lock_network(&state, chain_id).await?;
    Ok(Json(summarize(&network)))
}

/// GET /networks/:chain_id/tokens - All registered tokens, inactive included
pub async fn list_tokens(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
) -> Result<Json<Vec<TokenEntry>>, ErrorResponse> {
    let network = lock_network(&state, chain_id).await?;
    Ok(Json(network.engine.token_list().to_vec()))
}

/// GET /networks/:chain_id/tokens/:symbol - Registry lookup (never 404s)
pub async fn get_token(
    State(state): State<AppState>,
    ApiPath((chain_id, symbol)): ApiPath<(ChainId, String)>,
) -> Result<Json<TokenEntry>, ErrorResponse> {
    let network = lock_network(&state, chain_id).await?;
    Ok(Json(network.engine.token_by_symbol(&symbol)))
}

/// GET /networks/:chain_id/chains/:other - Whether `other` is a valid destination
pub async fn get_chain(
    State(state): State<AppState>,
    ApiPath((chain_id, other)): ApiPath<(ChainId, ChainId)>,
) -> Result<Json<ChainStatusResponse>, ErrorResponse> {
    let network = lock_network(&state, chain_id).await?;
    Ok(Json(ChainStatusResponse {
        chain_id: other,
        active: network.engine.is_chain_active(other),
    }))
}

/// GET /networks/:chain_id/roles/:role/:account
pub async fn get_role(
    State(state): State<AppState>,
    ApiPath((chain_id, role, account)): ApiPath<(ChainId, String, String)>,
) -> Result<Json<RoleStatusResponse>, ErrorResponse> {
    let role: Role = role
        .parse()
        .map_err(|e: bridge_core::ParseError| bad_request(e.to_string()))?;
    let account = parse_address(&account)?;

    let network = lock_network(&state, chain_id).await?;
    Ok(Json(RoleStatusResponse {
        role,
        account,
        has_role: network.engine.has_role(role, &account),
    }))
}

/// GET /networks/:chain_id/events - Ordered event log
pub async fn list_events(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
) -> Result<Json<Vec<BridgeEvent>>, ErrorResponse> {
    let network = lock_network(&state, chain_id).await?;
    Ok(Json(network.engine.events().to_vec()))
}

/// GET /networks/:chain_id/balances/:token/:account - Ledger balance
pub async fn get_balance(
    State(state): State<AppState>,
    ApiPath((chain_id, token, account)): ApiPath<(ChainId, String, String)>,
) -> Result<Json<BalanceResponse>, ErrorResponse> {
    let token = parse_address(&token)?;
    let account = parse_address(&account)?;

    let network = lock_network(&state, chain_id).await?;
    Ok(Json(BalanceResponse {
        token,
        account,
        balance: network.ledger.balance_of(&token, &account).to_string(),
    }))
}
