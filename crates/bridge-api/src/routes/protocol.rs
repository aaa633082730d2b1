//! Swap and redeem endpoints
//!
//! The `caller` in each body is taken at face value. A swap therefore burns
//! from whichever account the client names; this is a dev-node surface.

use axum::{extract::State, Json};

use bridge_core::ChainId;

use crate::dto::{bridge_error, ErrorResponse, RedeemCall, RedeemResponse, SwapCall, SwapResponse};
use crate::extract::{ApiJson, ApiPath};
use crate::routes::lock_network;
use crate::AppState;

/// POST /networks/:chain_id/swap - Burn on this chain and emit SwapInitialized
pub async fn swap(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
    ApiJson(call): ApiJson<SwapCall>,
) -> Result<Json<SwapResponse>, ErrorResponse> {
    let (caller, request) = call.into_request()?;

    let mut network = lock_network(&state, chain_id).await?;
    let event = network.swap(&caller, &request).map_err(bridge_error)?;

    Ok(Json(SwapResponse { event }))
}

/// POST /networks/:chain_id/redeem - Mint an attested transfer to the caller
pub async fn redeem(
    State(state): State<AppState>,
    ApiPath(chain_id): ApiPath<ChainId>,
    ApiJson(call): ApiJson<RedeemCall>,
) -> Result<Json<RedeemResponse>, ErrorResponse> {
    let (caller, request) = call.into_request()?;

    let mut network = lock_network(&state, chain_id).await?;
    let event = network.redeem(&caller, &request).map_err(bridge_error)?;

    Ok(Json(RedeemResponse { event }))
}
