//! API route handlers

pub mod admin;
pub mod health;
pub mod protocol;
pub mod query;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::OwnedMutexGuard;

use bridge_core::ChainId;
use bridge_engine::Network;

use crate::dto::{not_found, ErrorResponse};
use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/networks", get(query::list_networks))
        .route("/networks/:chain_id", get(query::get_network))
        .route("/networks/:chain_id/tokens", get(query::list_tokens))
        .route("/networks/:chain_id/tokens/:symbol", get(query::get_token))
        .route("/networks/:chain_id/chains/:other", get(query::get_chain))
        .route(
            "/networks/:chain_id/roles/:role/:account",
            get(query::get_role),
        )
        .route("/networks/:chain_id/events", get(query::list_events))
        .route(
            "/networks/:chain_id/balances/:token/:account",
            get(query::get_balance),
        )
        .route("/networks/:chain_id/swap", post(protocol::swap))
        .route("/networks/:chain_id/redeem", post(protocol::redeem))
        .route("/networks/:chain_id/admin/chains", post(admin::set_chain))
        .route("/networks/:chain_id/admin/tokens", post(admin::add_token))
        .route(
            "/networks/:chain_id/admin/tokens/:symbol/deactivate",
            post(admin::deactivate_token),
        )
        .route("/networks/:chain_id/admin/roles/grant", post(admin::grant_role))
        .route(
            "/networks/:chain_id/admin/roles/revoke",
            post(admin::revoke_role),
        )
        .route(
            "/networks/:chain_id/admin/roles/renounce",
            post(admin::renounce_role),
        )
        .route("/networks/:chain_id/ledger/mint", post(admin::ledger_mint))
        .with_state(state)
}

/// Take the network's lock; every handler touching a bridge goes through here
pub(crate) async fn lock_network(
    state: &AppState,
    chain_id: ChainId,
) -> Result<OwnedMutexGuard<Network>, ErrorResponse> {
    let network = state
        .network(chain_id)
        .ok_or_else(|| not_found(format!("Chain {} is not hosted by this node", chain_id)))?;
    Ok(network.lock_owned().await)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use bridge_core::{Address, BalanceConfig, NetworkConfig, NodeConfig, TokenConfig};
    use bridge_engine::{BridgeEvent, ValidatorSigner};

    use super::*;

    const CHAIN_A: ChainId = 1;
    const CHAIN_B: ChainId = 25;

    fn admin() -> Address {
        Address::repeat_byte(0xa0)
    }

    fn user0() -> Address {
        Address::repeat_byte(0x01)
    }

    fn user1() -> Address {
        Address::repeat_byte(0x02)
    }

    fn ctm() -> Address {
        Address::repeat_byte(0xc0)
    }

    fn network(chain_id: ChainId, peer: ChainId, validator: Address) -> NetworkConfig {
        NetworkConfig {
            chain_id,
            bridge_address: Address::repeat_byte(0xb0 + chain_id as u8),
            admin: admin(),
            validators: vec![validator],
            active_chains: vec![peer],
            tokens: vec![TokenConfig {
                symbol: "Ctm".to_string(),
                address: ctm(),
            }],
            balances: vec![BalanceConfig {
                symbol: "Ctm".to_string(),
                account: user0(),
                amount: 1_000_000_000,
            }],
        }
    }

    fn setup() -> (AppState, ValidatorSigner) {
        let validator = ValidatorSigner::random();
        let config = NodeConfig {
            networks: vec![
                network(CHAIN_A, CHAIN_B, validator.address()),
                network(CHAIN_B, CHAIN_A, validator.address()),
            ],
            ..NodeConfig::default()
        };
        (AppState::from_config(config).unwrap(), validator)
    }

    async fn call(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn swap_body(caller: Address, amount: &str, nonce: u64) -> Value {
        json!({
            "caller": caller.to_string(),
            "recipient": user1().to_string(),
            "symbol": "Ctm",
            "amount": amount,
            "chainTo": CHAIN_B,
            "nonce": nonce,
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = setup();
        let (status, body) = call(&state, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_network() {
        let (state, _) = setup();
        let (status, body) = call(&state, "GET", "/networks/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_network_summaries() {
        let (state, validator) = setup();
        let (status, body) = call(&state, "GET", "/networks", None).await;
        assert_eq!(status, StatusCode::OK);

        let summaries = body.as_array().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0]["chainId"], CHAIN_A);
        assert_eq!(summaries[1]["chainId"], CHAIN_B);
        assert_eq!(summaries[0]["tokenCount"], 1);
        assert_eq!(summaries[0]["consumedFingerprints"], 0);
        assert!(summaries[0]["validators"]
            .as_array()
            .unwrap()
            .contains(&json!(validator.address().to_string())));
    }

    #[tokio::test]
    async fn test_swap_and_redeem_over_http() {
        let (state, validator) = setup();

        let (status, body) = call(
            &state,
            "POST",
            "/networks/1/swap",
            Some(swap_body(user0(), "100000000", 0)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["chainFrom"], CHAIN_A);
        assert_eq!(body["event"]["amount"], "100000000");

        let signature = validator.sign_redemption(&user1(), 100_000_000, "Ctm", CHAIN_A, CHAIN_B, 0);
        let redeem = json!({
            "caller": user1().to_string(),
            "symbol": "Ctm",
            "amount": "100000000",
            "chainFrom": CHAIN_A,
            "nonce": 0,
            "signature": signature,
        });

        let (status, body) = call(&state, "POST", "/networks/25/redeem", Some(redeem.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["initiator"], user1().to_string());

        let (status, body) = call(&state, "POST", "/networks/25/redeem", Some(redeem)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "duplicate_transaction");

        let uri = format!("/networks/25/balances/{}/{}", ctm(), user1());
        let (status, body) = call(&state, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], "100000000");

        let (_, body) = call(&state, "GET", "/networks/25/events", None).await;
        assert_eq!(body[0]["event"], "SwapRedeemed");
    }

    #[tokio::test]
    async fn test_swap_rejections() {
        let (state, _) = setup();

        let (status, body) = call(
            &state,
            "POST",
            "/networks/1/swap",
            Some(swap_body(user0(), "lots", 0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");

        let (status, body) = call(
            &state,
            "POST",
            "/networks/1/swap",
            Some(swap_body(user1(), "5", 0)),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "burn_failed");
    }

    #[tokio::test]
    async fn test_admin_token_lifecycle() {
        let (state, _) = setup();
        let uri = "/networks/1/admin/tokens/Ctm/deactivate";

        let (status, body) = call(
            &state,
            "POST",
            uri,
            Some(json!({ "caller": user0().to_string() })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "unauthorized");

        let caller = json!({ "caller": admin().to_string() });
        let (status, body) = call(&state, "POST", uri, Some(caller.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], true);

        let (_, body) = call(&state, "POST", uri, Some(caller)).await;
        assert_eq!(body["changed"], false);

        let (_, body) = call(&state, "GET", "/networks/1/tokens/Ctm", None).await;
        assert_eq!(body["state"], "inactive");
        assert_eq!(body["tokenAddress"], ctm().to_string());

        let add = json!({
            "caller": admin().to_string(),
            "symbol": "Ctm",
            "tokenAddress": ctm().to_string(),
        });
        let (status, body) = call(&state, "POST", "/networks/1/admin/tokens", Some(add)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], true);

        let (_, body) = call(&state, "GET", "/networks/1/tokens", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["state"], "active");
    }

    #[tokio::test]
    async fn test_chain_toggle() {
        let (state, _) = setup();
        let body = json!({ "caller": admin().to_string(), "chainId": CHAIN_B, "active": false });
        let (status, body) = call(&state, "POST", "/networks/1/admin/chains", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], true);

        let (_, body) = call(&state, "GET", "/networks/1/chains/25", None).await;
        assert_eq!(body["active"], false);

        let (status, body) = call(
            &state,
            "POST",
            "/networks/1/swap",
            Some(swap_body(user0(), "5", 0)),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "chain_inactive");
    }

    #[tokio::test]
    async fn test_roles() {
        let (state, _) = setup();

        let (status, _) = call(
            &state,
            "GET",
            &format!("/networks/1/roles/overlord/{}", user0()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let grant = json!({
            "caller": admin().to_string(),
            "role": "validator",
            "account": user0().to_string(),
        });
        let (_, body) = call(&state, "POST", "/networks/1/admin/roles/grant", Some(grant)).await;
        assert_eq!(body["changed"], true);

        let uri = format!("/networks/1/roles/VALIDATOR/{}", user0());
        let (_, body) = call(&state, "GET", &uri, None).await;
        assert_eq!(body["hasRole"], true);

        let renounce = json!({ "caller": user0().to_string(), "role": "validator" });
        let (_, body) = call(&state, "POST", "/networks/1/admin/roles/renounce", Some(renounce)).await;
        assert_eq!(body["changed"], true);

        let (_, body) = call(&state, "GET", &uri, None).await;
        assert_eq!(body["hasRole"], false);
    }

    #[tokio::test]
    async fn test_ledger_faucet() {
        let (state, _) = setup();
        let mint = |caller: Address| {
            json!({
                "caller": caller.to_string(),
                "symbol": "Ctm",
                "account": user1().to_string(),
                "amount": "42",
            })
        };

        let (status, body) = call(&state, "POST", "/networks/25/ledger/mint", Some(mint(user0()))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "missing_role");

        let (status, body) = call(&state, "POST", "/networks/25/ledger/mint", Some(mint(admin()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], "42");

        let missing = json!({
            "caller": admin().to_string(),
            "symbol": "Nope",
            "account": user1().to_string(),
            "amount": "1",
        });
        let (status, _) = call(&state, "POST", "/networks/25/ledger/mint", Some(missing)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_large_amounts_stay_exact() {
        let (state, _) = setup();
        let mint = json!({
            "caller": admin().to_string(),
            "symbol": "Ctm",
            "account": user0().to_string(),
            "amount": "200000000000000000000",
        });
        let (status, _) = call(&state, "POST", "/networks/1/ledger/mint", Some(mint)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(
            &state,
            "POST",
            "/networks/1/swap",
            Some(swap_body(user0(), "100000000000000000001", 0)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["amount"], "100000000000000000001");

        let request = Request::builder()
            .uri("/networks/1/events")
            .body(Body::empty())
            .unwrap();
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let events: Vec<BridgeEvent> = serde_json::from_slice(&bytes).unwrap();
        match &events[..] {
            [BridgeEvent::SwapInitialized(event)] => {
                assert_eq!(event.amount, 100_000_000_000_000_000_001)
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_requests_use_error_body() {
        let (state, _) = setup();

        let mut body = swap_body(user0(), "5", 0);
        body["caller"] = json!("0x12");
        let (status, body) = call(&state, "POST", "/networks/1/swap", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "invalid_body");
        assert!(body["message"].as_str().unwrap().contains("caller"));

        let (status, body) = call(&state, "GET", "/networks/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_path");
    }

    #[tokio::test]
    async fn test_swap_burns_from_named_caller() {
        let (state, _) = setup();
        let (status, _) = call(
            &state,
            "POST",
            "/networks/1/swap",
            Some(swap_body(user0(), "1000", 0)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let uri = format!("/networks/1/balances/{}/{}", ctm(), user0());
        let (_, body) = call(&state, "GET", &uri, None).await;
        assert_eq!(body["balance"], "999999000");
    }
}
