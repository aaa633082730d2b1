//! Full swap → attest → redeem flow across two bridge instances

use bridge_core::{Address, Amount, BalanceConfig, NetworkConfig, TokenConfig};
use bridge_engine::{
    BridgeEvent, Network, RedeemRequest, SwapRequest, TokenLedger, ValidatorSigner,
};

const CHAIN_A: u64 = 1;
const CHAIN_B: u64 = 25;
const DEPOSIT: Amount = 100_000_000_000_000;
const AMOUNT: Amount = 100_000_000;

fn user0() -> Address {
    Address::repeat_byte(0x01)
}

fn user1() -> Address {
    Address::repeat_byte(0x02)
}

fn network_config(chain_id: u64, peer: u64, validator: Address, funded: bool) -> NetworkConfig {
    NetworkConfig {
        chain_id,
        bridge_address: Address::repeat_byte(0xb0 + chain_id as u8),
        admin: Address::repeat_byte(0xa0),
        validators: vec![validator],
        active_chains: vec![peer],
        tokens: vec![
            TokenConfig {
                symbol: "Ctm".to_string(),
                address: Address::repeat_byte(0xc0),
            },
            TokenConfig {
                symbol: "Actm".to_string(),
                address: Address::repeat_byte(0xc1),
            },
        ],
        balances: if funded {
            vec![BalanceConfig {
                symbol: "Ctm".to_string(),
                account: user0(),
                amount: DEPOSIT,
            }]
        } else {
            vec![]
        },
    }
}

fn setup() -> (Network, Network, ValidatorSigner) {
    let validator = ValidatorSigner::random();
    let a = Network::bootstrap(&network_config(CHAIN_A, CHAIN_B, validator.address(), true))
        .expect("bootstrap A");
    let b = Network::bootstrap(&network_config(CHAIN_B, CHAIN_A, validator.address(), false))
        .expect("bootstrap B");
    (a, b, validator)
}

fn swap_request(nonce: u64) -> SwapRequest {
    SwapRequest {
        recipient: user1(),
        symbol: "Ctm".to_string(),
        amount: AMOUNT,
        chain_to: CHAIN_B,
        nonce,
    }
}

#[test]
fn test_swap_then_redeem_across_networks() {
    let (mut a, mut b, validator) = setup();

    let initiated = a.swap(&user0(), &swap_request(0)).unwrap();
    assert_eq!(initiated.chain_from, CHAIN_A);
    assert_eq!(initiated.chain_to, CHAIN_B);
    assert_eq!(a.balance_of_symbol("Ctm", &user0()), DEPOSIT - AMOUNT);

    // relayer reads the event and asks the validator to attest it
    let signature = validator.sign_redemption(
        &initiated.recipient,
        initiated.amount,
        &initiated.symbol,
        initiated.chain_from,
        initiated.chain_to,
        initiated.nonce,
    );
    let redeem = RedeemRequest {
        symbol: initiated.symbol.clone(),
        amount: initiated.amount,
        chain_from: initiated.chain_from,
        nonce: initiated.nonce,
        signature,
    };

    let redeemed = b.redeem(&user1(), &redeem).unwrap();
    assert_eq!(redeemed.initiator, user1());
    assert_eq!(redeemed.nonce, 0);
    assert_eq!(b.balance_of_symbol("Ctm", &user1()), AMOUNT);

    let err = b.redeem(&user1(), &redeem).unwrap_err();
    assert_eq!(err.error_code(), "duplicate_transaction");
    assert_eq!(b.balance_of_symbol("Ctm", &user1()), AMOUNT);

    assert!(matches!(
        b.engine.events(),
        [BridgeEvent::SwapRedeemed(_)]
    ));
}

#[test]
fn test_attestation_cannot_be_redeemed_on_source() {
    let (mut a, _b, validator) = setup();
    a.swap(&user0(), &swap_request(0)).unwrap();

    let signature = validator.sign_redemption(&user1(), AMOUNT, "Ctm", CHAIN_A, CHAIN_B, 0);
    let replay = RedeemRequest {
        symbol: "Ctm".to_string(),
        amount: AMOUNT,
        chain_from: CHAIN_B,
        nonce: 0,
        signature,
    };

    let err = a.redeem(&user1(), &replay).unwrap_err();
    assert_eq!(err.error_code(), "invalid_validator");
    assert_eq!(a.balance_of_symbol("Ctm", &user1()), 0);
}

#[test]
fn test_swap_nonce_reuse_rejected() {
    let (mut a, _b, _validator) = setup();
    a.swap(&user0(), &swap_request(0)).unwrap();

    let err = a.swap(&user0(), &swap_request(0)).unwrap_err();
    assert_eq!(err.error_code(), "duplicate_transaction");
    a.swap(&user0(), &swap_request(1)).unwrap();

    let token = a.engine.token_by_symbol("Ctm").token_address;
    assert_eq!(a.ledger.balance_of(&token, &user0()), DEPOSIT - 2 * AMOUNT);
}

#[test]
fn test_redeem_blocked_after_deactivation() {
    let (mut a, mut b, validator) = setup();
    a.swap(&user0(), &swap_request(0)).unwrap();

    let admin = Address::repeat_byte(0xa0);
    b.engine.deactivate_token_by_symbol(&admin, "Ctm").unwrap();

    let redeem = RedeemRequest {
        symbol: "Ctm".to_string(),
        amount: AMOUNT,
        chain_from: CHAIN_A,
        nonce: 0,
        signature: validator.sign_redemption(&user1(), AMOUNT, "Ctm", CHAIN_A, CHAIN_B, 0),
    };
    let err = b.redeem(&user1(), &redeem).unwrap_err();
    assert_eq!(err.error_code(), "token_inactive");

    // reactivating the same binding makes the attestation usable again
    let token = Address::repeat_byte(0xc0);
    b.engine.add_token(&admin, "Ctm", token).unwrap();
    b.redeem(&user1(), &redeem).unwrap();
    assert_eq!(b.balance_of_symbol("Ctm", &user1()), AMOUNT);
}

#[test]
fn test_token_list_after_changes() {
    let (mut a, _b, _validator) = setup();
    let admin = Address::repeat_byte(0xa0);

    a.engine.deactivate_token_by_symbol(&admin, "Actm").unwrap();
    let active = a.engine.active_tokens();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].token_address, Address::repeat_byte(0xc0));

    a.engine
        .add_token(&admin, "HAH", Address::repeat_byte(0xc1))
        .unwrap();
    let active = a.engine.active_tokens();
    assert_eq!(active.len(), 2);
    assert_eq!(active[1].token_address, Address::repeat_byte(0xc1));
    assert_eq!(a.engine.token_list().len(), 3);
}
