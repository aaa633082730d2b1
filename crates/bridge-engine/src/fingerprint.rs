//! Transaction fingerprints
//!
//! A fingerprint is the Keccak-256 digest of the packed transfer parameters,
//! laid out exactly like Solidity's
//! `abi.encodePacked(address, uint256, string, uint256, uint256, uint256)`.
//! The same digest is the replay key on both sides of the bridge and the
//! payload a validator signs, so the destination chain id is always part of
//! what gets signed.

use bridge_core::{Address, Amount, ChainId, Nonce, H256};
use sha3::{Digest, Keccak256};

use crate::constants::ETH_SIGNED_MESSAGE_PREFIX;

pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256(hasher.finalize().into())
}

/// Left-pad an integer into a 32-byte big-endian word
fn u256_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Packed encoding of the transfer parameters
pub fn encode_packed(
    recipient: &Address,
    amount: Amount,
    symbol: &str,
    chain_from: ChainId,
    chain_to: ChainId,
    nonce: Nonce,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(20 + 32 * 4 + symbol.len());
    out.extend_from_slice(recipient.as_bytes());
    out.extend_from_slice(&u256_word(amount));
    out.extend_from_slice(symbol.as_bytes());
    out.extend_from_slice(&u256_word(u128::from(chain_from)));
    out.extend_from_slice(&u256_word(u128::from(chain_to)));
    out.extend_from_slice(&u256_word(u128::from(nonce)));
    out
}

/// Fingerprint of one directed transfer.
///
/// Used by both `swap` (with `chain_from` = local chain) and `redeem` (with
/// `chain_to` = local chain).
pub fn fingerprint(
    recipient: &Address,
    amount: Amount,
    symbol: &str,
    chain_from: ChainId,
    chain_to: ChainId,
    nonce: Nonce,
) -> H256 {
    keccak256(&encode_packed(
        recipient, amount, symbol, chain_from, chain_to, nonce,
    ))
}

/// Digest actually signed by `eth_sign` over a 32-byte message
pub fn eth_signed_message_hash(message: &H256) -> H256 {
    let mut data = Vec::with_capacity(ETH_SIGNED_MESSAGE_PREFIX.len() + 32);
    data.extend_from_slice(ETH_SIGNED_MESSAGE_PREFIX);
    data.extend_from_slice(message.as_bytes());
    keccak256(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        let hash = keccak256(&[]);
        assert_eq!(
            hash.to_string(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_encode_packed_layout() {
        let recipient = Address::repeat_byte(0x11);
        let packed = encode_packed(&recipient, 5, "Ctm", 1, 25, 7);

        assert_eq!(packed.len(), 20 + 32 + 3 + 32 * 3);
        assert_eq!(&packed[..20], &[0x11; 20]);
        assert_eq!(packed[20 + 31], 5);
        assert_eq!(&packed[52..55], b"Ctm");
        assert_eq!(packed[55 + 31], 1);
        assert_eq!(packed[87 + 31], 25);
        assert_eq!(packed[119 + 31], 7);
    }

    // soliditySha3(0x0202..02, 100000000, "Ctm", 1, 25, 0) and its eth_sign digest
    #[test]
    fn test_fingerprint_known_answer() {
        let fp = fingerprint(&Address::repeat_byte(0x02), 100_000_000, "Ctm", 1, 25, 0);
        assert_eq!(
            fp.to_string(),
            "0x72ef7ad5b598de085c8c78524cf513a3e8ce51bb9f407415778f5017abecba17"
        );
        assert_eq!(
            eth_signed_message_hash(&fp).to_string(),
            "0x59949684bbf2f16d6eaf650a2194a348e5e78379d04324d33aa4a13b23605a95"
        );
    }

    #[test]
    fn test_direction_changes_fingerprint() {
        let recipient = Address::repeat_byte(0x22);
        let outbound = fingerprint(&recipient, 100, "Ctm", 1, 25, 0);
        let inbound = fingerprint(&recipient, 100, "Ctm", 25, 1, 0);
        assert_ne!(outbound, inbound);
        assert_eq!(outbound, fingerprint(&recipient, 100, "Ctm", 1, 25, 0));
    }

    #[test]
    fn test_every_field_is_bound() {
        let base = fingerprint(&Address::repeat_byte(1), 100, "Ctm", 1, 25, 0);
        assert_ne!(base, fingerprint(&Address::repeat_byte(2), 100, "Ctm", 1, 25, 0));
        assert_ne!(base, fingerprint(&Address::repeat_byte(1), 101, "Ctm", 1, 25, 0));
        assert_ne!(base, fingerprint(&Address::repeat_byte(1), 100, "Actm", 1, 25, 0));
        assert_ne!(base, fingerprint(&Address::repeat_byte(1), 100, "Ctm", 1, 25, 1));
    }

    #[test]
    fn test_eth_signed_message_hash_differs_from_message() {
        let message = keccak256(b"test message");
        assert_ne!(eth_signed_message_hash(&message), message);
    }
}
