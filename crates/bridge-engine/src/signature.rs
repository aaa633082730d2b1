//! secp256k1 signer recovery and validator signing

use bridge_core::{Address, Amount, BridgeError, ChainId, Nonce, Signature, H256};
use rand::RngCore;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

use crate::constants::LEGACY_V_OFFSET;
use crate::fingerprint::{eth_signed_message_hash, fingerprint, keccak256};

fn address_from_public_key(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.0[12..32]);
    Address(address)
}

fn recovery_id(v: u8) -> Result<RecoveryId, BridgeError> {
    let raw = match v {
        0 | 1 => v,
        27 | 28 => v - LEGACY_V_OFFSET,
        other => {
            return Err(BridgeError::MalformedSignature {
                reason: format!("unsupported recovery byte v={}", other),
            })
        }
    };
    RecoveryId::from_i32(i32::from(raw)).map_err(|e| BridgeError::MalformedSignature {
        reason: e.to_string(),
    })
}

/// Recover the address that produced `signature` over `message_hash`.
///
/// Only fails when the bytes do not form a recoverable signature. Whether the
/// recovered address is the one expected is up to the caller.
pub fn recover_signer(message_hash: &H256, signature: &Signature) -> Result<Address, BridgeError> {
    let malformed = |e: secp256k1::Error| BridgeError::MalformedSignature {
        reason: e.to_string(),
    };

    let recid = recovery_id(signature.v)?;
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r.0);
    compact[32..].copy_from_slice(&signature.s.0);

    let recoverable = RecoverableSignature::from_compact(&compact, recid).map_err(malformed)?;
    let message = Message::from_digest(message_hash.0);
    let public_key = Secp256k1::verification_only()
        .recover_ecdsa(&message, &recoverable)
        .map_err(malformed)?;

    Ok(address_from_public_key(&public_key))
}

/// Errors from loading a signing key
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("Invalid private key hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Invalid private key: {0}")]
    InvalidKey(#[from] secp256k1::Error),
}

/// Holder of a validator key, producing `eth_sign` compatible attestations
pub struct ValidatorSigner {
    secret_key: SecretKey,
    secp: Secp256k1<secp256k1::All>,
}

impl ValidatorSigner {
    pub fn new(private_key_hex: &str) -> Result<Self, SignerError> {
        let bytes = hex::decode(private_key_hex.trim().trim_start_matches("0x"))?;
        let secret_key = SecretKey::from_slice(&bytes)?;
        Ok(Self {
            secret_key,
            secp: Secp256k1::new(),
        })
    }

    /// Generate a fresh key from the thread RNG
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            // Out-of-range scalars are astronomically rare; just draw again.
            if let Ok(secret_key) = SecretKey::from_slice(&bytes) {
                return Self {
                    secret_key,
                    secp: Secp256k1::new(),
                };
            }
        }
    }

    pub fn address(&self) -> Address {
        let public_key = PublicKey::from_secret_key(&self.secp, &self.secret_key);
        address_from_public_key(&public_key)
    }

    pub fn secret_hex(&self) -> String {
        format!("0x{}", hex::encode(self.secret_key.secret_bytes()))
    }

    /// Sign a raw 32-byte digest, `v` in the 27/28 form
    pub fn sign_digest(&self, digest: &H256) -> Signature {
        let message = Message::from_digest(digest.0);
        let sig = self.secp.sign_ecdsa_recoverable(&message, &self.secret_key);
        let (recid, compact) = sig.serialize_compact();

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&compact);
        bytes[64] = LEGACY_V_OFFSET + recid.to_i32() as u8;
        Signature::from_bytes(&bytes)
    }

    /// Sign a 32-byte message the way `eth_sign` does (prefixed digest)
    pub fn sign_message(&self, message: &H256) -> Signature {
        self.sign_digest(&eth_signed_message_hash(message))
    }

    /// Attest a swap so that `recipient` can redeem it on `chain_to`
    pub fn sign_redemption(
        &self,
        recipient: &Address,
        amount: Amount,
        symbol: &str,
        chain_from: ChainId,
        chain_to: ChainId,
        nonce: Nonce,
    ) -> Signature {
        let message = fingerprint(recipient, amount, symbol, chain_from, chain_to, nonce);
        self.sign_message(&message)
    }
}

impl std::fmt::Debug for ValidatorSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV_KEY: &str = "0x4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d";

    #[test]
    fn test_signer_address_derivation() {
        let signer = ValidatorSigner::new(DEV_KEY).unwrap();
        let expected: Address = "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1".parse().unwrap();
        assert_eq!(signer.address(), expected);
    }

    #[test]
    fn test_recover_roundtrip() {
        let signer = ValidatorSigner::new(DEV_KEY).unwrap();
        let digest = keccak256(b"test message");
        let sig = signer.sign_digest(&digest);

        assert!(sig.v == 27 || sig.v == 28);
        assert_eq!(recover_signer(&digest, &sig).unwrap(), signer.address());
    }

    #[test]
    fn test_raw_recovery_id_accepted() {
        let signer = ValidatorSigner::new(DEV_KEY).unwrap();
        let digest = keccak256(b"test message");
        let mut sig = signer.sign_digest(&digest);
        sig.v -= LEGACY_V_OFFSET;

        assert_eq!(recover_signer(&digest, &sig).unwrap(), signer.address());
    }

    #[test]
    fn test_wrong_message_recovers_other_address() {
        let signer = ValidatorSigner::new(DEV_KEY).unwrap();
        let sig = signer.sign_digest(&keccak256(b"test message"));

        let recovered = recover_signer(&keccak256(b"other message"), &sig).unwrap();
        assert_ne!(recovered, signer.address());
    }

    #[test]
    fn test_bad_v_is_malformed() {
        let signer = ValidatorSigner::new(DEV_KEY).unwrap();
        let digest = keccak256(b"test message");
        let mut sig = signer.sign_digest(&digest);
        sig.v = 5;

        let err = recover_signer(&digest, &sig).unwrap_err();
        assert_eq!(err.error_code(), "malformed_signature");
    }

    #[test]
    fn test_zero_scalars_are_malformed() {
        let sig = Signature {
            v: 27,
            r: H256([0u8; 32]),
            s: H256([0u8; 32]),
        };
        let err = recover_signer(&keccak256(b"test message"), &sig).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedSignature { .. }));
    }

    #[test]
    fn test_random_signers_differ() {
        let a = ValidatorSigner::random();
        let b = ValidatorSigner::random();
        assert_ne!(a.address(), b.address());

        let reloaded = ValidatorSigner::new(&a.secret_hex()).unwrap();
        assert_eq!(reloaded.address(), a.address());
    }

    #[test]
    fn test_invalid_key_rejected() {
        assert!(ValidatorSigner::new("0xnothex").is_err());
        assert!(ValidatorSigner::new(&"00".repeat(32)).is_err());
    }
}
