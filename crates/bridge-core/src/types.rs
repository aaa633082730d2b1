//! Core type definitions for Twinbridge

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

/// Network identifier (EVM-style chain id)
pub type ChainId = u64;

/// Token amount in base units
pub type Amount = u128;

/// Caller-chosen swap nonce
pub type Nonce = u64;

/// Serde codec writing an [`Amount`] as a decimal string.
///
/// JSON numbers above 2^53 lose precision in most readers, and serde's
/// buffered paths (internally tagged enums) cannot hold a `u128` at all.
/// Reading also accepts plain integers so hand-written configs keep working.
///
/// Use with `#[serde(with = "bridge_core::decimal_amount")]`.
pub mod decimal_amount {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::Amount;

    pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Amount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer amount as a decimal string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
            v.trim()
                .parse()
                .map_err(|e| E::custom(format!("invalid amount '{}': {}", v, e)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
            Ok(Amount::from(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
            Amount::try_from(v).map_err(|_| E::custom(format!("negative amount {}", v)))
        }
    }
}

/// Decode a `0x`-optional hex string into a fixed-size byte array.
pub fn decode_fixed_hex<const N: usize>(input: &str) -> Result<[u8; N], ParseError> {
    let trimmed = input.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = hex::decode(stripped).map_err(|e| ParseError::InvalidHex {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    bytes.try_into().map_err(|b: Vec<u8>| ParseError::InvalidLength {
        expected: N,
        actual: b.len(),
    })
}

/// 20-byte account identity (an EVM address)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build a deterministic address from a single byte (handy for fixtures)
    pub fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed_hex::<20>(s).map(Self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// 32-byte digest (fingerprints, signature scalars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct H256(pub [u8; 32]);

impl H256 {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for H256 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed_hex::<32>(s).map(Self)
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for H256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for H256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Recoverable ECDSA signature split into its `(v, r, s)` triple.
///
/// `v` is carried as produced by the signer: 27/28 for `eth_sign` style
/// signatures, 0/1 for raw recovery ids. Both are accepted on recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub v: u8,
    pub r: H256,
    pub s: H256,
}

impl Signature {
    /// Serialize as the 65-byte `r ‖ s ‖ v` form
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r.0);
        out[32..64].copy_from_slice(&self.s.0);
        out[64] = self.v;
        out
    }

    /// Split a 65-byte `r ‖ s ‖ v` signature
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self {
            v: bytes[64],
            r: H256(r),
            s: H256(s),
        }
    }
}

impl FromStr for Signature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed_hex::<65>(s).map(|b| Self::from_bytes(&b))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

/// Role held by an account on the bridge or on a token ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Validator,
    Minter,
    Burner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Validator => "validator",
            Self::Minter => "minter",
            Self::Burner => "burner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "validator" => Ok(Self::Validator),
            "minter" => Ok(Self::Minter),
            "burner" => Ok(Self::Burner),
            other => Err(ParseError::UnknownRole(other.to_string())),
        }
    }
}

/// Registration state of a token symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenState {
    #[default]
    Inactive = 0,
    Active = 1,
}

impl TokenState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Registry entry binding a symbol to its ledger address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEntry {
    pub symbol: String,
    pub token_address: Address,
    pub state: TokenState,
}

impl TokenEntry {
    /// Entry returned for symbols that were never registered
    pub fn unknown(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            token_address: Address::ZERO,
            state: TokenState::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// Remote chain permission flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    pub chain_id: ChainId,
    pub active: bool,
}
