//! Bridge protocol constants

/// Prefix `eth_sign` prepends to a 32-byte message before hashing
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Offset added to a raw recovery id in `eth_sign` style signatures
pub const LEGACY_V_OFFSET: u8 = 27;
