//! Error types for Twinbridge

use thiserror::Error;

use crate::types::{Address, Amount, ChainId, Role};

/// Errors raised by bridge operations.
///
/// Every variant is a full rejection: the operation that produced it left no
/// state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Destination chain {chain_id} is the local chain")]
    InvalidDestination { chain_id: ChainId },

    #[error("Chain {chain_id} is not active")]
    ChainInactive { chain_id: ChainId },

    #[error("Token {symbol} is inactive")]
    TokenInactive { symbol: String },

    #[error("Duplication of the transaction")]
    DuplicateTransaction,

    #[error("Burn failed: {0}")]
    BurnFailed(LedgerError),

    #[error("Mint failed: {0}")]
    MintFailed(LedgerError),

    #[error("Malformed signature: {reason}")]
    MalformedSignature { reason: String },

    #[error("Validator address is not correct: {signer}")]
    InvalidValidator { signer: Address },

    #[error("{account} is missing role {role}")]
    Unauthorized { account: Address, role: Role },

    #[error("Token address must not be zero")]
    InvalidTokenAddress,

    #[error("Token {symbol} is already bound to {existing}")]
    TokenAddressMismatch { symbol: String, existing: Address },

    #[error("Token symbol must not be empty")]
    InvalidSymbol,
}

impl BridgeError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDestination { .. } => "invalid_destination",
            Self::ChainInactive { .. } => "chain_inactive",
            Self::TokenInactive { .. } => "token_inactive",
            Self::DuplicateTransaction => "duplicate_transaction",
            Self::BurnFailed(_) => "burn_failed",
            Self::MintFailed(_) => "mint_failed",
            Self::MalformedSignature { .. } => "malformed_signature",
            Self::InvalidValidator { .. } => "invalid_validator",
            Self::Unauthorized { .. } => "unauthorized",
            Self::InvalidTokenAddress => "invalid_token_address",
            Self::TokenAddressMismatch { .. } => "token_address_mismatch",
            Self::InvalidSymbol => "invalid_symbol",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDestination { .. }
            | Self::MalformedSignature { .. }
            | Self::InvalidTokenAddress
            | Self::InvalidSymbol => 400,
            Self::Unauthorized { .. } | Self::InvalidValidator { .. } => 403,
            Self::DuplicateTransaction | Self::TokenAddressMismatch { .. } => 409,
            Self::ChainInactive { .. }
            | Self::TokenInactive { .. }
            | Self::BurnFailed(_)
            | Self::MintFailed(_) => 422,
        }
    }
}

/// Errors raised by a token ledger
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{operator} should have a {role} role")]
    MissingRole { operator: Address, role: Role },

    #[error("Insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("Unknown token {token}")]
    UnknownToken { token: Address },

    #[error("Token {token} is already registered")]
    TokenExists { token: Address },

    #[error("Balance overflow")]
    Overflow,
}

/// Errors from parsing wire/config representations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid hex '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("Expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
