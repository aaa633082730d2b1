//! Symbol → token ledger registry
//!
//! Entries are never removed. Enumeration order is the order in which symbols
//! were first added, and a symbol's address cannot change once bound.

use std::collections::HashMap;

use bridge_core::{Address, BridgeError, TokenEntry, TokenState};

/// What `add` did to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Reactivated,
    AlreadyActive,
}

#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    entries: Vec<TokenEntry>,
    index: HashMap<String, usize>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `symbol` at `token_address`, or reactivate it if known.
    pub fn add(&mut self, symbol: &str, token_address: Address) -> Result<AddOutcome, BridgeError> {
        if symbol.is_empty() {
            return Err(BridgeError::InvalidSymbol);
        }
        if token_address.is_zero() {
            return Err(BridgeError::InvalidTokenAddress);
        }

        if let Some(&idx) = self.index.get(symbol) {
            let entry = &mut self.entries[idx];
            if entry.token_address != token_address {
                return Err(BridgeError::TokenAddressMismatch {
                    symbol: symbol.to_string(),
                    existing: entry.token_address,
                });
            }
            if entry.state.is_active() {
                return Ok(AddOutcome::AlreadyActive);
            }
            entry.state = TokenState::Active;
            return Ok(AddOutcome::Reactivated);
        }

        self.index.insert(symbol.to_string(), self.entries.len());
        self.entries.push(TokenEntry {
            symbol: symbol.to_string(),
            token_address,
            state: TokenState::Active,
        });
        Ok(AddOutcome::Added)
    }

    /// Mark `symbol` inactive. Returns whether anything changed.
    pub fn deactivate(&mut self, symbol: &str) -> bool {
        match self.index.get(symbol) {
            Some(&idx) if self.entries[idx].state.is_active() => {
                self.entries[idx].state = TokenState::Inactive;
                true
            }
            _ => false,
        }
    }

    /// Unknown symbols come back as an inactive entry with a zero address.
    pub fn lookup(&self, symbol: &str) -> TokenEntry {
        self.index
            .get(symbol)
            .map(|&idx| self.entries[idx].clone())
            .unwrap_or_else(|| TokenEntry::unknown(symbol))
    }

    /// Every registered token, inactive ones included
    pub fn list(&self) -> &[TokenEntry] {
        &self.entries
    }

    pub fn active_tokens(&self) -> Vec<TokenEntry> {
        self.entries
            .iter()
            .filter(|e| e.is_active())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
