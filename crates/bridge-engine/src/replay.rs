//! Consumed transaction fingerprints
//!
//! Append-only for the lifetime of a bridge instance; there is no expiry.

use std::collections::HashSet;

use bridge_core::H256;

#[derive(Debug, Clone, Default)]
pub struct ReplayGuard {
    consumed: HashSet<H256>,
}

impl ReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `fingerprint` consumed. Returns false if it already was.
    pub fn consume(&mut self, fingerprint: H256) -> bool {
        self.consumed.insert(fingerprint)
    }

    pub fn is_consumed(&self, fingerprint: &H256) -> bool {
        self.consumed.contains(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }

    /// Undo a `consume` made earlier in the same, now failing, operation.
    pub(crate) fn rollback(&mut self, fingerprint: &H256) {
        self.consumed.remove(fingerprint);
    }
}
