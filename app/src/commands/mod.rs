//! Subcommands of the `twinbridge` binary

mod serve;
mod signing;

pub use serve::Serve;
pub use signing::{Attest, Attestation, Keygen};
