//! bridge-api: HTTP surface of a Twinbridge dev node
//!
//! Hosts one bridge instance per configured network and exposes swaps,
//! redemptions, administration and read-only queries over JSON.

pub mod dto;
pub mod extract;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
