//! Twinbridge protocol engine
//!
//! A bridge instance lives on one network. Users `swap` (burn) on the source
//! network; a validator signs the swap parameters, and the recipient `redeem`s
//! (mints) on the destination network. The signed message and the replay key
//! are the same fingerprint, and that fingerprint includes the destination
//! chain id, so an attestation is only good on the network it was made for.

pub mod access;
pub mod chains;
pub mod constants;
pub mod engine;
pub mod events;
pub mod fingerprint;
pub mod ledger;
pub mod network;
pub mod replay;
pub mod signature;
pub mod tokens;

pub use access::AccessControl;
pub use chains::ChainRegistry;
pub use engine::{BridgeEngine, BridgeState, RedeemRequest, SwapRequest};
pub use events::{BridgeEvent, SwapInitialized, SwapRedeemed};
pub use fingerprint::{eth_signed_message_hash, fingerprint, keccak256};
pub use ledger::{InMemoryLedger, TokenLedger};
pub use network::{BootstrapError, Network};
pub use replay::ReplayGuard;
pub use signature::{recover_signer, SignerError, ValidatorSigner};
pub use tokens::{AddOutcome, TokenRegistry};
