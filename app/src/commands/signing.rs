//! Validator key tooling: `twinbridge attest` and `twinbridge keygen`

use anyhow::Context as _;
use serde::Serialize;

use bridge_core::{Address, Amount, ChainId, Nonce, Signature, H256};
use bridge_engine::{fingerprint, ValidatorSigner};

/// Sign the attestation a relayer hands to the recipient after observing
/// `SwapInitialized` on the source chain.
#[derive(Debug, clap::Args)]
pub struct Attest {
    /// Validator private key, hex encoded
    #[arg(long)]
    pub key: String,

    #[arg(long)]
    pub recipient: Address,

    #[arg(long)]
    pub amount: Amount,

    #[arg(long)]
    pub symbol: String,

    #[arg(long)]
    pub chain_from: ChainId,

    #[arg(long)]
    pub chain_to: ChainId,

    #[arg(long)]
    pub nonce: Nonce,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attestation {
    pub validator: Address,
    pub fingerprint: H256,
    pub signature: Signature,
}

impl Attest {
    pub fn attestation(&self) -> anyhow::Result<Attestation> {
        let signer = ValidatorSigner::new(&self.key).context("invalid validator key")?;
        let signature = signer.sign_redemption(
            &self.recipient,
            self.amount,
            &self.symbol,
            self.chain_from,
            self.chain_to,
            self.nonce,
        );

        Ok(Attestation {
            validator: signer.address(),
            fingerprint: fingerprint(
                &self.recipient,
                self.amount,
                &self.symbol,
                self.chain_from,
                self.chain_to,
                self.nonce,
            ),
            signature,
        })
    }

    pub fn run(self) -> anyhow::Result<()> {
        let attestation = self.attestation()?;
        println!("{}", serde_json::to_string_pretty(&attestation)?);
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct Keygen {}

impl Keygen {
    pub fn run(self) -> anyhow::Result<()> {
        let signer = ValidatorSigner::random();
        let output = serde_json::json!({
            "address": signer.address(),
            "privateKey": signer.secret_hex(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
