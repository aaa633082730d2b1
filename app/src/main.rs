//! `twinbridge` command line entry point

use clap::Parser as _;

use twinbridge_lib::commands::{Attest, Keygen, Serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    match args.action {
        Action::Serve(args) => {
            twinbridge_lib::init_tracing();
            args.run().await
        }
        Action::Attest(args) => args.run(),
        Action::Keygen(args) => args.run(),
    }
}

#[derive(Debug, clap::Parser)]
#[command(author)]
#[command(version)]
#[command(about = "Two-sided token bridge dev node")]
#[command(long_about = None)]
struct Args {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Host the configured bridge instances behind the HTTP API
    Serve(Serve),
    /// Sign a redemption attestation as a validator
    Attest(Attest),
    /// Generate a fresh validator key
    Keygen(Keygen),
}
