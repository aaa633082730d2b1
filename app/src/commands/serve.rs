//! `twinbridge serve`

use std::path::PathBuf;

use anyhow::Context as _;
use bridge_api::{start_server, AppState};
use bridge_core::NodeConfig;

#[derive(Debug, clap::Args)]
pub struct Serve {
    /// Node configuration (JSON)
    #[arg(long, default_value = "config/devnet.json")]
    pub config: PathBuf,

    /// Override the API port from the config file
    #[arg(long)]
    pub port: Option<u16>,
}

impl Serve {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = NodeConfig::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;

        let port = self.port.unwrap_or(config.api_port);
        tracing::info!(
            config = %self.config.display(),
            networks = config.networks.len(),
            "Starting Twinbridge node"
        );

        let state = AppState::from_config(config).context("failed to bootstrap networks")?;
        start_server(state, port)
            .await
            .context("API server terminated")
    }
}
