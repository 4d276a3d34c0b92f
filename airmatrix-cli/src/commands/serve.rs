//! `airmatrix serve` — run the browser-facing control panel.

use anyhow::{Context, Result};
use clap::Args;

use airmatrix_server::{start_blocking, ServerConfig, DEFAULT_HOST_API_BASE, DEFAULT_LISTEN_ADDR};

use crate::PlatformArgs;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Bind address for the control panel.
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Base URL of the host FPP API (overlay-model registry).
    #[arg(long, default_value = DEFAULT_HOST_API_BASE)]
    pub host_api: String,
}

impl ServeArgs {
    pub fn run(self) -> Result<()> {
        let paths = self.platform.to_paths();
        let config = ServerConfig {
            listen_addr: self.listen,
            host_api_base: self.host_api,
        };
        start_blocking(config, paths).context("control panel exited with error")
    }
}
