//! `airmatrix config` — persisted configuration inspection.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use airmatrix_core::ConfigStore;

use crate::PlatformArgs;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective (defaults-merged) config as JSON.
    Show(ConfigArgs),
    /// Print the config file path.
    Path(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show(args) => {
            let store = ConfigStore::new(&args.platform.to_paths());
            let config = store.load();
            println!(
                "{}",
                serde_json::to_string_pretty(&config).context("failed to render config JSON")?
            );
        }
        ConfigCommand::Path(args) => {
            let store = ConfigStore::new(&args.platform.to_paths());
            println!("{}", store.path().display());
        }
    }
    Ok(())
}
