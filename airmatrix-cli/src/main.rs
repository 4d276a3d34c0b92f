//! AirMatrix — control panel and lifecycle CLI for the FPP AirPlay bridge.
//!
//! # Usage
//!
//! ```text
//! airmatrix serve [--listen ADDR] [--media-dir DIR] [--host-api URL]
//! airmatrix status [--json]
//! airmatrix start
//! airmatrix stop
//! airmatrix restart
//! airmatrix config show|path
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use airmatrix_core::{LifecycleAction, PlatformPaths};
use commands::{action::ActionArgs, config::ConfigCommand, serve::ServeArgs, status::StatusArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "airmatrix",
    version,
    about = "Supervise the AirPlay-to-matrix bridge daemon",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the browser-facing control panel.
    Serve(ServeArgs),

    /// Query daemon status through the manager script.
    Status(StatusArgs),

    /// Start the bridge daemon.
    Start(ActionArgs),

    /// Stop the bridge daemon.
    Stop(ActionArgs),

    /// Restart the bridge daemon.
    Restart(ActionArgs),

    /// Inspect the persisted plugin configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ---------------------------------------------------------------------------
// Shared platform arguments — every subcommand takes its paths explicitly
// ---------------------------------------------------------------------------

/// Host directory flags, resolved into [`PlatformPaths`].
#[derive(Args, Debug, Clone)]
pub struct PlatformArgs {
    /// Host media directory (standard FPP layout).
    #[arg(long, default_value = "/home/fpp/media")]
    pub media_dir: PathBuf,

    /// Config directory override (defaults to <media-dir>/config).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Plugin install directory override
    /// (defaults to <media-dir>/plugins/fpp-AirPlayMatrix).
    #[arg(long)]
    pub plugin_dir: Option<PathBuf>,
}

impl PlatformArgs {
    pub fn to_paths(&self) -> PlatformPaths {
        let standard = PlatformPaths::from_media_dir(&self.media_dir);
        if self.config_dir.is_none() && self.plugin_dir.is_none() {
            return standard;
        }
        PlatformPaths::new(
            Some(self.media_dir.clone()),
            self.config_dir
                .clone()
                .unwrap_or_else(|| standard.config_dir().to_path_buf()),
            self.plugin_dir
                .clone()
                .unwrap_or_else(|| standard.plugin_dir().to_path_buf()),
        )
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Start(args) => commands::action::run(args, LifecycleAction::Start),
        Commands::Stop(args) => commands::action::run(args, LifecycleAction::Stop),
        Commands::Restart(args) => commands::action::run(args, LifecycleAction::Restart),
        Commands::Config { command } => commands::config::run(command),
    }
}
