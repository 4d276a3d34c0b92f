//! `airmatrix status` — one-shot daemon status query.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use airmatrix_core::DaemonState;
use airmatrix_supervisor::Supervisor;

use crate::PlatformArgs;

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let supervisor = Supervisor::new(self.platform.to_paths());
        let status = supervisor.status();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&status).context("failed to render status JSON")?
            );
            return Ok(());
        }

        let state = DaemonState::from_poll(&status);
        println!("{} {}", state_indicator(state), state.label().bold());
        if let Some(pid) = status.pid {
            println!("  pid:          {pid}");
        }
        println!("  airplay name: {}", status.airplay_name);
        println!("  model:        {}", status.model_name);
        if !status.message.is_empty() {
            println!("  {}", status.message);
        }
        Ok(())
    }
}

fn state_indicator(state: DaemonState) -> String {
    match state {
        DaemonState::Running => "●".green().bold().to_string(),
        DaemonState::Stopped => "●".yellow().bold().to_string(),
        DaemonState::Unknown => "●".bright_black().bold().to_string(),
    }
}
