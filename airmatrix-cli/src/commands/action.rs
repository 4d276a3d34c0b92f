//! `airmatrix start|stop|restart` — one-shot lifecycle dispatch.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use airmatrix_core::LifecycleAction;
use airmatrix_supervisor::Supervisor;

use crate::PlatformArgs;

#[derive(Args, Debug)]
pub struct ActionArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,
}

pub fn run(args: ActionArgs, action: LifecycleAction) -> Result<()> {
    let supervisor = Supervisor::new(args.platform.to_paths());
    let result = supervisor.dispatch(action);

    if result.ok {
        println!("{}", result.message.green());
        Ok(())
    } else {
        println!("{}", result.message.red());
        anyhow::bail!("manager exited with code {}", result.rc)
    }
}
