//! Dispatch a parsed command line to its command handler.
//!
//! Returns `Err` only when the command aborts (config, store, reference or
//! I/O errors). Per-locale failures are carried in the [`CommandResult`].

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, apply_job::apply_job, init::init, make_job::make_job},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::MakeJob(cmd)) => make_job(cmd),
        Some(Command::ApplyJob(cmd)) => apply_job(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
