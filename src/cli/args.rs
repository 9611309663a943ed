//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `make-job`: Write one `<locale>.txt` job file per locale
//! - `apply-job`: Merge edited job files back into the locale store
//! - `init`: Initialize babeljob configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::job::ApplyMode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::MakeJob(cmd)) => cmd.common.verbose,
            Some(Command::ApplyJob(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the job commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project directory to search for the config file from
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Locales to process, comma separated (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub locales: Vec<String>,

    /// Reference (source) locale (overrides config file)
    #[arg(long)]
    pub reference_locale: Option<String>,

    /// Locale store JSON file (overrides config file)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Directory holding the <locale>.txt job files (overrides config file)
    #[arg(long, alias = "babeldir")]
    pub job_dir: Option<PathBuf>,

    /// Reference JSON file mapping translation keys to source values
    /// (default: the reference locale's entries in the store)
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct MakeJobCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ApplyJobCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// How applied values combine with stored ones (overrides config file)
    #[arg(long, value_enum)]
    pub mode: Option<ApplyMode>,

    /// Remove store keys that are no longer in the reference
    #[arg(long)]
    pub prune: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a flat job file per locale, pre-filled with existing translations
    MakeJob(MakeJobCommand),
    /// Merge translated job files back into the locale store
    ApplyJob(ApplyJobCommand),
    /// Initialize a new .babeljobrc.json configuration file
    Init,
}
