//! CLI command definitions and handlers.

pub mod check;
pub mod models;

use clap::{Parser, Subcommand};

/// Snapcheck - Photo validity checks for capture flows
#[derive(Parser)]
#[command(name = "snapcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, model sources, output flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Assess images for blur, rotation and framing
    Check(check::CheckArgs),
    /// Manage scoring models
    Models(models::ModelsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was assessed and valid.
    Success = 0,
    /// At least one image was invalid or could not be assessed.
    Invalid = 1,
    /// Startup or configuration failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
