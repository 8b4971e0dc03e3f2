//! Placeholder for classifying primers by diagnostic group.
//!
//! The subcommand is declared so the CLI surface matches the pipeline's
//! stage order, but its handler is not implemented and always fails.

use anyhow::Result;
use clap::Parser;

use primedx_lib::errors::PrimedxError;

use crate::commands::command::Command;

/// Primer classification stage (not yet implemented).
#[derive(Debug, Parser)]
#[command(
    name = "classify",
    about = "Classify primers by diagnostic group (not yet implemented)"
)]
pub struct Classify {
    /// Input config file
    pub infile: Option<std::path::PathBuf>,

    /// Output config file
    pub outfile: Option<std::path::PathBuf>,
}

impl Command for Classify {
    fn execute(&self, _command_line: &str) -> Result<()> {
        Err(PrimedxError::Unsupported { stage: "classify".to_string() }.into())
    }
}
