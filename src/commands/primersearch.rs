//! Placeholder for in-silico primer specificity search (EMBOSS primersearch).
//!
//! The subcommand is declared so the CLI surface matches the pipeline's
//! stage order, but its handler is not implemented and always fails.

use anyhow::Result;
use clap::Parser;

use primedx_lib::errors::PrimedxError;

use crate::commands::command::Command;

/// Cross-hybridization search stage (not yet implemented).
#[derive(Debug, Parser)]
#[command(
    name = "primersearch",
    about = "Search primers against other genomes (not yet implemented)"
)]
pub struct PrimerSearch {
    /// Input config file
    pub infile: Option<std::path::PathBuf>,

    /// Output config file
    pub outfile: Option<std::path::PathBuf>,
}

impl Command for PrimerSearch {
    fn execute(&self, _command_line: &str) -> Result<()> {
        Err(PrimedxError::Unsupported { stage: "primersearch".to_string() }.into())
    }
}
