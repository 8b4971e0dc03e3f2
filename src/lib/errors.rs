//! Custom error types for primedx operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for primedx operations
pub type Result<T> = std::result::Result<T, PrimedxError>;

/// Error type for primedx operations
#[derive(Error, Debug)]
pub enum PrimedxError {
    /// Config file has an extension we cannot map to a format
    #[error(
        "Unrecognized config file extension for '{path}': expected .tab, .conf or .json, got '{extension}'"
    )]
    ConfigFormat {
        /// Path to the offending config file
        path: String,
        /// The extension that was found (may be empty)
        extension: String,
    },

    /// Config file content could not be interpreted
    #[error("Invalid config file '{path}': {reason}")]
    ConfigSyntax {
        /// Path to the offending config file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// A stage was invoked before its upstream stage populated a required field
    #[error("Cannot run {stage}: {what}")]
    MissingPrerequisite {
        /// The stage that cannot proceed
        stage: String,
        /// What is missing and where it should have come from
        what: String,
    },

    /// One or more external tool invocations in a stage batch failed
    #[error("{failed} of {total} {stage} command(s) failed; stage aborted, config not updated")]
    ToolFailure {
        /// The stage whose batch failed
        stage: String,
        /// Number of failed commands
        failed: usize,
        /// Total number of commands in the batch
        total: usize,
    },

    /// A declared stage that this version does not implement
    #[error("The '{stage}' stage is not supported in this version")]
    Unsupported {
        /// The stage name
        stage: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// A sequence file could not be read or is not valid FASTA
    #[error("Invalid sequence file '{path}': {reason}")]
    InvalidSequenceFile {
        /// Path to the sequence file
        path: PathBuf,
        /// Explanation of the problem
        reason: String,
    },

    /// Raw tool output could not be parsed
    #[error("Could not parse tool output '{path}': {reason}")]
    OutputParse {
        /// Path to the raw output file
        path: PathBuf,
        /// Explanation of the problem
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
