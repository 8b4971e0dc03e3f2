//! Input validation utilities
//!
//! Common validation functions for command-line parameters and file paths,
//! with consistent error messages built on the structured types in
//! [`crate::errors`].

use std::fmt::Display;
use std::path::Path;

use crate::errors::{PrimedxError, Result};

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Config file", "Genome FASTA")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use primedx_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/genomes.tab", "Config file");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.is_file() {
        return Err(PrimedxError::InvalidParameter {
            parameter: description.to_string(),
            reason: format!("file '{}' does not exist", path_ref.display()),
        });
    }
    Ok(())
}

/// Validate that every genome sequence file named by a collection exists
///
/// # Errors
/// Returns an error for the first genome whose sequence file is missing
pub fn validate_seqfiles_exist(collection: &crate::collection::GenomeCollection) -> Result<()> {
    for record in collection.records() {
        if !record.seqfile.is_file() {
            return Err(PrimedxError::InvalidParameter {
                parameter: format!("genome '{}'", record.name),
                reason: format!("sequence file '{}' does not exist", record.seqfile.display()),
            });
        }
    }
    Ok(())
}

/// Validate that max >= min for optional bounds
///
/// # Errors
/// Returns an error if both bounds are set and max < min
///
/// # Example
/// ```
/// use primedx_lib::validation::validate_min_max;
///
/// validate_min_max(Some(100), Some(250), "psizemin", "psizemax").unwrap();
/// assert!(validate_min_max(Some(250), Some(100), "psizemin", "psizemax").is_err());
/// ```
pub fn validate_min_max<T: Ord + Display>(
    min_val: Option<T>,
    max_val: Option<T>,
    min_name: &str,
    max_name: &str,
) -> Result<()> {
    if let (Some(min), Some(max)) = (&min_val, &max_val) {
        if max < min {
            return Err(PrimedxError::InvalidParameter {
                parameter: max_name.to_string(),
                reason: format!("{max_name} ({max}) must be >= {min_name} ({min})"),
            });
        }
    }
    Ok(())
}

/// Validate that a value is positive (> 0)
///
/// # Errors
/// Returns an error if the value is zero
///
/// # Example
/// ```
/// use primedx_lib::validation::validate_positive;
///
/// validate_positive(4, "workers").unwrap();
/// assert!(validate_positive(0, "workers").is_err());
/// ```
pub fn validate_positive(value: usize, name: &str) -> Result<()> {
    if value == 0 {
        return Err(PrimedxError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("must be positive (> 0), got: {value}"),
        });
    }
    Ok(())
}
