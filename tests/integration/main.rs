//! Integration tests for the primedx library.
//!
//! These tests validate end-to-end workflows that span multiple modules,
//! using small shell scripts in place of the external tools.

mod helpers;
mod test_config_formats;
mod test_error_paths;
mod test_pipeline;
mod test_sequence_fix;
