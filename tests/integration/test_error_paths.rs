//! Error-path behavior across module boundaries: failing tools, missing
//! prerequisites, and malformed tool output.

#![cfg(unix)]

use primedx_lib::errors::PrimedxError;
use primedx_lib::jobs::{run_jobs, Job, JobStatus, ToolCommand};
use primedx_lib::primers::{load_and_name, Eprimer3Parser};
use primedx_lib::screen;
use std::path::Path;
use tempfile::TempDir;

use crate::helpers::{fake_tool, genome_collection};

#[test]
fn test_failing_tool_does_not_cancel_siblings() {
    let dir = TempDir::new().unwrap();
    let failing = fake_tool(dir.path(), "failing", "exit 3");
    let marker = dir.path().join("sibling_ran");
    let succeeding =
        fake_tool(dir.path(), "succeeding", &format!("touch {}", marker.display()));

    let jobs = vec![
        Job::new("g1", ToolCommand::new(failing.to_str().unwrap())),
        Job::new("g2", ToolCommand::new(succeeding.to_str().unwrap())),
    ];
    let outcomes = run_jobs(&jobs, Some(1)).unwrap();

    // The batch ran to completion and outcomes keep input order
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(outcomes[0].status, JobStatus::Failed { code: Some(3), .. }));
    assert!(outcomes[1].is_success());
    assert!(marker.is_file());
}

#[test]
fn test_failed_tool_stderr_is_captured() {
    let dir = TempDir::new().unwrap();
    let noisy = fake_tool(dir.path(), "noisy", "echo 'no sequences found' >&2; exit 1");
    let jobs = vec![Job::new("g1", ToolCommand::new(noisy.to_str().unwrap()))];
    let outcomes = run_jobs(&jobs, None).unwrap();
    match &outcomes[0].status {
        JobStatus::Failed { stderr, .. } => assert!(stderr.contains("no sequences found")),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn test_screen_prerequisite_reported_before_any_build() {
    let dir = TempDir::new().unwrap();
    // Genomes without primer FASTA files: the screen must refuse up front
    let mut collection =
        genome_collection(dir.path(), &[("g1", "ACGT"), ("g2", "TTAA")]);
    let outdir = dir.path().join("screen_out");

    let result = screen::build_commands(
        &mut collection,
        Path::new("exclude_db"),
        "blastn",
        Some(&outdir),
        false,
    );
    assert!(matches!(result, Err(PrimedxError::MissingPrerequisite { .. })));
    assert!(!outdir.exists());
    assert!(collection.records().all(|r| r.last_commands.is_empty()));
}

#[test]
fn test_malformed_design_report_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let raw_path = dir.path().join("g1.eprimer3");
    std::fs::write(
        &raw_path,
        "   1 PRODUCT SIZE: not-a-number\n     FORWARD PRIMER  1  20  59.0  50.0  ACGT\n",
    )
    .unwrap();

    let err = load_and_name(&raw_path, &Eprimer3Parser).unwrap_err();
    match err {
        PrimedxError::OutputParse { path, reason } => {
            assert_eq!(path, raw_path);
            assert!(reason.contains("line 1"));
        }
        other => panic!("expected OutputParse, got {other}"),
    }
    // No named report was written for the bad input
    assert!(!dir.path().join("g1_named.eprimer3").exists());
}

#[test]
fn test_tool_failure_error_message_aggregates() {
    let error = PrimedxError::ToolFailure {
        stage: "eprimer3".to_string(),
        failed: 2,
        total: 5,
    };
    let msg = error.to_string();
    assert!(msg.contains("2 of 5"));
    assert!(msg.contains("eprimer3"));
    assert!(msg.contains("config not updated"));
}
