//! End-to-end pipeline flow with fake external tools: predict, design,
//! screen, with the collection threaded through each stage.

#![cfg(unix)]

use primedx_lib::collection::GenomeCollection;
use primedx_lib::jobs::run_jobs;
use primedx_lib::primers::{self, Eprimer3Parser};
use primedx_lib::{design, predict, screen};
use std::path::Path;
use tempfile::TempDir;

use crate::helpers::{fake_blastn, fake_eprimer3, fake_prodigal, genome_collection};

fn run_stage(jobs: &[primedx_lib::jobs::Job]) {
    let outcomes = run_jobs(jobs, Some(2)).unwrap();
    assert!(outcomes.iter().all(|o| o.is_success()), "stage failed: {outcomes:?}");
}

#[test]
fn test_three_stage_flow_updates_collection() {
    let dir = TempDir::new().unwrap();
    let mut collection =
        genome_collection(dir.path(), &[("genome_a", "ACGTACGT"), ("genome_b", "TTGGCCAA")]);

    // Stage 1: gene prediction
    let prodigal = fake_prodigal(dir.path());
    let predict_jobs =
        predict::build_commands(&mut collection, prodigal.to_str().unwrap(), None, false).unwrap();
    run_stage(&predict_jobs.iter().map(|j| j.job.clone()).collect::<Vec<_>>());
    for job in &predict_jobs {
        assert!(job.features.is_file());
        collection.get_mut(&job.job.label).unwrap().features = Some(job.features.clone());
    }

    // Stage 2: primer design, then parse behind the barrier
    let eprimer3 = fake_eprimer3(dir.path());
    let design_jobs = design::build_commands(
        &mut collection,
        eprimer3.to_str().unwrap(),
        None,
        false,
        &design::DesignOptions::default(),
    )
    .unwrap();
    run_stage(&design_jobs.iter().map(|j| j.job.clone()).collect::<Vec<_>>());
    for job in &design_jobs {
        let (named, named_path) = primers::load_and_name(&job.raw_output, &Eprimer3Parser).unwrap();
        assert_eq!(named.len(), 2);
        let json_path = named_path.with_extension("json");
        primers::to_json(&named, &json_path).unwrap();
        let record = collection.get_mut(&job.job.label).unwrap();
        record.primers = Some(json_path);
    }

    // Derive the query FASTA per genome, then stage 3: screening
    let names: Vec<String> = collection.records().map(|r| r.name.clone()).collect();
    for name in &names {
        let record = collection.get_mut(name).unwrap();
        let json_path = record.primers.clone().unwrap();
        record.fastafname = Some(primers::json_to_fasta(&json_path).unwrap());
    }
    let blastn = fake_blastn(dir.path());
    let screen_jobs = screen::build_commands(
        &mut collection,
        Path::new("exclude_db"),
        blastn.to_str().unwrap(),
        None,
        false,
    )
    .unwrap();
    run_stage(&screen_jobs.iter().map(|j| j.job.clone()).collect::<Vec<_>>());
    for job in &screen_jobs {
        assert!(job.raw_output.is_file());
    }

    // The collection now carries the whole audit trail
    let record = collection.get("genome_a").unwrap();
    assert!(record.last_commands.contains_key(predict::STAGE));
    assert!(record.last_commands.contains_key(design::STAGE));
    assert!(record.last_commands.contains_key(screen::STAGE));
    assert_eq!(record.features.as_deref(), Some(dir.path().join("genome_a.features").as_path()));

    // And survives a config round trip with every field intact
    let config_path = dir.path().join("final.json");
    collection.save(&config_path).unwrap();
    let reloaded = GenomeCollection::load(&config_path).unwrap();
    assert_eq!(reloaded.get("genome_a").unwrap(), record);
}

#[test]
fn test_primer_names_deterministic_across_reruns() {
    let dir = TempDir::new().unwrap();
    let mut collection = genome_collection(dir.path(), &[("genome_a", "ACGTACGT")]);

    let eprimer3 = fake_eprimer3(dir.path());
    let jobs = design::build_commands(
        &mut collection,
        eprimer3.to_str().unwrap(),
        None,
        false,
        &design::DesignOptions::default(),
    )
    .unwrap();
    run_stage(&jobs.iter().map(|j| j.job.clone()).collect::<Vec<_>>());

    let (first, _) = primers::load_and_name(&jobs[0].raw_output, &Eprimer3Parser).unwrap();
    let (second, _) = primers::load_and_name(&jobs[0].raw_output, &Eprimer3Parser).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].name, "genome_a_primer_00001");
    assert_eq!(first[1].name, "genome_a_primer_00002");
}

#[test]
fn test_screen_query_fasta_layout() {
    let dir = TempDir::new().unwrap();
    let mut collection = genome_collection(dir.path(), &[("genome_a", "ACGTACGT")]);

    let eprimer3 = fake_eprimer3(dir.path());
    let jobs = design::build_commands(
        &mut collection,
        eprimer3.to_str().unwrap(),
        None,
        false,
        &design::DesignOptions::default(),
    )
    .unwrap();
    run_stage(&jobs.iter().map(|j| j.job.clone()).collect::<Vec<_>>());

    let (named, named_path) = primers::load_and_name(&jobs[0].raw_output, &Eprimer3Parser).unwrap();
    let json_path = named_path.with_extension("json");
    primers::to_json(&named, &json_path).unwrap();
    let fasta_path = primers::json_to_fasta(&json_path).unwrap();

    let reader = bio::io::fasta::Reader::from_file(&fasta_path).unwrap();
    let ids: Vec<String> = reader.records().map(|r| r.unwrap().id().to_string()).collect();
    assert_eq!(
        ids,
        vec![
            "genome_a_primer_00001_fwd",
            "genome_a_primer_00001_rev",
            "genome_a_primer_00002_fwd",
            "genome_a_primer_00002_rev",
        ]
    );
}
