//! Config file formats: the tab and JSON forms describe the same pipeline
//! state and convert between each other.

use primedx_lib::collection::{GenomeCollection, GenomeRecord};
use primedx_lib::errors::PrimedxError;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_hand_written_tab_config_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("genomes.tab");
    std::fs::write(
        &path,
        "# diagnostic panel, August 2026\n\
         Pba_21A\tatrosepticum,gv1\tseqs/Pba_21A.fasta\n\
         Pwa_CFBP_3304\twasabiae\tseqs/Pwa_CFBP_3304.fasta\t-\t-\n",
    )
    .unwrap();

    let collection = GenomeCollection::load(&path).unwrap();
    assert_eq!(collection.len(), 2);
    let record = collection.get("Pba_21A").unwrap();
    assert!(record.groups.contains("atrosepticum"));
    assert!(record.groups.contains("gv1"));
    assert_eq!(record.seqfile, PathBuf::from("seqs/Pba_21A.fasta"));
    assert!(record.features.is_none());
    assert_eq!(collection.groups(), vec!["atrosepticum", "gv1", "wasabiae"]);
}

#[test]
fn test_tab_to_json_and_back() {
    let dir = TempDir::new().unwrap();
    let tab_path = dir.path().join("genomes.tab");
    let json_path = dir.path().join("genomes.json");

    let mut collection = GenomeCollection::new();
    let mut record = GenomeRecord::new("g1", "seqs/g1.fasta");
    record.groups.insert("gv1".to_string());
    record.features = Some(PathBuf::from("out/g1.features"));
    collection.add(record).unwrap();

    collection.save(&tab_path).unwrap();
    let from_tab = GenomeCollection::load(&tab_path).unwrap();
    from_tab.save(&json_path).unwrap();
    let from_json = GenomeCollection::load(&json_path).unwrap();

    assert_eq!(from_json.get("g1").unwrap(), from_tab.get("g1").unwrap());
}

#[test]
fn test_json_carries_fields_tab_cannot() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("genomes.json");

    let mut collection = GenomeCollection::new();
    let mut record = GenomeRecord::new("g1", "seqs/g1.fasta");
    record.fastafname = Some(PathBuf::from("out/g1_named.fasta"));
    record.record_command("blastscreen", "blastn -query out/g1_named.fasta".to_string());
    collection.add(record).unwrap();

    collection.save(&json_path).unwrap();
    let reloaded = GenomeCollection::load(&json_path).unwrap();
    let record = reloaded.get("g1").unwrap();
    assert_eq!(record.fastafname, Some(PathBuf::from("out/g1_named.fasta")));
    assert_eq!(record.last_commands["blastscreen"], "blastn -query out/g1_named.fasta");
}

#[test]
fn test_unrecognized_extension_is_fatal() {
    let result = GenomeCollection::load(std::path::Path::new("genomes.yaml"));
    assert!(matches!(result, Err(PrimedxError::ConfigFormat { .. })));
}

#[test]
fn test_duplicate_genome_names_are_syntax_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("genomes.tab");
    std::fs::write(&path, "g1\tgv1\ta.fasta\ng1\tgv1\tb.fasta\n").unwrap();
    let err = GenomeCollection::load(&path).unwrap_err();
    assert!(matches!(err, PrimedxError::ConfigSyntax { .. }));
    assert!(err.to_string().contains("g1"));
}
