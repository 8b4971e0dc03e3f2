//! In-place sequence normalization on disk: stitching, ambiguity
//! replacement, and their idempotence.

use primedx_lib::sequence;
use tempfile::TempDir;

use crate::helpers::write_fasta;

#[test]
fn test_fix_then_refix_is_byte_stable() {
    let dir = TempDir::new().unwrap();
    let seqfile = dir.path().join("genome.fasta");
    write_fasta(&seqfile, &[("contig1", "ACGTRY"), ("contig2", "ggbwcc")]);

    assert!(sequence::stitch(&seqfile).unwrap());
    assert!(sequence::replace_ambiguities(&seqfile).unwrap());
    let after_first = std::fs::read(&seqfile).unwrap();

    // Second pass finds nothing to do and changes nothing
    assert!(!sequence::stitch(&seqfile).unwrap());
    assert!(!sequence::replace_ambiguities(&seqfile).unwrap());
    assert_eq!(std::fs::read(&seqfile).unwrap(), after_first);

    let report = sequence::inspect(&seqfile).unwrap();
    assert!(!report.needs_stitch);
    assert!(!report.has_ambiguities);
}

#[test]
fn test_stitch_concatenates_in_file_order() {
    let dir = TempDir::new().unwrap();
    let seqfile = dir.path().join("genome.fasta");
    write_fasta(&seqfile, &[("z_last", "GGGG"), ("a_first", "TTTT")]);

    sequence::stitch(&seqfile).unwrap();

    let reader = bio::io::fasta::Reader::from_file(&seqfile).unwrap();
    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    // File order, not name order
    assert_eq!(records[0].seq(), b"GGGGTTTT");
    assert_eq!(records[0].id(), "genome_stitched");
}

#[test]
fn test_replacement_preserves_length_and_case_handling() {
    let dir = TempDir::new().unwrap();
    let seqfile = dir.path().join("genome.fasta");
    write_fasta(&seqfile, &[("c", "AbCdRyKmN")]);

    sequence::replace_ambiguities(&seqfile).unwrap();

    let reader = bio::io::fasta::Reader::from_file(&seqfile).unwrap();
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(record.seq().len(), 9);
    // b, d, R, y, K, m replaced regardless of case; A, C and N kept
    assert_eq!(record.seq(), b"ANCNNNNNN");
}

#[test]
fn test_single_record_clean_file_untouched() {
    let dir = TempDir::new().unwrap();
    let seqfile = dir.path().join("genome.fasta");
    write_fasta(&seqfile, &[("only", "ACGTN")]);
    let before = std::fs::read(&seqfile).unwrap();

    assert!(!sequence::stitch(&seqfile).unwrap());
    assert!(!sequence::replace_ambiguities(&seqfile).unwrap());
    assert_eq!(std::fs::read(&seqfile).unwrap(), before);
}
