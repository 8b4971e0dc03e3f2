//! Sequence-file inspection and normalization.
//!
//! Downstream tools expect each genome's sequence file to hold exactly one
//! FASTA record containing no ambiguity symbol other than N. [`inspect`]
//! reports whether a file meets that invariant; [`stitch`] and
//! [`replace_ambiguities`] rewrite it in place so that it does. Both
//! rewrites are idempotent and atomic (temp file + rename in the same
//! directory).

use std::io::BufWriter;
use std::path::Path;

use bio::io::fasta;
use tempfile::NamedTempFile;

use crate::errors::{PrimedxError, Result};

/// What [`inspect`] found in a sequence file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceReport {
    /// More than one record in the file
    pub needs_stitch: bool,
    /// At least one IUPAC ambiguity symbol other than N present
    pub has_ambiguities: bool,
}

/// True for IUPAC ambiguity symbols other than N, either case.
fn is_ambiguity(base: u8) -> bool {
    matches!(
        base.to_ascii_uppercase(),
        b'B' | b'D' | b'H' | b'K' | b'M' | b'R' | b'S' | b'V' | b'W' | b'Y'
    )
}

fn read_records(path: &Path) -> Result<Vec<fasta::Record>> {
    let reader = fasta::Reader::from_file(path).map_err(|e| PrimedxError::InvalidSequenceFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PrimedxError::InvalidSequenceFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Atomically replace `path` with the given FASTA records.
fn rewrite(path: &Path, records: &[fasta::Record]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = fasta::Writer::new(BufWriter::new(tmp.reopen()?));
        for record in records {
            writer.write(record.id(), record.desc(), record.seq())?;
        }
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Report whether a sequence file needs stitching or ambiguity replacement,
/// without modifying it.
pub fn inspect(path: &Path) -> Result<SequenceReport> {
    let records = read_records(path)?;
    let has_ambiguities =
        records.iter().any(|r| r.seq().iter().copied().any(is_ambiguity));
    Ok(SequenceReport { needs_stitch: records.len() > 1, has_ambiguities })
}

/// Concatenate all records in `path` into one, in file order, with no
/// separator, and overwrite the file. Returns whether a rewrite happened.
///
/// The stitched record's id is `<file-stem>_stitched`. A file with one
/// record (or none) is left untouched, so re-running is a no-op.
pub fn stitch(path: &Path) -> Result<bool> {
    let records = read_records(path)?;
    if records.len() <= 1 {
        return Ok(false);
    }
    let mut sequence = Vec::with_capacity(records.iter().map(|r| r.seq().len()).sum());
    for record in &records {
        sequence.extend_from_slice(record.seq());
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("sequence");
    let stitched = fasta::Record::with_attrs(&format!("{stem}_stitched"), None, &sequence);
    rewrite(path, std::slice::from_ref(&stitched))?;
    Ok(true)
}

/// Replace every ambiguity symbol other than N with N, preserving sequence
/// lengths, record ids and descriptions, and overwrite the file. Returns
/// whether a rewrite happened.
pub fn replace_ambiguities(path: &Path) -> Result<bool> {
    let records = read_records(path)?;
    if !records.iter().any(|r| r.seq().iter().copied().any(is_ambiguity)) {
        return Ok(false);
    }
    let cleaned: Vec<fasta::Record> = records
        .iter()
        .map(|record| {
            let seq: Vec<u8> = record
                .seq()
                .iter()
                .map(|&b| if is_ambiguity(b) { b'N' } else { b })
                .collect();
            fasta::Record::with_attrs(record.id(), record.desc(), &seq)
        })
        .collect();
    rewrite(path, &cleaned)?;
    Ok(true)
}
