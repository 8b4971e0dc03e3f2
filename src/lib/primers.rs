//! Primer records: parsing, naming, serialization and FASTA derivation.
//!
//! The design tool's raw report is text; parsing it sits behind the
//! [`PrimerOutputParser`] trait so the tool-specific syntax can be swapped
//! or stubbed in tests. [`load_and_name`] turns one raw report into named
//! [`PrimerRecord`]s plus a name-annotated copy of the report;
//! [`to_json`]/[`from_json`] give the lossless durable form consumed by the
//! screening stage, and [`json_to_fasta`] derives the query FASTA from it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use bio::io::fasta;
use serde::{Deserialize, Serialize};

use crate::errors::{PrimedxError, Result};
use crate::jobs::stem_with_extension;

/// One oligo of a primer set: position, length, melting temperature, GC
/// percentage and sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oligo {
    pub start: u64,
    pub length: u64,
    pub tm: f64,
    pub gc: f64,
    pub seq: String,
}

/// One designed primer pair, with an optional internal oligo.
///
/// Immutable after parsing, except for the name assigned by
/// [`load_and_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimerRecord {
    /// `<source-stem>_primer_NNNNN`, assigned in output order from 00001
    pub name: String,
    /// Predicted amplicon length
    pub size: u64,
    pub forward: Oligo,
    pub reverse: Oligo,
    /// Absent when the design tool produced no internal oligo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<Oligo>,
}

/// Parses a design tool's raw text report into primer records, in file
/// order. Names are assigned by the caller, not the parser.
pub trait PrimerOutputParser {
    fn parse(&self, raw: &str, source: &Path) -> Result<Vec<PrimerRecord>>;
}

/// Parser for the EMBOSS ePrimer3 report format: per primer, a product-size
/// line followed by forward/reverse (and optionally internal) oligo lines
/// of the shape `start length Tm GC% sequence`. `#` comment lines are
/// ignored, so the name-annotated output of [`write_named`] parses back to
/// the same records.
#[derive(Debug, Default)]
pub struct Eprimer3Parser;

impl PrimerOutputParser for Eprimer3Parser {
    fn parse(&self, raw: &str, source: &Path) -> Result<Vec<PrimerRecord>> {
        let syntax = |line_no: usize, reason: String| PrimedxError::OutputParse {
            path: source.to_path_buf(),
            reason: format!("line {line_no}: {reason}"),
        };

        let mut primers = Vec::new();
        let mut pending: Option<Pending> = None;
        for (idx, line) in raw.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(size_text) = trimmed.split("PRODUCT SIZE:").nth(1) {
                if let Some(done) = pending.take() {
                    primers.push(done.finish(source)?);
                }
                let size = size_text.trim().parse::<u64>().map_err(|_| {
                    syntax(line_no, format!("bad product size '{}'", size_text.trim()))
                })?;
                pending = Some(Pending::new(size));
            } else if let Some(rest) = strip_oligo_prefix(trimmed, "FORWARD PRIMER") {
                let oligo = parse_oligo(rest).map_err(|reason| syntax(line_no, reason))?;
                pending
                    .as_mut()
                    .ok_or_else(|| syntax(line_no, "forward primer before product size".into()))?
                    .forward = Some(oligo);
            } else if let Some(rest) = strip_oligo_prefix(trimmed, "REVERSE PRIMER") {
                let oligo = parse_oligo(rest).map_err(|reason| syntax(line_no, reason))?;
                pending
                    .as_mut()
                    .ok_or_else(|| syntax(line_no, "reverse primer before product size".into()))?
                    .reverse = Some(oligo);
            } else if let Some(rest) = strip_oligo_prefix(trimmed, "INTERNAL OLIGO") {
                let oligo = parse_oligo(rest).map_err(|reason| syntax(line_no, reason))?;
                pending
                    .as_mut()
                    .ok_or_else(|| syntax(line_no, "internal oligo before product size".into()))?
                    .internal = Some(oligo);
            }
            // Anything else is tool commentary; ignore it
        }
        if let Some(done) = pending.take() {
            primers.push(done.finish(source)?);
        }
        Ok(primers)
    }
}

/// Partially parsed primer entry.
struct Pending {
    size: u64,
    forward: Option<Oligo>,
    reverse: Option<Oligo>,
    internal: Option<Oligo>,
}

impl Pending {
    fn new(size: u64) -> Self {
        Pending { size, forward: None, reverse: None, internal: None }
    }

    fn finish(self, source: &Path) -> Result<PrimerRecord> {
        let missing = |what: &str| PrimedxError::OutputParse {
            path: source.to_path_buf(),
            reason: format!("primer entry is missing its {what} line"),
        };
        Ok(PrimerRecord {
            name: String::new(),
            size: self.size,
            forward: self.forward.ok_or_else(|| missing("forward primer"))?,
            reverse: self.reverse.ok_or_else(|| missing("reverse primer"))?,
            internal: self.internal,
        })
    }
}

fn strip_oligo_prefix<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let (word1, word2) = label.split_once(' ').expect("two-word label");
    let rest = line.strip_prefix(word1)?.trim_start();
    rest.strip_prefix(word2)
}

/// Parse `start length Tm GC% sequence` fields.
fn parse_oligo(fields: &str) -> std::result::Result<Oligo, String> {
    let parts: Vec<&str> = fields.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(format!("expected 5 oligo fields, got {}", parts.len()));
    }
    Ok(Oligo {
        start: parts[0].parse().map_err(|_| format!("bad start '{}'", parts[0]))?,
        length: parts[1].parse().map_err(|_| format!("bad length '{}'", parts[1]))?,
        tm: parts[2].parse().map_err(|_| format!("bad Tm '{}'", parts[2]))?,
        gc: parts[3].parse().map_err(|_| format!("bad GC% '{}'", parts[3]))?,
        seq: parts[4].to_string(),
    })
}

/// Parse a raw design report, assign deterministic names and write the
/// name-annotated copy alongside it.
///
/// Names are `<source-stem>_primer_NNNNN` with the ordinal zero-padded to
/// five digits, counting from 1 in file order; re-running on the same file
/// reproduces identical names and values. Returns the named records and
/// the path of the annotated report (`<source-stem>_named.eprimer3`).
pub fn load_and_name(
    raw_path: &Path,
    parser: &dyn PrimerOutputParser,
) -> Result<(Vec<PrimerRecord>, PathBuf)> {
    let raw = std::fs::read_to_string(raw_path)?;
    let mut primers = parser.parse(&raw, raw_path)?;

    let stem = raw_path.file_stem().and_then(|s| s.to_str()).unwrap_or("primers");
    for (idx, primer) in primers.iter_mut().enumerate() {
        primer.name = format!("{}_primer_{:05}", stem, idx + 1);
    }

    let named_path = raw_path.with_file_name(format!("{stem}_named.eprimer3"));
    write_named(&primers, &named_path)?;
    Ok((primers, named_path))
}

/// Write primer records in the design tool's report format, with each
/// entry preceded by a `# <name>` comment line.
pub fn write_named(primers: &[PrimerRecord], out_path: &Path) -> Result<()> {
    let mut text = String::new();
    let _ = writeln!(text, "# EPRIMER3 PRIMERS {}", out_path.display());
    let _ = writeln!(text, "#                      Start  Len   Tm     GC%   Sequence");
    for (idx, primer) in primers.iter().enumerate() {
        let _ = writeln!(text, "# {}", primer.name);
        let _ = writeln!(text, "{:<4} PRODUCT SIZE: {}", idx + 1, primer.size);
        write_oligo_line(&mut text, "FORWARD PRIMER", &primer.forward);
        write_oligo_line(&mut text, "REVERSE PRIMER", &primer.reverse);
        if let Some(internal) = &primer.internal {
            write_oligo_line(&mut text, "INTERNAL OLIGO", internal);
        }
        text.push('\n');
    }
    std::fs::write(out_path, text)?;
    Ok(())
}

fn write_oligo_line(text: &mut String, label: &str, oligo: &Oligo) {
    let _ = writeln!(
        text,
        "     {}  {:<9}  {:<3}  {:.2}  {:.2}  {}",
        label, oligo.start, oligo.length, oligo.tm, oligo.gc, oligo.seq
    );
}

/// Serialize named primer records to JSON, losslessly.
pub fn to_json(primers: &[PrimerRecord], out_path: &Path) -> Result<()> {
    let writer = std::io::BufWriter::new(std::fs::File::create(out_path)?);
    serde_json::to_writer_pretty(writer, primers)?;
    Ok(())
}

/// Load primer records back from their JSON form.
pub fn from_json(path: &Path) -> Result<Vec<PrimerRecord>> {
    let reader = std::io::BufReader::new(std::fs::File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Derive a multi-sequence FASTA from a JSON primer set, for screening.
///
/// Per primer: `<name>_fwd`, then `<name>_rev`, then `<name>_int` only when
/// the internal oligo exists and its sequence is non-empty. Record order
/// matches primer order; ids carry no description. The output path is the
/// input with its extension replaced by `fasta`.
pub fn json_to_fasta(json_path: &Path) -> Result<PathBuf> {
    let primers = from_json(json_path)?;
    let fasta_path = stem_with_extension(&json_path.with_extension(""), "fasta");
    let mut writer = fasta::Writer::to_file(&fasta_path)?;
    for primer in &primers {
        writer.write(&format!("{}_fwd", primer.name), None, primer.forward.seq.as_bytes())?;
        writer.write(&format!("{}_rev", primer.name), None, primer.reverse.seq.as_bytes())?;
        if let Some(internal) = &primer.internal {
            if !internal.seq.is_empty() {
                writer.write(&format!("{}_int", primer.name), None, internal.seq.as_bytes())?;
            }
        }
    }
    writer.flush()?;
    Ok(fasta_path)
}
