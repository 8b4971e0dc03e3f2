//! The durable per-genome state threaded through the pipeline.
//!
//! A [`GenomeCollection`] holds one [`GenomeRecord`] per input genome and is
//! loaded from / persisted to a config file in one of two equivalent forms:
//! a tab-delimited table (`.tab`/`.conf`) or JSON (`.json`). Each stage
//! subcommand reloads the persisted collection, updates the records it is
//! responsible for, and writes the collection back out.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::{PrimedxError, Result};
use crate::sequence;

/// Placeholder for an empty optional column in the tab config form.
const TAB_PLACEHOLDER: &str = "-";

/// The two on-disk config representations, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Tab-delimited table: `name  groups  seqfile  [features]  [primers]`
    Tab,
    /// JSON array of records, carrying every field
    Json,
}

impl ConfigFormat {
    /// Determine the config format from a path's extension.
    ///
    /// `.tab` and `.conf` map to [`ConfigFormat::Tab`], `.json` to
    /// [`ConfigFormat::Json`]. Anything else is a fatal
    /// [`PrimedxError::ConfigFormat`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension {
            "tab" | "conf" => Ok(ConfigFormat::Tab),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(PrimedxError::ConfigFormat {
                path: path.display().to_string(),
                extension: extension.to_string(),
            }),
        }
    }
}

/// State for one genome under analysis.
///
/// Paths filled in by later stages are `None` until that stage has run.
/// Unknown fields in a JSON config are ignored on load so configs written
/// by newer versions remain readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenomeRecord {
    /// Unique identifier, stable across stages
    pub name: String,

    /// Diagnostic group labels this genome belongs to
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub groups: BTreeSet<String>,

    /// Path to the current FASTA sequence for this genome
    pub seqfile: PathBuf,

    /// Predicted coding-sequence output (set by the prodigal stage)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<PathBuf>,

    /// JSON-serialized primer set (set by the eprimer3 stage)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primers: Option<PathBuf>,

    /// FASTA derived from `primers` for screening
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fastafname: Option<PathBuf>,

    /// Audit trail: stage name -> exact command line executed for this
    /// genome. Never read back for control flow.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub last_commands: BTreeMap<String, String>,
}

impl GenomeRecord {
    /// Create a record with only the mandatory fields populated.
    pub fn new(name: impl Into<String>, seqfile: impl Into<PathBuf>) -> Self {
        GenomeRecord {
            name: name.into(),
            groups: BTreeSet::new(),
            seqfile: seqfile.into(),
            features: None,
            primers: None,
            fastafname: None,
            last_commands: BTreeMap::new(),
        }
    }

    /// Whether the current sequence file holds more than one record.
    ///
    /// Computed from the file on every call; never cached, so it cannot go
    /// stale after normalization rewrites the file.
    pub fn needs_stitch(&self) -> Result<bool> {
        Ok(sequence::inspect(&self.seqfile)?.needs_stitch)
    }

    /// Whether the current sequence file contains ambiguity symbols other
    /// than N. Computed from the file on every call.
    pub fn has_ambiguities(&self) -> Result<bool> {
        Ok(sequence::inspect(&self.seqfile)?.has_ambiguities)
    }

    /// Record the command line executed for this genome in a stage.
    pub fn record_command(&mut self, stage: &str, command_line: String) {
        self.last_commands.insert(stage.to_string(), command_line);
    }
}

/// Ordered set of [`GenomeRecord`]s, unique by name.
///
/// Records are iterated in name order, so command batches built from a
/// collection are deterministic across reruns.
#[derive(Debug, Clone, Default)]
pub struct GenomeCollection {
    records: BTreeMap<String, GenomeRecord>,
}

impl GenomeCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        GenomeCollection { records: BTreeMap::new() }
    }

    /// Load a collection from a config file, choosing the parser by
    /// extension.
    pub fn load(path: &Path) -> Result<Self> {
        match ConfigFormat::from_path(path)? {
            ConfigFormat::Tab => Self::from_tab(path),
            ConfigFormat::Json => Self::from_json(path),
        }
    }

    /// Persist the collection, choosing the writer by extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        match ConfigFormat::from_path(path)? {
            ConfigFormat::Tab => self.write_tab(path),
            ConfigFormat::Json => self.write_json(path),
        }
    }

    /// Load from the tab-delimited form.
    ///
    /// Rows hold three to five columns (`name`, `groups`, `seqfile`,
    /// optional `features`, optional `primers`), `-` marks an empty
    /// optional, and lines starting with `#` are comments.
    pub fn from_tab(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .from_path(path)?;

        let mut collection = GenomeCollection::new();
        for row in reader.records() {
            let row = row?;
            if row.len() < 3 || row.len() > 5 {
                return Err(PrimedxError::ConfigSyntax {
                    path: path.display().to_string(),
                    reason: format!(
                        "row must contain 3 to 5 columns, got {} at '{}'",
                        row.len(),
                        row.iter().collect::<Vec<_>>().join("\t")
                    ),
                });
            }
            let mut record = GenomeRecord::new(&row[0], &row[2]);
            record.groups = row[1]
                .split(',')
                .filter(|g| !g.is_empty() && *g != TAB_PLACEHOLDER)
                .map(str::to_string)
                .collect();
            record.features = row.get(3).and_then(optional_path);
            record.primers = row.get(4).and_then(optional_path);
            collection.add(record).map_err(|_| PrimedxError::ConfigSyntax {
                path: path.display().to_string(),
                reason: format!("duplicate genome name '{}'", &row[0]),
            })?;
        }
        Ok(collection)
    }

    /// Load from the JSON form.
    pub fn from_json(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let records: Vec<GenomeRecord> = serde_json::from_reader(reader)?;
        let mut collection = GenomeCollection::new();
        for record in records {
            let name = record.name.clone();
            collection.add(record).map_err(|_| PrimedxError::ConfigSyntax {
                path: path.display().to_string(),
                reason: format!("duplicate genome name '{name}'"),
            })?;
        }
        Ok(collection)
    }

    /// Write the tab-delimited form.
    ///
    /// `fastafname` and `last_commands` have no tab columns; use the JSON
    /// form to carry the complete record.
    pub fn write_tab(&self, path: &Path) -> Result<()> {
        let mut writer =
            csv::WriterBuilder::new().delimiter(b'\t').has_headers(false).from_path(path)?;
        for record in self.records() {
            let groups = if record.groups.is_empty() {
                TAB_PLACEHOLDER.to_string()
            } else {
                record.groups.iter().join(",")
            };
            writer.write_record([
                record.name.as_str(),
                groups.as_str(),
                &record.seqfile.display().to_string(),
                &path_or_placeholder(record.features.as_deref()),
                &path_or_placeholder(record.primers.as_deref()),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the JSON form, carrying every field.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        let records: Vec<&GenomeRecord> = self.records().collect();
        serde_json::to_writer_pretty(writer, &records)?;
        Ok(())
    }

    /// Add a record; fails if a record with the same name already exists.
    pub fn add(&mut self, record: GenomeRecord) -> Result<()> {
        if self.records.contains_key(&record.name) {
            return Err(PrimedxError::InvalidParameter {
                parameter: "name".to_string(),
                reason: format!("duplicate genome name '{}'", record.name),
            });
        }
        self.records.insert(record.name.clone(), record);
        Ok(())
    }

    /// Look up a record by genome name.
    pub fn get(&self, name: &str) -> Option<&GenomeRecord> {
        self.records.get(name)
    }

    /// Mutable lookup by genome name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut GenomeRecord> {
        self.records.get_mut(name)
    }

    /// Iterate records in name order.
    pub fn records(&self) -> impl Iterator<Item = &GenomeRecord> {
        self.records.values()
    }

    /// Iterate records mutably, in name order.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut GenomeRecord> {
        self.records.values_mut()
    }

    /// Sorted list of all diagnostic groups represented in the collection.
    pub fn groups(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.records.values().flat_map(|r| &r.groups).collect();
        set.into_iter().cloned().collect()
    }

    /// Number of genomes in the collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no genomes.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn optional_path(field: &str) -> Option<PathBuf> {
    if field.is_empty() || field == TAB_PLACEHOLDER {
        None
    } else {
        Some(PathBuf::from(field))
    }
}

fn path_or_placeholder(path: Option<&Path>) -> String {
    path.map_or_else(|| TAB_PLACEHOLDER.to_string(), |p| p.display().to_string())
}
