//! Helper utilities for integration tests.

use std::path::{Path, PathBuf};

use primedx_lib::collection::{GenomeCollection, GenomeRecord};

/// Writes a FASTA file with the given (id, sequence) records.
pub fn write_fasta(path: &Path, records: &[(&str, &str)]) {
    let mut text = String::new();
    for (id, seq) in records {
        text.push('>');
        text.push_str(id);
        text.push('\n');
        text.push_str(seq);
        text.push('\n');
    }
    std::fs::write(path, text).unwrap();
}

/// Builds a collection of genomes, each backed by a real single-record
/// FASTA file in `dir`.
pub fn genome_collection(dir: &Path, genomes: &[(&str, &str)]) -> GenomeCollection {
    let mut collection = GenomeCollection::new();
    for (name, seq) in genomes {
        let seqfile = dir.join(format!("{name}.fasta"));
        write_fasta(&seqfile, &[(name, seq)]);
        collection.add(GenomeRecord::new(*name, seqfile)).unwrap();
    }
    collection
}

/// Writes an executable shell script standing in for an external tool and
/// returns its path.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// A fake predictor honoring `-a <features> -i <seqfile> -o <log>`: it
/// creates both output files.
#[cfg(unix)]
pub fn fake_prodigal(dir: &Path) -> PathBuf {
    fake_tool(dir, "prodigal", r#"touch "$2" "$6""#)
}

/// A fake designer honoring `-auto -sequence <seq> -outfile <report>`: it
/// writes a fixed two-primer report.
#[cfg(unix)]
pub fn fake_eprimer3(dir: &Path) -> PathBuf {
    fake_tool(
        dir,
        "eprimer3",
        r#"cat > "$5" <<'EOF'
   1 PRODUCT SIZE: 180
     FORWARD PRIMER       726   20  59.95  55.00  CCGGCAGATGAGATTCAGAC
     REVERSE PRIMER       885   20  60.11  55.00  TTGTGCTGGATGCGGTTAAG

   2 PRODUCT SIZE: 120
     FORWARD PRIMER       100   20  59.00  50.00  ACGTACGTACGTACGTACGT
     REVERSE PRIMER       200   20  58.50  45.00  TGCATGCATGCATGCATGCA
EOF"#,
    )
}

/// A fake screener honoring `-query .. -db .. -out <hits> ..`: it creates
/// an empty hit table.
#[cfg(unix)]
pub fn fake_blastn(dir: &Path) -> PathBuf {
    fake_tool(dir, "blastn", r#"touch "$6""#)
}
