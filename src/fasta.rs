//! Flattening multi-line FASTA entries onto single sequence lines.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

/// Reads a multi-line FASTA file, concatenates each entry's sequence lines,
/// and writes one `>name` / sequence pair per entry to `writer`.
///
/// Returns the flattened entries in file order, keyed by header with the `>`
/// marker stripped. Duplicate headers keep the later entry.
pub fn flatten(input: &str, writer: &mut impl Write) -> Result<IndexMap<String, String>> {
    let file = File::open(input).with_context(|| format!("Unable to open file {input}"))?;

    let sequences = flatten_from(BufReader::new(file))
        .with_context(|| format!("Could not read FASTA file {input}"))?;

    for (name, seq) in &sequences {
        writeln!(writer, ">{name}\n{seq}")?;
    }

    Ok(sequences)
}

/// Collects header-keyed, single-line sequences from any buffered reader.
///
/// Blank lines are skipped, sequence lines before the first header are
/// ignored, and a header with no sequence lines produces no entry.
pub fn flatten_from(reader: impl BufRead) -> std::io::Result<IndexMap<String, String>> {
    let mut sequences: IndexMap<String, String> = IndexMap::new();
    let mut name: Option<String> = None;
    let mut seq = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(prev) = name.take() {
                if !seq.is_empty() {
                    sequences.insert(prev, std::mem::take(&mut seq));
                }
            }
            seq.clear();
            name = Some(header.to_string());
        } else if name.is_some() {
            seq.push_str(line);
        }
    }

    if let Some(prev) = name {
        if !seq.is_empty() {
            sequences.insert(prev, seq);
        }
    }

    Ok(sequences)
}
