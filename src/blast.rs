//! Scraping top-hit names out of a BLAST text report.

use anyhow::{Context, Result};
use itertools::Itertools;
use std::io::Write;

/// Extracts the top-match description for every query in a BLAST text
/// report and writes the unique names, sorted alphabetically, one per line.
///
/// The top match of a query is the first row of its alignments table: the
/// first non-blank line after the `Description` header row, truncated at the
/// header's `Name` column offset.
pub fn parse_blast_output(input: &str, writer: &mut impl Write) -> Result<Vec<String>> {
    let report =
        std::fs::read_to_string(input).with_context(|| format!("Unable to open file {input}"))?;

    let names = scrape(&report);

    for name in &names {
        writeln!(writer, "{name}")?;
    }

    Ok(names)
}

/// Collects the unique top-hit names of every `Query #` section, sorted
/// alphabetically.
fn scrape(report: &str) -> Vec<String> {
    report
        .split("Query #")
        .filter_map(top_hit)
        .unique()
        .sorted()
        .collect()
}

/// The first alignment-table row of one query section, or `None` when the
/// section has no `Description` header or no `Name` column.
fn top_hit(query: &str) -> Option<String> {
    let mut name_column: Option<usize> = None;

    for line in query.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(column) = name_column {
            let cut = column.min(line.len());
            return Some(line.get(..cut).unwrap_or(line).to_string());
        }

        if line.starts_with("Description") {
            name_column = Some(line.find("Name")?);
        }
    }

    None
}
