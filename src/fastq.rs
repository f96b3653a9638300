//! Reading and writing four-line FASTQ records.
//!
//! Input is assumed to have exactly four lines per record with no blank
//! separators in between; an empty line where an identifier is expected
//! terminates decoding. A record that breaks the grammar fails the whole
//! decode and discards everything read so far.

use crate::record::{Record, RecordSet};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use thiserror::Error;

/// Violations of the four-line record grammar.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("expected identifier marker: record {record} should begin with '@', got `{line}`")]
    MissingIdentifierMarker { record: usize, line: String },

    #[error("expected separator marker: the third line of record {record} should begin with '+', got `{line}`")]
    MissingSeparatorMarker { record: usize, line: String },

    #[error("length mismatch: record {record} (`{id}`) has {seq_len} bases but {qual_len} quality scores")]
    LengthMismatch {
        record: usize,
        id: String,
        seq_len: usize,
        qual_len: usize,
    },

    #[error("truncated record: end of file in the middle of record {record}")]
    Truncated { record: usize },
}

/// Reads every record of a FASTQ file into an ordered record set.
///
/// # Errors
///
/// Fails with a [`FormatError`] on the first record violating the four-line
/// grammar, in which case no records are returned, or with an I/O error if
/// the file cannot be opened or read.
pub fn read_records(path: &str) -> Result<RecordSet> {
    let file = File::open(path).with_context(|| format!("Unable to open file {path}"))?;

    read_from(BufReader::new(file)).with_context(|| format!("Could not parse FASTQ file {path}"))
}

/// Decodes four-line records from any buffered reader until end of input or
/// an empty identifier line.
pub fn read_from(mut reader: impl BufRead) -> Result<RecordSet> {
    let mut records = RecordSet::new();
    let mut n_records = 0usize;
    let mut header = String::new();

    loop {
        n_records += 1;

        header.clear();
        if reader.read_line(&mut header)? == 0 {
            break;
        }

        // an empty line where an identifier should be is the end of input
        let line = header.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }

        let Some(id) = line.strip_prefix('@') else {
            bail!(FormatError::MissingIdentifierMarker {
                record: n_records,
                line: line.to_string(),
            });
        };
        let id = id.to_string();

        let seq = next_line(&mut reader, n_records)?;

        let separator = next_line(&mut reader, n_records)?;
        if !separator.starts_with('+') {
            bail!(FormatError::MissingSeparatorMarker {
                record: n_records,
                line: separator,
            });
        }

        let qual = next_line(&mut reader, n_records)?;
        if qual.len() != seq.len() {
            bail!(FormatError::LengthMismatch {
                record: n_records,
                id,
                seq_len: seq.len(),
                qual_len: qual.len(),
            });
        }

        records.insert(Record { id, seq, qual });
    }

    records.shrink_to_fit();
    Ok(records)
}

/// Reads one line of the current record, with line terminators trimmed.
fn next_line(reader: &mut impl BufRead, record: usize) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!(FormatError::Truncated { record });
    }

    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Writes the record set to `path` in four-line FASTQ form.
///
/// # Errors
///
/// Fails if the output file cannot be created or written.
pub fn write_records(records: &RecordSet, path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Unable to create file {path}"))?;
    let mut writer = BufWriter::new(file);

    write_to(&mut writer, records).with_context(|| format!("Unable to write to {path}"))?;
    writer
        .flush()
        .with_context(|| format!("Unable to write to {path}"))
}

/// Writes each record as four lines: `@id`, sequence, a bare `+`, quality.
///
/// Any free text that followed the `+` separator in the source file is not
/// reproduced.
pub fn write_to(writer: &mut impl Write, records: &RecordSet) -> std::io::Result<()> {
    for rec in records.iter() {
        writeln!(writer, "@{}\n{}\n+\n{}", rec.id, rec.seq, rec.qual)?;
    }
    Ok(())
}
