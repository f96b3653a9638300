use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Metadata describing one filter run, written as JSON on request.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct FilterSummary {
    pub seqscrub_version: String,
    pub file_path: String,
    pub run_date: String,
    pub elapsed: f64,
    pub read_count: usize,
    pub kept_reads: usize,
    pub filtered_reads: usize,
    pub avg_qual: f64,
    pub avg_len: f64,
}

impl FilterSummary {
    /// A summary stamped with the tool version, the canonical input path,
    /// and the run date; all counts start at zero.
    pub fn for_input(path: &str) -> Result<Self> {
        Ok(FilterSummary {
            seqscrub_version: crate::cli::VERSION.to_string(),
            file_path: std::fs::canonicalize(path)?.display().to_string(),
            run_date: format!("{:?}", chrono::offset::Local::now()),
            ..FilterSummary::default()
        })
    }

    /// Writes the summary to `path` as pretty-printed JSON.
    pub fn write(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Unable to create summary file {path}"))?;

        serde_json::to_writer_pretty(file, self).context("Could not serialize run summary")
    }
}
