use crate::fastq;
use crate::record::{Record, RecordSet};
use crate::summary::FilterSummary;
use anyhow::{Context, Result};
use std::path::Path;

/// An acceptance range for one scalar metric: either a bare inclusive upper
/// limit, or a closed interval with both endpoints inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Bound {
    Upper(f64),
    Range { min: f64, max: f64 },
}

impl Bound {
    /// Whether `v` falls within the bound. An interval with `min > max`
    /// contains nothing; no normalisation is performed.
    pub fn contains(&self, v: f64) -> bool {
        match *self {
            Bound::Upper(max) => v <= max,
            Bound::Range { min, max } => (min <= v) && (v <= max),
        }
    }
}

/// Error type for parsing a bound string.
#[derive(Debug)]
pub struct ParseBoundErr(String);

impl std::fmt::Display for ParseBoundErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid bound format: {}", self.0)
    }
}

impl std::error::Error for ParseBoundErr {}

impl<'a> TryFrom<&'a str> for Bound {
    type Error = ParseBoundErr;

    fn try_from(arg: &'a str) -> Result<Bound, Self::Error> {
        let arg_lc = arg.to_lowercase();
        let parts: Vec<&str> = arg_lc.split(',').collect();

        match parts.as_slice() {
            [max] => Ok(Bound::Upper(parse_endpoint(max)?)),
            [min, max] => Ok(Bound::Range {
                min: parse_endpoint(min)?,
                max: parse_endpoint(max)?,
            }),
            _ => Err(ParseBoundErr(indoc::formatdoc! {"
            Expected format '<max>' or '<min>,<max>', got '{arg}'. A bound is \
            either a single inclusive maximum or a closed interval, as in:
              --gc 60
              --gc 40,60
              --len 0,inf
            "})),
        }
    }
}

fn parse_endpoint(part: &str) -> Result<f64, ParseBoundErr> {
    match part.trim() {
        "-inf" => Ok(f64::NEG_INFINITY),
        "inf" => Ok(f64::INFINITY),
        s => s.parse::<f64>().map_err(|_| {
            ParseBoundErr(format!(
                "Invalid endpoint: '{s}' (should be any float, `inf`, or `-inf`)"
            ))
        }),
    }
}

/// The acceptance criteria applied to each read.
#[derive(Copy, Clone, Debug)]
pub struct FilterOpts {
    pub gc: Bound,
    pub len: Bound,
    pub min_quality: f64,
}

impl Default for FilterOpts {
    /// The identity filter: every syntactically valid read passes.
    fn default() -> Self {
        FilterOpts {
            gc: Bound::Range {
                min: 0.0,
                max: 100.0,
            },
            len: Bound::Range {
                min: 0.0,
                max: (1u64 << 32) as f64,
            },
            min_quality: 0.0,
        }
    }
}

/// Whether a single read passes every criterion: length bound, GC bound, and
/// mean quality. A mean quality exactly equal to the threshold passes.
pub fn keep(read: &Record, opts: &FilterOpts) -> bool {
    opts.len.contains(read.len() as f64)
        && opts.gc.contains(read.gc_content())
        && read.mean_quality() >= opts.min_quality
}

/// Selects the reads passing `opts` into a fresh set, preserving relative
/// order. Retained records are moved, not copied; excluded ones are dropped
/// silently.
pub fn filter(records: RecordSet, opts: &FilterOpts) -> RecordSet {
    records.into_iter().filter(|r| keep(r, opts)).collect()
}

/// Runs the whole pipeline: decode `input`, filter every read against
/// `opts`, and encode the survivors to `output`. The parent directory of
/// `output` is created first if it does not exist.
///
/// # Errors
///
/// Fails if the input cannot be decoded (see [`fastq::read_records`]) or the
/// output path cannot be created or written. A malformed input file fails
/// the entire operation; nothing is written.
pub fn filter_fastq(input: &str, output: &str, opts: &FilterOpts) -> Result<FilterSummary> {
    let now = std::time::Instant::now();

    let records = fastq::read_records(input)?;

    let mut summary = FilterSummary::for_input(input)?;
    summary.read_count = records.len();

    let mut total_quality = 0.0;
    let mut total_len = 0usize;
    for rec in records.iter() {
        total_quality += rec.mean_quality();
        total_len += rec.len();
    }
    if !records.is_empty() {
        summary.avg_qual = total_quality / (records.len() as f64);
        summary.avg_len = (total_len as f64) / (records.len() as f64);
    }

    let kept = filter(records, opts);
    summary.kept_reads = kept.len();
    summary.filtered_reads = summary.read_count - kept.len();

    if let Some(dir) = Path::new(output).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Unable to create output directory {}", dir.display()))?;
    }

    fastq::write_records(&kept, output)?;

    summary.elapsed = now.elapsed().as_secs_f64();
    info!(
        "Stats: {} reads, {} kept, {} filtered, {:.1}s runtime",
        summary.read_count, summary.kept_reads, summary.filtered_reads, summary.elapsed,
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(id: &str, seq: &str, qual: &str) -> Record {
        Record {
            id: id.to_string(),
            seq: seq.to_string(),
            qual: qual.to_string(),
        }
    }

    #[test]
    fn upper_bound_is_inclusive() {
        assert!(Bound::Upper(10.0).contains(5.0));
        assert!(Bound::Upper(10.0).contains(10.0));
        assert!(!Bound::Upper(10.0).contains(15.0));
    }

    #[test]
    fn range_bound_is_closed() {
        let bound = Bound::Range { min: 0.0, max: 10.0 };
        assert!(bound.contains(5.0));
        assert!(bound.contains(0.0));
        assert!(bound.contains(10.0));
        assert!(!bound.contains(-1.0));
        assert!(!bound.contains(10.5));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let bound = Bound::Range { min: 10.0, max: 0.0 };
        assert!(!bound.contains(5.0));
        assert!(!bound.contains(0.0));
        assert!(!bound.contains(10.0));
    }

    #[test]
    fn parse_single_value_as_upper_bound() {
        assert_eq!(Bound::try_from("60").unwrap(), Bound::Upper(60.0));
    }

    #[test]
    fn parse_pair_as_range() {
        assert_eq!(
            Bound::try_from("40,60").unwrap(),
            Bound::Range { min: 40.0, max: 60.0 }
        );
        assert_eq!(
            Bound::try_from("0,inf").unwrap(),
            Bound::Range {
                min: 0.0,
                max: f64::INFINITY
            }
        );
        assert_eq!(
            Bound::try_from("-inf, 10").unwrap(),
            Bound::Range {
                min: f64::NEG_INFINITY,
                max: 10.0
            }
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Bound::try_from("abc").is_err());
        assert!(Bound::try_from("1,2,3").is_err());
        assert!(Bound::try_from("10,oops").is_err());
    }

    #[test]
    fn default_opts_retain_every_record() {
        let records: RecordSet = [
            read("a", "GCGC", "IIII"),
            read("b", "ATAT", "!!!!"),
            read("c", "", ""),
        ]
        .into_iter()
        .collect();

        let kept = filter(records, &FilterOpts::default());
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn filtering_preserves_relative_order() {
        let records: RecordSet = [
            read("a", "GCGCGCGC", "IIIIIIII"),
            read("b", "AT", "II"),
            read("c", "ATATGCGC", "IIIIIIII"),
        ]
        .into_iter()
        .collect();

        // the length bound excludes only `b`
        let opts = FilterOpts {
            len: Bound::Range { min: 4.0, max: 100.0 },
            ..FilterOpts::default()
        };

        let kept = filter(records, &opts);
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn gc_bound_excludes_out_of_range_reads() {
        let records: RecordSet = [
            read("gc_high", "GCGCGCGC", "IIIIIIII"),
            read("gc_low", "ATATATAT", "IIIIIIII"),
        ]
        .into_iter()
        .collect();

        let opts = FilterOpts {
            gc: Bound::Range { min: 80.0, max: 100.0 },
            ..FilterOpts::default()
        };

        let kept = filter(records, &opts);
        assert!(kept.get("gc_high").is_some());
        assert!(kept.get("gc_low").is_none());
    }

    #[test]
    fn filter_fastq_writes_survivors_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.fastq");
        std::fs::write(&input, "@read_1\nGCGC\n+\nIIII\n@read_2\nATAT\n+\n!!!!\n").unwrap();
        let output = dir.path().join("nested/out.fastq");

        let opts = FilterOpts {
            min_quality: 20.0,
            ..FilterOpts::default()
        };
        let summary =
            filter_fastq(input.to_str().unwrap(), output.to_str().unwrap(), &opts).unwrap();

        assert_eq!(summary.read_count, 2);
        assert_eq!(summary.kept_reads, 1);
        assert_eq!(summary.filtered_reads, 1);
        assert_eq!(summary.avg_len, 4.0);
        assert_eq!(summary.avg_qual, 20.0);

        let written = std::fs::read_to_string(output).unwrap();
        assert_eq!(written, "@read_1\nGCGC\n+\nIIII\n");
    }

    #[test]
    fn quality_exactly_at_threshold_passes() {
        // 'I' decodes to a score of 40
        let rec = read("a", "ACGT", "IIII");

        let at = FilterOpts {
            min_quality: 40.0,
            ..FilterOpts::default()
        };
        let above = FilterOpts {
            min_quality: 40.1,
            ..FilterOpts::default()
        };

        assert!(keep(&rec, &at));
        assert!(!keep(&rec, &above));
    }
}
