//! Per-read composition and quality metrics.

/// Offset between a Phred+33 character's code point and its numeric score.
const PHRED_OFFSET: i64 = 33;

/// GC content of a sequence, as a percentage of its length.
///
/// Only uppercase `G` and `C` are counted: soft-masked (lowercase) bases do
/// not contribute to the percentage. Empty input scores 0.0.
pub fn gc_content(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }

    let gc = seq.bytes().filter(|&b| matches!(b, b'G' | b'C')).count();
    (gc as f64) / (seq.len() as f64) * 100.0
}

/// Mean Phred+33 score over a quality string.
///
/// Each character decodes as `code point - 33`, with no clamping and no
/// alphabet check; the codec guarantees the length of the string, not its
/// contents. Empty input scores 0.0.
pub fn mean_quality(qual: &str) -> f64 {
    if qual.is_empty() {
        return 0.0;
    }

    let total: i64 = qual.bytes().map(|b| b as i64 - PHRED_OFFSET).sum();
    (total as f64) / (qual.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gc_content_of_empty_sequence_is_zero() {
        assert_eq!(gc_content(""), 0.0);
    }

    #[test]
    fn gc_content_percentages() {
        assert_eq!(gc_content("GCGC"), 100.0);
        assert_eq!(gc_content("ATAT"), 0.0);
        assert_eq!(gc_content("ATGC"), 50.0);
    }

    #[test]
    fn gc_content_skips_lowercase_bases() {
        assert_eq!(gc_content("gcGC"), 50.0);
    }

    #[test]
    fn mean_quality_of_empty_string_is_zero() {
        assert_eq!(mean_quality(""), 0.0);
    }

    #[test]
    fn mean_quality_decodes_phred33() {
        // '!' is code point 33, 'I' is 73
        assert_eq!(mean_quality("!!!!"), 0.0);
        assert_eq!(mean_quality("IIII"), 40.0);
        assert_eq!(mean_quality("!I"), 20.0);
    }
}
