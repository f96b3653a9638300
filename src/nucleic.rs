//! Validation and stateless transforms over DNA/RNA strings.
//!
//! The transforms assume valid input and never re-check it; [`apply`] is the
//! guarded entry point that validates a sequence exactly once before
//! dispatching.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SequenceError {
    #[error("not a nucleic acid sequence: `{0}`")]
    NotNucleicAcid(String),
}

/// The transforms that can be applied through [`apply`].
#[derive(clap::ValueEnum, Copy, Clone, Debug, PartialEq)]
pub enum Procedure {
    /// Replace thymine with uracil, keeping case
    Transcribe,

    /// Reverse the sequence
    Reverse,

    /// Complement each base, using the RNA map when uracil is present
    Complement,

    /// Complement each base, then reverse
    ReverseComplement,
}

/// Whether `seq` is a DNA or RNA sequence: only `A`, `T`, `U`, `C`, `G`
/// (case-insensitive), and never thymine and uracil together.
pub fn is_nucleic_acid(seq: &str) -> bool {
    let mut has_t = false;
    let mut has_u = false;

    for c in seq.chars() {
        match c.to_ascii_uppercase() {
            'T' => has_t = true,
            'U' => has_u = true,
            'A' | 'C' | 'G' => (),
            _ => return false,
        }
    }

    !(has_t && has_u)
}

/// Transcribes DNA to RNA, replacing `T`/`t` with `U`/`u`.
pub fn transcribe(seq: &str) -> String {
    seq.chars()
        .map(|c| match c {
            'T' => 'U',
            't' => 'u',
            c => c,
        })
        .collect()
}

/// Reverses the sequence.
pub fn reverse(seq: &str) -> String {
    seq.chars().rev().collect()
}

/// Complements each base, keeping case. The RNA map (`A` <-> `U`) is chosen
/// when the sequence contains uracil, the DNA map (`A` <-> `T`) otherwise.
pub fn complement(seq: &str) -> String {
    let rna = seq.chars().any(|c| matches!(c, 'U' | 'u'));
    seq.chars().map(|c| complement_base(c, rna)).collect()
}

/// Complements the sequence, then reverses it.
pub fn reverse_complement(seq: &str) -> String {
    reverse(&complement(seq))
}

// hardcoded matches instead of a lookup table; characters outside the
// selected map pass through unchanged
fn complement_base(c: char, rna: bool) -> char {
    match (c, rna) {
        ('A', false) => 'T',
        ('a', false) => 't',
        ('A', true) => 'U',
        ('a', true) => 'u',
        ('T', false) => 'A',
        ('t', false) => 'a',
        ('U', true) => 'A',
        ('u', true) => 'a',
        ('C', _) => 'G',
        ('c', _) => 'g',
        ('G', _) => 'C',
        ('g', _) => 'c',
        (c, _) => c,
    }
}

/// Validates `seq` once, then dispatches to the requested transform.
///
/// # Errors
///
/// Returns [`SequenceError::NotNucleicAcid`] if the sequence fails
/// [`is_nucleic_acid`]; no transform runs on invalid input.
pub fn apply(procedure: Procedure, seq: &str) -> Result<String, SequenceError> {
    if !is_nucleic_acid(seq) {
        return Err(SequenceError::NotNucleicAcid(seq.to_string()));
    }

    Ok(match procedure {
        Procedure::Transcribe => transcribe(seq),
        Procedure::Reverse => reverse(seq),
        Procedure::Complement => complement(seq),
        Procedure::ReverseComplement => reverse_complement(seq),
    })
}
