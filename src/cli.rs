use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

use crate::filter::Bound;
use crate::nucleic::Procedure;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧼 seqscrub version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   tools for filtering and reshaping plain-text sequence files";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a .fastq file by read length, GC content, and mean quality
    #[command(arg_required_else_help = true)]
    Filter {
        /// the input .fastq file
        input: String,

        /// the output .fastq file. its parent directory is created if
        /// missing.
        #[arg(short, default_value = "filtered/filtered.fastq")]
        output: String,

        /// keep reads whose GC percentage falls within the given bound.
        /// a bound is either a single inclusive maximum, or a closed
        /// interval `a,b` (both ends inclusive). an endpoint may also be
        /// `-inf` or `inf`. for example:
        ///     --gc 60
        ///     --gc 40,60
        #[arg(
            long,
            value_parser = |x: &str| Bound::try_from(x),
            default_value = "0,100",
            verbatim_doc_comment
        )]
        gc: Bound,

        /// keep reads whose length falls within the given bound.
        /// see the docs for `--gc` for the bound format.
        #[arg(
            long,
            value_parser = |x: &str| Bound::try_from(x),
            default_value = "0,4294967296",
            verbatim_doc_comment
        )]
        len: Bound,

        /// keep reads whose mean Phred+33 quality is at least this value
        #[arg(long, default_value_t = 0.0)]
        min_qual: f64,

        /// write a JSON summary of the run to this path
        #[arg(long)]
        summary: Option<String>,
    },

    /// Apply a transform to one or more DNA/RNA sequences
    #[command(arg_required_else_help = true)]
    Transform {
        /// the transform to apply
        #[arg(value_enum)]
        procedure: Procedure,

        /// the sequences to transform
        #[arg(required = true)]
        sequences: Vec<String>,

        /// output file; defaults to standard output
        #[arg(short)]
        output: Option<String>,
    },

    /// Concatenate each entry of a multi-line FASTA file onto a single line
    #[command(arg_required_else_help = true)]
    Fasta {
        /// the input .fasta file
        input: String,

        /// output file; defaults to standard output
        #[arg(short)]
        output: Option<String>,
    },

    /// Collect the sorted top-hit names from a BLAST text report
    #[command(arg_required_else_help = true)]
    Blast {
        /// the BLAST report, in text format
        input: String,

        /// output file; defaults to standard output
        #[arg(short)]
        output: Option<String>,
    },
}
