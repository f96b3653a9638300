extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
};

use anyhow::Result;
use clap::Parser;

mod blast;
mod cli;
mod fasta;
mod fastq;
mod filter;
mod metrics;
mod nucleic;
mod record;
mod summary;

use cli::{Cli, Commands};
use filter::FilterOpts;

/// Creates a `BufWriter` for the given output option: a file at the given
/// path if `output` is `Some`, standard output otherwise.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Filter {
            input,
            output,
            gc,
            len,
            min_qual,
            summary,
        } => {
            let opts = FilterOpts {
                gc: *gc,
                len: *len,
                min_quality: *min_qual,
            };

            let run = filter::filter_fastq(input, output, &opts)?;

            if let Some(path) = summary {
                run.write(path)?;
                info!("Wrote run summary to {path}");
            }

            info!("Completed successfully.")
        }
        Commands::Transform {
            procedure,
            sequences,
            output,
        } => {
            let mut writer = get_writer(output)?;

            for seq in sequences {
                let transformed = nucleic::apply(*procedure, seq)?;
                writeln!(writer, "{transformed}")?;
            }
            writer.flush()?;
        }
        Commands::Fasta { input, output } => {
            let mut writer = get_writer(output)?;

            let entries = fasta::flatten(input, &mut writer)?;
            writer.flush()?;

            info!("Flattened {} entries from {input}", entries.len());
        }
        Commands::Blast { input, output } => {
            let mut writer = get_writer(output)?;

            let names = blast::parse_blast_output(input, &mut writer)?;
            writer.flush()?;

            info!("Collected {} unique top hits from {input}", names.len());
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
