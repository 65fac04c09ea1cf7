use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::load::config::{require, require_path, ConfigError};
use crate::output::atomic::AtomicFile;
use crate::parsing::fasta::{open_fasta, raw_records};
use crate::resolve::seqseq::SeqSeqAssociator;

#[derive(Args)]
pub struct SeqAssocArgs {
    /// FASTA file to read (optionally gzipped)
    /// Use '-' for stdin
    #[arg(long, default_value = "-")]
    pub fasta: PathBuf,

    /// Sequence association file to write
    #[arg(long, env = "INFILE_SEQASSOCLOAD")]
    pub output: Option<PathBuf>,

    /// Definition-line token holding the second sequence ID (the record ID is 0)
    #[arg(long, env = "SEQ_POSITION")]
    pub seq_position: Option<usize>,

    /// Qualifier written between the two sequence IDs
    #[arg(long, env = "QUALIFIER")]
    pub qualifier: Option<String>,
}

pub fn run(args: SeqAssocArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let output = require_path(args.output, "INFILE_SEQASSOCLOAD")?;
    let position = args
        .seq_position
        .ok_or(ConfigError::Missing("SEQ_POSITION"))?;
    let qualifier = require(args.qualifier, "QUALIFIER")?;

    let mut reader = open_fasta(&args.fasta)
        .with_context(|| format!("Failed to open {}", args.fasta.display()))?;
    let mut file = AtomicFile::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let associator = SeqSeqAssociator::new(position, qualifier);
    let summary = associator.write_all(raw_records(&mut reader), &mut file)?;
    file.commit()
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        written = summary.written,
        skipped = summary.skipped,
        output = %output.display(),
        "Sequence associations written"
    );
    if verbose {
        eprintln!("Wrote {} associations to {}", summary.written, output.display());
    }

    match format {
        OutputFormat::Text => {
            println!("Sequence associations written: {}", summary.written);
            println!("Sequences skipped: {}", summary.skipped);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}
