use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{debug, info, warn};

use crate::cache::CacheError;
use crate::cli::OutputFormat;
use crate::load::config::{require, require_path, RunConfig, SequenceDefaults};
use crate::load::controller::RunController;
use crate::load::persist::{JsonLinesPersister, SequencePersister};
use crate::parsing::fasta::{is_fasta_file, open_fasta, raw_records};
use crate::resolve::normalize::{RecordNormalizer, DEFAULT_GENE_TAG};
use crate::store::table::AccessionTable;

#[derive(Args)]
pub struct LoadArgs {
    /// FASTA file of gene model transcripts or proteins (optionally gzipped)
    /// Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Accession table dump (TSV)
    #[arg(long)]
    pub accessions: PathBuf,

    /// Logical database table dump (TSV)
    #[arg(long)]
    pub logical_dbs: PathBuf,

    /// Association file to write
    #[arg(long, env = "INFILE_ASSOCLOAD")]
    pub assoc_file: Option<PathBuf>,

    /// Logical database of the gene model IDs
    #[arg(long, env = "GM_LOGICALDB")]
    pub gm_logical_db: Option<String>,

    /// Logical database of the sequences in the FASTA file
    #[arg(long, env = "SEQ_LOGICALDB")]
    pub seq_logical_db: Option<String>,

    /// Stage every sequence for loading, not just write associations
    #[arg(long, env = "LOAD_SEQS", value_parser = clap::builder::FalseyValueParser::new())]
    pub load_seqs: bool,

    /// Staging file for sequences (required with --load-seqs)
    #[arg(long, env = "SEQ_OUTPUT")]
    pub seq_output: Option<PathBuf>,

    /// JSON file of metadata defaults copied into every staged sequence
    #[arg(long, env = "SEQ_DEFAULTS")]
    pub seq_defaults: Option<PathBuf>,

    /// Definition-line prefix in front of the gene model ID
    #[arg(long, default_value = DEFAULT_GENE_TAG)]
    pub gene_tag: String,
}

pub fn run(args: LoadArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let assoc_file = require_path(args.assoc_file, "INFILE_ASSOCLOAD")?;
    let gm_logical_db = require(args.gm_logical_db, "GM_LOGICALDB")?;
    let seq_logical_db = require(args.seq_logical_db, "SEQ_LOGICALDB")?;
    let seq_output = if args.load_seqs {
        Some(require_path(args.seq_output, "SEQ_OUTPUT")?)
    } else {
        None
    };

    let defaults = match &args.seq_defaults {
        Some(path) => SequenceDefaults::load_from_file(path)
            .with_context(|| format!("Failed to load sequence defaults from {}", path.display()))?,
        None => SequenceDefaults::default(),
    };

    let config = RunConfig::new(assoc_file, gm_logical_db, seq_logical_db)
        .with_load_seqs(args.load_seqs)
        .with_defaults(defaults);

    let table = AccessionTable::load(&args.accessions, &args.logical_dbs)
        .map_err(CacheError::from_store("accession table"))?;
    if verbose {
        eprintln!("Loaded accession table with {} rows", table.len());
    }
    debug!(rows = table.len(), "Accession table loaded");

    if args.input != Path::new("-") && !is_fasta_file(&args.input) {
        warn!(input = %args.input.display(), "Input does not have a FASTA extension");
    }
    let mut reader = open_fasta(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    info!(input = %args.input.display(), "Reading sequences");

    let mut persister = seq_output.map(JsonLinesPersister::new);
    let report = RunController::new(config)
        .with_normalizer(RecordNormalizer::new(args.gene_tag))
        .run(
            &table,
            raw_records(&mut reader),
            persister.as_mut().map(|p| p as &mut dyn SequencePersister),
        )?;

    match format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
