//! Command-line interface for gm-seqload.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **load**: Associate gene model sequences from a FASTA file with MGI
//!   markers and optionally stage the sequences for loading
//! - **seqassoc**: Write sequence-to-sequence associations taken from FASTA
//!   definition lines
//!
//! Every required parameter can be given as a flag or through the
//! environment variable named in `--help`.
//!
//! ## Usage
//!
//! ```text
//! # Write marker associations for Ensembl proteins
//! gm-seqload load Mus_musculus.pep.all.fa.gz \
//!     --accessions accessions.tsv --logical-dbs logical_dbs.tsv \
//!     --assoc-file ensembl_assoc.txt \
//!     --gm-logical-db "ENSEMBL Gene Model" --seq-logical-db "Ensembl Protein"
//!
//! # Same, also staging the sequences, with a JSON report
//! gm-seqload load Mus_musculus.pep.all.fa.gz ... --load-seqs \
//!     --seq-output sequences.jsonl --format json
//!
//! # Protein-to-gene associations from the definition lines
//! zcat Mus_musculus.pep.all.fa.gz | gm-seqload seqassoc \
//!     --output seqassoc.txt --seq-position 3 --qualifier translation_of
//! ```

use clap::{Parser, Subcommand};

pub mod load;
pub mod seqassoc;

#[derive(Parser)]
#[command(name = "gm-seqload")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Associate gene model sequences with MGI markers")]
#[command(
    long_about = "gm-seqload reads transcript or protein FASTA files from a gene model provider and writes the association file that links each sequence to the MGI markers of its gene model.\n\nSequences whose gene model is unknown to MGI, or known but not associated with a marker, are listed in the run report for follow-up."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write MGI marker associations for gene model sequences
    Load(load::LoadArgs),

    /// Write sequence-to-sequence associations from FASTA definition lines
    Seqassoc(seqassoc::SeqAssocArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
