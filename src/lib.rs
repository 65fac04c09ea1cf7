//! # gm-seqload
//!
//! A library for associating gene model sequences with MGI marker identifiers.
//!
//! Gene model providers such as Ensembl publish transcript and protein FASTA
//! files whose definition lines name the gene model each sequence belongs to.
//! MGI already knows which markers those gene models belong to, so every
//! sequence can be linked to its markers by way of its gene model ID.
//!
//! `gm-seqload` builds that link in one pass over the FASTA file:
//!
//! - **Full caches**: gene model ID -> MGI IDs and gene model ID -> sequence
//!   key, each built with one bulk read of the accession table
//! - **Version-insensitive matching**: `ENSMUSG00000000001.4` matches
//!   `ENSMUSG00000000001`
//! - **Classification**: every record is associated, known but unassociated,
//!   or unknown, and the last two are reported for curation
//! - **Atomic output**: the association file only appears once the run has
//!   finished writing it
//!
//! ## Example
//!
//! ```rust,no_run
//! use gm_seqload::{AccessionTable, RunConfig, RunController};
//! use gm_seqload::parsing::fasta::{open_fasta, raw_records};
//! use std::path::Path;
//!
//! let table = AccessionTable::load(
//!     Path::new("accessions.tsv"),
//!     Path::new("logical_dbs.tsv"),
//! ).unwrap();
//! let config = RunConfig::new("ensembl_assoc.txt", "ENSEMBL Gene Model", "Ensembl Protein");
//!
//! let mut reader = open_fasta(Path::new("Mus_musculus.pep.all.fa.gz")).unwrap();
//! let report = RunController::new(config)
//!     .run(&table, raw_records(&mut reader), None)
//!     .unwrap();
//!
//! print!("{}", report.to_text());
//! ```
//!
//! ## Modules
//!
//! - [`store`]: Read-only access to the accession table
//! - [`cache`]: Identifier and sequence key caches
//! - [`core`]: Core data types for records and accessions
//! - [`parsing`]: FASTA input
//! - [`resolve`]: Normalization and classification of records
//! - [`output`]: Association file writing
//! - [`load`]: Run configuration, orchestration, persistence and reporting
//! - [`cli`]: Command-line interface implementation

pub mod cache;
pub mod cli;
pub mod core;
pub mod load;
pub mod output;
pub mod parsing;
pub mod resolve;
pub mod store;

// Re-export commonly used types for convenience
pub use cache::identifier::IdentifierCache;
pub use cache::sequence_key::SequenceKeyCache;
pub use crate::core::record::{NormalizedRecord, RawRecord};
pub use crate::core::types::*;
pub use load::config::RunConfig;
pub use load::controller::RunController;
pub use load::report::RunReport;
pub use load::LoadError;
pub use resolve::resolver::{AssociationResolver, ResolutionOutcome};
pub use store::table::AccessionTable;
pub use store::AccessionSource;
