//! Input parsers.
//!
//! - **FASTA**: transcript and protein files from the gene model provider,
//!   streamed record by record
//!
//! The accession table dumps the caches are built from are parsed in
//! [`crate::store::table`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use gm_seqload::parsing::fasta::{open_fasta, raw_records};
//! use std::path::Path;
//!
//! let mut reader = open_fasta(Path::new("Mus_musculus.pep.all.fa.gz")).unwrap();
//! for record in raw_records(&mut reader) {
//!     let record = record.unwrap();
//!     println!("{}\t{}", record.id, record.description);
//! }
//! ```

use thiserror::Error;

pub mod fasta;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),
}
