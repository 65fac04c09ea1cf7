//! Full caches built once per run from the accession store.
//!
//! Both caches are populated by a single bulk read of their source before any
//! FASTA record is processed, and are read-only afterwards. They are owned by
//! the run controller and handed to the resolver by reference.
//!
//! - [`IdentifierCache`]: gene model ID -> set of MGI marker IDs
//! - [`SequenceKeyCache`]: gene model ID -> key of the gene model sequence
//!   already in the store
//!
//! [`IdentifierCache`]: identifier::IdentifierCache
//! [`SequenceKeyCache`]: sequence_key::SequenceKeyCache

use thiserror::Error;

use crate::store::StoreError;

pub mod identifier;
pub mod sequence_key;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to build {cache} cache: {source}")]
    Source {
        cache: &'static str,
        #[source]
        source: StoreError,
    },
}

impl CacheError {
    pub(crate) fn from_store(cache: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Source { cache, source }
    }
}
