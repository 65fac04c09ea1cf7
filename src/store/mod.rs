//! Read-only access to the accession table the caches are built from.
//!
//! The loader never talks to a database directly. Everything it needs from
//! the store goes through [`AccessionSource`], which answers three questions:
//!
//! - which key a logical database name maps to
//! - which (gene model ID, MGI ID) pairs exist for a gene model namespace
//! - which gene model sequences already exist in a namespace
//!
//! [`AccessionTable`] implements it over tab-separated dumps of the
//! accession and logical database tables.
//!
//! [`AccessionTable`]: table::AccessionTable

use thiserror::Error;

use crate::core::types::{IdentifierRelation, LogicalDbKey, ObjectKey};

pub mod table;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid accession table format: {0}")]
    InvalidFormat(String),

    #[error("Unknown logical database: '{0}'")]
    UnknownLogicalDb(String),
}

/// A queryable source of accession rows
pub trait AccessionSource {
    /// Resolve a logical database name to its key
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownLogicalDb` if no logical database has this name.
    fn logical_db_key(&self, name: &str) -> Result<LogicalDbKey, StoreError>;

    /// All (gene model ID, MGI ID) pairs where both IDs are preferred marker
    /// accessions of the same object, the MGI ID lives in the MGI logical
    /// database and the gene model ID lives in `gene_model_db`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying rows cannot be read.
    fn marker_relations(
        &self,
        gene_model_db: LogicalDbKey,
    ) -> Result<Vec<IdentifierRelation>, StoreError>;

    /// All preferred sequence accessions in `gene_model_db`, with the key of
    /// the sequence they identify.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying rows cannot be read.
    fn sequence_keys(
        &self,
        gene_model_db: LogicalDbKey,
    ) -> Result<Vec<(String, ObjectKey)>, StoreError>;
}
