//! Core data types shared by the loader.
//!
//! - [`RawRecord`]: a FASTA record as it arrives from the input stream
//! - [`NormalizedRecord`]: the same record with gene model and sequence IDs
//!   extracted and their version suffixes removed
//! - [`IdentifierRelation`]: a (gene model ID, MGI ID) pair from the accession join
//! - [`LogicalDbKey`], [`ObjectKey`], [`MgiType`]: accession table vocabulary
//!
//! [`RawRecord`]: record::RawRecord
//! [`NormalizedRecord`]: record::NormalizedRecord
//! [`IdentifierRelation`]: types::IdentifierRelation
//! [`LogicalDbKey`]: types::LogicalDbKey
//! [`ObjectKey`]: types::ObjectKey
//! [`MgiType`]: types::MgiType

pub mod record;
pub mod types;
