//! Per-record resolution of gene model IDs to MGI marker IDs.
//!
//! Each FASTA record goes through two steps:
//!
//! 1. [`RecordNormalizer`] pulls the gene model ID out of the description and
//!    strips version suffixes, or skips the record.
//! 2. [`AssociationResolver`] classifies the normalized record:
//!
//! | Gene model sequence in store | Marker references it | Outcome |
//! |------------------------------|----------------------|---------|
//! | no  | -   | `UnknownGeneModel` |
//! | yes | no  | `KnownUnassociated` |
//! | yes | yes | `Associated`, one line per marker |
//!
//! [`SeqSeqAssociator`] is the companion step that pairs each sequence with
//! another ID from its own definition line.
//!
//! [`RecordNormalizer`]: normalize::RecordNormalizer
//! [`AssociationResolver`]: resolver::AssociationResolver
//! [`SeqSeqAssociator`]: seqseq::SeqSeqAssociator

pub mod diagnostics;
pub mod normalize;
pub mod resolver;
pub mod seqseq;
