//! Output files written by a run.
//!
//! - [`AssociationWriter`]: the two-column `MGI ID <TAB> sequence ID` file
//!   consumed by the association load
//! - [`AtomicFile`]: a file that only appears at its final path once the run
//!   has finished writing it
//!
//! [`AssociationWriter`]: association::AssociationWriter
//! [`AtomicFile`]: atomic::AtomicFile

pub mod association;
pub mod atomic;
