//! Sequence-to-sequence associations taken from FASTA definition lines.
//!
//! Writes one `seqId1 <TAB> qualifier <TAB> seqId2` line per record, where
//! `seqId1` is the record ID and `seqId2` is the part after the first `:` of
//! the definition-line token at a configured position (the record ID is
//! position 0). For a protein file with position 3:
//!
//! ```text
//! >OTTMUSP00000000697 pep:all chromosome:VEGA37:11:3031884:3093466:-1 Gene:OTTMUSG00000005013
//! OTTMUSP00000000697	translation_of	OTTMUSG00000005013
//! ```

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::core::record::RawRecord;
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum SeqSeqError {
    #[error("Failed to read FASTA input: {0}")]
    Input(#[from] ParseError),

    #[error("Failed to write association: {0}")]
    Output(#[from] io::Error),
}

/// Why a record produced no sequence-to-sequence association
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqSeqSkip {
    MissingToken(usize),
    NoSeparator(String),
}

impl fmt::Display for SeqSeqSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken(position) => write!(f, "no token at position {position}"),
            Self::NoSeparator(token) => write!(f, "token '{token}' has no ':'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqSeqAssociation {
    pub seq_id1: String,
    pub seq_id2: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeqSeqSummary {
    pub written: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct SeqSeqAssociator {
    position: usize,
    qualifier: String,
}

impl SeqSeqAssociator {
    pub fn new(position: usize, qualifier: impl Into<String>) -> Self {
        Self {
            position,
            qualifier: qualifier.into(),
        }
    }

    /// Pair a record's ID with the ID found at the configured position
    ///
    /// # Errors
    ///
    /// Returns a [`SeqSeqSkip`] if the token is missing or has no `:`.
    pub fn associate(&self, record: &RawRecord) -> Result<SeqSeqAssociation, SeqSeqSkip> {
        let token = std::iter::once(record.id.as_str())
            .chain(record.description.split_whitespace())
            .nth(self.position)
            .ok_or(SeqSeqSkip::MissingToken(self.position))?;

        let seq_id2 = token
            .split(':')
            .nth(1)
            .ok_or_else(|| SeqSeqSkip::NoSeparator(token.to_string()))?;

        Ok(SeqSeqAssociation {
            seq_id1: record.id.trim().to_string(),
            seq_id2: seq_id2.trim().to_string(),
        })
    }

    /// Write associations for every record, skipping records without one
    ///
    /// # Errors
    ///
    /// Returns `SeqSeqError::Input` if a record cannot be read, or
    /// `SeqSeqError::Output` if a line cannot be written.
    pub fn write_all<I, W>(&self, records: I, out: &mut W) -> Result<SeqSeqSummary, SeqSeqError>
    where
        I: IntoIterator<Item = Result<RawRecord, ParseError>>,
        W: Write,
    {
        let mut summary = SeqSeqSummary::default();

        for record in records {
            let record = record?;
            match self.associate(&record) {
                Ok(association) => {
                    writeln!(
                        out,
                        "{}\t{}\t{}",
                        association.seq_id1, self.qualifier, association.seq_id2
                    )?;
                    summary.written += 1;
                }
                Err(reason) => {
                    warn!(record = %record.id, %reason, "Skipping sequence");
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }
}
