//! Gene model and sequence ID extraction from FASTA definition lines.
//!
//! Gene model provider FASTA files carry the gene model ID as the third
//! whitespace-separated token of the description:
//!
//! ```text
//! >ENSMUSP00000080991.2 pep:known chromosome:NCBIM37:MT:2751:3707:1 gene:ENSMUSG00000064341.1 transcript:ENSMUST00000082392.1
//! >OTTMUSP00000000697 pep:all chromosome:VEGA37:11:3031884:3093466:-1 Gene:OTTMUSG00000005013 Transcript:OTTMUST00000001465
//! ```
//!
//! Both the gene model ID and the record's own ID are compared without their
//! `.version` suffix.

use std::fmt;

use crate::core::record::{NormalizedRecord, RawRecord};

/// Tag in front of the gene model ID, compared ASCII case-insensitively
pub const DEFAULT_GENE_TAG: &str = "gene:";

/// Zero-based position of the gene model token in the description
pub const GENE_TOKEN_INDEX: usize = 2;

/// Remove a trailing version suffix: everything from the first `.` on.
///
/// ```
/// use gm_seqload::resolve::normalize::strip_version;
///
/// assert_eq!(strip_version("ENSMUSG00000064341.1"), "ENSMUSG00000064341");
/// assert_eq!(strip_version("ENSMUSG00000064341"), "ENSMUSG00000064341");
/// ```
#[must_use]
pub fn strip_version(id: &str) -> &str {
    id.split('.').next().unwrap_or(id)
}

/// Why a record was left out of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Description has fewer than three tokens
    TooFewTokens(usize),
    /// Third token does not start with the gene tag
    MissingGeneTag(String),
    /// Gene model or sequence ID is empty once the version is removed
    EmptyIdentifier,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewTokens(n) => write!(f, "description has {n} tokens, expected at least 3"),
            Self::MissingGeneTag(token) => write!(f, "gene token '{token}' has no gene tag"),
            Self::EmptyIdentifier => write!(f, "empty gene model or sequence ID"),
        }
    }
}

/// Extracts normalized IDs from raw FASTA records
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    gene_tag: String,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_GENE_TAG)
    }
}

impl RecordNormalizer {
    pub fn new(gene_tag: impl Into<String>) -> Self {
        Self {
            gene_tag: gene_tag.into(),
        }
    }

    /// Normalize a raw record, or say why it has to be skipped
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] when the description does not carry a
    /// usable gene model ID. Skipping is not fatal to a run.
    pub fn normalize(&self, raw: &RawRecord) -> Result<NormalizedRecord, SkipReason> {
        let tokens: Vec<&str> = raw.description.split_whitespace().collect();
        if tokens.len() <= GENE_TOKEN_INDEX {
            return Err(SkipReason::TooFewTokens(tokens.len()));
        }

        let token = tokens[GENE_TOKEN_INDEX];
        let gene_model_id = self
            .strip_tag(token)
            .ok_or_else(|| SkipReason::MissingGeneTag(token.to_string()))?;

        let gene_model_id = strip_version(gene_model_id);
        let sequence_id = strip_version(&raw.id);
        if gene_model_id.is_empty() || sequence_id.is_empty() {
            return Err(SkipReason::EmptyIdentifier);
        }

        Ok(NormalizedRecord {
            gene_model_id: gene_model_id.to_string(),
            sequence_id: sequence_id.to_string(),
            description: raw.description.clone(),
            length: raw.length(),
        })
    }

    fn strip_tag<'a>(&self, token: &'a str) -> Option<&'a str> {
        let n = self.gene_tag.len();
        let prefix = token.get(..n)?;
        prefix
            .eq_ignore_ascii_case(&self.gene_tag)
            .then(|| &token[n..])
    }
}
