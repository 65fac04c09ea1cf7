use serde::Serialize;

/// A sequence record as read from the FASTA input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Sequence ID (first word of the definition line), possibly versioned
    pub id: String,

    /// Remainder of the definition line
    pub description: String,

    /// Sequence residues
    pub sequence: Vec<u8>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            sequence: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sequence(mut self, sequence: impl Into<Vec<u8>>) -> Self {
        self.sequence = sequence.into();
        self
    }

    pub fn length(&self) -> usize {
        self.sequence.len()
    }
}

/// A record with its gene model and sequence IDs extracted and unversioned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub gene_model_id: String,
    pub sequence_id: String,
    pub description: String,
    pub length: usize,
}
