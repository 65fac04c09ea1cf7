use serde::{Deserialize, Serialize};

/// Key of the MGI logical database, the namespace of canonical marker IDs
pub const MGI_LOGICAL_DB: LogicalDbKey = LogicalDbKey(1);

/// Key of a logical database (identifier namespace) in the accession table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogicalDbKey(pub u32);

impl std::fmt::Display for LogicalDbKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal key of the object an accession ID is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey(pub u64);

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of object an accession ID belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MgiType {
    Marker,
    Sequence,
    Other(u32),
}

impl MgiType {
    #[must_use]
    pub fn from_key(key: u32) -> Self {
        match key {
            2 => Self::Marker,
            19 => Self::Sequence,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn key(self) -> u32 {
        match self {
            Self::Marker => 2,
            Self::Sequence => 19,
            Self::Other(key) => key,
        }
    }
}

impl std::fmt::Display for MgiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Marker => write!(f, "marker"),
            Self::Sequence => write!(f, "sequence"),
            Self::Other(key) => write!(f, "type {key}"),
        }
    }
}

/// One (gene model ID, MGI ID) pair from the accession join
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentifierRelation {
    /// Secondary ID, e.g. `ENSMUSG00000064341`
    pub secondary_id: String,
    /// Canonical marker ID, e.g. `MGI:102467`
    pub primary_id: String,
}

impl IdentifierRelation {
    pub fn new(secondary_id: impl Into<String>, primary_id: impl Into<String>) -> Self {
        Self {
            secondary_id: secondary_id.into(),
            primary_id: primary_id.into(),
        }
    }
}
