use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required parameter {0}")]
    Missing(&'static str),

    #[error("Failed to read sequence defaults: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse sequence defaults: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Unwrap a required parameter, naming it if it is missing
///
/// # Errors
///
/// Returns `ConfigError::Missing` with `name` if `value` is `None` or blank.
pub fn require<T: AsRef<str>>(value: Option<T>, name: &'static str) -> Result<T, ConfigError> {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Same as [`require`] for path parameters
///
/// # Errors
///
/// Returns `ConfigError::Missing` with `name` if `value` is `None` or empty.
pub fn require_path(value: Option<PathBuf>, name: &'static str) -> Result<PathBuf, ConfigError> {
    value
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Metadata copied unchanged into every persisted sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceDefaults {
    pub organism: String,
    pub strain: String,
    pub tissue: String,
    pub gender: String,
    pub cell_line: String,
    pub age: String,
    pub provider: String,
    pub quality: String,
    pub seq_type: String,
    pub release_date: Option<String>,
    pub release_no: Option<String>,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub jnumber: Option<String>,
}

const NOT_SPECIFIED: &str = "Not Specified";

impl Default for SequenceDefaults {
    fn default() -> Self {
        Self {
            organism: "mouse, laboratory".to_string(),
            strain: NOT_SPECIFIED.to_string(),
            tissue: NOT_SPECIFIED.to_string(),
            gender: NOT_SPECIFIED.to_string(),
            cell_line: NOT_SPECIFIED.to_string(),
            age: NOT_SPECIFIED.to_string(),
            provider: NOT_SPECIFIED.to_string(),
            quality: "High".to_string(),
            seq_type: "Not Loaded".to_string(),
            release_date: None,
            release_no: None,
            is_virtual: true,
            jnumber: None,
        }
    }
}

impl SequenceDefaults {
    /// Load defaults from a JSON file; missing fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read, or
    /// `ConfigError::ParseError` if it is not valid JSON for this type.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Settings for one load run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Where the association file is written
    pub assoc_file: PathBuf,

    /// Logical database of the gene model IDs
    pub gene_model_logical_db: String,

    /// Logical database of the FASTA sequences; names the second column
    pub sequence_logical_db: String,

    /// Hand every sequence to the persister, not just write associations
    pub load_seqs: bool,

    pub defaults: SequenceDefaults,
}

impl RunConfig {
    pub fn new(
        assoc_file: impl Into<PathBuf>,
        gene_model_logical_db: impl Into<String>,
        sequence_logical_db: impl Into<String>,
    ) -> Self {
        Self {
            assoc_file: assoc_file.into(),
            gene_model_logical_db: gene_model_logical_db.into(),
            sequence_logical_db: sequence_logical_db.into(),
            load_seqs: false,
            defaults: SequenceDefaults::default(),
        }
    }

    #[must_use]
    pub fn with_load_seqs(mut self, load_seqs: bool) -> Self {
        self.load_seqs = load_seqs;
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: SequenceDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}
