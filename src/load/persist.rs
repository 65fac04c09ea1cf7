//! Hand-off of processed sequences to the sequence store.
//!
//! The run controller builds a [`SequenceInput`] for every record it
//! classifies and passes it to a [`SequencePersister`]. What the persister
//! does with it is its own business; the controller only cares whether it
//! succeeded. [`JsonLinesPersister`] stages inputs as JSON lines for a
//! downstream bulk load.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::record::NormalizedRecord;
use crate::core::types::MgiType;

use super::config::SequenceDefaults;

/// Status given to every loaded sequence
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Reference association type linking a sequence to its provider publication
pub const PROVIDER_REF_ASSOC: &str = "provider";

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize sequence: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MolecularSource {
    pub organism: String,
    pub strain: String,
    pub tissue: String,
    pub gender: String,
    pub cell_line: String,
    pub library: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryAccession {
    pub accid: String,
    pub logical_db: String,
    pub mgi_type: MgiType,
    pub preferred: bool,
    pub private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceAttributes {
    pub description: String,
    pub length: usize,
    pub seq_type: String,
    pub status: String,
    pub provider: String,
    pub quality: String,
    pub version: Option<String>,
    pub seq_date: Option<String>,
    pub seq_rec_date: Option<String>,
    pub raw_organisms: String,
    pub age: String,
    pub sex: String,
    pub strain: String,
    pub tissue: String,
    pub cell_line: String,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub number_of_organisms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceAssociation {
    pub jnumber: Option<String>,
    pub assoc_type: String,
    pub mgi_type: MgiType,
}

/// Everything the sequence store needs to load one sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceInput {
    pub sources: Vec<MolecularSource>,
    pub primary_accession: PrimaryAccession,
    pub sequence: SequenceAttributes,
    pub references: Vec<ReferenceAssociation>,
}

/// Builds [`SequenceInput`]s from normalized records and the run defaults
#[derive(Debug, Clone)]
pub struct SequenceInputFactory {
    defaults: SequenceDefaults,
    sequence_logical_db: String,
}

impl SequenceInputFactory {
    pub fn new(defaults: SequenceDefaults, sequence_logical_db: impl Into<String>) -> Self {
        Self {
            defaults,
            sequence_logical_db: sequence_logical_db.into(),
        }
    }

    pub fn build(&self, record: &NormalizedRecord) -> SequenceInput {
        let d = &self.defaults;

        SequenceInput {
            sources: vec![MolecularSource {
                organism: d.organism.clone(),
                strain: d.strain.clone(),
                tissue: d.tissue.clone(),
                gender: d.gender.clone(),
                cell_line: d.cell_line.clone(),
                library: None,
            }],
            primary_accession: PrimaryAccession {
                accid: record.sequence_id.clone(),
                logical_db: self.sequence_logical_db.clone(),
                mgi_type: MgiType::Sequence,
                preferred: true,
                private: false,
            },
            sequence: SequenceAttributes {
                description: record.description.clone(),
                length: record.length,
                seq_type: d.seq_type.clone(),
                status: ACTIVE_STATUS.to_string(),
                provider: d.provider.clone(),
                quality: d.quality.clone(),
                version: d.release_no.clone(),
                seq_date: d.release_date.clone(),
                seq_rec_date: d.release_date.clone(),
                raw_organisms: d.organism.clone(),
                age: d.age.clone(),
                sex: d.gender.clone(),
                strain: d.strain.clone(),
                tissue: d.tissue.clone(),
                cell_line: d.cell_line.clone(),
                is_virtual: d.is_virtual,
                number_of_organisms: 0,
            },
            references: vec![ReferenceAssociation {
                jnumber: d.jnumber.clone(),
                assoc_type: PROVIDER_REF_ASSOC.to_string(),
                mgi_type: MgiType::Sequence,
            }],
        }
    }
}

/// Receives sequences from a load run
pub trait SequencePersister {
    /// Remove whatever a previous run of this load persisted
    ///
    /// # Errors
    ///
    /// Returns an error if existing data cannot be removed.
    fn delete_existing(&mut self) -> Result<(), PersistError>;

    /// Persist one sequence
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence cannot be persisted.
    fn process(&mut self, input: &SequenceInput) -> Result<(), PersistError>;

    /// Flush anything pending at the end of the run
    ///
    /// # Errors
    ///
    /// Returns an error if pending data cannot be written.
    fn finish(&mut self) -> Result<(), PersistError>;
}

/// Stages sequences as one JSON object per line
#[derive(Debug)]
pub struct JsonLinesPersister {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    written: usize,
}

impl JsonLinesPersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> usize {
        self.written
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>, PersistError> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => BufWriter::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            ),
        };
        Ok(self.writer.insert(writer))
    }
}

impl SequencePersister for JsonLinesPersister {
    fn delete_existing(&mut self) -> Result<(), PersistError> {
        info!(path = %self.path.display(), "Deleting sequences staged by previous runs");
        self.writer = Some(BufWriter::new(File::create(&self.path)?));
        self.written = 0;
        Ok(())
    }

    fn process(&mut self, input: &SequenceInput) -> Result<(), PersistError> {
        let writer = self.writer()?;
        serde_json::to_writer(&mut *writer, input)?;
        writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), PersistError> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        debug!(sequences = self.written, path = %self.path.display(), "Staged sequences");
        Ok(())
    }
}
