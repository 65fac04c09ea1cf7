use tracing::{debug, info, warn};

use crate::cache::identifier::IdentifierCache;
use crate::cache::sequence_key::SequenceKeyCache;
use crate::cache::CacheError;
use crate::core::record::RawRecord;
use crate::output::association::AssociationWriter;
use crate::output::atomic::AtomicFile;
use crate::parsing::ParseError;
use crate::resolve::diagnostics::RunDiagnostics;
use crate::resolve::normalize::RecordNormalizer;
use crate::resolve::resolver::{AssociationResolver, ResolutionOutcome};
use crate::store::AccessionSource;

use super::config::{ConfigError, RunConfig};
use super::persist::{SequenceInputFactory, SequencePersister};
use super::report::RunReport;
use super::LoadError;

/// Phase of a load run. Runs only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Processing,
    Finalizing,
    Done,
}

/// Drives one load: builds the caches, classifies each FASTA record, writes
/// the association file and reports.
///
/// ```rust,no_run
/// use gm_seqload::load::config::RunConfig;
/// use gm_seqload::load::controller::RunController;
/// use gm_seqload::parsing::fasta::{open_fasta, raw_records};
/// use gm_seqload::store::table::AccessionTable;
/// use std::path::Path;
///
/// let table = AccessionTable::load(Path::new("accessions.tsv"), Path::new("logical_dbs.tsv")).unwrap();
/// let config = RunConfig::new("assoc.txt", "ENSEMBL Gene Model", "Ensembl Protein");
/// let mut reader = open_fasta(Path::new("Mus_musculus.pep.all.fa")).unwrap();
///
/// let report = RunController::new(config)
///     .run(&table, raw_records(&mut reader), None)
///     .unwrap();
/// println!("{} associations", report.associations());
/// ```
pub struct RunController<'p> {
    config: RunConfig,
    normalizer: RecordNormalizer,
    state: RunState,
    identifiers: IdentifierCache,
    sequence_keys: SequenceKeyCache,
    sink: Option<AssociationWriter<AtomicFile>>,
    persister: Option<&'p mut dyn SequencePersister>,
    inputs: SequenceInputFactory,
    diagnostics: RunDiagnostics,
}

impl<'p> RunController<'p> {
    pub fn new(config: RunConfig) -> Self {
        let inputs =
            SequenceInputFactory::new(config.defaults.clone(), config.sequence_logical_db.clone());
        Self {
            config,
            normalizer: RecordNormalizer::default(),
            state: RunState::Init,
            identifiers: IdentifierCache::default(),
            sequence_keys: SequenceKeyCache::default(),
            sink: None,
            persister: None,
            inputs,
            diagnostics: RunDiagnostics::new(),
        }
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: RecordNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn diagnostics(&self) -> &RunDiagnostics {
        &self.diagnostics
    }

    /// Run all phases over `records`
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; see [`init`](Self::init),
    /// [`process`](Self::process) and [`finalize`](Self::finalize).
    pub fn run<S, I>(
        mut self,
        source: &S,
        records: I,
        persister: Option<&'p mut dyn SequencePersister>,
    ) -> Result<RunReport, LoadError>
    where
        S: AccessionSource + ?Sized,
        I: IntoIterator<Item = Result<RawRecord, ParseError>>,
    {
        self.init(source, persister)?;
        self.process(records)?;
        self.finalize()
    }

    /// Build both caches, open the association file and, when loading,
    /// clear what previous runs persisted.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Cache` if a cache cannot be built,
    /// `LoadError::Config` if loading is enabled without a persister,
    /// `LoadError::Output` if the association file cannot be created, or
    /// `LoadError::Persist` if previous data cannot be removed.
    pub fn init<S: AccessionSource + ?Sized>(
        &mut self,
        source: &S,
        persister: Option<&'p mut dyn SequencePersister>,
    ) -> Result<(), LoadError> {
        self.expect_state(RunState::Init)?;
        info!(
            gene_model_db = %self.config.gene_model_logical_db,
            sequence_db = %self.config.sequence_logical_db,
            load_seqs = self.config.load_seqs,
            "Initializing load"
        );

        if self.config.load_seqs && persister.is_none() {
            return Err(ConfigError::Missing("sequence persister").into());
        }

        let gene_model_db = source
            .logical_db_key(&self.config.gene_model_logical_db)
            .map_err(CacheError::from_store("logical database"))?;
        self.identifiers = IdentifierCache::load(source, gene_model_db)?;
        self.sequence_keys = SequenceKeyCache::load(source, gene_model_db)?;
        info!(
            gene_models_with_markers = self.identifiers.len(),
            gene_model_sequences = self.sequence_keys.len(),
            "Caches loaded"
        );

        let path = &self.config.assoc_file;
        let file = AtomicFile::create(path).map_err(LoadError::output(path))?;
        let sink = AssociationWriter::new(file, &self.config.sequence_logical_db)
            .map_err(LoadError::output(path))?;
        self.sink = Some(sink);

        if self.config.load_seqs {
            self.persister = persister;
            if let Some(persister) = self.persister.as_mut() {
                persister.delete_existing()?;
            }
        }

        self.state = RunState::Processing;
        Ok(())
    }

    /// Process every record in source order
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Input` if a record cannot be read, or any error
    /// from [`process_record`](Self::process_record).
    pub fn process<I>(&mut self, records: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = Result<RawRecord, ParseError>>,
    {
        for record in records {
            self.process_record(&record?)?;
        }
        Ok(())
    }

    /// Normalize, classify and (when loading) persist one record.
    /// Returns `None` if the record was skipped.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Output` if an association line cannot be written,
    /// or `LoadError::Persist` if the persister fails.
    pub fn process_record(
        &mut self,
        raw: &RawRecord,
    ) -> Result<Option<ResolutionOutcome>, LoadError> {
        self.expect_state(RunState::Processing)?;
        debug!(sequence = %raw.id, "Processing sequence");

        let record = match self.normalizer.normalize(raw) {
            Ok(record) => record,
            Err(reason) => {
                warn!(
                    sequence = %raw.id,
                    description = %raw.description,
                    %reason,
                    "Skipping sequence"
                );
                self.diagnostics.record_skip();
                return Ok(None);
            }
        };

        let path = &self.config.assoc_file;
        let sink = self
            .sink
            .as_mut()
            .ok_or(LoadError::State {
                expected: RunState::Processing,
                actual: self.state,
            })?;
        let resolver = AssociationResolver::new(&self.identifiers, &self.sequence_keys);
        let outcome = resolver
            .resolve(&record, &mut self.diagnostics, sink)
            .map_err(LoadError::output(path))?;

        // Unknown gene models are forwarded as well
        if let Some(persister) = self.persister.as_mut() {
            persister.process(&self.inputs.build(&record))?;
        }

        self.diagnostics.sequences += 1;
        Ok(Some(outcome))
    }

    /// Commit the association file, flush the persister and report
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Output` if the association file cannot be
    /// committed, or `LoadError::Persist` if the persister cannot finish.
    pub fn finalize(&mut self) -> Result<RunReport, LoadError> {
        self.expect_state(RunState::Processing)?;
        self.state = RunState::Finalizing;

        let path = &self.config.assoc_file;
        if let Some(sink) = self.sink.take() {
            sink.into_inner().commit().map_err(LoadError::output(path))?;
        }

        if let Some(persister) = self.persister.as_mut() {
            persister.finish()?;
        }

        let report = RunReport::new(self.config.load_seqs, std::mem::take(&mut self.diagnostics));
        report.log();

        self.state = RunState::Done;
        Ok(report)
    }

    fn expect_state(&self, expected: RunState) -> Result<(), LoadError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(LoadError::State {
                expected,
                actual: self.state,
            })
        }
    }
}
