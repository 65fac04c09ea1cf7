use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::resolver::ResolutionOutcome;

/// Run-level counters and follow-up lists, accumulated record by record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunDiagnostics {
    /// Records that were normalized and classified
    pub sequences: usize,

    /// Association lines written
    pub associations: usize,

    /// Records left out by the normalizer
    pub skipped: usize,

    pub associated_records: usize,
    pub known_unassociated_records: usize,
    pub unknown_records: usize,

    /// Gene model IDs with no sequence in the store, with the number of
    /// records that referenced each
    pub gene_models_not_in_store: BTreeMap<String, usize>,

    /// One message per gene model sequence that is in the store but has no
    /// marker association
    pub gene_models_without_marker: BTreeSet<String>,
}

impl RunDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Count a record's outcome into its bucket
    pub fn record_outcome(&mut self, outcome: &ResolutionOutcome) {
        match outcome {
            ResolutionOutcome::Associated { .. } => self.associated_records += 1,
            ResolutionOutcome::KnownUnassociated {
                gene_model_id,
                sequence_id,
            } => {
                self.known_unassociated_records += 1;
                self.gene_models_without_marker
                    .insert(no_marker_message(gene_model_id, sequence_id));
            }
            ResolutionOutcome::UnknownGeneModel { gene_model_id } => {
                self.unknown_records += 1;
                *self
                    .gene_models_not_in_store
                    .entry(gene_model_id.clone())
                    .or_default() += 1;
            }
        }
    }

    /// All records seen, classified or skipped
    pub fn total_records(&self) -> usize {
        self.associated_records + self.known_unassociated_records + self.unknown_records + self.skipped
    }
}

fn no_marker_message(gene_model_id: &str, sequence_id: &str) -> String {
    format!(
        "GM ID not associated with marker: {gene_model_id} therefore SeqID not associated with marker: {sequence_id}"
    )
}
