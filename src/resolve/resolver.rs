use std::collections::BTreeSet;
use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::cache::identifier::IdentifierCache;
use crate::cache::sequence_key::SequenceKeyCache;
use crate::core::record::NormalizedRecord;
use crate::output::association::AssociationWriter;

use super::diagnostics::RunDiagnostics;

/// What a record's gene model resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Gene model sequence is in the store and attached to these markers
    Associated {
        mgi_ids: BTreeSet<String>,
        sequence_id: String,
    },
    /// Gene model sequence is in the store but no marker references it
    KnownUnassociated {
        gene_model_id: String,
        sequence_id: String,
    },
    /// Gene model has no sequence in the store
    UnknownGeneModel { gene_model_id: String },
}

impl ResolutionOutcome {
    /// Number of association lines this outcome produces
    pub fn line_count(&self) -> usize {
        match self {
            Self::Associated { mgi_ids, .. } => mgi_ids.len(),
            _ => 0,
        }
    }
}

/// Classifies normalized records against the two caches
#[derive(Debug, Clone, Copy)]
pub struct AssociationResolver<'a> {
    identifiers: &'a IdentifierCache,
    sequence_keys: &'a SequenceKeyCache,
}

impl<'a> AssociationResolver<'a> {
    pub fn new(identifiers: &'a IdentifierCache, sequence_keys: &'a SequenceKeyCache) -> Self {
        Self {
            identifiers,
            sequence_keys,
        }
    }

    /// Decide the outcome for a record without side effects.
    ///
    /// The sequence key cache is consulted first: a gene model that has no
    /// sequence in the store is unknown even if a marker references it.
    pub fn classify(&self, record: &NormalizedRecord) -> ResolutionOutcome {
        if !self.sequence_keys.lookup(&record.gene_model_id) {
            return ResolutionOutcome::UnknownGeneModel {
                gene_model_id: record.gene_model_id.clone(),
            };
        }

        match self.identifiers.get(&record.gene_model_id) {
            Some(mgi_ids) if !mgi_ids.is_empty() => ResolutionOutcome::Associated {
                mgi_ids: mgi_ids.clone(),
                sequence_id: record.sequence_id.clone(),
            },
            _ => ResolutionOutcome::KnownUnassociated {
                gene_model_id: record.gene_model_id.clone(),
                sequence_id: record.sequence_id.clone(),
            },
        }
    }

    /// Classify a record, write its association lines and count it into
    /// `diagnostics`.
    ///
    /// # Errors
    ///
    /// Returns an error if an association line cannot be written.
    pub fn resolve<W: Write>(
        &self,
        record: &NormalizedRecord,
        diagnostics: &mut RunDiagnostics,
        sink: &mut AssociationWriter<W>,
    ) -> io::Result<ResolutionOutcome> {
        let outcome = self.classify(record);

        if let ResolutionOutcome::Associated {
            mgi_ids,
            sequence_id,
        } = &outcome
        {
            for mgi_id in mgi_ids {
                sink.write_association(mgi_id, sequence_id)?;
                diagnostics.associations += 1;
            }
        }

        debug!(
            sequence = %record.sequence_id,
            gene_model = %record.gene_model_id,
            lines = outcome.line_count(),
            "Resolved sequence"
        );

        diagnostics.record_outcome(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{IdentifierRelation, ObjectKey};

    fn record(gene_model_id: &str, sequence_id: &str) -> NormalizedRecord {
        NormalizedRecord {
            gene_model_id: gene_model_id.to_string(),
            sequence_id: sequence_id.to_string(),
            description: String::new(),
            length: 0,
        }
    }

    fn caches() -> (IdentifierCache, SequenceKeyCache) {
        let identifiers = IdentifierCache::from_relations([
            IdentifierRelation::new("G1", "M2"),
            IdentifierRelation::new("G1", "M1"),
            IdentifierRelation::new("G4", "M4"),
        ]);
        let keys = [("G1", ObjectKey(1)), ("G2", ObjectKey(2))]
            .into_iter()
            .collect();
        (identifiers, keys)
    }

    #[test]
    fn test_associated_writes_one_line_per_marker() {
        let (identifiers, keys) = caches();
        let resolver = AssociationResolver::new(&identifiers, &keys);
        let mut diagnostics = RunDiagnostics::new();
        let mut sink = AssociationWriter::new(Vec::new(), "Ensembl Protein").unwrap();

        let outcome = resolver
            .resolve(&record("G1", "S1"), &mut diagnostics, &mut sink)
            .unwrap();

        assert!(matches!(outcome, ResolutionOutcome::Associated { .. }));
        assert_eq!(outcome.line_count(), 2);
        assert_eq!(diagnostics.associations, 2);
        assert_eq!(diagnostics.associated_records, 1);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "MGI\tEnsembl Protein\nM1\tS1\nM2\tS1\n");
    }

    /// Accepts `lines` complete lines, then fails every write
    struct FullDisk {
        lines: usize,
        written: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written >= self.lines {
                return Err(io::Error::other("disk full"));
            }
            self.written += buf.iter().filter(|b| **b == b'\n').count();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_propagates() {
        let (identifiers, keys) = caches();
        let resolver = AssociationResolver::new(&identifiers, &keys);
        let mut diagnostics = RunDiagnostics::new();
        let disk = FullDisk {
            lines: 1,
            written: 0,
        };
        let mut sink = AssociationWriter::new(disk, "Ensembl Protein").unwrap();

        let err = resolver
            .resolve(&record("G1", "S1"), &mut diagnostics, &mut sink)
            .unwrap_err();

        assert_eq!(err.to_string(), "disk full");
        assert_eq!(diagnostics.associations, 0);
        assert_eq!(diagnostics.associated_records, 0);
        assert_eq!(sink.lines(), 0);
    }

    #[test]
    fn test_known_unassociated() {
        let (identifiers, keys) = caches();
        let resolver = AssociationResolver::new(&identifiers, &keys);
        let mut diagnostics = RunDiagnostics::new();
        let mut sink = AssociationWriter::new(Vec::new(), "Ensembl Protein").unwrap();

        let outcome = resolver
            .resolve(&record("G2", "S2"), &mut diagnostics, &mut sink)
            .unwrap();

        assert_eq!(
            outcome,
            ResolutionOutcome::KnownUnassociated {
                gene_model_id: "G2".to_string(),
                sequence_id: "S2".to_string(),
            }
        );
        assert_eq!(diagnostics.associations, 0);
        assert_eq!(diagnostics.gene_models_without_marker.len(), 1);
        assert_eq!(sink.lines(), 0);
    }

    #[test]
    fn test_unknown_even_with_marker() {
        let (identifiers, keys) = caches();
        let resolver = AssociationResolver::new(&identifiers, &keys);

        assert_eq!(
            resolver.classify(&record("G4", "S4")),
            ResolutionOutcome::UnknownGeneModel {
                gene_model_id: "G4".to_string()
            }
        );
        assert_eq!(
            resolver.classify(&record("G9", "S9")),
            ResolutionOutcome::UnknownGeneModel {
                gene_model_id: "G9".to_string()
            }
        );
    }

    #[test]
    fn test_classification_is_exhaustive() {
        let (identifiers, keys) = caches();
        let resolver = AssociationResolver::new(&identifiers, &keys);
        let mut diagnostics = RunDiagnostics::new();
        let mut sink = AssociationWriter::new(Vec::new(), "x").unwrap();

        let records = ["G1", "G2", "G3", "G4", "G1", "G2"];
        let mut expected_lines = 0;
        for (i, gm) in records.iter().enumerate() {
            let outcome = resolver
                .resolve(&record(gm, &format!("S{i}")), &mut diagnostics, &mut sink)
                .unwrap();
            let lines = if keys.lookup(gm) {
                identifiers.lookup(gm).len()
            } else {
                0
            };
            assert_eq!(outcome.line_count(), lines);
            expected_lines += lines;
        }

        assert_eq!(diagnostics.total_records(), records.len());
        assert_eq!(diagnostics.associations, expected_lines);
        assert_eq!(sink.lines(), expected_lines);
    }
}
