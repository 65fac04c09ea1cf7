use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::core::types::{IdentifierRelation, LogicalDbKey};
use crate::resolve::normalize::strip_version;
use crate::store::AccessionSource;

use super::CacheError;

/// Gene model ID -> MGI marker IDs that reference it
///
/// In practice the mapping is close to 1:1, but a gene model can be attached
/// to several markers (and a marker to several gene models), so values are
/// sets. Sets are ordered so association lines and diagnostics come out in a
/// stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierCache {
    relations: HashMap<String, BTreeSet<String>>,
}

impl IdentifierCache {
    /// Build the cache from every marker relation in `gene_model_db`
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Source` if the relations cannot be read.
    pub fn load<S: AccessionSource + ?Sized>(
        source: &S,
        gene_model_db: LogicalDbKey,
    ) -> Result<Self, CacheError> {
        let relations = source
            .marker_relations(gene_model_db)
            .map_err(CacheError::from_store("identifier"))?;

        let cache = Self::from_relations(relations);
        debug!(
            gene_models = cache.len(),
            logical_db = %gene_model_db,
            "Loaded gene model -> MGI ID cache"
        );
        Ok(cache)
    }

    pub fn from_relations(relations: impl IntoIterator<Item = IdentifierRelation>) -> Self {
        Self {
            relations: group_relations(relations),
        }
    }

    /// MGI IDs associated with `secondary_id`, or `None` if it has none
    pub fn get(&self, secondary_id: &str) -> Option<&BTreeSet<String>> {
        self.relations.get(secondary_id)
    }

    /// MGI IDs associated with `secondary_id`; empty if it has none
    pub fn lookup(&self, secondary_id: &str) -> BTreeSet<String> {
        self.get(secondary_id).cloned().unwrap_or_default()
    }

    /// Number of distinct gene model IDs
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

/// Group relation rows by unversioned secondary ID, collecting distinct
/// primary IDs
pub fn group_relations(
    relations: impl IntoIterator<Item = IdentifierRelation>,
) -> HashMap<String, BTreeSet<String>> {
    let mut grouped: HashMap<String, BTreeSet<String>> = HashMap::new();
    for relation in relations {
        grouped
            .entry(strip_version(&relation.secondary_id).to_string())
            .or_default()
            .insert(relation.primary_id);
    }
    grouped
}
