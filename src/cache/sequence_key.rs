use std::collections::HashMap;

use tracing::debug;

use crate::core::types::{LogicalDbKey, ObjectKey};
use crate::resolve::normalize::strip_version;
use crate::store::AccessionSource;

use super::CacheError;

/// Unversioned gene model ID -> key of the gene model sequence already in
/// the store
#[derive(Debug, Clone, Default)]
pub struct SequenceKeyCache {
    keys: HashMap<String, ObjectKey>,
}

impl SequenceKeyCache {
    /// Build the cache from every gene model sequence in `gene_model_db`
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Source` if the sequence accessions cannot be read.
    pub fn load<S: AccessionSource + ?Sized>(
        source: &S,
        gene_model_db: LogicalDbKey,
    ) -> Result<Self, CacheError> {
        let keys = source
            .sequence_keys(gene_model_db)
            .map_err(CacheError::from_store("sequence key"))?;

        let cache: Self = keys.into_iter().collect();
        debug!(
            sequences = cache.len(),
            logical_db = %gene_model_db,
            "Loaded gene model sequence key cache"
        );
        Ok(cache)
    }

    pub fn get(&self, gene_model_id: &str) -> Option<ObjectKey> {
        self.keys.get(gene_model_id).copied()
    }

    pub fn lookup(&self, gene_model_id: &str) -> bool {
        self.keys.contains_key(gene_model_id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ObjectKey)> for SequenceKeyCache {
    fn from_iter<I: IntoIterator<Item = (S, ObjectKey)>>(iter: I) -> Self {
        Self {
            keys: iter
                .into_iter()
                .map(|(id, key)| {
                    let id: String = id.into();
                    (strip_version(&id).to_string(), key)
                })
                .collect(),
        }
    }
}
