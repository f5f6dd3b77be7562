use super::{ArtifactStore, StoredArtifacts};
use crate::model::{ClipArtifacts, ClipId};
use anyhow::Result;
use std::collections::BTreeMap;

/// In-process store, mostly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<ClipId, StoredArtifacts>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ArtifactStore for MemoryStore {
    fn save(&mut self, artifacts: &ClipArtifacts) -> Result<StoredArtifacts> {
        let stored = StoredArtifacts::from_artifacts(artifacts);
        self.entries.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    fn find(&self, id: &ClipId) -> Result<Option<StoredArtifacts>> {
        Ok(self.entries.get(id).cloned())
    }

    fn ids(&self) -> Result<Vec<ClipId>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
