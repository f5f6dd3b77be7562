//! Artifact persistence
//!
//! The pipeline never touches storage itself. Callers hand the rendered
//! artifacts of a clip to an [`ArtifactStore`], which keys them by clip id
//! and serves them back on lookup.

mod fs;
mod memory;

pub use fs::DirectoryStore;
pub use memory::MemoryStore;

use crate::model::{ClipArtifacts, ClipId, RenderedImage};
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Everything stored for one clip
#[derive(Debug, Clone, PartialEq)]
pub struct StoredArtifacts {
    pub id: ClipId,
    pub label: String,
    pub generated_at: DateTime<Utc>,
    pub waveform: RenderedImage,
    pub spectrogram: RenderedImage,
}

impl StoredArtifacts {
    /// Stamp freshly rendered artifacts with the current time
    pub fn from_artifacts(artifacts: &ClipArtifacts) -> Self {
        Self {
            id: artifacts.id.clone(),
            label: artifacts.label.clone(),
            generated_at: Utc::now(),
            waveform: artifacts.waveform.clone(),
            spectrogram: artifacts.spectrogram.clone(),
        }
    }
}

/// Keyed storage for rendered clip artifacts
pub trait ArtifactStore {
    /// Store (or replace) the artifacts of one clip
    fn save(&mut self, artifacts: &ClipArtifacts) -> Result<StoredArtifacts>;

    /// Look up a clip by id, `None` when nothing is stored under it
    fn find(&self, id: &ClipId) -> Result<Option<StoredArtifacts>>;

    /// All stored ids in ascending order
    fn ids(&self) -> Result<Vec<ClipId>>;
}
