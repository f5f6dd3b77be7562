//! Directory-backed store
//!
//! Layout under the root:
//!
//! ```text
//! <id>/waveform.png
//! <id>/spectrogram.png
//! <id>/artifact.json
//! ```
//!
//! `artifact.json` is written after both images, so an entry without it is
//! incomplete and is not reported.

use super::{ArtifactStore, StoredArtifacts};
use crate::model::{ClipArtifacts, ClipId, RenderedImage};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const RECORD_FILE: &str = "artifact.json";

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactRecord {
    id: ClipId,
    label: String,
    generated_at: DateTime<Utc>,
    waveform: ImageRecord,
    spectrogram: ImageRecord,
}

#[derive(Debug, Serialize, Deserialize)]
struct ImageRecord {
    file: String,
    content_type: String,
}

/// Stores each clip in its own directory under a root
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create store directory {:?}", root))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one clip's files
    pub fn entry_dir(&self, id: &ClipId) -> PathBuf {
        self.root.join(id.as_str())
    }

    fn write_image(dir: &Path, name: &str, image: &RenderedImage) -> Result<ImageRecord> {
        let file = format!("{}.{}", name, image.extension());
        let path = dir.join(&file);
        fs::write(&path, &image.bytes).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(ImageRecord {
            file,
            content_type: image.content_type.clone(),
        })
    }

    fn read_image(dir: &Path, record: &ImageRecord) -> Result<RenderedImage> {
        let path = dir.join(&record.file);
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {:?}", path))?;
        Ok(RenderedImage {
            bytes,
            content_type: record.content_type.clone(),
        })
    }
}

/// Ids become directory names, so only plain names are looked up
fn is_plain_id(id: &ClipId) -> bool {
    !id.as_str().is_empty() && id.as_str().chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl ArtifactStore for DirectoryStore {
    fn save(&mut self, artifacts: &ClipArtifacts) -> Result<StoredArtifacts> {
        let stored = StoredArtifacts::from_artifacts(artifacts);
        let dir = self.entry_dir(&stored.id);

        // Drop any previous record first so a failed rewrite is not reported
        let record_path = dir.join(RECORD_FILE);
        if record_path.exists() {
            fs::remove_file(&record_path)
                .with_context(|| format!("Failed to remove stale record {:?}", record_path))?;
        }
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;

        let record = ArtifactRecord {
            id: stored.id.clone(),
            label: stored.label.clone(),
            generated_at: stored.generated_at,
            waveform: Self::write_image(&dir, "waveform", &stored.waveform)?,
            spectrogram: Self::write_image(&dir, "spectrogram", &stored.spectrogram)?,
        };

        let json = serde_json::to_string_pretty(&record).context("Failed to serialize artifact record")?;
        fs::write(&record_path, json).with_context(|| format!("Failed to write {:?}", record_path))?;

        log::debug!("Stored {} in {:?}", stored.id, dir);
        Ok(stored)
    }

    fn find(&self, id: &ClipId) -> Result<Option<StoredArtifacts>> {
        if !is_plain_id(id) {
            return Ok(None);
        }

        let dir = self.entry_dir(id);
        let record_path = dir.join(RECORD_FILE);
        if !record_path.is_file() {
            return Ok(None);
        }

        let json = fs::read_to_string(&record_path)
            .with_context(|| format!("Failed to read {:?}", record_path))?;
        let record: ArtifactRecord = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {:?}", record_path))?;

        Ok(Some(StoredArtifacts {
            waveform: Self::read_image(&dir, &record.waveform)?,
            spectrogram: Self::read_image(&dir, &record.spectrogram)?,
            id: record.id,
            label: record.label,
            generated_at: record.generated_at,
        }))
    }

    fn ids(&self) -> Result<Vec<ClipId>> {
        let mut ids = Vec::new();
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list store directory {:?}", self.root))?;

        for entry in entries {
            let entry = entry.context("Failed to read store directory entry")?;
            let path = entry.path();
            if !path.join(RECORD_FILE).is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                ids.push(ClipId::new(name));
            }
        }

        ids.sort();
        Ok(ids)
    }
}
