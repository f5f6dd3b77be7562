//! Batch regeneration of clip artifacts
//!
//! Clips are discovered in a fixed order, rendered one at a time and each
//! result is persisted before the next clip starts. A failing clip is logged
//! and recorded in the report; it never stops the clips after it.

use crate::model::AudioClip;
use crate::pipeline::ClipPipeline;
use crate::store::ArtifactStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions picked up by [`discover_clips`] (compared case-insensitively)
pub const CLIP_EXTENSIONS: &[&str] = &["wav", "wave", "aif", "aiff", "aifc"];

/// Find every clip under `dir`, sorted by path
pub fn discover_clips(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Clip directory not found: {:?}", dir);
    }

    let mut clips = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", dir))?;
        if entry.file_type().is_file() && has_clip_extension(entry.path()) {
            clips.push(entry.into_path());
        }
    }

    clips.sort();
    log::debug!("Discovered {} clips under {:?}", clips.len(), dir);
    Ok(clips)
}

fn has_clip_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CLIP_EXTENSIONS.iter().any(|known| e.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Read a clip, labelling it by its path relative to `root` (`/`-separated)
pub fn load_clip(root: &Path, path: &Path) -> Result<AudioClip> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let label = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let bytes = fs::read(path).with_context(|| format!("Failed to read clip {:?}", path))?;
    Ok(AudioClip::new(label, bytes))
}

/// Discover and lazily load every clip under `root`
pub fn clips_in(root: &Path) -> Result<impl ExactSizeIterator<Item = Result<AudioClip>>> {
    let root = root.to_path_buf();
    let paths = discover_clips(&root)?;
    Ok(paths.into_iter().map(move |path| load_clip(&root, &path)))
}

/// One clip that could not be rendered or stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipFailure {
    pub label: String,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Labels of clips whose artifacts were stored, in processing order
    pub succeeded: Vec<String>,
    pub failed: Vec<ClipFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives a pipeline over many clips and persists each result
pub struct BatchRunner<S: ArtifactStore> {
    pipeline: ClipPipeline,
    store: S,
}

impl<S: ArtifactStore> BatchRunner<S> {
    pub fn new(pipeline: ClipPipeline, store: S) -> Self {
        Self { pipeline, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Render and store every clip in order
    ///
    /// Clips that fail to load carry no label of their own; they are reported
    /// under their position in the batch.
    pub fn run<I>(&mut self, clips: I) -> BatchReport
    where
        I: IntoIterator<Item = Result<AudioClip>>,
        I::IntoIter: ExactSizeIterator,
    {
        let clips = clips.into_iter();
        let total = clips.len();
        let mut report = BatchReport::default();

        log::info!("Regenerating artifacts for {} clips", total);

        for (i, clip) in clips.enumerate() {
            let outcome = clip.and_then(|clip| {
                log::info!("[{}/{}] Rendering: {}", i + 1, total, clip.label);
                self.process(&clip).map(|()| clip.label)
            });

            match outcome {
                Ok(label) => report.succeeded.push(label),
                Err(e) => {
                    let label = e
                        .downcast_ref::<LabelledFailure>()
                        .map(|f| f.label.clone())
                        .unwrap_or_else(|| format!("clip #{}", i + 1));
                    log::warn!("[{}/{}] Failed: {}: {:#}", i + 1, total, label, e);
                    report.failed.push(ClipFailure {
                        label,
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        log::info!(
            "Batch complete: {} stored, {} failed",
            report.succeeded.len(),
            report.failed.len()
        );
        report
    }

    fn process(&mut self, clip: &AudioClip) -> Result<()> {
        let artifacts = self
            .pipeline
            .render(clip)
            .context(LabelledFailure::new(&clip.label))?;

        self.store
            .save(&artifacts)
            .context(LabelledFailure::new(&clip.label))?;

        log::debug!("Stored {} as {}", clip.label, artifacts.id);
        Ok(())
    }
}

/// Context attached to per-clip errors so the report can name the clip
#[derive(Debug, thiserror::Error)]
#[error("Failed to process {label}")]
struct LabelledFailure {
    label: String,
}

impl LabelledFailure {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}
