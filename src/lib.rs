//! Soundplot - waveform and spectrogram images from PCM audio clips
//!
//! This library decodes uncompressed PCM containers (WAVE, AIFF), extracts
//! an amplitude series and a short-time spectrum, and rasterizes both as PNG
//! plots. Storage and batch regeneration sit on top of the pipeline.

pub mod analysis;
pub mod batch;
pub mod decode;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod store;

pub use batch::{BatchReport, BatchRunner};
pub use error::PipelineError;
pub use model::{AudioClip, ClipArtifacts, ClipId, RenderedImage};
pub use pipeline::{ClipPipeline, PipelineConfig};
pub use store::{ArtifactStore, DirectoryStore, MemoryStore, StoredArtifacts};
