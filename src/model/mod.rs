//! Data model shared by every pipeline stage
//!
//! All of these are created and consumed within a single pipeline run,
//! except `RenderedImage` which is handed to the caller for persistence.

mod artifact;
mod audio;
mod clip;
mod series;
mod spectrogram;

pub use artifact::{ClipArtifacts, RenderedImage, PNG_CONTENT_TYPE};
pub use audio::{DecodedAudio, Endianness, SampleLayout};
pub use clip::{AudioClip, ClipId};
pub use series::{AmplitudePoint, AmplitudeSeries};
pub use spectrogram::{SpectralFrame, Spectrogram};
