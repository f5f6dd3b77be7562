//! Pipeline orchestrator: decode, analyze, rasterize

pub mod config;
mod orchestrator;

pub use config::PipelineConfig;
pub use orchestrator::ClipPipeline;
