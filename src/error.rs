//! Pipeline error types

use thiserror::Error;

/// Errors produced while turning a clip into its plots.
///
/// Every variant is terminal for the clip being processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Container or codec is not uncompressed PCM
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Truncated or malformed header or sample data
    #[error("Corrupt audio input: {0}")]
    CorruptInput(String),

    /// Fewer mono frames than one analysis window
    #[error("Insufficient samples: {available} frames available, {required} required")]
    InsufficientSamples { available: usize, required: usize },

    /// Analysis parameters out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Canvas could not be created or encoded
    #[error("Image encoding failed: {0}")]
    Encoding(String),
}

impl PipelineError {
    /// Short stable name of the error kind, used in logs and batch reports
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::UnsupportedFormat(_) => "unsupported_format",
            PipelineError::CorruptInput(_) => "corrupt_input",
            PipelineError::InsufficientSamples { .. } => "insufficient_samples",
            PipelineError::InvalidParameter(_) => "invalid_parameter",
            PipelineError::Encoding(_) => "encoding",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::InsufficientSamples {
            available: 10,
            required: 1024,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient samples: 10 frames available, 1024 required"
        );
        assert_eq!(err.kind(), "insufficient_samples");
    }
}
