use super::ClipId;

/// Content type of every image the rasterizer produces
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Encoded image bytes plus their content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl RenderedImage {
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: PNG_CONTENT_TYPE.to_string(),
        }
    }

    /// File extension matching the content type
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            PNG_CONTENT_TYPE => "png",
            _ => "bin",
        }
    }
}

/// Both plots rendered for one clip
#[derive(Debug, Clone)]
pub struct ClipArtifacts {
    pub id: ClipId,
    pub label: String,
    pub waveform: RenderedImage,
    pub spectrogram: RenderedImage,
}
