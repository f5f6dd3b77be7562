use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a clip and of the artifacts rendered from it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    /// Derive the id from a clip label (lowercase hex MD5)
    pub fn from_label(label: &str) -> Self {
        Self(format!("{:x}", md5::compute(label.as_bytes())))
    }

    /// Wrap an id that was produced elsewhere (e.g. typed on the command line)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One input clip: a label plus the raw bytes of its PCM container
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Identifier the artifacts are stored under
    pub id: ClipId,

    /// Human-readable name (usually the file name relative to the clip root)
    pub label: String,

    /// Raw container bytes (header + samples)
    pub bytes: Vec<u8>,
}

impl AudioClip {
    /// Create a clip whose id is derived from its label
    pub fn new(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        let label = label.into();
        Self {
            id: ClipId::from_label(&label),
            label,
            bytes,
        }
    }
}
