//! Video information structures

use crate::utils::filename::sanitize_title;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Codec marker the retrieval engine uses for streams without video
pub const NO_VIDEO_CODEC: &str = "none";

/// Video information as reported by the retrieval engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title
    pub title: String,
    /// Available formats, in the order the engine reported them
    #[serde(default)]
    pub formats: Vec<FormatDescriptor>,
}

impl VideoMetadata {
    /// Create a new VideoMetadata
    pub fn new(title: impl Into<String>, formats: Vec<FormatDescriptor>) -> Self {
        Self {
            title: title.into(),
            formats,
        }
    }

    /// Parse the engine's single consolidated JSON document
    pub fn from_json(json: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(json)
    }

    /// Title with filesystem-illegal characters removed
    pub fn sanitized_title(&self) -> SanitizedTitle {
        SanitizedTitle::new(&self.title)
    }
}

/// One quality/codec variant of a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Engine format identifier
    pub format_id: String,
    /// Human-readable quality label (e.g. "720p")
    #[serde(default)]
    pub format_note: Option<String>,
    /// Container extension
    #[serde(rename = "ext", default)]
    pub extension: String,
    /// File size in bytes (if known)
    #[serde(rename = "filesize", default, deserialize_with = "deserialize_size")]
    pub size: Option<u64>,
    /// Video codec, `"none"` for audio-only streams
    #[serde(rename = "vcodec", default)]
    pub video_codec: Option<String>,
}

impl FormatDescriptor {
    /// Create a new FormatDescriptor
    pub fn new(format_id: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            format_id: format_id.into(),
            format_note: None,
            extension: extension.into(),
            size: None,
            video_codec: None,
        }
    }

    /// Set quality label
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.format_note = Some(note.into());
        self
    }

    /// Set size in bytes
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set video codec
    pub fn with_video_codec(mut self, codec: impl Into<String>) -> Self {
        self.video_codec = Some(codec.into());
        self
    }

    /// Check if this format carries a video stream
    pub fn has_video(&self) -> bool {
        self.video_codec.as_deref() != Some(NO_VIDEO_CODEC)
    }

    /// Non-empty quality label
    pub fn quality_label(&self) -> Option<&str> {
        self.format_note.as_deref().filter(|note| !note.is_empty())
    }

    /// Non-zero size in bytes
    pub fn known_size(&self) -> Option<u64> {
        self.size.filter(|size| *size > 0)
    }

    /// Size in mebibytes
    pub fn size_mib(&self) -> Option<f64> {
        self.known_size().map(|size| size as f64 / 1_048_576.0)
    }
}

/// `filesize` may arrive as an integer, a float or null
fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
}

/// A video title safe to embed in file names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedTitle(String);

impl SanitizedTitle {
    /// Sanitize a raw title
    pub fn new(raw: &str) -> Self {
        Self(sanitize_title(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
