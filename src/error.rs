//! Error types for ytmerge

use thiserror::Error;

/// Main error type for ytmerge operations
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("No video URL provided")]
    EmptyUrl,

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("No video formats with a quality label and known size are available")]
    NoSelectableFormats,

    #[error("Failed to fetch video information: {0}")]
    MetadataFetch(String),

    #[error("Failed to fetch stream: {0}")]
    StreamFetch(String),

    #[error("Failed to download video or audio: {0}")]
    Download(String),

    #[error("Failed to combine video and audio: {0}")]
    Combine(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad failure category of a [`MergeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input typed by the user; nothing was acquired yet
    UserInput,
    /// The retrieval engine failed to describe or fetch the video
    Retrieval,
    /// The muxing engine reported failure
    Combine,
    /// Missing tools, filesystem trouble and other local problems
    Environment,
}

impl MergeError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MergeError::EmptyUrl
            | MergeError::InvalidSelection(_)
            | MergeError::NoSelectableFormats => ErrorKind::UserInput,
            MergeError::MetadataFetch(_)
            | MergeError::StreamFetch(_)
            | MergeError::Download(_)
            | MergeError::Json(_) => ErrorKind::Retrieval,
            MergeError::Combine(_) => ErrorKind::Combine,
            MergeError::ToolNotFound(_) | MergeError::Io(_) => ErrorKind::Environment,
        }
    }

    /// Check if the temporary stream files are left on disk for inspection
    pub fn keeps_temp_files(&self) -> bool {
        self.kind() == ErrorKind::Combine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_errors() {
        assert_eq!(MergeError::EmptyUrl.kind(), ErrorKind::UserInput);
        assert_eq!(
            MergeError::InvalidSelection("0".to_string()).kind(),
            ErrorKind::UserInput
        );
        assert_eq!(MergeError::NoSelectableFormats.kind(), ErrorKind::UserInput);
    }

    #[test]
    fn test_retrieval_errors() {
        assert_eq!(
            MergeError::MetadataFetch("boom".to_string()).kind(),
            ErrorKind::Retrieval
        );
        assert_eq!(
            MergeError::Download("video stream: boom".to_string()).kind(),
            ErrorKind::Retrieval
        );
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(MergeError::from(json_err).kind(), ErrorKind::Retrieval);
    }

    #[test]
    fn test_only_combine_failures_keep_temp_files() {
        assert!(MergeError::Combine("exit status 1".to_string()).keeps_temp_files());
        assert!(!MergeError::Download("x".to_string()).keeps_temp_files());
        assert!(!MergeError::EmptyUrl.keeps_temp_files());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(!MergeError::from(io).keeps_temp_files());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(MergeError::EmptyUrl.to_string(), "No video URL provided");
        assert_eq!(
            MergeError::ToolNotFound("ffmpeg".to_string()).to_string(),
            "External tool not found: ffmpeg"
        );
    }
}
