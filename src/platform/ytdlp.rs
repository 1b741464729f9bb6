//! yt-dlp retrieval engine

use crate::core::video_info::VideoMetadata;
use crate::error::MergeError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Format selector for the best audio-only stream
pub const BEST_AUDIO: &str = "bestaudio";

/// Something that can describe a video and fetch one of its streams
#[async_trait]
pub trait RetrievalEngine: Send + Sync {
    /// Fetch the consolidated metadata document for a URL
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata, MergeError>;

    /// Fetch the stream matching `format` into `output`
    async fn fetch_stream(&self, url: &str, format: &str, output: &Path)
        -> Result<(), MergeError>;
}

/// Retrieval engine backed by the `yt-dlp` executable
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlp {
    /// Create an engine that runs the given program
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for the metadata request.
    ///
    /// Certificate checks are relaxed on purpose: retrieval success is favoured over strict TLS.
    pub fn metadata_args(url: &str) -> Vec<OsString> {
        ["--dump-single-json", "--no-warnings", "--no-check-certificates", "--", url]
            .into_iter()
            .map(OsString::from)
            .collect()
    }

    /// Arguments for a single stream download
    pub fn stream_args(url: &str, format: &str, output: &Path) -> Vec<OsString> {
        vec![
            OsString::from("--no-warnings"),
            OsString::from("-f"),
            OsString::from(format),
            OsString::from("-o"),
            output.as_os_str().to_owned(),
            OsString::from("--"),
            OsString::from(url),
        ]
    }

    async fn run(&self, args: Vec<OsString>) -> Result<std::process::Output, MergeError> {
        debug!("Running {} {:?}", self.program.display(), args);
        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| spawn_error(&self.program, e))
    }
}

#[async_trait]
impl RetrievalEngine for YtDlp {
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata, MergeError> {
        info!("Fetching video information for {}", url);
        let output = self.run(Self::metadata_args(url)).await?;

        if !output.status.success() {
            return Err(MergeError::MetadataFetch(failure_message(
                output.status,
                &output.stderr,
            )));
        }

        let metadata = VideoMetadata::from_json(&output.stdout)?;
        debug!(
            "Metadata for '{}' lists {} formats",
            metadata.title,
            metadata.formats.len()
        );
        Ok(metadata)
    }

    async fn fetch_stream(
        &self,
        url: &str,
        format: &str,
        output: &Path,
    ) -> Result<(), MergeError> {
        info!("Downloading format '{}' to {}", format, output.display());
        let result = self.run(Self::stream_args(url, format, output)).await?;

        if !result.status.success() {
            return Err(MergeError::StreamFetch(format!(
                "format '{}': {}",
                format,
                failure_message(result.status, &result.stderr)
            )));
        }

        Ok(())
    }
}

/// Map a spawn failure, calling out a missing executable
pub(crate) fn spawn_error(program: &Path, err: std::io::Error) -> MergeError {
    if err.kind() == std::io::ErrorKind::NotFound {
        MergeError::ToolNotFound(format!(
            "{} (install it or point to it with a command-line option)",
            program.display()
        ))
    } else {
        MergeError::Io(err)
    }
}

/// Describe a failed run using the tail of its stderr
pub(crate) fn failure_message(status: std::process::ExitStatus, stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let tail: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let tail = tail[tail.len().saturating_sub(3)..].join(" | ");

    if tail.is_empty() {
        format!("{}", status)
    } else {
        format!("{}: {}", status, tail)
    }
}
