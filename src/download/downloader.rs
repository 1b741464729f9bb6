//! Concurrent video + audio stream download

use crate::core::video_info::SanitizedTitle;
use crate::error::MergeError;
use crate::platform::ytdlp::{RetrievalEngine, BEST_AUDIO};
use crate::utils::filename::{audio_temp_name, in_dir, video_temp_name};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The two temporary stream files produced for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempFilePair {
    /// Chosen-quality video stream
    pub video_file: PathBuf,
    /// Best available audio stream
    pub audio_file: PathBuf,
}

impl TempFilePair {
    /// Deterministic temp file names for a title inside `dir`
    pub fn for_title(dir: &Path, title: &SanitizedTitle) -> Self {
        Self {
            video_file: in_dir(dir, video_temp_name(title.as_str())),
            audio_file: in_dir(dir, audio_temp_name(title.as_str())),
        }
    }
}

/// Dual downloader configuration
#[derive(Debug, Clone, Default)]
pub struct DownloaderConfig {
    /// Directory the temp files are written to
    pub output_dir: PathBuf,
    /// Remove the surviving file when only one of the two downloads fails
    pub cleanup_partial: bool,
}

/// Fetches the chosen video stream and the best audio stream side by side
pub struct DualDownloader<R: RetrievalEngine> {
    engine: Arc<R>,
    config: DownloaderConfig,
}

impl<R: RetrievalEngine> DualDownloader<R> {
    /// Create a new dual downloader
    pub fn new(engine: Arc<R>) -> Self {
        Self::with_config(engine, DownloaderConfig::default())
    }

    /// Create a new dual downloader with configuration
    pub fn with_config(engine: Arc<R>, config: DownloaderConfig) -> Self {
        Self { engine, config }
    }

    /// Download both streams concurrently.
    ///
    /// Both requests always run to completion; a failure of one does not cancel
    /// the other. The pair is returned only if both succeeded.
    pub async fn download(
        &self,
        url: &str,
        video_format: &str,
        title: &SanitizedTitle,
    ) -> Result<TempFilePair, MergeError> {
        let pair = TempFilePair::for_title(&self.config.output_dir, title);

        let (video, audio) = tokio::join!(
            self.engine.fetch_stream(url, video_format, &pair.video_file),
            self.engine.fetch_stream(url, BEST_AUDIO, &pair.audio_file),
        );

        match (video, audio) {
            (Ok(()), Ok(())) => {
                info!("Video and audio download complete");
                Ok(pair)
            }
            (video, audio) => {
                let mut reasons = Vec::new();
                if let Err(e) = &video {
                    error!("Video stream download failed: {}", e);
                    reasons.push(format!("video stream: {}", e));
                }
                if let Err(e) = &audio {
                    error!("Audio stream download failed: {}", e);
                    reasons.push(format!("audio stream: {}", e));
                }

                if self.config.cleanup_partial {
                    if video.is_ok() {
                        remove_orphan(&pair.video_file).await;
                    }
                    if audio.is_ok() {
                        remove_orphan(&pair.audio_file).await;
                    }
                }

                Err(MergeError::Download(reasons.join("; ")))
            }
        }
    }
}

async fn remove_orphan(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => info!("Removed orphaned stream file {}", path.display()),
        Err(e) => warn!("Could not remove orphaned stream file {}: {}", path.display(), e),
    }
}
