//! Merge the downloaded streams into the final file

use crate::download::TempFilePair;
use crate::error::MergeError;
use crate::platform::ffmpeg::{MuxEvent, MuxJob, MuxingEngine};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs the muxing engine and cleans up the stream files on success
pub struct Combiner<M: MuxingEngine> {
    engine: Arc<M>,
}

impl<M: MuxingEngine> Combiner<M> {
    /// Create a new combiner
    pub fn new(engine: Arc<M>) -> Self {
        Self { engine }
    }

    /// Merge `pair` into `output`.
    ///
    /// On success both temp files are removed; on failure they are left on disk.
    pub async fn combine(&self, pair: &TempFilePair, output: &Path) -> Result<PathBuf, MergeError> {
        let job = MuxJob {
            video: pair.video_file.clone(),
            audio: pair.audio_file.clone(),
            output: output.to_path_buf(),
        };

        let events = self.engine.start(job)?;

        match events.await {
            Ok(MuxEvent::End) => {
                info!("Combination complete, saved as {}", output.display());
                remove_temp_files(pair).await;
                Ok(output.to_path_buf())
            }
            Ok(MuxEvent::Error(message)) => {
                error!("Combining video and audio failed: {}", message);
                Err(MergeError::Combine(message))
            }
            Err(_) => {
                error!("Muxing engine stopped without reporting a result");
                Err(MergeError::Combine(
                    "muxing engine stopped without reporting a result".to_string(),
                ))
            }
        }
    }
}

/// Delete both temp files. Failures are logged, never surfaced.
async fn remove_temp_files(pair: &TempFilePair) {
    let (video, audio) = tokio::join!(
        tokio::fs::remove_file(&pair.video_file),
        tokio::fs::remove_file(&pair.audio_file),
    );

    for (path, result) in [(&pair.video_file, video), (&pair.audio_file, audio)] {
        if let Err(e) = result {
            warn!("Could not remove temp file {}: {}", path.display(), e);
        }
    }
    info!("Temporary files removed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tokio::sync::oneshot;

    /// Reports a fixed event, writing the output file on success
    struct FakeMuxer {
        event: Option<MuxEvent>,
        jobs: Mutex<Vec<MuxJob>>,
    }

    impl FakeMuxer {
        fn new(event: Option<MuxEvent>) -> Self {
            Self {
                event,
                jobs: Mutex::new(Vec::new()),
            }
        }
    }

    impl MuxingEngine for FakeMuxer {
        fn start(&self, job: MuxJob) -> Result<oneshot::Receiver<MuxEvent>, MergeError> {
            let (tx, rx) = oneshot::channel();
            if let Some(event) = self.event.clone() {
                if event == MuxEvent::End {
                    std::fs::write(&job.output, b"muxed")?;
                }
                tx.send(event).unwrap();
            }
            // a `None` event drops the sender without reporting
            self.jobs.lock().unwrap().push(job);
            Ok(rx)
        }
    }

    fn pair_in(dir: &TempDir) -> TempFilePair {
        let pair = TempFilePair {
            video_file: dir.path().join("t_video_temp.mp4"),
            audio_file: dir.path().join("t_audio_temp.mp3"),
        };
        std::fs::write(&pair.video_file, b"video").unwrap();
        std::fs::write(&pair.audio_file, b"audio").unwrap();
        pair
    }

    #[tokio::test]
    async fn test_success_removes_temp_files() {
        let dir = TempDir::new().unwrap();
        let pair = pair_in(&dir);
        let output = dir.path().join("t_final_video.mp4");
        let muxer = Arc::new(FakeMuxer::new(Some(MuxEvent::End)));

        let result = Combiner::new(muxer.clone()).combine(&pair, &output).await;

        assert_eq!(result.unwrap(), output);
        assert!(output.exists());
        assert!(!pair.video_file.exists());
        assert!(!pair.audio_file.exists());

        let jobs = muxer.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].video, pair.video_file);
        assert_eq!(jobs[0].audio, pair.audio_file);
    }

    #[tokio::test]
    async fn test_failure_keeps_temp_files() {
        let dir = TempDir::new().unwrap();
        let pair = pair_in(&dir);
        let output = dir.path().join("t_final_video.mp4");
        let muxer = Arc::new(FakeMuxer::new(Some(MuxEvent::Error("codec error".into()))));

        let err = Combiner::new(muxer).combine(&pair, &output).await.unwrap_err();

        assert!(matches!(err, MergeError::Combine(ref m) if m == "codec error"));
        assert!(err.keeps_temp_files());
        assert!(pair.video_file.exists());
        assert!(pair.audio_file.exists());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_silent_engine_is_a_failure() {
        let dir = TempDir::new().unwrap();
        let pair = pair_in(&dir);
        let output = dir.path().join("t_final_video.mp4");

        let err = Combiner::new(Arc::new(FakeMuxer::new(None)))
            .combine(&pair, &output)
            .await
            .unwrap_err();

        assert!(matches!(err, MergeError::Combine(_)));
        assert!(pair.video_file.exists());
        assert!(pair.audio_file.exists());
    }

    #[tokio::test]
    async fn test_missing_temp_file_does_not_fail_success() {
        let dir = TempDir::new().unwrap();
        let pair = pair_in(&dir);
        std::fs::remove_file(&pair.audio_file).unwrap();
        let output = dir.path().join("t_final_video.mp4");

        let result = Combiner::new(Arc::new(FakeMuxer::new(Some(MuxEvent::End))))
            .combine(&pair, &output)
            .await;

        assert!(result.is_ok());
        assert!(!pair.video_file.exists());
    }
}
