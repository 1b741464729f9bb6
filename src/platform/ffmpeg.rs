//! ffmpeg muxing engine

use crate::error::MergeError;
use crate::platform::ytdlp::{failure_message, spawn_error};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// A single mux request: two inputs, one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxJob {
    /// Video input, copied unchanged
    pub video: PathBuf,
    /// Audio input, re-encoded to AAC
    pub audio: PathBuf,
    /// Combined output file
    pub output: PathBuf,
}

/// Terminal event of a mux run. Exactly one is delivered per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuxEvent {
    /// Output written successfully
    End,
    /// The engine failed with the given message
    Error(String),
}

/// Something that can merge a video and an audio stream into one file.
///
/// `start` launches the job and hands back a receiver that yields the single
/// terminal event once the engine finishes.
pub trait MuxingEngine: Send + Sync {
    fn start(&self, job: MuxJob) -> Result<oneshot::Receiver<MuxEvent>, MergeError>;
}

/// Muxing engine backed by the `ffmpeg` executable
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Ffmpeg {
    /// Create an engine that runs the given program
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `-y -i <video> -i <audio> -c:v copy -c:a aac -strict experimental <output>`
    pub fn mux_args(job: &MuxJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into()];
        args.push(job.video.as_os_str().to_owned());
        args.push("-i".into());
        args.push(job.audio.as_os_str().to_owned());
        args.extend(
            ["-c:v", "copy", "-c:a", "aac", "-strict", "experimental"]
                .into_iter()
                .map(OsString::from),
        );
        args.push(job.output.as_os_str().to_owned());
        args
    }
}

impl MuxingEngine for Ffmpeg {
    fn start(&self, job: MuxJob) -> Result<oneshot::Receiver<MuxEvent>, MergeError> {
        let args = Self::mux_args(&job);
        debug!("Running {} {:?}", self.program.display(), args);

        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&self.program, e))?;

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let event = match child.wait_with_output().await {
                Ok(output) if output.status.success() => MuxEvent::End,
                Ok(output) => MuxEvent::Error(failure_message(output.status, &output.stderr)),
                Err(e) => MuxEvent::Error(e.to_string()),
            };
            if tx.send(event).is_err() {
                warn!("Mux result for {} was not awaited", job.output.display());
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> MuxJob {
        MuxJob {
            video: PathBuf::from("Test Video1_video_temp.mp4"),
            audio: PathBuf::from("Test Video1_audio_temp.mp3"),
            output: PathBuf::from("Test Video1_final_video.mp4"),
        }
    }

    #[test]
    fn test_mux_args() {
        let args: Vec<String> = Ffmpeg::mux_args(&job())
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "Test Video1_video_temp.mp4",
                "-i",
                "Test Video1_audio_temp.mp3",
                "-c:v",
                "copy",
                "-c:a",
                "aac",
                "-strict",
                "experimental",
                "Test Video1_final_video.mp4",
            ]
        );
    }

    #[test]
    fn test_default_program() {
        assert_eq!(Ffmpeg::default().program(), Path::new("ffmpeg"));
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_start() {
        let engine = Ffmpeg::new("/nonexistent/definitely-not-ffmpeg");
        let err = engine.start(job()).unwrap_err();
        assert!(matches!(err, MergeError::ToolNotFound(_)));
    }
}
