//! # ytmerge - interactive YouTube download and merge
//!
//! Downloads a video's separate video and audio streams with `yt-dlp` and
//! merges them into one file with `ffmpeg`.
//!
//! ## Flow
//!
//! 1. Ask for a URL and fetch the video's metadata
//! 2. List the video formats that have a quality label and a known size
//! 3. Ask for a quality, then download that video stream and the best audio stream concurrently
//! 4. Merge both into `<title>_final_video.mp4` and remove the temporary files
//!
//! ## Example
//!
//! ```rust,no_run
//! use ytmerge::cli::{OutputFormatter, Prompt, VerbosityLevel};
//! use ytmerge::platform::{Ffmpeg, YtDlp};
//! use ytmerge::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::new(YtDlp::default(), Ffmpeg::default());
//!     let mut prompt = Prompt::stdio();
//!     let out = OutputFormatter::new(VerbosityLevel::Normal);
//!
//!     let report = pipeline.run(&mut prompt, &out).await?;
//!     println!("Saved: {}", report.output.display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod platform;
pub mod utils;

// Re-export main types
pub use crate::core::{FormatDescriptor, Pipeline, PipelineOptions, RunReport, SanitizedTitle, VideoMetadata};
pub use download::{DualDownloader, TempFilePair};
pub use error::{ErrorKind, MergeError};

/// Result type alias for ytmerge operations
pub type Result<T> = std::result::Result<T, MergeError>;
