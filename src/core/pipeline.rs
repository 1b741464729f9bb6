//! The interactive download-and-merge pipeline

use crate::cli::output::OutputFormatter;
use crate::cli::prompt::{Prompt, QUALITY_QUESTION, URL_QUESTION};
use crate::core::combiner::Combiner;
use crate::core::formats::{displayable_formats, format_menu, resolve_selection, selectable_formats};
use crate::core::video_info::SanitizedTitle;
use crate::download::{DownloaderConfig, DualDownloader};
use crate::error::MergeError;
use crate::platform::ffmpeg::MuxingEngine;
use crate::platform::ytdlp::RetrievalEngine;
use crate::utils::filename::{final_output_name, in_dir};
use crate::utils::url::{is_http_url, normalize_input, video_id};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, error, info, warn};

/// Pipeline stages, in order. Any failure ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitUrl,
    FetchMetadata,
    DisplayFormats,
    AwaitSelection,
    Download,
    Combine,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::AwaitUrl => "await-url",
            Stage::FetchMetadata => "fetch-metadata",
            Stage::DisplayFormats => "display-formats",
            Stage::AwaitSelection => "await-selection",
            Stage::Download => "download",
            Stage::Combine => "combine",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory for temporary and final files
    pub output_dir: PathBuf,
    /// Delete the surviving stream file when the other download fails
    pub cleanup_partial: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            cleanup_partial: false,
        }
    }
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Title used for every file name
    pub title: SanitizedTitle,
    /// Menu lines shown to the user
    pub menu: Vec<String>,
    /// Format the user picked
    pub format_id: String,
    /// Merged output file
    pub output: PathBuf,
}

/// Sequences prompt, metadata fetch, selection, download and merge
pub struct Pipeline<R: RetrievalEngine, M: MuxingEngine> {
    retrieval: Arc<R>,
    downloader: DualDownloader<R>,
    combiner: Combiner<M>,
    options: PipelineOptions,
}

impl<R: RetrievalEngine, M: MuxingEngine> Pipeline<R, M> {
    /// Create a new pipeline with default options
    pub fn new(retrieval: R, muxer: M) -> Self {
        Self::with_options(retrieval, muxer, PipelineOptions::default())
    }

    /// Create a new pipeline with options
    pub fn with_options(retrieval: R, muxer: M, options: PipelineOptions) -> Self {
        let retrieval = Arc::new(retrieval);
        let downloader = DualDownloader::with_config(
            retrieval.clone(),
            DownloaderConfig {
                output_dir: options.output_dir.clone(),
                cleanup_partial: options.cleanup_partial,
            },
        );

        Self {
            retrieval,
            downloader,
            combiner: Combiner::new(Arc::new(muxer)),
            options,
        }
    }

    /// Run once from URL prompt to merged file
    pub async fn run<I, O>(
        &self,
        prompt: &mut Prompt<I, O>,
        out: &OutputFormatter,
    ) -> Result<RunReport, MergeError>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        enter(Stage::AwaitUrl);
        let url = normalize_input(&prompt.ask(URL_QUESTION).await?).ok_or(MergeError::EmptyUrl)?;
        if !is_http_url(&url) {
            warn!("'{}' does not look like an http(s) URL, passing it on anyway", url);
        }
        if let Some(id) = video_id(&url) {
            debug!("Video ID: {}", id);
        }

        enter(Stage::FetchMetadata);
        let metadata = self.retrieval.fetch_metadata(&url).await.inspect_err(|e| {
            error!("Error fetching video information: {}", e);
        })?;

        enter(Stage::DisplayFormats);
        let title = metadata.sanitized_title();
        prompt.say(&format!("Video title: {}", title)).await?;

        let selectable = selectable_formats(&metadata.formats);
        let displayed = displayable_formats(&selectable);
        debug!(
            "{} formats, {} with video, {} shown",
            metadata.formats.len(),
            selectable.len(),
            displayed.len()
        );
        if displayed.is_empty() {
            return Err(MergeError::NoSelectableFormats);
        }

        let menu = format_menu(&displayed);
        prompt.say("Available video qualities:").await?;
        for line in &menu {
            prompt.say(line).await?;
        }

        enter(Stage::AwaitSelection);
        let answer = prompt.ask(QUALITY_QUESTION).await?;
        let format_id = resolve_selection(&answer, &displayed)
            .inspect_err(|e| error!("{}", e))?
            .format_id
            .clone();
        info!("Selected format {}", format_id);

        enter(Stage::Download);
        out.info("Downloading video and audio...");
        let pair = self.downloader.download(&url, &format_id, &title).await?;
        out.success("Video and audio download complete.");

        enter(Stage::Combine);
        out.info("Combining video and audio...");
        let output = in_dir(&self.options.output_dir, final_output_name(title.as_str()));
        let output = self.combiner.combine(&pair, &output).await?;
        out.success(&format!("Combination complete! File saved as {}", output.display()));
        out.info("Temporary files removed.");

        enter(Stage::Done);
        Ok(RunReport {
            title,
            menu,
            format_id,
            output,
        })
    }
}

fn enter(stage: Stage) {
    debug!(stage = %stage, "Entering stage");
}
