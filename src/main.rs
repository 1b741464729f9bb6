//! Main entry point for ytmerge CLI

use clap::Parser;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytmerge::cli::{Args, OutputFormatter, Prompt, VerbosityLevel};
use ytmerge::platform::{Ffmpeg, YtDlp};
use ytmerge::{ErrorKind, Pipeline, PipelineOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbosity_level())?;

    info!("Starting ytmerge with args: {:?}", args);

    let formatter = OutputFormatter::new(args.verbosity_level());
    formatter.debug(&format!(
        "Using {} and {}, writing to {}",
        args.yt_dlp.display(),
        args.ffmpeg.display(),
        args.output_dir.display()
    ));

    let pipeline = Pipeline::with_options(
        YtDlp::new(&args.yt_dlp),
        Ffmpeg::new(&args.ffmpeg),
        PipelineOptions {
            output_dir: args.output_dir.clone(),
            cleanup_partial: args.cleanup_partial,
        },
    );

    let start_time = Instant::now();
    let mut prompt = Prompt::stdio();

    // An aborted run still ends the process normally
    match pipeline.run(&mut prompt, &formatter).await {
        Ok(report) => {
            debug!("Run finished: {:?}", report);
            formatter.print_run_complete(&report.output, start_time.elapsed());
        }
        Err(e) => {
            formatter.error(&e.to_string());
            match e.kind() {
                ErrorKind::Combine => {
                    formatter.warning("Temporary stream files were kept for inspection.")
                }
                ErrorKind::Environment => formatter.warning(
                    "Check that yt-dlp and ffmpeg are installed, or pass --yt-dlp / --ffmpeg.",
                ),
                ErrorKind::UserInput | ErrorKind::Retrieval => {}
            }
        }
    }

    Ok(())
}

/// Initialize logging system
fn init_logging(verbosity: VerbosityLevel) -> anyhow::Result<()> {
    // RUST_LOG wins over the verbosity flags
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.default_log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
