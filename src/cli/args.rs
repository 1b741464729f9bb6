//! Command line argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Download a YouTube video's separate video and audio streams and merge them with ffmpeg.
///
/// The URL and the quality are asked for interactively.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// yt-dlp executable used to fetch metadata and streams
    #[arg(long = "yt-dlp", value_name = "PATH", env = "YTMERGE_YTDLP", default_value = "yt-dlp")]
    pub yt_dlp: PathBuf,

    /// ffmpeg executable used to merge the streams
    #[arg(long, value_name = "PATH", env = "YTMERGE_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Directory for the temporary and final files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Delete the surviving stream file when the other download fails
    #[arg(long)]
    pub cleanup_partial: bool,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

impl VerbosityLevel {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            yt_dlp: PathBuf::from("yt-dlp"),
            ffmpeg: PathBuf::from("ffmpeg"),
            output_dir: PathBuf::from("."),
            cleanup_partial: false,
            verbose: false,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_valid() {
        let args = Args::try_parse_from(["ytmerge"]).unwrap();
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(!args.cleanup_partial);
        assert_eq!(args.verbosity_level(), VerbosityLevel::Normal);
    }

    #[test]
    fn test_custom_values() {
        let args = Args::try_parse_from([
            "ytmerge",
            "--yt-dlp",
            "/opt/bin/yt-dlp",
            "--ffmpeg",
            "/opt/bin/ffmpeg",
            "-o",
            "/tmp/videos",
            "--cleanup-partial",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.yt_dlp, PathBuf::from("/opt/bin/yt-dlp"));
        assert_eq!(args.ffmpeg, PathBuf::from("/opt/bin/ffmpeg"));
        assert_eq!(args.output_dir, PathBuf::from("/tmp/videos"));
        assert!(args.cleanup_partial);
        assert_eq!(args.verbosity_level(), VerbosityLevel::Verbose);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["ytmerge", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_args_verbosity_level() {
        let args = Args {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);

        let args = Args {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Verbose);
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(VerbosityLevel::Quiet.default_log_filter(), "error");
        assert_eq!(VerbosityLevel::Normal.default_log_filter(), "warn");
        assert_eq!(VerbosityLevel::Verbose.default_log_filter(), "debug");
    }

    #[test]
    fn test_args_default_values() {
        let args = Args::default();
        assert_eq!(args.yt_dlp, PathBuf::from("yt-dlp"));
        assert_eq!(args.ffmpeg, PathBuf::from("ffmpeg"));
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(!args.cleanup_partial);
        assert!(!args.verbose);
        assert!(!args.quiet);
    }
}
