//! Filename sanitization and the file names derived from a video title

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Characters that are not allowed in file names on common filesystems
static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]+"#).expect("illegal character pattern is valid"));

/// Extension of the temporary video stream file
pub const VIDEO_TEMP_EXT: &str = "mp4";
/// Extension of the temporary audio stream file
pub const AUDIO_TEMP_EXT: &str = "mp3";
/// Extension of the merged output file
pub const FINAL_EXT: &str = "mp4";

/// Remove every character that is illegal in a file path from a title.
///
/// Only `<>:"/\|?*` are removed; whitespace and everything else is kept as is,
/// which makes the operation idempotent.
pub fn sanitize_title(title: &str) -> String {
    ILLEGAL_CHARS.replace_all(title, "").into_owned()
}

/// Check if a title contains no illegal characters
pub fn is_sanitized(title: &str) -> bool {
    !ILLEGAL_CHARS.is_match(title)
}

/// `<title>_video_temp.mp4`
pub fn video_temp_name(title: &str) -> String {
    format!("{}_video_temp.{}", title, VIDEO_TEMP_EXT)
}

/// `<title>_audio_temp.mp3`
pub fn audio_temp_name(title: &str) -> String {
    format!("{}_audio_temp.{}", title, AUDIO_TEMP_EXT)
}

/// `<title>_final_video.mp4`
pub fn final_output_name(title: &str) -> String {
    format!("{}_final_video.{}", title, FINAL_EXT)
}

/// Resolve a derived file name against the output directory
pub fn in_dir(dir: &Path, name: String) -> PathBuf {
    if dir.as_os_str().is_empty() {
        PathBuf::from(name)
    } else {
        dir.join(name)
    }
}
