//! URL intake helpers

use url::Url;

/// Normalize a line typed by the user into a URL candidate.
///
/// Returns `None` for empty or whitespace-only input.
pub fn normalize_input(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Check if the input parses as an absolute http(s) URL
pub fn is_http_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// Extract the video ID from common YouTube URL shapes, if present
pub fn video_id(input: &str) -> Option<String> {
    let parsed = Url::parse(input).ok()?;
    match parsed.host_str()? {
        "youtu.be" => {
            let id = parsed.path().trim_start_matches('/');
            (!id.is_empty()).then(|| id.to_string())
        }
        "youtube.com" | "www.youtube.com" | "m.youtube.com" => {
            if parsed.path().starts_with("/shorts/") {
                let id = parsed.path().trim_start_matches("/shorts/");
                (!id.is_empty()).then(|| id.to_string())
            } else {
                parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.to_string())
            }
        }
        _ => None,
    }
}
