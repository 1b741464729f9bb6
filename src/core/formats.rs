//! Format filtering, menu rendering and selection

use crate::core::video_info::FormatDescriptor;
use crate::error::MergeError;

/// Formats that carry a video stream, in engine order
pub fn selectable_formats(formats: &[FormatDescriptor]) -> Vec<&FormatDescriptor> {
    formats.iter().filter(|f| f.has_video()).collect()
}

/// Formats worth showing: both a quality label and a known size are required
pub fn displayable_formats<'a>(selectable: &[&'a FormatDescriptor]) -> Vec<&'a FormatDescriptor> {
    selectable
        .iter()
        .copied()
        .filter(|f| f.quality_label().is_some() && f.known_size().is_some())
        .collect()
}

/// One numbered menu line, e.g. `2 - 1080p - mp4 - 80.00 MB`
pub fn menu_line(index: usize, format: &FormatDescriptor) -> String {
    format!(
        "{} - {} - {} - {:.2} MB",
        index,
        format.quality_label().unwrap_or_default(),
        format.extension,
        format.size_mib().unwrap_or_default()
    )
}

/// Render the 1-based menu for the displayed formats
pub fn format_menu(displayed: &[&FormatDescriptor]) -> Vec<String> {
    displayed
        .iter()
        .enumerate()
        .map(|(i, format)| menu_line(i + 1, format))
        .collect()
}

/// Map the user's answer to the displayed format it names.
///
/// Valid answers are integers in `1..=displayed.len()`, surrounding whitespace ignored.
pub fn resolve_selection<'a>(
    answer: &str,
    displayed: &[&'a FormatDescriptor],
) -> Result<&'a FormatDescriptor, MergeError> {
    let answer = answer.trim();
    let index: i64 = answer
        .parse()
        .map_err(|_| MergeError::InvalidSelection(format!("'{}' is not a number", answer)))?;

    if index < 1 || index as u64 > displayed.len() as u64 {
        return Err(MergeError::InvalidSelection(format!(
            "{} is outside 1..={}",
            index,
            displayed.len()
        )));
    }

    Ok(displayed[(index - 1) as usize])
}
