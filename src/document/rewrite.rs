use std::path::Path;

use super::{MARKER, TRANSLATION_PREFIX};
use crate::error::RewriteError;
use crate::fs::atomic_write;

/// Returns `contents` with exactly one `TRANSLATION:` line, placed after a
/// blank spacer line directly below the last line holding the marker.
///
/// Every earlier translation line is dropped along with the blank spacer
/// right above it, so applying the same translation twice is a no-op.
pub fn apply_translation(contents: &str, translation: &str) -> Result<String, RewriteError> {
    let mut lines: Vec<&str> = Vec::new();
    for line in contents.split('\n') {
        if line.trim().starts_with(TRANSLATION_PREFIX) {
            if lines.last().is_some_and(|prev| prev.trim().is_empty()) {
                lines.pop();
            }
            continue;
        }
        lines.push(line);
    }

    let closing = lines
        .iter()
        .rposition(|line| line.contains(MARKER))
        .ok_or(RewriteError::MissingMarker)?;

    let translation_line = format!("{TRANSLATION_PREFIX} {translation}");
    let mut output: Vec<&str> = Vec::with_capacity(lines.len() + 2);
    output.extend_from_slice(&lines[..=closing]);
    output.push("");
    output.push(&translation_line);
    output.extend_from_slice(&lines[closing + 1..]);

    Ok(output.join("\n"))
}

/// Rewrites the file at `path` with the translation inserted. Nothing is
/// written if the closing marker is missing.
pub fn write_translation(
    path: &Path,
    contents: &str,
    translation: &str,
) -> Result<(), RewriteError> {
    let updated = apply_translation(contents, translation)?;

    atomic_write(path, &updated).map_err(|source| RewriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}
