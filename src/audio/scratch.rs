use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ui::Style;

const AUDIO_EXTENSION: &str = "mp3";

/// Creates a uniquely named, empty `audio_*.mp3` file in `dir` and returns
/// its path. The caller owns the file from here on; [`cleanup`] removes it.
pub fn new_temp_path(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    tempfile::Builder::new()
        .prefix("audio_")
        .suffix(&format!(".{AUDIO_EXTENSION}"))
        .tempfile_in(dir)?
        .into_temp_path()
        .keep()
        .map_err(|e| e.error)
}

/// Deletes every generated audio file in `dir`, returning how many were
/// removed. A file that cannot be deleted is reported and skipped.
pub fn cleanup(dir: &Path) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return 0,
        Err(e) => {
            crate::warn!(
                "{} {}",
                Style::error("Error cleaning up audio files:"),
                e
            );
            return 0;
        }
    };

    let mut removed = 0;
    for path in entries.filter_map(Result::ok).map(|entry| entry.path()) {
        if path.extension().and_then(|ext| ext.to_str()) != Some(AUDIO_EXTENSION) {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to delete audio file");
            }
        }
    }

    tracing::debug!(dir = %dir.display(), removed, "audio cleanup finished");
    removed
}
