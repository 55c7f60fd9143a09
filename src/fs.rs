//! File system utilities.

use std::fs;
use std::io;
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// The temp file lives next to the target (same filesystem) and is hidden
/// behind a leading dot, so a watcher filtering on the target path never
/// sees a half-written file.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("write_here.txt");

        atomic_write(&file_path, "LANGUAGE: german").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "LANGUAGE: german");
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("write_here.txt");

        fs::write(&file_path, "Original content").unwrap();
        atomic_write(&file_path, "New content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "New content");
    }

    #[test]
    fn test_atomic_write_no_temp_file_remains() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("write_here.txt");

        atomic_write(&file_path, "content").unwrap();

        let temp_path = temp_dir.path().join(".write_here.txt.tmp");
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_atomic_write_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing").join("write_here.txt");

        assert!(atomic_write(&file_path, "content").is_err());
    }
}
