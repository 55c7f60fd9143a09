//! Change notifications for the monitored file.
//!
//! The parent directory is watched non-recursively (editors commonly save
//! by writing a new file and renaming it over the old one, which a watch on
//! the file itself would lose). Events are filtered down to the monitored
//! path and forwarded over a channel, one message per event.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Watches a single file for modifications.
///
/// Dropping the watcher stops notifications and closes the channel.
pub struct FileWatcher {
    // Kept alive for as long as notifications are wanted.
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl FileWatcher {
    /// Starts watching `path`, which must be absolute and canonical.
    ///
    /// Returns the watcher and a receiver that yields once per relevant
    /// event.
    pub fn new(path: &Path) -> notify::Result<(Self, mpsc::UnboundedReceiver<()>)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let target = path.to_path_buf();
        let dir = path.parent().unwrap_or_else(|| Path::new("/")).to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if is_relevant(&event, &target) {
                    tracing::trace!(kind = ?event.kind, "monitored file changed");
                    let _ = tx.send(());
                }
            }
            Err(e) => tracing::warn!(error = %e, "file watch error"),
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(dir = %dir.display(), file = %path.display(), "watching");

        Ok((
            Self {
                _watcher: watcher,
                path: path.to_path_buf(),
            },
            rx,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Whether `event` is a create or modify of exactly `target`.
pub fn is_relevant(event: &Event, target: &Path) -> bool {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return false;
    }

    event.paths.iter().any(|path| path == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind, RenameMode};

    fn target() -> PathBuf {
        PathBuf::from("/home/user/write_here.txt")
    }

    #[test]
    fn test_modify_of_target_is_relevant() {
        let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(target());
        assert!(is_relevant(&event, &target()));
    }

    #[test]
    fn test_rename_onto_target_is_relevant() {
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("/home/user/.write_here.txt.tmp"))
            .add_path(target());
        assert!(is_relevant(&event, &target()));
    }

    #[test]
    fn test_create_of_target_is_relevant() {
        let event = Event::new(EventKind::Create(CreateKind::File)).add_path(target());
        assert!(is_relevant(&event, &target()));
    }

    #[test]
    fn test_other_file_is_ignored() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/home/user/other.txt"));
        assert!(!is_relevant(&event, &target()));
    }

    #[test]
    fn test_temp_file_is_ignored() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/home/user/.write_here.txt.tmp"));
        assert!(!is_relevant(&event, &target()));
    }

    #[test]
    fn test_remove_and_access_are_ignored() {
        let remove = Event::new(EventKind::Remove(RemoveKind::File)).add_path(target());
        assert!(!is_relevant(&remove, &target()));

        let access = Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(target());
        assert!(!is_relevant(&access, &target()));
    }
}
