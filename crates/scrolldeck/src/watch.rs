use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches a deck file for edits.
///
/// The parent directory is watched rather than the file itself, since most
/// editors save by replacing the file.
pub struct DeckWatcher {
    file_name: Option<OsString>,
    receiver: Receiver<DebounceEventResult>,
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl DeckWatcher {
    pub fn new(path: &Path) -> Result<Self> {
        let dir: PathBuf = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let (tx, receiver) = mpsc::channel();
        let mut debouncer = new_debouncer(DEBOUNCE, tx).context("Failed to start file watcher")?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        log::info!("watching {} for changes", path.display());
        Ok(Self {
            file_name: path.file_name().map(OsString::from),
            receiver,
            _debouncer: debouncer,
        })
    }

    /// True when the deck file changed since the last poll.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.receiver.try_recv() {
            match result {
                Ok(events) => {
                    changed |= events
                        .iter()
                        .any(|e| e.path.file_name() == self.file_name.as_deref());
                }
                Err(e) => log::warn!("file watcher error: {e}"),
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_detects_write_to_watched_file() {
        let dir = std::env::temp_dir().join(format!("scrolldeck-watch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let deck = dir.join("deck.yaml");
        std::fs::write(&deck, "slides:\n  - title: One\n").unwrap();

        let watcher = DeckWatcher::new(&deck).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        std::fs::write(&deck, "slides:\n  - title: Two\n").unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut seen = false;
        while Instant::now() < deadline {
            if watcher.poll() {
                seen = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        std::fs::remove_dir_all(&dir).ok();
        assert!(seen, "no change event for the deck file");
    }
}
