use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::slots::{NOTES_SLOT, THEME_SLOT};

/// Events sent from the watcher to the TUI event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent {
    /// The notes slot was written by another process
    NotesChanged,
    /// The theme slot was written by another process
    ThemeChanged,
}

/// Watches the data directory for slot writes made outside the TUI
/// (typically `noted add` from another terminal).
pub struct SlotWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<SlotEvent>,
}

impl SlotWatcher {
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }
                for evt in classify(&event.paths) {
                    let _ = tx.send(evt);
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(SlotWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending events without blocking, collapsing duplicates.
    pub fn poll(&self) -> Vec<SlotEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            if !events.contains(&evt) {
                events.push(evt);
            }
        }
        events
    }
}

/// Map changed paths to slot events. The watch is non-recursive, so only
/// file names matter; temp files from atomic writes are ignored.
fn classify(paths: &[PathBuf]) -> Vec<SlotEvent> {
    let mut events = Vec::new();
    for p in paths {
        let evt = match p.file_name().and_then(|n| n.to_str()) {
            Some(NOTES_SLOT) => SlotEvent::NotesChanged,
            Some(THEME_SLOT) => SlotEvent::ThemeChanged,
            _ => continue,
        };
        if !events.contains(&evt) {
            events.push(evt);
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_ignores_unrelated_files() {
        let dir = Path::new("/data/noted");
        let paths = vec![
            dir.join(".tmpAbC123"),
            dir.join(".recovery.log"),
            dir.join(NOTES_SLOT),
            dir.join(NOTES_SLOT),
        ];
        assert_eq!(classify(&paths), vec![SlotEvent::NotesChanged]);
    }

    #[test]
    fn classify_theme_slot() {
        let dir = Path::new("/data/noted");
        assert_eq!(
            classify(&[dir.join(THEME_SLOT)]),
            vec![SlotEvent::ThemeChanged]
        );
    }
}
