use std::path::{Path, PathBuf};

use crate::io::slots::atomic_write;
use crate::model::note::Note;

/// File name of a full-collection backup
pub const BACKUP_FILE: &str = "noted_backup.json";

/// Pretty-printed (2-space) JSON of the whole collection, in store order.
pub fn backup_json(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(notes)
}

/// Write `noted_backup.json` into `dir`, replacing any previous backup.
/// Returns the path written.
pub fn export_notes(notes: &[Note], dir: &Path) -> std::io::Result<PathBuf> {
    let json = backup_json(notes)?;
    let path = dir.join(BACKUP_FILE);
    atomic_write(&path, json.as_bytes())?;
    log::info!("event=notes_export count={} path={}", notes.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Vec<Note> {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let mut a = Note::new(2, "Milk".into(), "buy 2%".into(), at);
        a.is_pinned = true;
        let b = Note::new(1, "".into(), "loose thought".into(), at);
        vec![a, b]
    }

    #[test]
    fn backup_is_two_space_indented_array() {
        let json = backup_json(&sample()).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": 2,"));
        assert!(json.contains("\"isPinned\": true"));
    }

    #[test]
    fn export_writes_file_that_decodes_to_the_collection() {
        let tmp = TempDir::new().unwrap();
        let notes = sample();
        let path = export_notes(&notes, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join(BACKUP_FILE));

        let text = std::fs::read_to_string(&path).unwrap();
        let decoded: Vec<Note> = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, notes);
    }

    #[test]
    fn empty_collection_exports_empty_array() {
        let tmp = TempDir::new().unwrap();
        let path = export_notes(&[], tmp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
