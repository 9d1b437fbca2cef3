use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Slot holding the JSON-encoded note collection
pub const NOTES_SLOT: &str = "notes-app-data";

/// Slot holding the theme literal (`light` or `dark`)
pub const THEME_SLOT: &str = "note-app-theme";

/// Error type for slot I/O
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// Path of the file backing a slot
pub fn slot_path(data_dir: &Path, key: &str) -> PathBuf {
    data_dir.join(key)
}

/// Read a slot. A missing slot is `Ok(None)`, not an error.
pub fn read_slot(data_dir: &Path, key: &str) -> Result<Option<String>, SlotError> {
    let path = slot_path(data_dir, key);
    match fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SlotError::ReadError { path, source: e }),
    }
}

/// Read a slot's raw bytes, leaving decoding to the caller.
pub fn read_slot_bytes(data_dir: &Path, key: &str) -> Result<Option<Vec<u8>>, SlotError> {
    let path = slot_path(data_dir, key);
    match fs::read(&path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SlotError::ReadError { path, source: e }),
    }
}

/// Replace a slot's value atomically.
pub fn write_slot(data_dir: &Path, key: &str, value: &str) -> Result<(), SlotError> {
    let path = slot_path(data_dir, key);
    atomic_write(&path, value.as_bytes()).map_err(|e| SlotError::WriteError { path, source: e })
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
