use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "NOTED_DIR";

/// Resolve the data directory: explicit override, then `$NOTED_DIR`,
/// then `$XDG_DATA_HOME/noted`, then `$HOME/.local/share/noted`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"));
    data_home.join("noted")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Resolve and create the data directory.
pub fn ensure_data_dir(explicit: Option<&Path>) -> Result<PathBuf, std::io::Error> {
    let dir = resolve_data_dir(explicit);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Directory for rolling log files
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/somewhere")));
        assert_eq!(dir, PathBuf::from("/tmp/somewhere"));
    }

    #[test]
    fn ensure_creates_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("a/b/noted");
        let dir = ensure_data_dir(Some(&target)).unwrap();
        assert!(dir.is_dir());
        assert_eq!(log_dir(&dir), target.join("logs"));
    }
}
