use std::path::Path;

use crate::io::slots::{self, SlotError, THEME_SLOT};
use crate::model::preferences::ThemeMode;

/// Read the persisted theme. Missing or unreadable slots read as light.
pub fn load_theme(data_dir: &Path) -> ThemeMode {
    match slots::read_slot(data_dir, THEME_SLOT) {
        Ok(Some(value)) => ThemeMode::from_slot(&value),
        Ok(None) => ThemeMode::default(),
        Err(e) => {
            log::warn!("event=theme_load status=error error={}", e);
            ThemeMode::default()
        }
    }
}

pub fn save_theme(data_dir: &Path, theme: ThemeMode) -> Result<(), SlotError> {
    slots::write_slot(data_dir, THEME_SLOT, theme.as_str())?;
    log::info!("event=theme_save theme={}", theme);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_slot_is_light() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_theme(tmp.path()), ThemeMode::Light);
    }

    #[test]
    fn anything_but_dark_reads_as_light() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(THEME_SLOT), "Dark").unwrap();
        assert_eq!(load_theme(tmp.path()), ThemeMode::Light);
        std::fs::write(tmp.path().join(THEME_SLOT), "dark").unwrap();
        assert_eq!(load_theme(tmp.path()), ThemeMode::Dark);
    }

    #[test]
    fn save_writes_the_bare_literal() {
        let tmp = TempDir::new().unwrap();
        save_theme(tmp.path(), ThemeMode::Dark).unwrap();
        let raw = std::fs::read_to_string(tmp.path().join(THEME_SLOT)).unwrap();
        assert_eq!(raw, "dark");
    }
}
