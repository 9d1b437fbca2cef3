use std::fs;
use std::path::{Path, PathBuf};

use crate::io::slots::atomic_write;
use crate::model::config::NotedConfig;

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Load config.toml. A missing file yields the defaults.
pub fn load_config(data_dir: &Path) -> Result<NotedConfig, ConfigError> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(NotedConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Read the raw document for format-preserving edits. A missing file
/// yields an empty document.
pub fn read_config_doc(data_dir: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(toml_edit::DocumentMut::new());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config_doc(data_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    atomic_write(&config_path(data_dir), doc.to_string().as_bytes())?;
    Ok(())
}

/// Ensure `[notes].categories` exists in the document, seeded with `current`.
fn categories_array<'a>(
    doc: &'a mut toml_edit::DocumentMut,
    current: &[String],
) -> Option<&'a mut toml_edit::Array> {
    if !doc.contains_key("notes") {
        doc["notes"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    if doc["notes"].get("categories").is_none() {
        let mut array = toml_edit::Array::new();
        for c in current {
            array.push(c.as_str());
        }
        doc["notes"]["categories"] = toml_edit::value(array);
    }
    doc["notes"]["categories"].as_array_mut()
}

/// Add a category to the document. Returns false if it was already present.
pub fn add_category(doc: &mut toml_edit::DocumentMut, current: &[String], name: &str) -> bool {
    let Some(array) = categories_array(doc, current) else {
        return false;
    };
    if array.iter().any(|v| v.as_str() == Some(name)) {
        return false;
    }
    array.push(name);
    true
}

/// Remove a category from the document. Returns false if it was not present.
pub fn remove_category(doc: &mut toml_edit::DocumentMut, current: &[String], name: &str) -> bool {
    let Some(array) = categories_array(doc, current) else {
        return false;
    };
    let Some(idx) = array.iter().position(|v| v.as_str() == Some(name)) else {
        return false;
    };
    array.remove(idx);
    true
}
