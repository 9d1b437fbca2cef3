use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::note::DEFAULT_CATEGORY;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotedConfig {
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Categories offered in the navigation bar and the dialog
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Category used when neither the user nor the active filter names one
    #[serde(default = "default_category")]
    pub default_category: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            categories: default_categories(),
            default_category: default_category(),
        }
    }
}

fn default_categories() -> Vec<String> {
    ["personal", "work", "education", "home"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl NotesConfig {
    /// Whether `name` is one of the configured categories
    pub fn is_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// flexi_logger level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: NotedConfig = toml::from_str("").unwrap();
        assert_eq!(
            config.notes.categories,
            vec!["personal", "work", "education", "home"]
        );
        assert_eq!(config.notes.default_category, "personal");
        assert!(config.ui.show_key_hints);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn partial_tables_fill_in_defaults() {
        let config: NotedConfig = toml::from_str(
            r##"
[notes]
categories = ["ideas", "work"]

[ui]
colors = { highlight = "#112233" }
"##,
        )
        .unwrap();
        assert_eq!(config.notes.categories, vec!["ideas", "work"]);
        assert_eq!(config.notes.default_category, "personal");
        assert!(config.notes.is_category("ideas"));
        assert!(!config.notes.is_category("home"));
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#112233");
    }
}
