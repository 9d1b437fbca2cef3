use std::fmt;

use serde::{Deserialize, Serialize};

/// Light or dark color scheme, persisted to the theme slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The literal stored in the theme slot
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Decode a stored value. Only the exact literal `dark` selects dark mode.
    pub fn from_slot(value: &str) -> ThemeMode {
        if value.trim() == "dark" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_literal_decoding() {
        assert_eq!(ThemeMode::from_slot("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_slot("dark\n"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_slot("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_slot("DARK"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_slot(""), ThemeMode::Light);
    }

    #[test]
    fn toggle_is_an_involution() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }
}
