use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::note::NoteColor;
use crate::model::preferences::ThemeMode;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub danger: Color,
    pub success: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            background: Color::Rgb(0xF8, 0xF9, 0xFC),
            surface: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x4A, 0x4F, 0x63),
            text_bright: Color::Rgb(0x1A, 0x1D, 0x2E),
            highlight: Color::Rgb(0x63, 0x66, 0xF1),
            dim: Color::Rgb(0x94, 0x98, 0xA8),
            danger: Color::Rgb(0xDC, 0x26, 0x26),
            success: Color::Rgb(0x16, 0xA3, 0x4A),
            selection_bg: Color::Rgb(0xE0, 0xE7, 0xFF),
            search_match_bg: Color::Rgb(0xFD, 0xE6, 0x8A),
            search_match_fg: Color::Rgb(0x1A, 0x1D, 0x2E),
        }
    }

    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            surface: Color::Rgb(0x1A, 0x10, 0x2E),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            danger: Color::Rgb(0xFF, 0x44, 0x44),
            success: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }

    /// Base palette for `mode` with `[ui.colors]` overrides applied
    pub fn from_config(mode: ThemeMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            ThemeMode::Light => Theme::light(),
            ThemeMode::Dark => Theme::dark(),
        };

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "surface" => theme.surface = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "danger" => theme.danger = color,
                "success" => theme.success = color,
                "selection_bg" => theme.selection_bg = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                _ => {}
            }
        }

        theme
    }

    /// Accent used for a card's color tag. `Default` has no accent.
    pub fn note_color(&self, color: NoteColor) -> Color {
        match color {
            NoteColor::Default => self.dim,
            NoteColor::Red => Color::Rgb(0xF8, 0x71, 0x71),
            NoteColor::Orange => Color::Rgb(0xFB, 0x92, 0x3C),
            NoteColor::Yellow => Color::Rgb(0xFA, 0xCC, 0x15),
            NoteColor::Green => Color::Rgb(0x4A, 0xDE, 0x80),
            NoteColor::Blue => Color::Rgb(0x60, 0xA5, 0xFA),
            NoteColor::Purple => Color::Rgb(0xC0, 0x84, 0xFC),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
