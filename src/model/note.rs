use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Note identifier (milliseconds-since-epoch at creation, bumped on collision)
pub type NoteId = u64;

/// Category assigned when none is given
pub const DEFAULT_CATEGORY: &str = "personal";

/// Background color tag of a note card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteColor {
    #[default]
    Default,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl NoteColor {
    /// The full palette, in picker order
    pub const PALETTE: [NoteColor; 7] = [
        NoteColor::Default,
        NoteColor::Red,
        NoteColor::Orange,
        NoteColor::Yellow,
        NoteColor::Green,
        NoteColor::Blue,
        NoteColor::Purple,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoteColor::Default => "default",
            NoteColor::Red => "red",
            NoteColor::Orange => "orange",
            NoteColor::Yellow => "yellow",
            NoteColor::Green => "green",
            NoteColor::Blue => "blue",
            NoteColor::Purple => "purple",
        }
    }

    /// Parse a palette name. Returns None for anything outside the palette.
    pub fn parse_color(s: &str) -> Option<NoteColor> {
        NoteColor::PALETTE.into_iter().find(|c| c.as_str() == s)
    }

    /// Next color in the palette, wrapping around
    pub fn next(self) -> NoteColor {
        let idx = NoteColor::PALETTE
            .iter()
            .position(|c| *c == self)
            .unwrap_or(0);
        NoteColor::PALETTE[(idx + 1) % NoteColor::PALETTE.len()]
    }

    /// Previous color in the palette, wrapping around
    pub fn prev(self) -> NoteColor {
        let len = NoteColor::PALETTE.len();
        let idx = NoteColor::PALETTE
            .iter()
            .position(|c| *c == self)
            .unwrap_or(0);
        NoteColor::PALETTE[(idx + len - 1) % len]
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteColor::parse_color(s).ok_or_else(|| {
            format!(
                "unknown color '{}' (expected one of: {})",
                s,
                NoteColor::PALETTE
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

impl Serialize for NoteColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Stored data may carry colors from an older palette; those fall back to default.
impl<'de> Deserialize<'de> for NoteColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NoteColor::parse_color(&s).unwrap_or_default())
    }
}

/// A single note, in the exact shape persisted to the notes slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub color: NoteColor,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Note {
    /// Build a fresh note with `created_at == updated_at == now`
    pub fn new(id: NoteId, title: String, content: String, now: DateTime<Utc>) -> Self {
        Note {
            id,
            title,
            content,
            category: default_category(),
            color: NoteColor::Default,
            is_pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive substring match against title or content.
    /// `lowered_query` must already be lowercase.
    pub fn matches_lowered(&self, lowered_query: &str) -> bool {
        self.title.to_lowercase().contains(lowered_query)
            || self.content.to_lowercase().contains(lowered_query)
    }
}

/// Blank-note check shared by the store and the dialog
pub fn is_blank(title: &str, content: &str) -> bool {
    title.trim().is_empty() && content.trim().is_empty()
}

/// Which notes the list shows: everything, pinned only, or one category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    #[default]
    All,
    Pinned,
    Category(String),
}

impl FilterMode {
    pub fn parse_filter(s: &str) -> FilterMode {
        match s {
            "all" | "" => FilterMode::All,
            "pinned" => FilterMode::Pinned,
            other => FilterMode::Category(other.to_string()),
        }
    }

    /// Heading shown above the note list
    pub fn page_title(&self) -> String {
        match self {
            FilterMode::All => "All Notes".to_string(),
            FilterMode::Pinned => "Favorites".to_string(),
            FilterMode::Category(c) => capitalize(c),
        }
    }

    /// The category this filter names, if any
    pub fn category(&self) -> Option<&str> {
        match self {
            FilterMode::Category(c) => Some(c.as_str()),
            _ => None,
        }
    }

    pub fn passes(&self, note: &Note) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Pinned => note.is_pinned,
            FilterMode::Category(c) => note.category == *c,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::All => f.write_str("all"),
            FilterMode::Pinned => f.write_str("pinned"),
            FilterMode::Category(c) => f.write_str(c),
        }
    }
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn note_json_uses_camel_case_fields() {
        let mut note = Note::new(42, "Milk".into(), "buy 2%".into(), ts(1_700_000_000));
        note.is_pinned = true;
        note.color = NoteColor::Blue;
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["isPinned"], true);
        assert_eq!(json["color"], "blue");
        assert_eq!(json["category"], "personal");
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn note_decodes_browser_style_timestamps() {
        let raw = r#"{"id":1700000000000,"title":"a","content":"b","category":"work",
            "color":"green","isPinned":false,
            "createdAt":"2023-11-14T22:13:20.123Z","updatedAt":"2023-11-14T22:13:20.123Z"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.id, 1_700_000_000_000);
        assert_eq!(note.category, "work");
        assert_eq!(note.color, NoteColor::Green);
        assert_eq!(note.created_at.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let raw = r#"{"id":5,"createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.category, DEFAULT_CATEGORY);
        assert_eq!(note.color, NoteColor::Default);
        assert!(!note.is_pinned);
    }

    #[test]
    fn unknown_color_decodes_as_default() {
        let raw = r#"{"id":5,"color":"teal","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.color, NoteColor::Default);
    }

    #[test]
    fn color_cycle_wraps() {
        assert_eq!(NoteColor::Default.next(), NoteColor::Red);
        assert_eq!(NoteColor::Purple.next(), NoteColor::Default);
        assert_eq!(NoteColor::Default.prev(), NoteColor::Purple);
        assert!("teal".parse::<NoteColor>().is_err());
        assert_eq!("orange".parse::<NoteColor>(), Ok(NoteColor::Orange));
    }

    #[test]
    fn filter_mode_parse_and_titles() {
        assert_eq!(FilterMode::parse_filter("all"), FilterMode::All);
        assert_eq!(FilterMode::parse_filter("pinned"), FilterMode::Pinned);
        assert_eq!(
            FilterMode::parse_filter("work"),
            FilterMode::Category("work".into())
        );
        assert_eq!(FilterMode::All.page_title(), "All Notes");
        assert_eq!(FilterMode::Pinned.page_title(), "Favorites");
        assert_eq!(FilterMode::Category("home".into()).page_title(), "Home");
        assert_eq!(FilterMode::Category("home".into()).to_string(), "home");
    }

    #[test]
    fn blank_check_trims() {
        assert!(is_blank("  ", "\n\t"));
        assert!(!is_blank(" a ", ""));
        assert!(!is_blank("", "b"));
    }
}
