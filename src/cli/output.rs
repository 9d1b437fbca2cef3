use serde::Serialize;

use crate::model::note::{Note, NoteColor, NoteId};
use crate::view::{CardView, NotesView};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct NoteListJson<'a> {
    pub page_title: &'a str,
    pub count: usize,
    pub notes: Vec<&'a Note>,
}

#[derive(Serialize)]
pub struct ShowJson<'a> {
    #[serde(flatten)]
    pub note: &'a Note,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_html: Option<String>,
}

#[derive(Serialize)]
pub struct ThemeJson {
    pub theme: &'static str,
}

#[derive(Serialize)]
pub struct ExportJson {
    pub path: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct PreviewJson {
    pub html: String,
}

#[derive(Serialize)]
pub struct CategoriesJson<'a> {
    pub categories: &'a [String],
    pub default: &'a str,
}

#[derive(Serialize)]
pub struct CategoryChangeJson<'a> {
    pub category: &'a str,
    pub action: &'static str,
}

#[derive(Serialize)]
pub struct DeletedJson {
    pub deleted: NoteId,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `★ 1718000000000  Milk  [Home]  Jun 10  (blue)`
fn card_line(card: &CardView) -> String {
    let pin = if card.is_pinned { "\u{2605}" } else { " " };
    let title = if card.title.is_empty() {
        "(untitled)"
    } else {
        &card.title
    };
    let mut line = format!(
        "{} {}  {}  [{}]  {}",
        pin, card.id, title, card.category_label, card.date
    );
    if card.color != NoteColor::Default {
        line.push_str(&format!("  ({})", card.color));
    }
    line
}

/// Page heading, then one line per card followed by an indented preview
pub fn format_notes_view(view: &NotesView) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", view.page_title, view.count)];
    if view.empty {
        lines.push(format!("  {}", crate::view::EMPTY_MESSAGE));
        return lines;
    }
    for card in &view.cards {
        lines.push(card_line(card));
        if !card.preview.is_empty() {
            lines.push(format!("    {}", card.preview));
        }
    }
    lines
}

/// Full note: heading block, blank line, body
pub fn format_note(note: &Note, body: &str) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{}{}",
            if note.is_pinned { "\u{2605} " } else { "" },
            if note.title.is_empty() {
                "(untitled)"
            } else {
                &note.title
            }
        ),
        format!("id: {}", note.id),
        format!("category: {}", note.category),
        format!("color: {}", note.color),
        format!(
            "created: {}",
            note.created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        ),
        format!(
            "updated: {}",
            note.updated_at
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        ),
    ];
    if !body.is_empty() {
        lines.push(String::new());
        lines.extend(body.lines().map(str::to_string));
    }
    lines
}
