//! Pure projection from application state to what the screen shows.
//!
//! Nothing here touches the terminal: the TUI draws these values, and tests
//! compare them directly. Projecting the same inputs twice yields equal
//! values.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::model::note::{FilterMode, Note, NoteColor, NoteId, capitalize};
use crate::ops::markdown::render_preview;
use crate::ops::query::visible_notes;
use crate::session::dialog::{DialogState, NoteForm, SessionDraft};

/// Maximum characters of content shown on a card
pub const CARD_PREVIEW_CHARS: usize = 120;

/// Shown when no note passes the filter and query
pub const EMPTY_MESSAGE: &str = "No notes found here.";

/// The note list as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesView {
    pub page_title: String,
    /// Badge count: number of visible notes
    pub count: usize,
    pub cards: Vec<CardView>,
    /// True when the empty-state placeholder replaces the cards
    pub empty: bool,
}

/// One note card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: NoteId,
    pub title: String,
    /// Content flattened to one line and cut to `CARD_PREVIEW_CHARS`
    pub preview: String,
    /// Short date of the last edit, e.g. `Mar 7`
    pub date: String,
    pub category_label: String,
    pub is_pinned: bool,
    pub color: NoteColor,
}

/// The open create/edit dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub heading: &'static str,
    pub title: String,
    pub content: String,
    pub category: String,
    pub is_pinned: bool,
    pub color: NoteColor,
    pub is_preview_mode: bool,
    /// Preview markup of the content, only in preview mode
    pub preview_html: Option<String>,
    /// `Edited ...` label, only when editing
    pub last_edited: Option<String>,
    pub can_delete: bool,
}

pub fn project(notes: &[Note], filter: &FilterMode, query: &str) -> NotesView {
    project_in(notes, filter, query, &Local)
}

/// Projection with an explicit display time zone.
pub fn project_in<Tz: TimeZone>(
    notes: &[Note],
    filter: &FilterMode,
    query: &str,
    tz: &Tz,
) -> NotesView
where
    Tz::Offset: std::fmt::Display,
{
    let cards: Vec<CardView> = visible_notes(notes, filter, query)
        .into_iter()
        .map(|n| card(n, tz))
        .collect();
    NotesView {
        page_title: filter.page_title(),
        count: cards.len(),
        empty: cards.is_empty(),
        cards,
    }
}

fn card<Tz: TimeZone>(note: &Note, tz: &Tz) -> CardView
where
    Tz::Offset: std::fmt::Display,
{
    CardView {
        id: note.id,
        title: note.title.clone(),
        preview: content_preview(&note.content, CARD_PREVIEW_CHARS),
        date: short_date(note.updated_at, tz),
        category_label: capitalize(&note.category),
        is_pinned: note.is_pinned,
        color: note.color,
    }
}

/// Collapse line breaks to spaces and cut to `max_chars`, marking the cut
/// with `…`.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let flat = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('\u{2026}');
    cut
}

pub fn short_date<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%b %-d").to_string()
}

pub fn edited_label<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Edited {}", at.with_timezone(tz).format("%b %-d, %Y %H:%M"))
}

/// Describe the dialog, or None when it is closed. `edited` is the note
/// being edited, looked up by the caller.
pub fn project_dialog(
    state: &DialogState,
    draft: &SessionDraft,
    form: &NoteForm,
    edited: Option<&Note>,
) -> Option<DialogView> {
    project_dialog_in(state, draft, form, edited, &Local)
}

pub fn project_dialog_in<Tz: TimeZone>(
    state: &DialogState,
    draft: &SessionDraft,
    form: &NoteForm,
    edited: Option<&Note>,
    tz: &Tz,
) -> Option<DialogView>
where
    Tz::Offset: std::fmt::Display,
{
    let (heading, editing) = match state {
        DialogState::Closed => return None,
        DialogState::CreatingNew => ("New Note", false),
        DialogState::EditingExisting(_) => ("Edit Note", true),
    };
    Some(DialogView {
        heading,
        title: form.title.clone(),
        content: form.content.clone(),
        category: form.category.clone(),
        is_pinned: draft.is_pinned,
        color: draft.color,
        is_preview_mode: draft.is_preview_mode,
        preview_html: draft
            .is_preview_mode
            .then(|| render_preview(&form.content)),
        last_edited: if editing {
            edited.map(|n| edited_label(n.updated_at, tz))
        } else {
            None
        },
        can_delete: editing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
    }

    fn notes() -> Vec<Note> {
        let mut milk = Note::new(1, "Milk".into(), "buy 2%".into(), at(7));
        milk.category = "home".into();
        milk.is_pinned = true;
        let mut report = Note::new(2, "Report".into(), "line one\n\nline two".into(), at(8));
        report.category = "work".into();
        report.color = NoteColor::Blue;
        report.updated_at = at(9) + Duration::hours(1);
        vec![report, milk]
    }

    #[test]
    fn projects_cards_in_display_order() {
        let view = project_in(&notes(), &FilterMode::All, "", &Utc);
        assert_eq!(view.page_title, "All Notes");
        assert_eq!(view.count, 2);
        assert!(!view.empty);
        assert_eq!(
            view.cards[0],
            CardView {
                id: 1,
                title: "Milk".into(),
                preview: "buy 2%".into(),
                date: "Mar 7".into(),
                category_label: "Home".into(),
                is_pinned: true,
                color: NoteColor::Default,
            }
        );
        assert_eq!(view.cards[1].preview, "line one line two");
        assert_eq!(view.cards[1].date, "Mar 9");
    }

    #[test]
    fn empty_state_when_nothing_matches() {
        let view = project_in(&notes(), &FilterMode::Category("education".into()), "", &Utc);
        assert_eq!(view.page_title, "Education");
        assert_eq!(view.count, 0);
        assert!(view.empty);
        assert!(view.cards.is_empty());
    }

    #[test]
    fn projection_is_idempotent() {
        let all = notes();
        let a = project_in(&all, &FilterMode::Pinned, "mil", &Utc);
        let b = project_in(&all, &FilterMode::Pinned, "mil", &Utc);
        assert_eq!(a, b);
        assert_eq!(a.page_title, "Favorites");
    }

    #[test]
    fn long_content_is_cut_with_ellipsis() {
        let long = "word ".repeat(60);
        let preview = content_preview(&long, 20);
        assert_eq!(preview.chars().count(), 20);
        assert!(preview.ends_with('\u{2026}'));
        assert_eq!(content_preview("short", 20), "short");
    }

    #[test]
    fn closed_dialog_projects_nothing() {
        let view = project_dialog(
            &DialogState::Closed,
            &SessionDraft::default(),
            &NoteForm::default(),
            None,
        );
        assert!(view.is_none());
    }

    #[test]
    fn new_dialog_has_no_delete_or_edit_label() {
        let form = NoteForm {
            title: "".into(),
            content: "# Hi".into(),
            category: "work".into(),
        };
        let draft = SessionDraft {
            is_preview_mode: true,
            ..Default::default()
        };
        let view = project_dialog_in(&DialogState::CreatingNew, &draft, &form, None, &Utc).unwrap();
        assert_eq!(view.heading, "New Note");
        assert!(!view.can_delete);
        assert_eq!(view.last_edited, None);
        assert_eq!(view.preview_html.as_deref(), Some("<h1>Hi</h1>"));
    }

    #[test]
    fn edit_dialog_shows_last_edited_and_delete() {
        let all = notes();
        let note = &all[1];
        let view = project_dialog_in(
            &DialogState::EditingExisting(note.id),
            &SessionDraft::from_note(note),
            &NoteForm::from_note(note),
            Some(note),
            &Utc,
        )
        .unwrap();
        assert_eq!(view.heading, "Edit Note");
        assert!(view.can_delete);
        assert!(view.is_pinned);
        assert_eq!(view.preview_html, None);
        assert_eq!(view.last_edited.as_deref(), Some("Edited Mar 7, 2025 12:00"));
    }
}
