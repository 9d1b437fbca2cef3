use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::io::slots::SlotError;
use crate::model::config::NotedConfig;
use crate::model::note::{FilterMode, Note, NoteColor, NoteId};
use crate::model::preferences::ThemeMode;
use crate::ops::export;
use crate::ops::note_store::{NoteError, NoteStore};
use crate::ops::query;
use crate::session::dialog::{DialogState, NoteForm, SessionDraft};
use crate::session::preferences;
use crate::session::toast::{ToastKind, ToastQueue};
use crate::view::{self, DialogView, NotesView};

/// Application state shared by the TUI: the store plus everything the
/// user is looking at or editing.
#[derive(Debug)]
pub struct Controller {
    store: NoteStore,
    config: NotedConfig,
    theme: ThemeMode,
    filter: FilterMode,
    query: String,
    dialog: DialogState,
    draft: SessionDraft,
    form: NoteForm,
    toasts: ToastQueue,
}

impl Controller {
    /// Load notes and the theme from `data_dir`.
    pub fn open(data_dir: &Path, config: NotedConfig) -> Result<Self, NoteError> {
        let store = NoteStore::open(data_dir)?;
        let theme = preferences::load_theme(data_dir);
        Ok(Controller {
            store,
            config,
            theme,
            filter: FilterMode::All,
            query: String::new(),
            dialog: DialogState::Closed,
            draft: SessionDraft::default(),
            form: NoteForm::default(),
            toasts: ToastQueue::default(),
        })
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn config(&self) -> &NotedConfig {
        &self.config
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn filter(&self) -> &FilterMode {
        &self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    pub fn draft(&self) -> &SessionDraft {
        &self.draft
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    /// Text fields of the open dialog, None when closed
    pub fn form_mut(&mut self) -> Option<&mut NoteForm> {
        self.dialog.is_open().then_some(&mut self.form)
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Filters offered in the navigation bar: all, pinned, then each
    /// configured category
    pub fn filters(&self) -> Vec<FilterMode> {
        let mut filters = vec![FilterMode::All, FilterMode::Pinned];
        filters.extend(
            self.config
                .notes
                .categories
                .iter()
                .map(|c| FilterMode::Category(c.clone())),
        );
        filters
    }

    // -----------------------------------------------------------------------
    // List state
    // -----------------------------------------------------------------------

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        query::visible_notes(self.store.notes(), &self.filter, &self.query)
    }

    pub fn view(&self) -> NotesView {
        view::project(self.store.notes(), &self.filter, &self.query)
    }

    pub fn dialog_view(&self) -> Option<DialogView> {
        let edited = self.dialog.editing_id().and_then(|id| self.store.get(id));
        view::project_dialog(&self.dialog, &self.draft, &self.form, edited)
    }

    // -----------------------------------------------------------------------
    // Dialog state machine
    // -----------------------------------------------------------------------

    /// Open an empty dialog. The category follows the active category
    /// filter, else the configured default.
    pub fn open_new(&mut self) {
        self.draft = SessionDraft::default();
        self.form = NoteForm {
            category: self
                .filter
                .category()
                .unwrap_or(&self.config.notes.default_category)
                .to_string(),
            ..Default::default()
        };
        self.dialog = DialogState::CreatingNew;
    }

    /// Open the dialog on an existing note, seeding draft and form from it.
    pub fn open_existing(&mut self, id: NoteId) -> Result<(), NoteError> {
        let note = self.store.get(id).ok_or(NoteError::NotFound(id))?;
        self.draft = SessionDraft::from_note(note);
        self.form = NoteForm::from_note(note);
        self.dialog = DialogState::EditingExisting(id);
        Ok(())
    }

    /// Discard the draft and close.
    pub fn close(&mut self) {
        self.dialog = DialogState::Closed;
        self.draft = SessionDraft::default();
        self.form = NoteForm::default();
    }

    /// Save the dialog. Returns None (dialog left open) when there is
    /// nothing to save; store errors also leave the dialog open.
    pub fn submit(&mut self) -> Result<Option<Note>, NoteError> {
        if self.form.title.trim().is_empty() && self.form.content.trim().is_empty() {
            return Ok(None);
        }
        let fields = self.form.to_fields(&self.draft);
        let (note, message) = match self.dialog {
            DialogState::Closed => return Ok(None),
            DialogState::CreatingNew => (self.store.create(fields)?, "Note created!"),
            DialogState::EditingExisting(id) => (self.store.update(id, fields)?, "Changes saved"),
        };
        self.toasts.push(message, ToastKind::Success);
        self.close();
        Ok(Some(note))
    }

    /// Delete the note being edited. Does nothing unless editing.
    pub fn delete_current(&mut self) -> Result<Option<Note>, NoteError> {
        let Some(id) = self.dialog.editing_id() else {
            return Ok(None);
        };
        let removed = self.store.delete(id)?;
        self.toasts.push("Note deleted", ToastKind::Danger);
        self.close();
        Ok(Some(removed))
    }

    // -----------------------------------------------------------------------
    // Draft edits
    // -----------------------------------------------------------------------

    pub fn toggle_draft_pin(&mut self) {
        if self.dialog.is_open() {
            self.draft.is_pinned = !self.draft.is_pinned;
        }
    }

    pub fn set_draft_color(&mut self, color: NoteColor) {
        if self.dialog.is_open() {
            self.draft.color = color;
        }
    }

    pub fn cycle_draft_color(&mut self, forward: bool) {
        let next = if forward {
            self.draft.color.next()
        } else {
            self.draft.color.prev()
        };
        self.set_draft_color(next);
    }

    pub fn toggle_preview(&mut self) {
        if self.dialog.is_open() {
            self.draft.is_preview_mode = !self.draft.is_preview_mode;
        }
    }

    /// Step the form's category through the configured list. A category
    /// outside the list steps to the first entry.
    pub fn cycle_form_category(&mut self, forward: bool) {
        if !self.dialog.is_open() {
            return;
        }
        let cats = &self.config.notes.categories;
        if cats.is_empty() {
            return;
        }
        let next = match cats.iter().position(|c| *c == self.form.category) {
            Some(i) if forward => (i + 1) % cats.len(),
            Some(i) => (i + cats.len() - 1) % cats.len(),
            None => 0,
        };
        self.form.category = cats[next].clone();
    }

    // -----------------------------------------------------------------------
    // Card actions
    // -----------------------------------------------------------------------

    /// Delete a note from the list. Closes the dialog if it was editing it.
    pub fn delete_note(&mut self, id: NoteId) -> Result<Note, NoteError> {
        let removed = self.store.delete(id)?;
        if self.dialog.editing_id() == Some(id) {
            self.close();
        }
        self.toasts.push("Note deleted", ToastKind::Danger);
        Ok(removed)
    }

    pub fn toggle_pin(&mut self, id: NoteId) -> Result<Note, NoteError> {
        let pinned = self
            .store
            .get(id)
            .map(|n| n.is_pinned)
            .ok_or(NoteError::NotFound(id))?;
        self.store.set_pinned(id, !pinned)
    }

    // -----------------------------------------------------------------------
    // Preferences and housekeeping
    // -----------------------------------------------------------------------

    /// Flip the theme and persist it. The in-memory theme only changes once
    /// the slot is written.
    pub fn toggle_theme(&mut self) -> Result<ThemeMode, SlotError> {
        let next = self.theme.toggled();
        preferences::save_theme(self.store.data_dir(), next)?;
        self.theme = next;
        Ok(next)
    }

    /// Re-read the theme slot after an outside change.
    pub fn reload_theme(&mut self) {
        self.theme = preferences::load_theme(self.store.data_dir());
    }

    /// Re-read the notes slot after an outside change.
    pub fn reload(&mut self) -> Result<(), NoteError> {
        self.store.reload()
    }

    /// Write a full backup into `dir`.
    pub fn export(&self, dir: &Path) -> std::io::Result<PathBuf> {
        export::export_notes(self.store.notes(), dir)
    }

    /// Drop expired toasts. Returns true when the screen needs a redraw.
    pub fn expire_toasts(&mut self, now: Instant) -> bool {
        self.toasts.expire(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::slots::{NOTES_SLOT, THEME_SLOT};
    use crate::ops::note_store::load_all;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn controller(tmp: &TempDir) -> Controller {
        Controller::open(tmp.path(), NotedConfig::default()).unwrap()
    }

    fn type_note(c: &mut Controller, title: &str, content: &str) {
        let form = c.form_mut().unwrap();
        form.title = title.into();
        form.content = content.into();
    }

    #[test]
    fn milk_scenario_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);

        c.open_new();
        assert_eq!(c.dialog(), DialogState::CreatingNew);
        type_note(&mut c, "Milk", "buy 2%");
        c.form_mut().unwrap().category = "home".into();
        c.toggle_draft_pin();
        let created = c.submit().unwrap().unwrap();

        assert_eq!(c.dialog(), DialogState::Closed);
        assert_eq!(c.toasts().latest().unwrap().message, "Note created!");

        let persisted = load_all(tmp.path()).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].title, "Milk");
        assert_eq!(persisted[0].category, "home");
        assert!(persisted[0].is_pinned);

        c.set_filter(FilterMode::Pinned);
        assert_eq!(c.view().count, 1);
        c.set_filter(FilterMode::Category("work".into()));
        assert!(c.view().empty);

        c.open_existing(created.id).unwrap();
        c.delete_current().unwrap();
        assert_eq!(c.toasts().latest().unwrap().kind, ToastKind::Danger);
        assert!(load_all(tmp.path()).unwrap().is_empty());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(NOTES_SLOT)).unwrap(),
            "[]"
        );
    }

    #[test]
    fn open_new_takes_category_from_filter() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);

        c.open_new();
        assert_eq!(c.form().category, "personal");
        c.close();

        c.set_filter(FilterMode::Category("education".into()));
        c.open_new();
        assert_eq!(c.form().category, "education");
        c.close();

        c.set_filter(FilterMode::Pinned);
        c.open_new();
        assert_eq!(c.form().category, "personal");
    }

    #[test]
    fn blank_submit_keeps_dialog_open_and_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        c.open_new();
        type_note(&mut c, "  ", "\n");

        assert_eq!(c.submit().unwrap(), None);
        assert_eq!(c.dialog(), DialogState::CreatingNew);
        assert!(c.store().is_empty());
        assert!(c.toasts().is_empty());
        assert!(!tmp.path().join(NOTES_SLOT).exists());
    }

    #[test]
    fn edit_seeds_draft_and_saves_changes() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        c.open_new();
        type_note(&mut c, "Draft", "v1");
        c.set_draft_color(NoteColor::Green);
        let note = c.submit().unwrap().unwrap();

        c.open_existing(note.id).unwrap();
        assert_eq!(c.dialog(), DialogState::EditingExisting(note.id));
        assert_eq!(c.draft().color, NoteColor::Green);
        assert!(!c.draft().is_preview_mode);
        assert_eq!(c.form().content, "v1");

        c.form_mut().unwrap().content = "v2".into();
        c.cycle_draft_color(true);
        let saved = c.submit().unwrap().unwrap();
        assert_eq!(saved.content, "v2");
        assert_eq!(saved.color, NoteColor::Blue);
        assert_eq!(c.toasts().latest().unwrap().message, "Changes saved");
    }

    #[test]
    fn close_discards_draft() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        c.open_new();
        type_note(&mut c, "unsaved", "");
        c.toggle_draft_pin();
        c.toggle_preview();
        c.close();

        assert_eq!(c.dialog(), DialogState::Closed);
        assert_eq!(*c.draft(), SessionDraft::default());
        assert_eq!(*c.form(), NoteForm::default());
        assert!(c.form_mut().is_none());
        assert!(c.store().is_empty());
    }

    #[test]
    fn open_existing_unknown_id_stays_closed() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        assert!(matches!(c.open_existing(7), Err(NoteError::NotFound(7))));
        assert_eq!(c.dialog(), DialogState::Closed);
    }

    #[test]
    fn delete_current_needs_an_existing_note() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        c.open_new();
        type_note(&mut c, "x", "");
        assert_eq!(c.delete_current().unwrap(), None);
        assert_eq!(c.dialog(), DialogState::CreatingNew);
    }

    #[test]
    fn dialog_view_tracks_preview_toggle() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        assert!(c.dialog_view().is_none());
        c.open_new();
        type_note(&mut c, "", "**bold**");
        assert_eq!(c.dialog_view().unwrap().preview_html, None);
        c.toggle_preview();
        assert_eq!(
            c.dialog_view().unwrap().preview_html.as_deref(),
            Some("<strong>bold</strong>")
        );
    }

    #[test]
    fn theme_toggle_twice_restores_value() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        assert_eq!(c.theme(), ThemeMode::Light);

        assert_eq!(c.toggle_theme().unwrap(), ThemeMode::Dark);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(THEME_SLOT)).unwrap(),
            "dark"
        );
        assert_eq!(controller(&tmp).theme(), ThemeMode::Dark);

        assert_eq!(c.toggle_theme().unwrap(), ThemeMode::Light);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(THEME_SLOT)).unwrap(),
            "light"
        );
    }

    #[test]
    fn card_actions_pin_and_delete() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        c.open_new();
        type_note(&mut c, "card", "");
        let note = c.submit().unwrap().unwrap();

        assert!(c.toggle_pin(note.id).unwrap().is_pinned);
        assert!(!c.toggle_pin(note.id).unwrap().is_pinned);

        c.open_existing(note.id).unwrap();
        c.delete_note(note.id).unwrap();
        assert_eq!(c.dialog(), DialogState::Closed);
        assert!(matches!(c.toggle_pin(note.id), Err(NoteError::NotFound(_))));
    }

    #[test]
    fn category_cycle_wraps_through_config() {
        let tmp = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        c.open_new();
        assert_eq!(c.form().category, "personal");
        c.cycle_form_category(true);
        assert_eq!(c.form().category, "work");
        c.cycle_form_category(false);
        c.cycle_form_category(false);
        assert_eq!(c.form().category, "home");
    }

    #[test]
    fn filters_list_all_pinned_then_categories() {
        let tmp = TempDir::new().unwrap();
        let c = controller(&tmp);
        let names: Vec<String> = c.filters().iter().map(|f| f.to_string()).collect();
        assert_eq!(
            names,
            vec!["all", "pinned", "personal", "work", "education", "home"]
        );
    }

    #[test]
    fn export_writes_backup_into_dir() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let mut c = controller(&tmp);
        c.open_new();
        type_note(&mut c, "a", "");
        c.submit().unwrap();

        let path = c.export(out.path()).unwrap();
        assert!(path.ends_with("noted_backup.json"));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"title\": \"a\""));
    }
}
