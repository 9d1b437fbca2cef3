use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::note::FilterMode;
use crate::tui::app::{App, ConfirmAction, ConfirmState, DialogField, Mode};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    app.status_message = None;

    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,
        (KeyModifiers::NONE, KeyCode::Char('?')) => app.show_help = true,

        // Cursor
        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => move_cursor(app, 1),
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => move_cursor(app, -1),
        (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.visible_count().saturating_sub(1);
        }

        // Filters
        (KeyModifiers::NONE, KeyCode::Tab) => cycle_filter(app, true),
        (_, KeyCode::BackTab) => cycle_filter(app, false),
        (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(filter) = app.controller.filters().get(idx).cloned() {
                apply_filter(app, filter);
            }
        }

        // Search
        (KeyModifiers::NONE, KeyCode::Char('/')) => {
            app.search_original = app.controller.query().to_string();
            app.mode = Mode::Search;
        }
        (_, KeyCode::Esc) => {
            if !app.controller.query().is_empty() {
                app.controller.set_query("");
                app.clamp_cursor();
            }
        }

        // Notes
        (KeyModifiers::NONE, KeyCode::Char('a') | KeyCode::Char('n')) => open_new_dialog(app),
        (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('e')) => open_selected(app),
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            if let Some(id) = app.cursor_note_id() {
                app.confirm_state = Some(ConfirmState {
                    message: "Permanently delete this note?".into(),
                    action: ConfirmAction::DeleteNote { id },
                    return_mode: Mode::Navigate,
                });
                app.mode = Mode::Confirm;
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('p')) => {
            if let Some(id) = app.cursor_note_id() {
                match app.controller.toggle_pin(id) {
                    Ok(note) => {
                        app.select_note(note.id);
                        app.clamp_cursor();
                        app.set_status(if note.is_pinned { "pinned" } else { "unpinned" });
                    }
                    Err(e) => app.set_error(e.to_string()),
                }
            }
        }

        // Preferences and export
        (KeyModifiers::NONE, KeyCode::Char('t')) => match app.controller.toggle_theme() {
            Ok(_) => app.refresh_theme(),
            Err(e) => app.set_error(e.to_string()),
        },
        (KeyModifiers::NONE, KeyCode::Char('x')) => {
            let dir = app.export_dir.clone();
            match app.controller.export(&dir) {
                Ok(path) => app.set_status(format!("exported to {}", path.display())),
                Err(e) => app.set_error(format!("export failed: {}", e)),
            }
        }
        _ => {}
    }
}

pub(super) fn move_cursor(app: &mut App, delta: i32) {
    let count = app.visible_count();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    let next = app.cursor as i64 + delta as i64;
    app.cursor = next.clamp(0, count as i64 - 1) as usize;
}

fn cycle_filter(app: &mut App, forward: bool) {
    let filters = app.controller.filters();
    let len = filters.len();
    let current = filters
        .iter()
        .position(|f| f == app.controller.filter())
        .unwrap_or(0);
    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    apply_filter(app, filters[next].clone());
}

pub(super) fn apply_filter(app: &mut App, filter: FilterMode) {
    app.controller.set_filter(filter);
    app.cursor = 0;
    app.scroll_offset = 0;
}

pub(super) fn open_new_dialog(app: &mut App) {
    app.controller.open_new();
    app.mode = Mode::Dialog;
    app.focus_field(DialogField::Title);
}

fn open_selected(app: &mut App) {
    let Some(id) = app.cursor_note_id() else {
        return;
    };
    match app.controller.open_existing(id) {
        Ok(()) => {
            app.mode = Mode::Dialog;
            app.focus_field(DialogField::Title);
        }
        Err(e) => app.set_error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DialogState;
    use crate::tui::app::build_app;
    use crate::tui::input::test_keys::*;
    use tempfile::TempDir;

    fn app_with_notes(tmp: &TempDir, titles: &[&str]) -> App {
        let mut app = build_app(tmp.path()).unwrap();
        for title in titles {
            handle_key(&mut app, ch('a'));
            for c in title.chars() {
                handle_key(&mut app, ch(c));
            }
            handle_key(&mut app, ctrl('s'));
        }
        app
    }

    #[test]
    fn new_note_from_keyboard() {
        let tmp = TempDir::new().unwrap();
        let app = app_with_notes(&tmp, &["Milk"]);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.controller.store().len(), 1);
        assert_eq!(app.controller.store().notes()[0].title, "Milk");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_notes(&tmp, &["one", "two"]);
        handle_key(&mut app, ch('k'));
        assert_eq!(app.cursor, 0);
        for _ in 0..5 {
            handle_key(&mut app, ch('j'));
        }
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn tab_cycles_filters_and_number_keys_jump() {
        let tmp = TempDir::new().unwrap();
        let mut app = build_app(tmp.path()).unwrap();
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(*app.controller.filter(), FilterMode::Pinned);
        handle_key(&mut app, key(KeyCode::BackTab));
        handle_key(&mut app, key(KeyCode::BackTab));
        assert_eq!(*app.controller.filter(), FilterMode::Category("home".into()));
        handle_key(&mut app, ch('4'));
        assert_eq!(*app.controller.filter(), FilterMode::Category("work".into()));
    }

    #[test]
    fn delete_asks_first() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_notes(&tmp, &["doomed"]);
        handle_key(&mut app, ch('d'));
        assert_eq!(app.mode, Mode::Confirm);
        handle_key(&mut app, ch('n'));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.controller.store().len(), 1);

        handle_key(&mut app, ch('d'));
        handle_key(&mut app, ch('y'));
        assert!(app.controller.store().is_empty());
        assert_eq!(
            app.controller.toasts().latest().unwrap().message,
            "Note deleted"
        );
    }

    #[test]
    fn enter_opens_selected_note() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_notes(&tmp, &["edit me"]);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Dialog);
        assert!(matches!(
            app.controller.dialog(),
            DialogState::EditingExisting(_)
        ));
        assert_eq!(app.edit_cursor, "edit me".len());
    }

    #[test]
    fn pin_moves_note_to_top() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_notes(&tmp, &["older", "newer"]);
        // newest first: cursor 1 is "older"
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, ch('p'));
        let top = app.controller.visible_notes()[0].title.clone();
        assert_eq!(top, "older");
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn theme_key_persists() {
        let tmp = TempDir::new().unwrap();
        let mut app = build_app(tmp.path()).unwrap();
        handle_key(&mut app, ch('t'));
        assert_eq!(app.theme.mode, crate::model::preferences::ThemeMode::Dark);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("note-app-theme")).unwrap(),
            "dark"
        );
    }

    #[test]
    fn export_key_writes_backup() {
        let tmp = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let mut app = app_with_notes(&tmp, &["keep"]);
        app.export_dir = out.path().to_path_buf();
        handle_key(&mut app, ch('x'));
        assert!(out.path().join("noted_backup.json").exists());
        assert!(!app.status_is_error);
    }
}
