use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::DialogState;
use crate::tui::app::{App, ConfirmAction, ConfirmState, DialogField, Mode};
use crate::util::unicode;

pub(super) fn handle_dialog(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.controller.close();
            app.mode = Mode::Navigate;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => submit(app),
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => app.controller.toggle_draft_pin(),
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => app.controller.cycle_draft_color(true),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => app.controller.toggle_preview(),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
            if matches!(app.controller.dialog(), DialogState::EditingExisting(_)) {
                app.confirm_state = Some(ConfirmState {
                    message: "Delete this note?".into(),
                    action: ConfirmAction::DeleteCurrent,
                    return_mode: Mode::Dialog,
                });
                app.mode = Mode::Confirm;
            }
        }
        (KeyModifiers::NONE, KeyCode::Tab) => app.focus_field(app.dialog_field.next()),
        (_, KeyCode::BackTab) => app.focus_field(app.dialog_field.prev()),
        _ => edit_field(app, key),
    }
}

fn submit(app: &mut App) {
    match app.controller.submit() {
        Ok(Some(note)) => {
            app.mode = Mode::Navigate;
            app.select_note(note.id);
            app.clamp_cursor();
        }
        // Nothing to save: the dialog stays open
        Ok(None) => {}
        Err(e) => app.set_error(e.to_string()),
    }
}

/// Text editing inside the focused field.
fn edit_field(app: &mut App, key: KeyEvent) {
    let field = app.dialog_field;
    // The content field is read-only while the preview is showing
    if field == DialogField::Content && app.controller.draft().is_preview_mode {
        return;
    }

    let cursor = app.edit_cursor.min(app.focused_text().len());
    let text = app.focused_text();

    let new_cursor = match (key.modifiers, key.code) {
        // Category: step through configured categories
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Down) if field == DialogField::Category => {
            app.controller
                .cycle_form_category(key.code == KeyCode::Down);
            app.edit_cursor = app.focused_text().len();
            return;
        }
        (KeyModifiers::NONE, KeyCode::Up) if field == DialogField::Content => {
            vertical_move(text, cursor, -1)
        }
        (KeyModifiers::NONE, KeyCode::Down) if field == DialogField::Content => {
            vertical_move(text, cursor, 1)
        }

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Left) => {
            unicode::prev_grapheme_boundary(text, cursor).unwrap_or(0)
        }
        (KeyModifiers::NONE, KeyCode::Right) => {
            unicode::next_grapheme_boundary(text, cursor).unwrap_or(text.len())
        }
        (KeyModifiers::ALT | KeyModifiers::CONTROL, KeyCode::Left) => {
            unicode::word_boundary_left(text, cursor)
        }
        (KeyModifiers::ALT | KeyModifiers::CONTROL, KeyCode::Right) => {
            unicode::word_boundary_right(text, cursor)
        }
        (_, KeyCode::Home) => line_start(text, cursor),
        (_, KeyCode::End) => line_end(text, cursor),

        // Enter: newline in content, next field elsewhere
        (_, KeyCode::Enter) => {
            if field != DialogField::Content {
                app.focus_field(field.next());
                return;
            }
            insert_at_cursor(app, cursor, "\n");
            return;
        }

        (_, KeyCode::Backspace) => {
            let Some(start) = unicode::prev_grapheme_boundary(text, cursor) else {
                return;
            };
            if let Some(buf) = app.focused_text_mut() {
                buf.replace_range(start..cursor, "");
            }
            start
        }
        (_, KeyCode::Delete) => {
            let Some(end) = unicode::next_grapheme_boundary(text, cursor) else {
                return;
            };
            if let Some(buf) = app.focused_text_mut() {
                buf.replace_range(cursor..end, "");
            }
            cursor
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            let start = line_start(text, cursor);
            if let Some(buf) = app.focused_text_mut() {
                buf.replace_range(start..cursor, "");
            }
            start
        }

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            let mut tmp = [0u8; 4];
            insert_at_cursor(app, cursor, c.encode_utf8(&mut tmp));
            return;
        }
        _ => return,
    };
    app.edit_cursor = new_cursor;
}

/// Insert pasted text. Single-line fields get newlines flattened to spaces.
pub(super) fn paste_into_field(app: &mut App, text: &str) {
    if app.dialog_field == DialogField::Content && app.controller.draft().is_preview_mode {
        return;
    }
    let cursor = app.edit_cursor.min(app.focused_text().len());
    let clean = if app.dialog_field == DialogField::Content {
        text.replace("\r\n", "\n")
    } else {
        text.replace("\r\n", " ").replace(['\n', '\r'], " ")
    };
    insert_at_cursor(app, cursor, &clean);
}

fn insert_at_cursor(app: &mut App, cursor: usize, s: &str) {
    if let Some(buf) = app.focused_text_mut() {
        buf.insert_str(cursor, s);
        app.edit_cursor = cursor + s.len();
    }
}

fn line_start(text: &str, cursor: usize) -> usize {
    text[..cursor].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(text: &str, cursor: usize) -> usize {
    text[cursor..].find('\n').map_or(text.len(), |i| cursor + i)
}

/// Move up or down one line, keeping the display column where possible.
fn vertical_move(text: &str, cursor: usize, delta: i32) -> usize {
    let start = line_start(text, cursor);
    let col = unicode::byte_offset_to_display_col(&text[start..], cursor - start);
    let target_start = if delta < 0 {
        if start == 0 {
            return 0;
        }
        line_start(text, start - 1)
    } else {
        let end = line_end(text, cursor);
        if end == text.len() {
            return text.len();
        }
        end + 1
    };
    let target_end = line_end(text, target_start);
    target_start + unicode::display_col_to_byte_offset(&text[target_start..target_end], col)
}
