use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let Some(state) = app.confirm_state.take() else {
                app.mode = Mode::Navigate;
                return;
            };
            match state.action {
                ConfirmAction::DeleteNote { id } => {
                    app.mode = Mode::Navigate;
                    if let Err(e) = app.controller.delete_note(id) {
                        app.set_error(e.to_string());
                    }
                }
                ConfirmAction::DeleteCurrent => match app.controller.delete_current() {
                    Ok(_) => app.mode = Mode::Navigate,
                    Err(e) => {
                        app.mode = state.return_mode;
                        app.set_error(e.to_string());
                    }
                },
            }
            app.clamp_cursor();
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            let return_mode = app
                .confirm_state
                .take()
                .map_or(Mode::Navigate, |s| s.return_mode);
            app.mode = return_mode;
        }
        _ => {}
    }
}
