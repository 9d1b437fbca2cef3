use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// The list filters on every keystroke; Enter keeps the query, Esc
/// restores the one that was active before the prompt opened.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            let original = std::mem::take(&mut app.search_original);
            app.controller.set_query(original);
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => {
            app.search_original.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            let mut query = app.controller.query().to_string();
            query.pop();
            app.controller.set_query(query);
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.controller.set_query(""),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            let mut query = app.controller.query().to_string();
            query.push(c);
            app.controller.set_query(query);
        }
        _ => return,
    }
    app.cursor = 0;
    app.scroll_offset = 0;
}
