use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::ops::note_store::NoteFields;
use crate::tui::app::{App, build_app};

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over a fresh data directory holding `(title, content, category)`
/// notes, created in order (so the last one is listed first). Keep the
/// TempDir alive for the duration of the test.
pub fn app_with_notes(notes: &[(&str, &str, &str)]) -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    {
        let mut store = crate::ops::note_store::NoteStore::open(tmp.path()).unwrap();
        for (title, content, category) in notes {
            store
                .create(NoteFields {
                    title: title.to_string(),
                    content: content.to_string(),
                    category: category.to_string(),
                    ..Default::default()
                })
                .unwrap();
        }
    }
    let app = build_app(tmp.path()).unwrap();
    (tmp, app)
}
