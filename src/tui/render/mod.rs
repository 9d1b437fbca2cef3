pub mod confirm_popup;
pub mod dialog_view;
pub mod help_overlay;
pub mod markup;
pub mod nav_bar;
pub mod notes_view;
pub mod status_row;
pub mod toast;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: nav bar (2 rows) | notes | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // nav bar + separator
            Constraint::Min(1),    // notes
            Constraint::Length(1), // status row
        ])
        .split(area);

    nav_bar::render_nav_bar(frame, app, chunks[0]);
    notes_view::render_notes_view(frame, app, chunks[1]);

    if app.controller.dialog().is_open() {
        dialog_view::render_dialog(frame, app, chunks[1]);
    }

    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, area);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    toast::render_toasts(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || last_end == 0 {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| crate::util::unicode::display_width(&s.content))
        .sum()
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn highlight_splits_at_matches() {
        let re = Regex::new("(?i)milk").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Buy MILK now",
            Style::default(),
            Style::default().add_modifier(ratatui::style::Modifier::BOLD),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Buy ", "MILK", " now"]);
    }

    #[test]
    fn full_screen_shows_nav_list_and_status() {
        let (_tmp, mut app) = app_with_notes(&[("Milk", "buy 2%", "home")]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(output.contains("All Notes"));
        assert!(output.contains("Milk"));
        assert!(output.contains("Work"));
        assert!(output.contains("? help"));
    }

    #[test]
    fn full_screen_with_dialog_open() {
        let (_tmp, mut app) = app_with_notes(&[]);
        app.controller.open_new();
        app.mode = Mode::Dialog;
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(output.contains("New Note"));
        assert!(output.contains("^S save"));
    }
}
