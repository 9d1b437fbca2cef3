use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let show_hints = app.controller.config().ui.show_key_hints;

    let mut spans: Vec<Span> = Vec::new();
    let hint = match app.mode {
        Mode::Navigate => {
            if let Some(msg) = &app.status_message {
                let color = if app.status_is_error {
                    app.theme.danger
                } else {
                    app.theme.text
                };
                spans.push(Span::styled(
                    format!(" {}", msg),
                    Style::default().fg(color).bg(bg),
                ));
            } else if !app.controller.query().is_empty() {
                spans.push(Span::styled(
                    format!(" /{}", app.controller.query()),
                    Style::default().fg(app.theme.dim).bg(bg),
                ));
            }
            if show_hints {
                "a new  / search  p pin  t theme  ? help  q quit "
            } else {
                "? help "
            }
        }
        Mode::Search => {
            // Search prompt: /query▌
            spans.push(Span::styled(
                format!(" /{}", app.controller.query()),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
            "Enter keep  Esc cancel "
        }
        Mode::Dialog => {
            if let Some(msg) = app.status_message.as_ref().filter(|_| app.status_is_error) {
                spans.push(Span::styled(
                    format!(" {}", msg),
                    Style::default().fg(app.theme.danger).bg(bg),
                ));
            }
            "Tab next field  ^S save  Esc cancel "
        }
        Mode::Confirm => "y confirm  n cancel ",
    };

    let used = spans_width(&spans);
    let hint_width = unicode::display_width(hint);
    if used + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn navigate_shows_hints() {
        let (_tmp, app) = app_with_notes(&[]);
        let output = render(&app);
        assert!(output.ends_with("? help  q quit"));
    }

    #[test]
    fn status_message_on_the_left() {
        let (_tmp, mut app) = app_with_notes(&[]);
        app.set_error("write failed");
        let output = render(&app);
        assert!(output.starts_with(" write failed"));
        assert!(output.ends_with("q quit"));
    }

    #[test]
    fn search_prompt_shows_query() {
        let (_tmp, mut app) = app_with_notes(&[]);
        app.mode = Mode::Search;
        app.controller.set_query("mil");
        let output = render(&app);
        assert!(output.starts_with(" /mil\u{258C}"));
        assert!(output.ends_with("Esc cancel"));
    }

    #[test]
    fn hidden_key_hints_keep_help() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[ui]\nshow_key_hints = false\n",
        )
        .unwrap();
        let app = crate::tui::app::build_app(tmp.path()).unwrap();
        let output = render(&app);
        assert!(output.ends_with("? help"));
        assert!(!output.contains("q quit"));
    }
}
