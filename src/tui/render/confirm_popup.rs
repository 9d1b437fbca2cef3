use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect_fixed;

/// Render the y/n confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = &app.confirm_state else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let lines = vec![
        Line::from(Span::styled(format!(" {}", confirm.message), text_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", key_style),
            Span::styled(" confirm  ", dim_style),
            Span::styled("n", key_style),
            Span::styled(" cancel", dim_style),
        ]),
    ];

    let popup_w = (confirm.message.chars().count() as u16 + 4).max(24);
    let overlay_area = centered_rect_fixed(popup_w, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.danger).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        overlay_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{ConfirmAction, ConfirmState, Mode};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_message_and_keys() {
        let (_tmp, mut app) = app_with_notes(&[("Milk", "", "home")]);
        let id = app.cursor_note_id().unwrap();
        app.confirm_state = Some(ConfirmState {
            message: "Permanently delete this note?".into(),
            action: ConfirmAction::DeleteNote { id },
            return_mode: Mode::Navigate,
        });
        app.mode = Mode::Confirm;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert!(output.contains("Permanently delete this note?"));
        assert!(output.contains("y confirm  n cancel"));
    }

    #[test]
    fn nothing_without_pending_confirm() {
        let (_tmp, app) = app_with_notes(&[]);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert_eq!(output, "");
    }
}
