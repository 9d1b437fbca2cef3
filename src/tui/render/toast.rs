use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::session::ToastKind;
use crate::tui::app::App;
use crate::util::unicode;

/// Most toasts stacked at once; older ones are hidden until they expire
const MAX_STACK: usize = 3;

/// Render live toasts stacked in the top-right corner of `area`, newest on top
pub fn render_toasts(frame: &mut Frame, app: &App, area: Rect) {
    let toasts: Vec<_> = app.controller.toasts().iter().collect();
    if toasts.is_empty() || area.height == 0 {
        return;
    }

    for (row, toast) in toasts.iter().rev().take(MAX_STACK).enumerate() {
        let row = row as u16;
        if row >= area.height {
            break;
        }
        let (icon, color) = match toast.kind {
            ToastKind::Success => ("\u{2713}", app.theme.success),
            ToastKind::Danger => ("\u{2717}", app.theme.danger),
        };
        let text = format!(" {} {} ", icon, toast.message);
        let text = unicode::truncate_to_width(&text, area.width as usize);
        let width = unicode::display_width(&text) as u16;
        let rect = Rect::new(area.right().saturating_sub(width + 1), area.y + row, width, 1);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default()
                    .fg(app.theme.background)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ))),
            rect,
        );
    }
}
