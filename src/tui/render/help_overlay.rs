use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect_fixed;

const NOTES_KEYS: &[(&str, &str)] = &[
    (" \u{2191}\u{2193}/jk", "Move between notes"),
    (" g/G", "Jump to top/bottom"),
    (" Tab/1-9", "Switch filter"),
    (" /", "Search (Esc clears)"),
    (" a/n", "New note"),
    (" Enter/e", "Open note"),
    (" p", "Pin / unpin"),
    (" d", "Delete note"),
    (" t", "Toggle light/dark"),
    (" x", "Export backup"),
];

const DIALOG_KEYS: &[(&str, &str)] = &[
    (" Tab", "Next field"),
    (" Ctrl+S", "Save"),
    (" Ctrl+P", "Pin / unpin"),
    (" Ctrl+O", "Next color"),
    (" Ctrl+R", "Edit / preview"),
    (" Ctrl+D", "Delete note"),
    (" Esc", "Cancel"),
];

const GLOBAL_KEYS: &[(&str, &str)] = &[
    (" ?", "Toggle this help"),
    (" q", "Quit"),
    (" Ctrl+C", "Quit (immediate)"),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));
    for (heading, keys) in [
        (" Notes", NOTES_KEYS),
        (" Dialog", DIALOG_KEYS),
        (" Global", GLOBAL_KEYS),
    ] {
        lines.push(Line::from(Span::styled(heading, header_style)));
        for (key, desc) in keys {
            add_binding(&mut lines, key, desc, key_style, desc_style);
        }
        lines.push(Line::from(""));
    }
    lines.pop();

    let overlay_area = centered_rect_fixed(46, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
