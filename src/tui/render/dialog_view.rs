use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::note::capitalize;
use crate::tui::app::{App, DialogField, Mode};
use crate::util::unicode;
use crate::view::DialogView;

use super::centered_rect_fixed;
use super::markup::markup_to_lines;

const LABEL_WIDTH: usize = 10;

/// Render the create/edit dialog over the notes list
pub fn render_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = app.controller.dialog_view() else {
        return;
    };

    let popup_w = 72.min(area.width.saturating_sub(2));
    let popup_h = 20.min(area.height);
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let theme = &app.theme;
    let bg = theme.surface;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.note_color(view.color)).bg(bg))
        .title(Span::styled(
            format!(" {} ", view.heading),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.height < 5 || inner.width < LABEL_WIDTH as u16 + 2 {
        return;
    }

    let focused = app.mode == Mode::Dialog;
    let width = inner.width as usize;

    // Fixed rows: title, category, blank ... content ... blank, flags, edited, hints
    let title_row = Rect::new(inner.x, inner.y, inner.width, 1);
    let category_row = Rect::new(inner.x, inner.y + 1, inner.width, 1);
    let footer_rows = 3u16;
    let content_area = Rect::new(
        inner.x,
        inner.y + 3,
        inner.width,
        inner.height.saturating_sub(3 + footer_rows + 1),
    );
    let footer_y = inner.y + inner.height - footer_rows;

    render_field(frame, app, "Title", &view.title, DialogField::Title, title_row);
    render_field(
        frame,
        app,
        "Category",
        &capitalize(&view.category),
        DialogField::Category,
        category_row,
    );
    render_content(frame, app, &view, content_area);

    let flags = flag_line(app, &view);
    frame.render_widget(
        Paragraph::new(flags).style(Style::default().bg(bg)),
        Rect::new(inner.x, footer_y, inner.width, 1),
    );
    if let Some(edited) = &view.last_edited {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", edited),
                Style::default().fg(theme.dim).bg(bg),
            )),
            Rect::new(inner.x, footer_y + 1, inner.width, 1),
        );
    }
    let hints = unicode::truncate_to_width(&hint_text(&view), width);
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(theme.dim).bg(bg))),
        Rect::new(inner.x, footer_y + 2, inner.width, 1),
    );

    if focused
        && let Some(pos) = cursor_position(app, &view, title_row, category_row, content_area)
    {
        frame.set_cursor_position(pos);
    }
}

fn render_field(
    frame: &mut Frame,
    app: &App,
    label: &str,
    value: &str,
    field: DialogField,
    area: Rect,
) {
    let theme = &app.theme;
    let bg = theme.surface;
    let active = app.dialog_field == field;
    let label_style = if active {
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };
    let value_width = (area.width as usize).saturating_sub(LABEL_WIDTH);
    let mut spans = vec![Span::styled(
        format!(" {:<width$}", label, width = LABEL_WIDTH - 1),
        label_style,
    )];
    if field == DialogField::Category {
        let arrows = if active { " \u{25B4}\u{25BE}" } else { "" };
        spans.push(Span::styled(
            unicode::truncate_to_width(value, value_width),
            Style::default().fg(theme.text_bright).bg(bg),
        ));
        spans.push(Span::styled(arrows, Style::default().fg(theme.dim).bg(bg)));
    } else if value.is_empty() && !active {
        spans.push(Span::styled(
            "Untitled",
            Style::default()
                .fg(theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(
            unicode::truncate_to_width(value, value_width),
            Style::default().fg(theme.text_bright).bg(bg),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_content(frame: &mut Frame, app: &App, view: &DialogView, area: Rect) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let bg = theme.surface;
    let text_style = Style::default().fg(theme.text).bg(bg);

    let label_style = if app.dialog_field == DialogField::Content {
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };
    let label = if view.is_preview_mode { " Preview" } else { " Content" };
    frame.render_widget(
        Paragraph::new(Span::styled(label, label_style)),
        Rect::new(area.x, area.y.saturating_sub(1), area.width, 1),
    );

    let body = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height);
    let lines: Vec<Line> = match &view.preview_html {
        Some(html) => markup_to_lines(
            html,
            text_style,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        None => {
            let skip = content_scroll(app, view, body.height as usize);
            view.content
                .split('\n')
                .skip(skip)
                .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
                .collect()
        }
    };
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), body);
}

/// First content line shown so the cursor line stays visible
fn content_scroll(app: &App, view: &DialogView, rows: usize) -> usize {
    if app.dialog_field != DialogField::Content || rows == 0 {
        return 0;
    }
    let cursor = app.edit_cursor.min(view.content.len());
    let line = view.content[..cursor].matches('\n').count();
    (line + 1).saturating_sub(rows)
}

/// `★ pinned   ● blue   edit` summary of the draft
fn flag_line<'a>(app: &App, view: &DialogView) -> Line<'a> {
    let theme = &app.theme;
    let bg = theme.surface;
    let dim = Style::default().fg(theme.dim).bg(bg);
    let pin = if view.is_pinned {
        Span::styled(" \u{2605} pinned", Style::default().fg(theme.highlight).bg(bg))
    } else {
        Span::styled(" \u{2606} not pinned", dim)
    };
    Line::from(vec![
        pin,
        Span::styled("   ", dim),
        Span::styled(
            "\u{25CF} ",
            Style::default().fg(theme.note_color(view.color)).bg(bg),
        ),
        Span::styled(view.color.as_str().to_string(), dim),
        Span::styled("   ", dim),
        Span::styled(if view.is_preview_mode { "preview" } else { "edit" }, dim),
    ])
}

fn hint_text(view: &DialogView) -> String {
    let mut hints = String::from(" ^S save  ^P pin  ^O color  ^R preview");
    if view.can_delete {
        hints.push_str("  ^D delete");
    }
    hints.push_str("  Esc cancel");
    hints
}

fn cursor_position(
    app: &App,
    view: &DialogView,
    title_row: Rect,
    category_row: Rect,
    content_area: Rect,
) -> Option<Position> {
    let field_x = title_row.x + LABEL_WIDTH as u16;
    match app.dialog_field {
        DialogField::Title => {
            let cursor = app.edit_cursor.min(view.title.len());
            let col = unicode::byte_offset_to_display_col(&view.title, cursor) as u16;
            let x = (field_x + col).min(title_row.right().saturating_sub(1));
            Some(Position::new(x, title_row.y))
        }
        DialogField::Category => {
            let cursor = app.edit_cursor.min(view.category.len());
            let col = unicode::byte_offset_to_display_col(&view.category, cursor) as u16;
            let x = (field_x + col).min(category_row.right().saturating_sub(1));
            Some(Position::new(x, category_row.y))
        }
        DialogField::Content => {
            if view.is_preview_mode || content_area.height == 0 {
                return None;
            }
            let cursor = app.edit_cursor.min(view.content.len());
            let before = &view.content[..cursor];
            let line = before.matches('\n').count();
            let line_start = before.rfind('\n').map_or(0, |i| i + 1);
            let col = unicode::display_width(&view.content[line_start..cursor]) as u16;
            let row = line - content_scroll(app, view, content_area.height as usize);
            let x = (content_area.x + 1 + col).min(content_area.right().saturating_sub(2));
            Some(Position::new(x, content_area.y + row as u16))
        }
    }
}
