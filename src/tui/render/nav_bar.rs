use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::note::FilterMode;
use crate::model::preferences::ThemeMode;
use crate::tui::app::App;

use super::spans_width;

/// Render the navigation bar: one tab per filter, theme indicator on the
/// right, separator line below
pub fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Short tab label for a filter
fn tab_label(filter: &FilterMode) -> String {
    match filter {
        FilterMode::All => "All".to_string(),
        FilterMode::Pinned => "\u{2605} Pinned".to_string(),
        FilterMode::Category(_) => filter.page_title(),
    }
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "noted",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", bg_style),
    ];
    let mut sep_cols: Vec<usize> = vec![spans_width(&spans)];
    spans.push(sep.clone());

    let current = app.controller.filter();
    for (i, filter) in app.controller.filters().iter().enumerate() {
        let is_current = filter == current;
        let label = if i < 9 {
            format!(" {} {} ", i + 1, tab_label(filter))
        } else {
            format!(" {} ", tab_label(filter))
        };
        spans.push(Span::styled(label, tab_style(app, is_current)));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    // Theme indicator, right-aligned
    let indicator = match app.controller.theme() {
        ThemeMode::Light => " \u{2600} light ",
        ThemeMode::Dark => " \u{263E} dark ",
    };
    let used = spans_width(&spans);
    let width = area.width as usize;
    let indicator_width = crate::util::unicode::display_width(indicator);
    if used + indicator_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - indicator_width),
            bg_style,
        ));
        spans.push(Span::styled(
            indicator,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let mut line = String::with_capacity(width * 3);
    for col in 0..width {
        if sep_cols.contains(&col) {
            line.push('\u{2534}');
        } else {
            line.push('\u{2500}');
        }
    }
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn tabs_list_every_filter() {
        let (_tmp, app) = app_with_notes(&[]);
        let output = render_to_string(100, 2, |frame, area| {
            render_nav_bar(frame, &app, area);
        });
        let first = output.lines().next().unwrap();
        assert!(first.contains("1 All"));
        assert!(first.contains("2 \u{2605} Pinned"));
        assert!(first.contains("6 Home"));
        assert!(first.contains("light"));
        assert!(output.lines().nth(1).unwrap().contains('\u{2534}'));
    }
}
