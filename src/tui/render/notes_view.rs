use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;
use crate::view::{CardView, EMPTY_MESSAGE, NotesView};

use super::{push_highlighted_spans, spans_width};

/// Rows per card: title, preview, footer, spacer
const CARD_HEIGHT: usize = 4;

/// Render the page heading and the note cards
pub fn render_notes_view(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let view = app.controller.view();
    let bg = app.theme.background;

    let header = Rect::new(area.x, area.y, area.width, 1);
    render_header(frame, app, &view, header);

    let list = Rect::new(
        area.x,
        area.y + 1,
        area.width,
        area.height.saturating_sub(1),
    );
    if list.height == 0 {
        return;
    }

    if view.empty {
        let mid = list.y + list.height / 2;
        let msg = Paragraph::new(Span::styled(
            EMPTY_MESSAGE,
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(msg, Rect::new(list.x, mid, list.width, 1));
        return;
    }

    // Keep the cursor card on screen
    let per_page = (list.height as usize / CARD_HEIGHT).max(1);
    app.cursor = app.cursor.min(view.cards.len() - 1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + per_page {
        app.scroll_offset = app.cursor + 1 - per_page;
    }
    app.scroll_offset = app.scroll_offset.min(view.cards.len() - 1);

    let mut lines: Vec<Line> = Vec::new();
    for (i, card) in view
        .cards
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(per_page)
    {
        card_lines(app, card, i == app.cursor, list.width as usize, &mut lines);
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, list);
}

/// `All Notes  3` with the search query on the right
fn render_header(frame: &mut Frame, app: &App, view: &NotesView, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            view.page_title.clone(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            format!(" {} ", view.count),
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.highlight),
        ),
    ];

    let query = app.controller.query();
    if !query.is_empty() {
        let label = format!("search: {} ", query);
        let used = spans_width(&spans);
        let width = area.width as usize;
        let label_width = unicode::display_width(&label);
        if used + label_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - label_width),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(label, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn card_lines<'a>(
    app: &App,
    card: &CardView,
    selected: bool,
    width: usize,
    lines: &mut Vec<Line<'a>>,
) {
    let theme = &app.theme;
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let bar = Span::styled(
        if selected { " \u{258C} " } else { "   " },
        Style::default().fg(theme.note_color(card.color)).bg(bg),
    );
    let color_bar = Span::styled(
        "\u{2503} ",
        Style::default().fg(theme.note_color(card.color)).bg(bg),
    );
    let search_re = app.active_search_re();
    let highlight = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    // Room left after the cursor bar and color bar
    let inner = width.saturating_sub(5);

    // Title row: pin marker, title, date on the right
    let mut title_spans = vec![bar.clone(), color_bar.clone()];
    if card.is_pinned {
        title_spans.push(Span::styled(
            "\u{2605} ",
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }
    let date_width = unicode::display_width(&card.date) + 1;
    let title_budget = inner
        .saturating_sub(if card.is_pinned { 2 } else { 0 })
        .saturating_sub(date_width);
    let title_style = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    if card.title.is_empty() {
        title_spans.push(Span::styled(
            "Untitled",
            Style::default()
                .fg(theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        let title = unicode::truncate_to_width(&card.title, title_budget);
        push_highlighted_spans(&mut title_spans, &title, title_style, highlight, search_re.as_ref());
    }
    pad_to(&mut title_spans, width.saturating_sub(date_width), bg);
    title_spans.push(Span::styled(
        format!("{} ", card.date),
        Style::default().fg(theme.dim).bg(bg),
    ));
    lines.push(Line::from(title_spans));

    // Preview row
    let mut preview_spans = vec![bar.clone(), color_bar.clone()];
    let preview = unicode::truncate_to_width(&card.preview, inner);
    push_highlighted_spans(
        &mut preview_spans,
        &preview,
        Style::default().fg(theme.text).bg(bg),
        highlight,
        search_re.as_ref(),
    );
    pad_to(&mut preview_spans, width, bg);
    lines.push(Line::from(preview_spans));

    // Footer row: category
    let mut footer_spans = vec![
        bar,
        color_bar,
        Span::styled(
            card.category_label.clone(),
            Style::default().fg(theme.dim).bg(bg),
        ),
    ];
    pad_to(&mut footer_spans, width, bg);
    lines.push(Line::from(footer_spans));

    lines.push(Line::from(""));
}

/// Pad with background-colored spaces up to `width` cells
fn pad_to(spans: &mut Vec<Span>, width: usize, bg: ratatui::style::Color) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render(app: &mut App) -> String {
        render_to_string(TERM_W, 20, |frame, area| {
            render_notes_view(frame, app, area);
        })
    }

    #[test]
    fn empty_state_placeholder() {
        let (_tmp, mut app) = app_with_notes(&[]);
        let output = render(&mut app);
        assert!(output.starts_with(" All Notes  0"));
        assert!(output.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn cards_show_title_preview_and_category() {
        let (_tmp, mut app) = app_with_notes(&[
            ("Milk", "buy 2%\nand eggs", "home"),
            ("", "loose thought", "work"),
        ]);
        let output = render(&mut app);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].contains("All Notes  2"));
        // Newest first, selected card marked
        assert!(lines[1].starts_with(" \u{258C} \u{2503} Untitled"));
        assert!(lines[2].contains("loose thought"));
        assert!(lines[3].contains("Work"));
        assert!(lines[5].contains("Milk"));
        assert!(lines[6].contains("buy 2% and eggs"));
        assert!(lines[7].contains("Home"));
    }

    #[test]
    fn pinned_card_has_marker_and_sorts_first() {
        let (_tmp, mut app) = app_with_notes(&[("Pinned one", "", "work"), ("Later", "", "work")]);
        let id = app
            .controller
            .store()
            .notes()
            .iter()
            .find(|n| n.title == "Pinned one")
            .unwrap()
            .id;
        app.controller.toggle_pin(id).unwrap();
        let output = render(&mut app);
        assert!(output.lines().nth(1).unwrap().contains("\u{2605} Pinned one"));
    }

    #[test]
    fn scroll_follows_cursor() {
        let titles: Vec<String> = (0..10).map(|i| format!("note {}", i)).collect();
        let notes: Vec<(&str, &str, &str)> =
            titles.iter().map(|t| (t.as_str(), "", "personal")).collect();
        let (_tmp, mut app) = app_with_notes(&notes);
        app.cursor = 9;
        let output = render(&mut app);
        // 19 list rows hold 4 cards; the last card (oldest) must be visible
        assert!(output.contains("note 0"));
        assert!(!output.contains("note 9"));
        assert_eq!(app.scroll_offset, 6);
    }

    #[test]
    fn category_filter_sets_heading() {
        let (_tmp, mut app) = app_with_notes(&[("a", "", "education")]);
        app.controller
            .set_filter(crate::model::note::FilterMode::Category("education".into()));
        let output = render(&mut app);
        assert!(output.starts_with(" Education  1"));
    }
}
