//! Terminal rendering of preview markup.
//!
//! The preview renderer only ever emits `<h1>`, `<strong>`, `<em>`, `<br>`
//! and the three escapes `&amp;` `&lt;` `&gt;`, so a small tag scanner is
//! enough to turn it back into styled lines.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

#[derive(Debug, Clone, Copy, Default)]
struct Active {
    heading: bool,
    strong: bool,
    em: bool,
}

/// Convert preview markup into lines. `heading` is the style for `<h1>`
/// text; bold and italic are layered on top of `base`.
pub fn markup_to_lines(html: &str, base: Style, heading: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut active = Active::default();

    for segment in html.split("<br>") {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut rest = segment;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('<')
                && let Some(end) = after.find('>')
            {
                match &after[..end] {
                    "h1" => active.heading = true,
                    "/h1" => active.heading = false,
                    "strong" => active.strong = true,
                    "/strong" => active.strong = false,
                    "em" => active.em = true,
                    "/em" => active.em = false,
                    // Not a tag this renderer emits: show it literally
                    _ => push_text(&mut spans, &rest[..end + 2], style_for(active, base, heading)),
                }
                rest = &after[end + 1..];
                continue;
            }
            let first = rest.chars().next().map_or(0, char::len_utf8);
            let next_tag = rest[first..].find('<').map_or(rest.len(), |i| i + first);
            push_text(
                &mut spans,
                &unescape(&rest[..next_tag]),
                style_for(active, base, heading),
            );
            rest = &rest[next_tag..];
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn style_for(active: Active, base: Style, heading: Style) -> Style {
    let mut style = if active.heading { heading } else { base };
    if active.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if active.em {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

fn push_text(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    // Merge with the previous span when the style did not change
    if let Some(last) = spans.last_mut()
        && last.style == style
    {
        let mut content = last.content.to_string();
        content.push_str(text);
        last.content = content.into();
        return;
    }
    spans.push(Span::styled(text.to_string(), style));
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
