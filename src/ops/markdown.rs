//! Best-effort markdown preview.
//!
//! This is not a markdown implementation. The input is escaped, then a fixed
//! table of line-local regex substitutions runs once, in order. Unbalanced or
//! overlapping markers produce odd but harmless markup.
//!
//! Bold and italic match lazily, so `**a** and **b**` yields two separate
//! `<strong>` spans rather than one span running from the first marker to
//! the last.

use std::sync::LazyLock;

use regex::Regex;

/// Substitution rules, applied in order after escaping.
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?m)^# (.*)$", "<h1>${1}</h1>"),
        (r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
        (r"\*(.+?)\*", "<em>${1}</em>"),
        (r"\r?\n", "<br>"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).unwrap_or_else(|e| panic!("bad preview rule {pattern}: {e}")),
            replacement,
        )
    })
    .collect()
});

/// Escape the characters that would otherwise be read as markup.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render note content to preview markup (`<h1>`, `<strong>`, `<em>`, `<br>`).
pub fn render_preview(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut html = escape_markup(text);
    for (re, replacement) in RULES.iter() {
        html = re.replace_all(&html, *replacement).into_owned();
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn heading_bold_and_italic() {
        assert_snapshot!(
            render_preview("# Hi **bold** *em*"),
            @"<h1>Hi <strong>bold</strong> <em>em</em></h1>"
        );
    }

    #[test]
    fn escapes_before_substitution() {
        let out = render_preview("a < b && **x>y**");
        assert_eq!(out, "a &lt; b &amp;&amp; <strong>x&gt;y</strong>");
        // Markup typed by the user never survives as a tag
        assert_eq!(
            render_preview("<script>*x*</script>"),
            "&lt;script&gt;<em>x</em>&lt;/script&gt;"
        );
    }

    #[test]
    fn newlines_become_breaks_after_headings() {
        assert_snapshot!(
            render_preview("# Title\nbody line\n# Second"),
            @"<h1>Title</h1><br>body line<br><h1>Second</h1>"
        );
    }

    #[test]
    fn crlf_is_one_break() {
        assert_eq!(render_preview("a\r\nb"), "a<br>b");
    }

    #[test]
    fn heading_needs_space_and_line_start() {
        assert_eq!(render_preview("#tag"), "#tag");
        assert_eq!(render_preview("x # y"), "x # y");
    }

    #[test]
    fn markers_do_not_span_lines() {
        assert_eq!(render_preview("**a\nb**"), "**a<br>b**");
    }

    #[test]
    fn two_bold_runs_stay_separate() {
        assert_eq!(
            render_preview("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn unbalanced_markers_do_not_panic() {
        for input in ["*", "**", "***", "* *", "**x", "# ", "#", "&"] {
            let _ = render_preview(input);
        }
        assert_eq!(render_preview("# "), "<h1></h1>");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(render_preview(""), "");
    }
}
