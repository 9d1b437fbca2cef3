//! Terminal-cell and grapheme helpers for the card list and the dialog editor.
//!
//! Byte offsets passed in are expected to sit on char boundaries; every
//! offset returned sits on a grapheme boundary.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells a tab occupies in note content
const TAB_CELLS: usize = 4;

const ELLIPSIS: char = '\u{2026}';

fn cell_width(grapheme: &str) -> usize {
    if grapheme == "\t" {
        TAB_CELLS
    } else {
        UnicodeWidthStr::width(grapheme)
    }
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// Width of `s` in terminal cells
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(cell_width).sum()
}

/// Clip `s` to `max_cells`, ending in `…` when anything was cut
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }

    let budget = max_cells - 1;
    let mut used = 0;
    let mut out: String = s
        .graphemes(true)
        .take_while(|g| {
            used += cell_width(g);
            used <= budget
        })
        .collect();
    out.push(ELLIPSIS);
    out
}

/// Offset of the grapheme after the one at `offset`, None at the end
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let rest = s.get(offset..).filter(|r| !r.is_empty())?;
    let len = rest.graphemes(true).next().map_or(rest.len(), str::len);
    Some(offset + len)
}

/// Offset of the grapheme before `offset`, None at the start
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let head = s.get(..offset).filter(|h| !h.is_empty())?;
    head.grapheme_indices(true).next_back().map(|(i, _)| i)
}

/// Cell column of byte `offset`
pub fn byte_offset_to_display_col(s: &str, offset: usize) -> usize {
    display_width(&s[..offset.min(s.len())])
}

/// Byte offset at cell column `col`. A column inside a wide grapheme snaps
/// to its start; a column past the end gives `s.len()`.
pub fn display_col_to_byte_offset(s: &str, col: usize) -> usize {
    let mut cells = 0;
    for (i, g) in s.grapheme_indices(true) {
        cells += cell_width(g);
        if cells > col {
            return i;
        }
    }
    s.len()
}

/// Start of the word at or before `offset` (whitespace-delimited)
pub fn word_boundary_left(s: &str, offset: usize) -> usize {
    let mut graphemes = s[..offset.min(s.len())].grapheme_indices(true).rev().peekable();
    while graphemes.next_if(|(_, g)| is_blank(g)).is_some() {}
    let mut start = graphemes.peek().map_or(0, |(i, _)| *i);
    for (i, g) in graphemes {
        if is_blank(g) {
            break;
        }
        start = i;
    }
    start
}

/// Start of the next word after `offset` (whitespace-delimited)
pub fn word_boundary_right(s: &str, offset: usize) -> usize {
    let offset = offset.min(s.len());
    let mut graphemes = s[offset..].grapheme_indices(true).peekable();
    while graphemes.next_if(|(_, g)| !is_blank(g)).is_some() {}
    while graphemes.next_if(|(_, g)| is_blank(g)).is_some() {}
    graphemes.peek().map_or(s.len(), |(i, _)| offset + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_cells() {
        assert_eq!(display_width("Milk"), 4);
        assert_eq!(display_width("牛奶"), 4);
        assert_eq!(display_width("\u{2605} Pinned"), 8);
        assert_eq!(display_width("cafe\u{0301}"), 4);
        assert_eq!(display_width("a\tb"), 6);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncation_keeps_within_budget() {
        assert_eq!(truncate_to_width("Groceries", 20), "Groceries");
        assert_eq!(truncate_to_width("Groceries", 9), "Groceries");
        assert_eq!(truncate_to_width("Groceries list", 8), "Groceri\u{2026}");
        assert_eq!(truncate_to_width("牛奶和鸡蛋", 5), "牛奶\u{2026}");
        assert_eq!(truncate_to_width("🎉🎉🎉", 4), "🎉\u{2026}");
        assert_eq!(truncate_to_width("Milk", 1), "\u{2026}");
        assert_eq!(truncate_to_width("Milk", 0), "");
        // A wide grapheme that does not fit leaves a short line
        let clipped = truncate_to_width("牛奶和鸡蛋", 4);
        assert_eq!(clipped, "牛\u{2026}");
    }

    #[test]
    fn grapheme_steps() {
        let s = "a🎉e\u{0301}";
        assert_eq!(next_grapheme_boundary(s, 0), Some(1));
        assert_eq!(next_grapheme_boundary(s, 1), Some(5));
        assert_eq!(next_grapheme_boundary(s, 5), Some(s.len()));
        assert_eq!(next_grapheme_boundary(s, s.len()), None);

        assert_eq!(prev_grapheme_boundary(s, s.len()), Some(5));
        assert_eq!(prev_grapheme_boundary(s, 5), Some(1));
        assert_eq!(prev_grapheme_boundary(s, 0), None);

        let family = "👨\u{200D}👩\u{200D}👧";
        assert_eq!(next_grapheme_boundary(family, 0), Some(family.len()));
    }

    #[test]
    fn columns_and_offsets() {
        assert_eq!(byte_offset_to_display_col("Milk", 2), 2);
        assert_eq!(byte_offset_to_display_col("牛奶", 3), 2);
        assert_eq!(byte_offset_to_display_col("牛奶", 99), 4);

        assert_eq!(display_col_to_byte_offset("Milk", 3), 3);
        assert_eq!(display_col_to_byte_offset("牛奶", 2), 3);
        // Inside a wide char snaps to its start
        assert_eq!(display_col_to_byte_offset("牛奶", 1), 0);
        assert_eq!(display_col_to_byte_offset("ok", 10), 2);
    }

    #[test]
    fn word_jumps() {
        let s = "buy  milk today";
        assert_eq!(word_boundary_left(s, s.len()), 10);
        assert_eq!(word_boundary_left(s, 10), 5);
        assert_eq!(word_boundary_left(s, 7), 5);
        assert_eq!(word_boundary_left(s, 5), 0);
        assert_eq!(word_boundary_left(s, 0), 0);

        assert_eq!(word_boundary_right(s, 0), 5);
        assert_eq!(word_boundary_right(s, 5), 10);
        assert_eq!(word_boundary_right(s, 10), s.len());
        assert_eq!(word_boundary_right(s, s.len()), s.len());

        let cjk = "buy 牛奶";
        assert_eq!(word_boundary_left(cjk, cjk.len()), 4);
        assert_eq!(word_boundary_right(cjk, 0), 4);
    }
}
