use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};

use crate::model::note::{FilterMode, Note};

/// Notes passing `filter` and containing `query`, in display order.
///
/// The query matches title or content case-insensitively, as typed,
/// surrounding whitespace included; only an empty query matches everything. Pinned notes sort first, then
/// most recently updated, then highest id.
pub fn visible_notes<'a>(all: &'a [Note], filter: &FilterMode, query: &str) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    let mut notes: Vec<&Note> = all
        .iter()
        .filter(|n| filter.passes(n))
        .filter(|n| needle.is_empty() || n.matches_lowered(&needle))
        .collect();
    notes.sort_by(|a, b| display_order(a, b));
    notes
}

/// Pinned first, then `updated_at` descending, then id descending.
pub fn display_order(a: &Note, b: &Note) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Case-insensitive literal matcher for highlighting a search query.
/// Returns None for an empty query.
pub fn query_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}
