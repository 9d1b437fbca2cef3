use indexmap::IndexMap;
use serde::Serialize;

use crate::model::note::Note;

/// Collection summary for `noted stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteStats {
    pub total: usize,
    pub pinned: usize,
    /// Per-category counts: configured categories first (zeros included),
    /// then any other categories found in the notes, in first-seen order
    pub categories: IndexMap<String, usize>,
    /// Per-color counts for colors in use, palette order
    pub colors: IndexMap<String, usize>,
}

pub fn compute_stats(notes: &[Note], configured: &[String]) -> NoteStats {
    let mut categories: IndexMap<String, usize> =
        configured.iter().map(|c| (c.clone(), 0)).collect();
    for note in notes {
        *categories.entry(note.category.clone()).or_insert(0) += 1;
    }

    let mut colors = IndexMap::new();
    for color in crate::model::note::NoteColor::PALETTE {
        let n = notes.iter().filter(|note| note.color == color).count();
        if n > 0 {
            colors.insert(color.as_str().to_string(), n);
        }
    }

    NoteStats {
        total: notes.len(),
        pinned: notes.iter().filter(|n| n.is_pinned).count(),
        categories,
        colors,
    }
}
