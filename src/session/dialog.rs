use crate::model::note::{Note, NoteColor, NoteId};
use crate::ops::note_store::NoteFields;

/// Where the create/edit dialog is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    CreatingNew,
    EditingExisting(NoteId),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn editing_id(&self) -> Option<NoteId> {
        match self {
            DialogState::EditingExisting(id) => Some(*id),
            _ => None,
        }
    }
}

/// Transient non-text state of the open dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionDraft {
    pub is_pinned: bool,
    pub color: NoteColor,
    pub is_preview_mode: bool,
}

impl SessionDraft {
    /// Seeded from an existing note; preview always starts off
    pub fn from_note(note: &Note) -> Self {
        SessionDraft {
            is_pinned: note.is_pinned,
            color: note.color,
            is_preview_mode: false,
        }
    }
}

/// Text fields of the open dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl NoteForm {
    pub fn from_note(note: &Note) -> Self {
        NoteForm {
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category.clone(),
        }
    }

    /// Combine with the draft into the fields handed to the store
    pub fn to_fields(&self, draft: &SessionDraft) -> NoteFields {
        NoteFields {
            title: self.title.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            is_pinned: draft.is_pinned,
            color: draft.color,
        }
    }
}
