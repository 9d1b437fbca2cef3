use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::slots::{self, NOTES_SLOT, SlotError};
use crate::model::note::{DEFAULT_CATEGORY, Note, NoteColor, NoteId, is_blank};

/// Error type for note store operations
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note {0} not found")]
    NotFound(NoteId),
    #[error("a note needs a title or some content")]
    EmptyNote,
    #[error("could not encode notes: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// The user-editable fields of a note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    pub category: String,
    pub is_pinned: bool,
    pub color: NoteColor,
}

impl NoteFields {
    pub fn from_note(note: &Note) -> Self {
        NoteFields {
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category.clone(),
            is_pinned: note.is_pinned,
            color: note.color,
        }
    }
}

/// In-memory note collection mirrored to the notes slot.
///
/// Every mutation is written out before it is committed in memory, so the
/// slot and `notes()` never disagree. Order is most-recently-created first.
#[derive(Debug)]
pub struct NoteStore {
    data_dir: PathBuf,
    notes: Vec<Note>,
    /// Highest id handed out by this store (ids are never reused)
    last_id: NoteId,
}

impl NoteStore {
    /// Load the collection from `data_dir`. A missing slot is an empty
    /// collection; an unreadable one is reset (see [`load_all`]).
    pub fn open(data_dir: &Path) -> Result<Self, NoteError> {
        let notes = load_all(data_dir)?;
        let last_id = notes.iter().map(|n| n.id).max().unwrap_or(0);
        Ok(NoteStore {
            data_dir: data_dir.to_path_buf(),
            notes,
            last_id,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Re-read the slot, replacing the in-memory collection.
    pub fn reload(&mut self) -> Result<(), NoteError> {
        self.notes = load_all(&self.data_dir)?;
        let max = self.notes.iter().map(|n| n.id).max().unwrap_or(0);
        self.last_id = self.last_id.max(max);
        Ok(())
    }

    pub fn create(&mut self, fields: NoteFields) -> Result<Note, NoteError> {
        self.create_at(fields, Utc::now())
    }

    /// Create a note stamped with `now`. Blank notes are rejected without
    /// touching the collection.
    pub fn create_at(&mut self, fields: NoteFields, now: DateTime<Utc>) -> Result<Note, NoteError> {
        let title = fields.title.trim();
        let content = fields.content.trim();
        if is_blank(title, content) {
            return Err(NoteError::EmptyNote);
        }

        let id = self.next_id(now);
        let mut note = Note::new(id, title.to_string(), content.to_string(), now);
        let category = fields.category.trim();
        note.category = if category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category.to_string()
        };
        note.is_pinned = fields.is_pinned;
        note.color = fields.color;

        let mut next = self.notes.clone();
        next.insert(0, note.clone());
        self.commit(next)?;
        self.last_id = id;

        log::info!(
            "event=note_create id={} category={} pinned={}",
            note.id,
            note.category,
            note.is_pinned
        );
        Ok(note)
    }

    pub fn update(&mut self, id: NoteId, fields: NoteFields) -> Result<Note, NoteError> {
        self.update_at(id, fields, Utc::now())
    }

    /// Replace all editable fields of note `id` and bump `updated_at`.
    /// An empty category keeps the previous one.
    pub fn update_at(
        &mut self,
        id: NoteId,
        fields: NoteFields,
        now: DateTime<Utc>,
    ) -> Result<Note, NoteError> {
        let idx = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(NoteError::NotFound(id))?;

        let title = fields.title.trim();
        let content = fields.content.trim();
        if is_blank(title, content) {
            return Err(NoteError::EmptyNote);
        }

        let mut next = self.notes.clone();
        let note = &mut next[idx];
        note.title = title.to_string();
        note.content = content.to_string();
        let category = fields.category.trim();
        if !category.is_empty() {
            note.category = category.to_string();
        }
        note.is_pinned = fields.is_pinned;
        note.color = fields.color;
        note.updated_at = now.max(note.created_at);
        let updated = note.clone();

        self.commit(next)?;
        log::info!(
            "event=note_update id={} category={} pinned={}",
            updated.id,
            updated.category,
            updated.is_pinned
        );
        Ok(updated)
    }

    /// Flip only the pin flag (still an edit: `updated_at` moves).
    pub fn set_pinned(&mut self, id: NoteId, pinned: bool) -> Result<Note, NoteError> {
        let note = self.get(id).ok_or(NoteError::NotFound(id))?;
        let mut fields = NoteFields::from_note(note);
        fields.is_pinned = pinned;
        self.update(id, fields)
    }

    /// Remove note `id`, returning it. The removed note is copied into the
    /// recovery log.
    pub fn delete(&mut self, id: NoteId) -> Result<Note, NoteError> {
        let idx = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(NoteError::NotFound(id))?;

        let mut next = self.notes.clone();
        let removed = next.remove(idx);
        self.commit(next)?;

        recovery::log_recovery(
            &self.data_dir,
            RecoveryEntry::new(RecoveryCategory::Delete, format!("note {} deleted", id))
                .field("Note", id.to_string())
                .field("Category", removed.category.clone())
                .body(serde_json::to_string_pretty(&removed)?),
        );
        log::info!("event=note_delete id={}", id);
        Ok(removed)
    }

    /// Write the current collection to the slot.
    pub fn persist(&self) -> Result<(), NoteError> {
        write_notes(&self.data_dir, &self.notes)
    }

    /// Adopt `next` and persist it. A failed write restores the previous
    /// collection.
    fn commit(&mut self, next: Vec<Note>) -> Result<(), NoteError> {
        let previous = std::mem::replace(&mut self.notes, next);
        if let Err(e) = self.persist() {
            self.notes = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Millisecond timestamp, bumped past every id already handed out.
    fn next_id(&self, now: DateTime<Utc>) -> NoteId {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let floor = self
            .notes
            .iter()
            .map(|n| n.id)
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        if candidate > floor { candidate } else { floor + 1 }
    }
}

/// Read the persisted collection.
///
/// A missing slot yields an empty collection. Content that does not decode,
/// as UTF-8 or as a note array, also yields an empty collection: the raw
/// text is copied to the recovery log and a warning is logged, and the next
/// save overwrites the slot.
pub fn load_all(data_dir: &Path) -> Result<Vec<Note>, NoteError> {
    let Some(bytes) = slots::read_slot_bytes(data_dir, NOTES_SLOT)? else {
        return Ok(Vec::new());
    };
    let raw = match String::from_utf8(bytes) {
        Ok(raw) => raw,
        Err(e) => {
            let error = e.utf8_error().to_string();
            let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
            return Ok(reset_unreadable(data_dir, &error, lossy));
        }
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Vec<Note>>(&raw) {
        Ok(notes) => {
            log::debug!("event=notes_load status=ok count={}", notes.len());
            Ok(notes)
        }
        Err(e) => Ok(reset_unreadable(data_dir, &e.to_string(), raw)),
    }
}

/// Keep an undecodable slot body in the recovery log and start empty.
fn reset_unreadable(data_dir: &Path, error: &str, body: String) -> Vec<Note> {
    log::warn!("event=notes_load status=reset error={}", error);
    recovery::log_recovery(
        data_dir,
        RecoveryEntry::new(RecoveryCategory::Parser, "notes slot unreadable, reset")
            .field("Slot", NOTES_SLOT)
            .field("Error", error)
            .body(body),
    );
    Vec::new()
}

/// Encode and write a collection. Failed writes keep the payload in the
/// recovery log.
fn write_notes(data_dir: &Path, notes: &[Note]) -> Result<(), NoteError> {
    let payload = serde_json::to_string(notes)?;
    if let Err(e) = slots::write_slot(data_dir, NOTES_SLOT, &payload) {
        log::error!("event=notes_save status=error error={}", e);
        recovery::log_recovery(
            data_dir,
            RecoveryEntry::new(RecoveryCategory::Write, "notes save failed")
                .field("Slot", NOTES_SLOT)
                .field("Error", e.to_string())
                .body(payload),
        );
        return Err(e.into());
    }
    Ok(())
}
