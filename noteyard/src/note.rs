//! Abstraction of notes.
use serde::{Deserialize, Serialize};

/// Identifier of a note.
///
/// Assigned by the storage backend when a note is created, and never changed
/// afterwards. The in-memory backend hands out values from a monotonic
/// counter, the PostgreSQL backend from a `BIGSERIAL` sequence. Neither
/// reuses the identifier of a deleted note.
pub type NoteId = i64;

/// A note: an identifier, a title, and free-form content.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

/// Input for creating a note.
///
/// A draft carries no identifier, so a caller cannot smuggle one in: the
/// backend assigns it.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: String, content: String) -> Self {
        NoteDraft { title, content }
    }

    /// The note this draft becomes once the backend assigned `id`.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

/// A merge-update: only fields carrying a value replace stored ones.
///
/// The empty string is the wire-level marker for "not supplied", so
/// construction folds empty strings into absent fields. A patch can
/// therefore never set a field to the empty string.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct NotePatch {
    title: Option<String>,
    content: Option<String>,
}

impl NotePatch {
    pub fn new(title: Option<String>, content: Option<String>) -> Self {
        NotePatch {
            title: title.filter(|t| !t.is_empty()),
            content: content.filter(|c| !c.is_empty()),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Whether no field carries a new value.
    ///
    /// The backends disagree on what to do with such a patch; see
    /// [`NoteStore::update_note`][crate::notestore::NoteStore::update_note].
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Merge the supplied fields into `note`, leaving the others untouched.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = self.title() {
            note.title = title.to_owned();
        }
        if let Some(content) = self.content() {
            note.content = content.to_owned();
        }
    }
}
