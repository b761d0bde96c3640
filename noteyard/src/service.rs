//! Orchestration between callers and a storage backend.
use crate::errors::NoteStoreError;
use crate::note::{Note, NoteDraft, NoteId, NotePatch};
use crate::notestore::BoxedNoteStore;

/// A pass-through layer over a [`BoxedNoteStore`].
///
/// Every operation forwards to the configured backend and propagates its
/// result unchanged. The layer exists so that callers depend on the
/// capability set rather than on a concrete backend, which keeps backends
/// swappable without touching transport code. Validation lives at the
/// transport boundary, not here.
pub struct NoteService {
    store: BoxedNoteStore,
}

impl NoteService {
    pub fn new(store: BoxedNoteStore) -> Self {
        NoteService { store }
    }

    pub async fn get_note(&self, id: NoteId) -> Result<Note, NoteStoreError> {
        self.store.get_note(id).await
    }

    pub async fn create_note(&self, draft: NoteDraft) -> Result<NoteId, NoteStoreError> {
        self.store.create_note(draft).await
    }

    pub async fn update_note(&self, id: NoteId, patch: NotePatch) -> Result<(), NoteStoreError> {
        self.store.update_note(id, patch).await
    }

    pub async fn delete_note(&self, id: NoteId) -> Result<(), NoteStoreError> {
        self.store.delete_note(id).await
    }

    pub async fn find_like(&self, pattern: &str) -> Result<Vec<Note>, NoteStoreError> {
        self.store.find_like(pattern).await
    }
}
