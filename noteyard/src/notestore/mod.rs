//! Storage backends of notes.
use crate::errors::NoteStoreError;
use crate::note::*;
use futures::future::BoxFuture;

mod in_memory;
mod postgresql;


pub use in_memory::InMemoryStore;
pub use postgresql::{PostgreSQLStore, PostgreSQLStoreBuilder};

/// An abstraction for storage backends.
///
/// Every backend offers the same capability set, but two behavioral
/// asymmetries are intentional and kept as they are:
///
/// * [`InMemoryStore`] matches search patterns case-sensitively, while
///   [`PostgreSQLStore`] uses `ILIKE` and matches case-insensitively.
/// * An empty patch is a silent no-op on [`InMemoryStore`] (after the usual
///   existence check), while [`PostgreSQLStore`] rejects it with
///   [`NoteStoreError::EmptyUpdate`] before consulting the table at all.
pub trait NoteStore {
    /// Get the note stored under `id`.
    fn get_note(&self, id: NoteId) -> BoxFuture<Result<Note, NoteStoreError>>;
    /// Create a new note.
    ///
    /// The storage backend assigns a fresh [`NoteId`] and returns it.
    fn create_note(&self, draft: NoteDraft) -> BoxFuture<Result<NoteId, NoteStoreError>>;
    /// Merge the fields supplied by `patch` into the note stored under `id`.
    ///
    /// Fields the patch does not carry keep their stored value.
    fn update_note(
        &self,
        id: NoteId,
        patch: NotePatch,
    ) -> BoxFuture<Result<(), NoteStoreError>>;
    /// Delete the note stored under `id`.
    ///
    /// Afterwards all operations on `id` report
    /// [`NoteStoreError::NoteNotExist`]; the identifier is never handed out
    /// again.
    fn delete_note(&self, id: NoteId) -> BoxFuture<Result<(), NoteStoreError>>;
    /// All notes whose title or content contains `pattern` as a substring.
    ///
    /// The order of the returned notes is backend-dependent.
    fn find_like<'a>(
        &'a self,
        pattern: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Note>, NoteStoreError>>;
}

/// A type-erased [`NoteStore`], the unit of backend substitution.
pub type BoxedNoteStore = Box<dyn NoteStore + Sync + Send>;
