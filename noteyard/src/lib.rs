//! Noteyard: a note service with interchangeable storage backends.
pub mod errors;
pub mod note;
pub mod notestore;
pub mod service;

pub use note::{Note, NoteDraft, NoteId, NotePatch};
pub use notestore::{
    BoxedNoteStore, InMemoryStore, NoteStore, PostgreSQLStore, PostgreSQLStoreBuilder,
};
pub use service::NoteService;
