//! Errors of Noteyard.
use crate::note::NoteId;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteStoreError {
    #[error("note `{0}` doesn't exist")]
    NoteNotExist(NoteId),
    #[error("no fields to update for note `{0}`")]
    EmptyUpdate(NoteId),
    #[error("statement did not finish within {0:?}")]
    Timeout(Duration),
    #[error("PostgreSQL error: {0}")]
    PostgreSQLError(#[from] sqlx::Error),
}
