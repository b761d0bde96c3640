use crate::errors::NoteStoreError;
use crate::note::{NoteDraft, NoteId, NotePatch};
use crate::{Note, NoteStore};
use futures::future::BoxFuture;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;


/// Hard deadline for every statement, pool acquisition included.
const STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS note(
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL
)"#;

/// Run `fut` under [`STATEMENT_TIMEOUT`], so that a wedged connection
/// surfaces as [`NoteStoreError::Timeout`] instead of hanging the caller.
async fn bounded<T>(
    fut: impl Future<Output = Result<T, sqlx::Error>>,
) -> Result<T, NoteStoreError> {
    match tokio::time::timeout(STATEMENT_TIMEOUT, fut).await {
        Ok(res) => res.map_err(NoteStoreError::PostgreSQLError),
        Err(_) => Err(NoteStoreError::Timeout(STATEMENT_TIMEOUT)),
    }
}

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: NoteId,
    title: String,
    content: String,
}

impl NoteRow {
    fn into_note(self) -> Note {
        Note {
            id: self.id,
            title: self.title,
            content: self.content,
        }
    }
}

pub struct PostgreSQLStoreBuilder {
    db_options: PgConnectOptions,
}

impl PostgreSQLStoreBuilder {
    pub fn new(db_options: PgConnectOptions) -> Self {
        Self { db_options }
    }

    /// Connect the pool and ensure the `note` table exists.
    ///
    /// Table creation is idempotent, so two processes racing at startup are
    /// fine.
    pub async fn build(self) -> PostgreSQLStore {
        let connection_pool = PgPoolOptions::new()
            .acquire_timeout(STATEMENT_TIMEOUT)
            .connect_with(self.db_options)
            .await
            .expect("Failed to connect to Postgres.");
        sqlx::query(CREATE_TABLE)
            .execute(&connection_pool)
            .await
            .expect("Failed to create the note table");
        PostgreSQLStore {
            db_pool: connection_pool,
        }
    }
}

pub struct PostgreSQLStore {
    db_pool: PgPool,
}

impl NoteStore for PostgreSQLStore {
    fn get_note(&self, id: NoteId) -> BoxFuture<Result<Note, NoteStoreError>> {
        Box::pin(async move {
            let row: Option<NoteRow> = bounded(
                sqlx::query_as(r#"SELECT id, title, content FROM note WHERE id = $1"#)
                    .bind(id)
                    .fetch_optional(&self.db_pool),
            )
            .await?;
            row.map(NoteRow::into_note)
                .ok_or(NoteStoreError::NoteNotExist(id))
        })
    }

    fn create_note(&self, draft: NoteDraft) -> BoxFuture<Result<NoteId, NoteStoreError>> {
        Box::pin(async move {
            bounded(
                sqlx::query_scalar::<_, NoteId>(
                    r#"INSERT INTO note(title, content) VALUES ($1, $2) RETURNING id"#,
                )
                .bind(draft.title)
                .bind(draft.content)
                .fetch_one(&self.db_pool),
            )
            .await
        })
    }

    fn update_note(
        &self,
        id: NoteId,
        patch: NotePatch,
    ) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            // The SET clause carries only the supplied fields. Unlike the
            // in-memory backend, an empty patch is an error here, reported
            // before the identifier is ever looked at.
            let mut set_clauses = Vec::new();
            if patch.title().is_some() {
                set_clauses.push(format!("title = ${}", set_clauses.len() + 1));
            }
            if patch.content().is_some() {
                set_clauses.push(format!("content = ${}", set_clauses.len() + 1));
            }
            if set_clauses.is_empty() {
                return Err(NoteStoreError::EmptyUpdate(id));
            }
            let statement = format!(
                "UPDATE note SET {} WHERE id = ${}",
                set_clauses.join(", "),
                set_clauses.len() + 1
            );
            let mut query = sqlx::query(&statement);
            if let Some(title) = patch.title() {
                query = query.bind(title.to_owned());
            }
            if let Some(content) = patch.content() {
                query = query.bind(content.to_owned());
            }
            let result = bounded(query.bind(id).execute(&self.db_pool)).await?;
            if result.rows_affected() == 0 {
                return Err(NoteStoreError::NoteNotExist(id));
            }
            Ok(())
        })
    }

    fn delete_note(&self, id: NoteId) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let result = bounded(
                sqlx::query(r#"DELETE FROM note WHERE id = $1"#)
                    .bind(id)
                    .execute(&self.db_pool),
            )
            .await?;
            if result.rows_affected() == 0 {
                return Err(NoteStoreError::NoteNotExist(id));
            }
            Ok(())
        })
    }

    fn find_like<'a>(
        &'a self,
        pattern: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Note>, NoteStoreError>> {
        Box::pin(async move {
            // ILIKE, so matching is case-insensitive here, and `%`/`_` in
            // the pattern keep their wildcard meaning.
            let rows: Vec<NoteRow> = bounded(
                sqlx::query_as(
                    r#"SELECT id, title, content FROM note WHERE title ILIKE $1 OR content ILIKE $1"#,
                )
                .bind(format!("%{}%", pattern))
                .fetch_all(&self.db_pool),
            )
            .await?;
            Ok(rows.into_iter().map(NoteRow::into_note).collect())
        })
    }
}
