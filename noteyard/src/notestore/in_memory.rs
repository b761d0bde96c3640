//! In-memory storage of notes
use crate::errors::NoteStoreError;
use crate::note::{NoteDraft, NoteId, NotePatch};
use crate::{Note, NoteStore};
use futures::future::BoxFuture;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct InMemoryStoreInner {
    notes: HashMap<NoteId, Note>,
    last_id: NoteId,
}

impl InMemoryStoreInner {
    fn new() -> Self {
        Default::default()
    }

    /// Generate a new [`NoteId`].
    ///
    /// A counter rather than `notes.len() + 1`: deriving the identifier from
    /// the current size would hand out an identifier that is still live in
    /// the map once any note has been deleted.
    fn get_new_noteid(&mut self) -> NoteId {
        self.last_id += 1;
        self.last_id
    }

    fn get_note(&self, id: NoteId) -> Result<Note, NoteStoreError> {
        self.notes
            .get(&id)
            .cloned()
            .ok_or(NoteStoreError::NoteNotExist(id))
    }

    fn create_note(&mut self, draft: NoteDraft) -> Result<NoteId, NoteStoreError> {
        let id = self.get_new_noteid();
        self.notes.insert(id, draft.into_note(id));
        Ok(id)
    }

    fn update_note(&mut self, id: NoteId, patch: NotePatch) -> Result<(), NoteStoreError> {
        let note = self
            .notes
            .get_mut(&id)
            .ok_or(NoteStoreError::NoteNotExist(id))?;
        // An empty patch falls through as a no-op. The PostgreSQL backend
        // rejects the same call; see the trait docs.
        patch.apply_to(note);
        Ok(())
    }

    fn delete_note(&mut self, id: NoteId) -> Result<(), NoteStoreError> {
        self.notes
            .remove(&id)
            .map(|_| ())
            .ok_or(NoteStoreError::NoteNotExist(id))
    }

    fn find_like(&self, pattern: &str) -> Result<Vec<Note>, NoteStoreError> {
        // Case-sensitive, unlike the ILIKE of the PostgreSQL backend.
        Ok(self
            .notes
            .values()
            .filter(|note| note.title.contains(pattern) || note.content.contains(pattern))
            .cloned()
            .collect())
    }
}

/// In-memory storage.
///
/// This is mostly designed for development use, because there is no
/// persistence layer: every note is gone when the process exits.
#[derive(Debug)]
pub struct InMemoryStore {
    ims: RwLock<InMemoryStoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            ims: RwLock::new(InMemoryStoreInner::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore for InMemoryStore {
    fn get_note(&self, id: NoteId) -> BoxFuture<Result<Note, NoteStoreError>> {
        Box::pin(async move {
            let ims = self.ims.read().await;
            ims.get_note(id)
        })
    }

    fn create_note(&self, draft: NoteDraft) -> BoxFuture<Result<NoteId, NoteStoreError>> {
        Box::pin(async move {
            let mut ims = self.ims.write().await;
            ims.create_note(draft)
        })
    }

    fn update_note(
        &self,
        id: NoteId,
        patch: NotePatch,
    ) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let mut ims = self.ims.write().await;
            ims.update_note(id, patch)
        })
    }

    fn delete_note(&self, id: NoteId) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let mut ims = self.ims.write().await;
            ims.delete_note(id)
        })
    }

    fn find_like<'a>(
        &'a self,
        pattern: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Note>, NoteStoreError>> {
        Box::pin(async move {
            let ims = self.ims.read().await;
            ims.find_like(pattern)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notestore::tests as common_tests;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn unique_id() {
        let store = InMemoryStore::new();
        common_tests::unique_id(store).await;
    }

    #[tokio::test]
    async fn new_note_retrieve() {
        let store = InMemoryStore::new();
        common_tests::new_note_retrieve(store).await;
    }

    #[tokio::test]
    async fn get_missing_note() {
        let store = InMemoryStore::new();
        common_tests::get_missing_note(store).await;
    }

    #[tokio::test]
    async fn update_note() {
        let store = InMemoryStore::new();
        common_tests::update_note(store).await;
    }

    #[tokio::test]
    async fn update_missing_note() {
        let store = InMemoryStore::new();
        common_tests::update_missing_note(store).await;
    }

    #[tokio::test]
    async fn delete_note() {
        let store = InMemoryStore::new();
        common_tests::delete_note(store).await;
    }

    #[tokio::test]
    async fn find_like_title_and_content() {
        let store = InMemoryStore::new();
        common_tests::find_like_title_and_content(store).await;
    }

    #[tokio::test]
    async fn id_not_reused_after_delete() {
        let store = InMemoryStore::new();
        common_tests::id_not_reused_after_delete(store).await;
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let store = InMemoryStore::new();
        let id1 = store
            .create_note(NoteDraft::new("Foo".into(), "foo".into()))
            .await
            .unwrap();
        let id2 = store
            .create_note(NoteDraft::new("Bar".into(), "bar".into()))
            .await
            .unwrap();
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);
    }

    #[tokio::test]
    async fn find_like_case_sensitive() {
        let store = InMemoryStore::new();
        store
            .create_note(NoteDraft::new("Groceries".into(), "Milk and eggs".into()))
            .await
            .unwrap();
        assert!(store.find_like("groceries").await.unwrap().is_empty());
        assert_eq!(store.find_like("Groceries").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_patch_is_silent_noop() {
        let store = InMemoryStore::new();
        let id = store
            .create_note(NoteDraft::new("Title".into(), "Content".into()))
            .await
            .unwrap();
        store
            .update_note(id, NotePatch::new(Some("".into()), Some("".into())))
            .await
            .unwrap();
        let note = store.get_note(id).await.unwrap();
        assert_eq!(note.title, "Title");
        assert_eq!(note.content, "Content");
    }

    #[tokio::test]
    async fn empty_patch_still_requires_existence() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.update_note(4242, NotePatch::default()).await,
            Err(NoteStoreError::NoteNotExist(4242))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_assign_unique_ids() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = Vec::new();
        for worker in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::new();
                for n in 0..50 {
                    let draft = NoteDraft::new(format!("note {}-{}", worker, n), "body".into());
                    ids.push(store.create_note(draft).await.unwrap());
                }
                ids
            }));
        }
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.await.unwrap() {
                assert!(seen.insert(id), "id {} assigned twice", id);
            }
        }
        assert_eq!(seen.len(), 8 * 50);
    }
}
