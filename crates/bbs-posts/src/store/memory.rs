use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::{PostStore, table::PostTable};
use crate::{Post, PostDraft, PostPatch, StoreError, sample_posts};

/// In-memory post store.
///
/// Clones share the same table, so a clone handed to the feed sees edits
/// made through another clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryPostStore {
    inner: Arc<Mutex<PostTable>>,
}

impl MemoryPostStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the sample feed.
    pub fn seeded() -> Self {
        Self::with_posts(sample_posts())
    }

    /// Create a store holding `posts`.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { inner: Arc::new(Mutex::new(PostTable::from_rows(posts))) }
    }

    /// Number of stored posts, published or not.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.table()?.rows().len())
    }

    /// Whether the store holds no posts.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn table(&self) -> Result<MutexGuard<'_, PostTable>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl PostStore for MemoryPostStore {
    fn list_published(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.table()?.published())
    }

    fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.table()?.all())
    }

    fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.table()?.get(id))
    }

    fn create(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, StoreError> {
        let post = self.table()?.create(draft, now)?;
        tracing::debug!(id = %post.id, "post created");
        Ok(post)
    }

    fn update(&self, id: &str, patch: PostPatch, now: DateTime<Utc>) -> Result<Post, StoreError> {
        self.table()?.update(id, patch, now)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        if self.table()?.delete(id) {
            tracing::debug!(id, "post deleted");
        }
        Ok(())
    }
}
