//! Post store abstraction.
//!
//! Trait-based abstraction over where posts live. The trait is synchronous
//! and takes `&self`, so one store can be shared between the feed and an
//! admin surface.

mod file;
mod memory;
mod table;

use chrono::{DateTime, Utc};
pub use file::FilePostStore;
pub use memory::MemoryPostStore;

use crate::{Post, PostDraft, PostPatch, StoreError};

/// Post listing collaborator.
///
/// Operations that stamp a time take `now` explicitly.
pub trait PostStore: Send + Sync {
    /// Published posts, newest display timestamp first. Ties are ordered by
    /// id so the listing is stable.
    fn list_published(&self) -> Result<Vec<Post>, StoreError>;

    /// Every post, newest creation time first.
    fn list_all(&self) -> Result<Vec<Post>, StoreError>;

    /// Post with this id. `None` if absent.
    fn get(&self, id: &str) -> Result<Option<Post>, StoreError>;

    /// Insert a new post under a fresh id.
    ///
    /// # Errors
    ///
    /// - `StoreError::Invalid` if the title is blank
    fn create(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, StoreError>;

    /// Apply `patch` to the post with this id.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if no post has this id
    /// - `StoreError::Invalid` if the patch sets a blank title
    fn update(&self, id: &str, patch: PostPatch, now: DateTime<Utc>) -> Result<Post, StoreError>;

    /// Remove the post with this id. Removing a missing post is not an error.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Publish (stamping `now`) or unpublish (clearing the publish time).
    fn set_published(
        &self,
        id: &str,
        published: bool,
        now: DateTime<Utc>,
    ) -> Result<Post, StoreError> {
        self.update(id, PostPatch::publish(published, now), now)
    }
}

impl<S: PostStore + ?Sized> PostStore for Box<S> {
    fn list_published(&self) -> Result<Vec<Post>, StoreError> {
        (**self).list_published()
    }

    fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        (**self).list_all()
    }

    fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        (**self).get(id)
    }

    fn create(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, StoreError> {
        (**self).create(draft, now)
    }

    fn update(&self, id: &str, patch: PostPatch, now: DateTime<Utc>) -> Result<Post, StoreError> {
        (**self).update(id, patch, now)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        (**self).delete(id)
    }

    fn set_published(
        &self,
        id: &str,
        published: bool,
        now: DateTime<Utc>,
    ) -> Result<Post, StoreError> {
        (**self).set_published(id, published, now)
    }
}
