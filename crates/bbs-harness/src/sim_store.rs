//! Post store that always fails, for exercising the error placeholder.

use std::io;

use bbs_posts::{Post, PostDraft, PostPatch, PostStore, StoreError};
use chrono::{DateTime, Utc};

/// Post store whose every operation fails with an I/O error.
#[derive(Debug, Clone, Default)]
pub struct FailingPostStore {
    reason: String,
}

impl FailingPostStore {
    /// Store failing with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn error(&self) -> StoreError {
        StoreError::Io(io::Error::other(self.reason.clone()))
    }
}

impl PostStore for FailingPostStore {
    fn list_published(&self) -> Result<Vec<Post>, StoreError> {
        Err(self.error())
    }

    fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        Err(self.error())
    }

    fn get(&self, _id: &str) -> Result<Option<Post>, StoreError> {
        Err(self.error())
    }

    fn create(&self, _draft: PostDraft, _now: DateTime<Utc>) -> Result<Post, StoreError> {
        Err(self.error())
    }

    fn update(&self, _id: &str, _patch: PostPatch, _now: DateTime<Utc>) -> Result<Post, StoreError> {
        Err(self.error())
    }

    fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(self.error())
    }
}
