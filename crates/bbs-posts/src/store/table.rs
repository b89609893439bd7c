//! Post table shared by every store implementation.
//!
//! Stores differ only in where the table lives between calls; the query and
//! mutation rules are all here.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Post, PostDraft, PostPatch, StoreError};

#[derive(Debug, Clone, Default)]
pub(crate) struct PostTable {
    rows: Vec<Post>,
}

impl PostTable {
    pub(crate) fn from_rows(rows: Vec<Post>) -> Self {
        Self { rows }
    }

    pub(crate) fn rows(&self) -> &[Post] {
        &self.rows
    }

    pub(crate) fn published(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.rows.iter().filter(|p| p.published).cloned().collect();
        posts.sort_by(|a, b| {
            b.display_timestamp().cmp(&a.display_timestamp()).then_with(|| a.id.cmp(&b.id))
        });
        posts
    }

    pub(crate) fn all(&self) -> Vec<Post> {
        let mut posts = self.rows.clone();
        posts.sort_by_key(|p| (Reverse(p.created_at), p.id.clone()));
        posts
    }

    pub(crate) fn get(&self, id: &str) -> Option<Post> {
        self.rows.iter().find(|p| p.id == id).cloned()
    }

    pub(crate) fn create(&mut self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, StoreError> {
        let post = draft.into_post(Uuid::new_v4().to_string(), now)?;
        self.rows.push(post.clone());
        Ok(post)
    }

    pub(crate) fn update(
        &mut self,
        id: &str,
        patch: PostPatch,
        now: DateTime<Utc>,
    ) -> Result<Post, StoreError> {
        let post = self
            .rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_owned() })?;
        patch.apply(post, now)?;
        Ok(post.clone())
    }

    /// Returns whether a row was removed.
    pub(crate) fn delete(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|p| p.id != id);
        self.rows.len() != before
    }
}
