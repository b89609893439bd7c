//! Post row model and its projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique, stable identifier.
    pub id: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Optional image reference.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Whether the post is visible in the public feed.
    #[serde(default)]
    pub published: bool,
    /// Instant the post was last published. Cleared on unpublish.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Author, if the backend tracks one.
    #[serde(default)]
    pub author_id: Option<String>,
}

impl Post {
    /// Timestamp shown in the feed: publish time, else creation time.
    pub fn display_timestamp(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }

    /// Feed projection of this post.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            timestamp: self.display_timestamp(),
            title: self.title.clone(),
            body: self.content.clone(),
            image_ref: self.image_url.clone(),
        }
    }
}

/// What the feed consumes from a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Post id.
    pub id: String,
    /// Publish time, or creation time if never published.
    pub timestamp: DateTime<Utc>,
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Optional image reference.
    pub image_ref: Option<String>,
}

/// Fields for a new post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    /// Headline. Must not be blank.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// Optional image reference.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Publish immediately.
    #[serde(default)]
    pub published: bool,
}

impl PostDraft {
    /// Draft with a title and body, unpublished and without image.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into(), ..Self::default() }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Mark the draft as published on creation.
    #[must_use]
    pub fn published(mut self) -> Self {
        self.published = true;
        self
    }

    /// Build the stored row, stamping `now` as creation (and publish) time.
    pub(crate) fn into_post(self, id: String, now: DateTime<Utc>) -> Result<Post, StoreError> {
        validate_title(&self.title)?;
        Ok(Post {
            id,
            created_at: now,
            updated_at: now,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            published: self.published,
            published_at: self.published.then_some(now),
            author_id: None,
        })
    }
}

/// Partial update of a post. `None` leaves a field untouched.
///
/// `image_url` and `published_at` are doubly optional: `Some(None)` clears
/// the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    /// New headline. Must not be blank.
    pub title: Option<String>,
    /// New body text.
    pub content: Option<String>,
    /// New image reference, or `Some(None)` to remove it.
    pub image_url: Option<Option<String>>,
    /// New publish state.
    pub published: Option<bool>,
    /// New publish time, or `Some(None)` to clear it.
    pub published_at: Option<Option<DateTime<Utc>>>,
}

impl PostPatch {
    /// Patch that publishes (stamping `now`) or unpublishes (clearing the
    /// publish time).
    pub fn publish(published: bool, now: DateTime<Utc>) -> Self {
        Self {
            published: Some(published),
            published_at: Some(published.then_some(now)),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to `post`, bumping `updated_at` to `now`.
    ///
    /// Validation happens before any field is written, so a rejected patch
    /// leaves the post untouched.
    pub(crate) fn apply(self, post: &mut Post, now: DateTime<Utc>) -> Result<(), StoreError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }

        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(image_url) = self.image_url {
            post.image_url = image_url;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
        if let Some(published_at) = self.published_at {
            post.published_at = published_at;
        }
        post.updated_at = now;
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Invalid("title must not be blank".to_owned()));
    }
    Ok(())
}
