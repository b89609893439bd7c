//! Post listing collaborator for the BBS terminal.
//!
//! The feed only ever reads published posts, but the store carries the full
//! row model and the admin operations (create, update, delete, publish) so a
//! hosted backend can slot in behind the same [`PostStore`] trait.
//!
//! Stores are synchronous. Callers that need asynchrony wrap the call, the
//! store itself never blocks on anything but its own lock and disk.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod post;
mod seed;
pub mod store;

pub use error::StoreError;
pub use post::{Post, PostDraft, PostPatch, PostSummary};
pub use seed::sample_posts;
pub use store::{FilePostStore, MemoryPostStore, PostStore};
