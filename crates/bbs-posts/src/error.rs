//! Post store errors.

use std::io;

use thiserror::Error;

/// Errors that can occur during post store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No post with this id
    #[error("post not found: {id}")]
    NotFound {
        /// Id that was looked up
        id: String,
    },

    /// Rejected input
    #[error("invalid post: {0}")]
    Invalid(String),

    /// Backing file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Backing file is not a valid post list
    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),

    /// A thread panicked while holding the store lock
    #[error("store lock poisoned")]
    Poisoned,
}
