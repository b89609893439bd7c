//! Error types for the core crate.
//!
//! The reveal engines and the credential gate are infallible. The only
//! fallible component is session flag storage, which may touch the
//! filesystem.

use std::io;

use thiserror::Error;

/// Errors from [`crate::SessionStore`] implementations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing the backing file failed.
    #[error("session storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The backing file is not a valid session document.
    #[error("session storage is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}
