//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Start treating any key or click as input (entering Boot).
    CaptureAnyInput,

    /// Stop treating any key or click as input (leaving Boot).
    ReleaseAnyInput,

    /// Record the unlocked flag in the session store.
    PersistUnlock,

    /// Fetch published posts for the feed.
    FetchPosts,
}
