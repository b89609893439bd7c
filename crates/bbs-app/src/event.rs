//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, mouse, resize) and system ticks.
//! - Completion of the post fetch requested by the app.

use bbs_posts::PostSummary;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Mouse click anywhere.
    Click,

    /// Periodic tick. Advances animations.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Published posts arrived, in display order.
    PostsLoaded {
        /// Posts to show.
        posts: Vec<PostSummary>,
    },

    /// The post fetch failed.
    PostsFailed {
        /// Error description (logged, not shown).
        message: String,
    },
}
