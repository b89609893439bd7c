//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the app at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use bbs_app::{App, AppPhase, FeedStatus};
use bbs_core::Timestamp;

/// Snapshot of the app's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Active phase.
    pub phase: AppPhase,
    /// Whether the app started.
    pub started: bool,
    /// Whether the app believes any input is captured.
    pub capturing: bool,
    /// Whether the platform actually captures any input. `None` if unknown.
    pub platform_capture: Option<bool>,
    /// Boot prompt progress `(visible, len)`. `Some` only with a boot screen.
    pub boot_reveal: Option<(usize, usize)>,
    /// Splash logo state. `Some` only with a splash screen.
    pub logo: Option<LogoSnapshot>,
    /// Feed state. `Some` only with a feed.
    pub feed: Option<FeedSnapshot>,
}

/// Splash logo and gate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoSnapshot {
    /// All logo lines.
    pub lines: Vec<String>,
    /// Lines that finished revealing.
    pub completed: Vec<String>,
    /// Sequencer's current index.
    pub current_index: usize,
    /// Whether the sequencer finished.
    pub complete: bool,
    /// Whether the gate has focus.
    pub gate_focused: bool,
}

/// Feed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot {
    /// Fetch state.
    pub status: FeedStatus,
    /// Number of entries.
    pub entries: usize,
    /// Scroll position.
    pub scroll: usize,
}

impl AppSnapshot {
    /// Capture the observable state of `app`.
    pub fn from_app<I: Timestamp>(app: &App<I>) -> Self {
        Self {
            phase: app.phase(),
            started: app.is_started(),
            capturing: app.is_capturing_input(),
            platform_capture: None,
            boot_reveal: app.boot().map(|boot| (boot.prompt().visible_count(), boot.prompt().len())),
            logo: app.splash().map(|splash| LogoSnapshot {
                lines: splash.logo().lines().to_vec(),
                completed: splash.logo().completed_lines().to_vec(),
                current_index: splash.logo().current_index(),
                complete: splash.logo().is_complete(),
                gate_focused: splash.gate().is_focused(),
            }),
            feed: app.feed().map(|feed| FeedSnapshot {
                status: feed.status(),
                entries: feed.entries().len(),
                scroll: app.scroll(),
            }),
        }
    }

    /// Record what the platform reports about input capture.
    #[must_use]
    pub fn with_platform_capture(mut self, capturing: bool) -> Self {
        self.platform_capture = Some(capturing);
        self
    }
}
