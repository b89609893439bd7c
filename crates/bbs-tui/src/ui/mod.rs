//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O): they take the state and
//! the instant being drawn, so animations render the same way in tests.

mod boot;
mod feed;
mod splash;
mod status;

use bbs_app::AppPhase;
use bbs_core::Timestamp;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
};

use crate::App;

/// Block cursor drawn after typed text.
pub const CURSOR: &str = "█";

/// Foreground of everything "on screen".
pub(crate) fn phosphor() -> Style {
    Style::default().fg(Color::Green)
}

/// Text still settling in (fresh characters, entering posts).
pub(crate) fn dimmed() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Render the entire UI as of `now`.
pub fn render<I: Timestamp>(frame: &mut Frame, app: &App<I>, now: I) {
    const SCREEN_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(SCREEN_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [screen_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_screen(frame, app, *screen_area, now);
    status::render(frame, app, *status_area);
}

fn render_screen<I: Timestamp>(frame: &mut Frame, app: &App<I>, area: Rect, now: I) {
    match app.phase() {
        AppPhase::Boot => boot::render(frame, app, area, now),
        AppPhase::Splash => splash::render(frame, app, area, now),
        AppPhase::Content => feed::render(frame, app, area, now),
    }
}
