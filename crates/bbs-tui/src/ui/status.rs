//! Status bar
//!
//! Displays the active screen and the keys it understands.

use bbs_app::AppPhase;
use bbs_core::Timestamp;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the status bar.
pub fn render<I: Timestamp>(frame: &mut Frame, app: &App<I>, area: Rect) {
    let phase = Span::styled(
        format!(" {} ", app.phase().to_string().to_uppercase()),
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
    );

    let hints = match app.phase() {
        AppPhase::Boot => " ctrl-c quit".to_owned(),
        AppPhase::Splash => " esc quit".to_owned(),
        AppPhase::Content => {
            let count = app.feed().map_or(0, |feed| feed.entries().len());
            format!(" {count} posts | ↑↓ pgup pgdn home end scroll | esc quit")
        },
    };

    let status_line =
        Line::from(vec![phase, Span::styled(hints, Style::default().fg(Color::DarkGray))]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, area);
}
