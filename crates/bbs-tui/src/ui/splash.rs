//! Splash screen
//!
//! Logo reveal, then the footer and the password prompt.

use std::time::Duration;

use bbs_core::{CharReveal, CredentialGate, Timestamp};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{CURSOR, dimmed, phosphor};
use crate::App;

/// Characters younger than this are still "falling" and drawn dimmed.
const FALL_WINDOW: Duration = Duration::from_millis(120);

/// Label in front of the masked attempt.
pub const PASSWORD_PROMPT: &str = "> ENTER PASSWORD: ";

/// Shown next to the prompt while the error flag is raised.
pub const DENIED: &str = " ACCESS DENIED";

/// Render the splash screen.
pub fn render<I: Timestamp>(frame: &mut Frame, app: &App<I>, area: Rect, now: I) {
    let Some(splash) = app.splash() else {
        return;
    };
    let logo = splash.logo();

    let mut lines: Vec<Line> =
        logo.completed_lines().iter().map(|line| Line::styled(line.clone(), phosphor())).collect();
    if let Some(active) = logo.active_line() {
        lines.push(falling_line(active, now));
    }
    // Reserve the rows of lines not started yet so the logo does not shift.
    let pending = logo.lines().len().saturating_sub(lines.len());
    lines.extend(std::iter::repeat_n(Line::default(), pending));

    if splash.is_revealed() {
        lines.push(Line::default());
        lines.extend(splash.footer().iter().map(|line| Line::styled(line.clone(), dimmed())));
        lines.push(Line::default());
        lines.push(gate_line(splash.gate()));
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
    let top = area.height.saturating_sub(height) / 2;
    let centered = Rect { y: area.y + top, height, ..area };

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
}

/// The line being revealed, with its freshest characters dimmed.
fn falling_line<I: Timestamp>(reveal: &CharReveal<I>, now: I) -> Line<'static> {
    let spans: Vec<Span> = reveal
        .visible_text()
        .chars()
        .enumerate()
        .map(|(index, c)| {
            let falling = reveal.revealed_at(index).is_some_and(|at| now < at + FALL_WINDOW);
            Span::styled(c.to_string(), if falling { dimmed() } else { phosphor() })
        })
        .collect();
    Line::from(spans)
}

fn gate_line<I: Timestamp>(gate: &CredentialGate<I>) -> Line<'static> {
    if gate.error_flag() {
        let error = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        return Line::from(vec![
            Span::styled(PASSWORD_PROMPT, error),
            Span::styled(CURSOR, error),
            Span::styled(DENIED, error),
        ]);
    }

    let mut spans = vec![Span::styled(PASSWORD_PROMPT, phosphor()), Span::styled(gate.masked(), phosphor())];
    if gate.is_focused() {
        spans.push(Span::styled(CURSOR, phosphor()));
    }
    Line::from(spans)
}
