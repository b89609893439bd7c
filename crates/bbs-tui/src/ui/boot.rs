//! Boot screen
//!
//! The typed greeting with its blinking block cursor.

use bbs_core::Timestamp;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, Wrap},
};

use super::{CURSOR, phosphor};
use crate::App;

/// Render the boot screen.
pub fn render<I: Timestamp>(frame: &mut Frame, app: &App<I>, area: Rect, now: I) {
    let Some(boot) = app.boot() else {
        return;
    };

    let mut spans = vec![Span::styled(boot.prompt().visible_text().to_owned(), phosphor())];
    if boot.cursor_visible(now) {
        spans.push(Span::styled(CURSOR, phosphor()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::uniform(1)));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use bbs_app::{AppConfig, AppEvent};

    use super::*;
    use crate::ui::test_support::screen;

    #[test]
    fn prompt_types_with_cursor() {
        let t0 = Instant::now();
        let mut app = App::new(AppConfig::default(), false);
        app.start(t0);

        // Five chars at 40ms each.
        let now = t0 + Duration::from_millis(200);
        app.handle(AppEvent::Tick, now);
        let text = screen(&app, now);

        assert!(text.contains(&format!("Hello{CURSOR}")));
        assert!(!text.contains("Hello!"));
    }

    #[test]
    fn cursor_disappears_once_typed() {
        let t0 = Instant::now();
        let mut app = App::new(AppConfig::default(), false);
        app.start(t0);

        let now = t0 + Duration::from_secs(5);
        app.handle(AppEvent::Tick, now);
        let text = screen(&app, now);

        assert!(text.contains("Hello! Press any key to continue."));
        assert!(!text.contains(CURSOR));
    }
}
