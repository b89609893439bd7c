//! Post feed
//!
//! Header rule, then either a placeholder or the posts from the scroll
//! position down. Entries still entering are drawn dimmed.

use bbs_app::{FeedEntry, FeedStatus};
use bbs_core::Timestamp;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use super::{dimmed, phosphor};
use crate::App;

/// Feed heading.
pub const HEADER: &str = "NARCOTIC BBS // POSTS";

/// Rule character under the heading.
const RULE: char = '═';

/// Render the content screen.
pub fn render<I: Timestamp>(frame: &mut Frame, app: &App<I>, area: Rect, now: I) {
    const HEADER_HEIGHT: u16 = 2;

    let Some(feed) = app.feed() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(1)])
        .split(area);

    let [header_area, body_area] = chunks.as_ref() else {
        return;
    };

    let rule: String = std::iter::repeat_n(RULE, usize::from(header_area.width)).collect();
    let header = Paragraph::new(vec![
        Line::styled(HEADER, phosphor().add_modifier(Modifier::BOLD)),
        Line::styled(rule, phosphor()),
    ]);
    frame.render_widget(header, *header_area);

    if let Some(message) = feed.placeholder() {
        let style = match feed.status() {
            FeedStatus::Failed => Style::default().fg(Color::Red),
            FeedStatus::Loading | FeedStatus::Ready => phosphor(),
        };
        let paragraph = Paragraph::new(Line::styled(message, style)).alignment(Alignment::Center);
        frame.render_widget(paragraph, *body_area);
        return;
    }

    let mut lines = Vec::new();
    for (index, entry) in feed.entries().iter().enumerate().skip(app.scroll()) {
        let progress = feed.entrance_progress(index, now);
        // Later entries enter later still.
        if progress <= 0.0 {
            break;
        }
        let style = if progress < 1.0 { dimmed() } else { phosphor() };
        entry_lines(entry, style, &mut lines);
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), *body_area);
}

fn entry_lines(entry: &FeedEntry, style: Style, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::styled(format!("{}  {}", entry.date, entry.time), style));
    lines.push(Line::styled(format!("↳ {}", entry.title), style.add_modifier(Modifier::BOLD)));
    lines.push(Line::styled(entry.body.clone(), style));
    if let Some(image) = &entry.image_ref {
        lines.push(Line::styled(format!("[IMG] {image}"), style));
    }
    lines.push(Line::default());
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use bbs_app::{
        AppConfig, AppEvent, KeyInput,
        feed::{EMPTY_MESSAGE, ERROR_MESSAGE, LOADING_MESSAGE},
    };
    use bbs_posts::sample_posts;

    use super::*;
    use crate::ui::test_support::screen;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn unlocked(t0: Instant) -> App<Instant> {
        let mut app = App::new(AppConfig::default(), true);
        app.start(t0);
        app
    }

    fn deliver_samples(app: &mut App<Instant>, now: Instant) {
        let mut posts = sample_posts();
        posts.sort_by(|a, b| b.display_timestamp().cmp(&a.display_timestamp()));
        let posts = posts.iter().map(|post| post.summary()).collect();
        app.handle(AppEvent::PostsLoaded { posts }, now);
    }

    #[test]
    fn loading_then_failed_placeholder() {
        let t0 = Instant::now();
        let mut app = unlocked(t0);
        assert!(screen(&app, t0).contains(LOADING_MESSAGE));

        app.handle(AppEvent::PostsFailed { message: "offline".into() }, t0);
        let text = screen(&app, t0);
        assert!(text.contains(ERROR_MESSAGE));
        assert!(!text.contains("offline"));
    }

    #[test]
    fn empty_feed_placeholder() {
        let t0 = Instant::now();
        let mut app = unlocked(t0);
        app.handle(AppEvent::PostsLoaded { posts: vec![] }, t0);

        assert!(screen(&app, t0).contains(EMPTY_MESSAGE));
    }

    #[test]
    fn entries_enter_one_by_one() {
        let t0 = Instant::now();
        let mut app = unlocked(t0);
        deliver_samples(&mut app, t0);

        let first = screen(&app, t0 + ms(50));
        assert!(first.contains("05.01.2026  9:00 AM GMT"));
        assert!(!first.contains("02.01.2026"));

        let settled = screen(&app, t0 + ms(1000));
        assert!(settled.contains("02.01.2026  3:30 PM GMT"));
        assert!(settled.contains("01.01.2026  12:00 PM GMT"));
        assert!(settled.contains("[IMG] /images/track-preview.jpg"));
    }

    #[test]
    fn scroll_hides_earlier_entries() {
        let t0 = Instant::now();
        let mut app = unlocked(t0);
        deliver_samples(&mut app, t0);
        app.handle(AppEvent::Key(KeyInput::Down), t0 + ms(1000));

        let text = screen(&app, t0 + ms(1000));
        assert!(!text.contains("05.01.2026"));
        assert!(text.contains("02.01.2026"));
        assert!(text.contains(HEADER));
    }
}
