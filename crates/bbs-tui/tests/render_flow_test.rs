//! Full screen progression drawn on a test terminal.

use std::time::{Duration, Instant};

use bbs_app::{App, AppAction, AppConfig, AppEvent, KeyInput};
use bbs_posts::{MemoryPostStore, PostStore};
use bbs_tui::ui::{self, CURSOR};
use ratatui::{Terminal, backend::TestBackend};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn draw(app: &App<Instant>, now: Instant, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui::render(frame, app, now)).unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(usize::from(width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn boot_to_feed_on_a_small_terminal() {
    let t0 = Instant::now();
    let store = MemoryPostStore::seeded();
    let mut app = App::new(AppConfig::default(), false);
    app.start(t0);

    assert!(draw(&app, t0, 40, 12).contains(CURSOR));

    app.handle(AppEvent::Click, t0 + ms(100));
    app.handle(AppEvent::Tick, t0 + ms(2000));
    let splash = draw(&app, t0 + ms(2000), 60, 16);
    assert!(splash.contains("ENTER PASSWORD"));

    for c in "Basement".chars() {
        app.handle(AppEvent::Key(KeyInput::Char(c)), t0 + ms(2100));
    }
    let actions = app.handle(AppEvent::Key(KeyInput::Enter), t0 + ms(2200));
    assert!(actions.contains(&AppAction::FetchPosts));
    assert!(draw(&app, t0 + ms(2200), 40, 12).contains("LOADING POSTS..."));

    let posts = store.list_published().unwrap().iter().map(|post| post.summary()).collect();
    app.handle(AppEvent::PostsLoaded { posts }, t0 + ms(2300));

    let feed = draw(&app, t0 + ms(3000), 40, 12);
    assert!(feed.contains("↳ TRACK PREVIEW"));
    assert!(feed.contains("9:00 AM GMT"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let t0 = Instant::now();
    let mut app = App::new(AppConfig::default(), false);
    app.start(t0);
    draw(&app, t0, 1, 1);

    app.handle(AppEvent::Key(KeyInput::Other), t0);
    app.handle(AppEvent::Tick, t0 + ms(2000));
    draw(&app, t0 + ms(2000), 3, 2);
}
