//! Application state machine.
//!
//! This module defines the [`App`] state machine, which drives the screen
//! progression completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs at an
//! explicit instant and produces [`crate::AppAction`] instructions for the
//! runtime to execute.
//!
//! # Responsibilities
//!
//! - Chooses the initial phase from the session's unlocked flag.
//! - Mounts and unmounts the per-screen engines on phase changes.
//! - Pairs every input capture with its release.
//! - Stores terminal dimensions and the feed scroll position.

use std::time::Instant;

use bbs_core::{GateOutcome, SessionStore, Timestamp, session};
use bbs_posts::PostSummary;

use crate::{
    AppAction, AppConfig, AppEvent, AppPhase, BootScreen, Feed, KeyInput, SplashScreen,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App<I = Instant> {
    config: AppConfig,
    phase: AppPhase,
    /// Session flag as read at construction.
    unlocked_at_start: bool,
    started: bool,
    boot: Option<BootScreen<I>>,
    splash: Option<SplashScreen<I>>,
    feed: Option<Feed<I>>,
    /// Whether any key or click is currently captured as input.
    capturing: bool,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Index of the first feed entry on screen.
    scroll: usize,
}

impl<I: Timestamp> App<I> {
    /// Create an app. `unlocked` is the session flag read at startup.
    pub fn new(config: AppConfig, unlocked: bool) -> Self {
        Self {
            config,
            phase: if unlocked { AppPhase::Content } else { AppPhase::Boot },
            unlocked_at_start: unlocked,
            started: false,
            boot: None,
            splash: None,
            feed: None,
            capturing: false,
            terminal_size: (80, 24),
            scroll: 0,
        }
    }

    /// Create an app, reading the unlocked flag from `store`.
    pub fn from_session<S: SessionStore + ?Sized>(config: AppConfig, store: &S) -> Self {
        Self::new(config, session::is_unlocked(store))
    }

    /// Mount the initial phase at `now`. Subsequent calls do nothing.
    pub fn start(&mut self, now: I) -> Vec<AppAction> {
        if self.started {
            return Vec::new();
        }
        self.started = true;

        let mut actions = Vec::new();
        if self.unlocked_at_start {
            tracing::debug!("session already unlocked, skipping to content");
            self.enter_content(&mut actions);
        } else {
            self.enter_boot(now, &mut actions);
        }
        actions.push(AppAction::Render);
        actions
    }

    /// Process an event at `now` and return actions.
    pub fn handle(&mut self, event: AppEvent, now: I) -> Vec<AppAction> {
        if !self.started {
            return Vec::new();
        }

        match event {
            AppEvent::Key(KeyInput::Interrupt) => vec![AppAction::Quit],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Tick => self.handle_tick(now),
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Click => self.handle_click(now),
            AppEvent::PostsLoaded { posts } => self.handle_posts(posts, now),
            AppEvent::PostsFailed { message } => {
                if self.feed.as_mut().is_some_and(Feed::fail) {
                    tracing::warn!(error = %message, "post fetch failed");
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
        }
    }

    fn handle_posts(&mut self, posts: Vec<PostSummary>, now: I) -> Vec<AppAction> {
        let count = posts.len();
        let accepted = self.feed.as_mut().is_some_and(|feed| feed.load(posts, now));
        if !accepted {
            tracing::warn!(phase = %self.phase, "ignoring posts delivered outside a pending fetch");
            return vec![];
        }
        tracing::debug!(count, "posts loaded");
        vec![AppAction::Render]
    }

    fn handle_tick(&mut self, now: I) -> Vec<AppAction> {
        let redraw = match self.phase {
            AppPhase::Boot => self.boot.as_mut().is_some_and(|boot| boot.poll(now)),
            AppPhase::Splash => self.advance_splash(now),
            AppPhase::Content => self.feed.as_mut().is_some_and(|feed| feed.poll(now)),
        };
        redraw_if(redraw)
    }

    fn handle_click(&mut self, now: I) -> Vec<AppAction> {
        match self.phase {
            AppPhase::Boot => self.leave_boot(now),
            AppPhase::Splash => redraw_if(self.advance_splash(now)),
            AppPhase::Content => vec![],
        }
    }

    /// Catch the splash engines up to `now`. Input can arrive faster than
    /// ticks, and the gate must not wait for the next frame to mount.
    fn advance_splash(&mut self, now: I) -> bool {
        self.splash.as_mut().is_some_and(|splash| splash.poll(now))
    }

    fn handle_key(&mut self, key: KeyInput, now: I) -> Vec<AppAction> {
        match self.phase {
            AppPhase::Boot => self.leave_boot(now),
            AppPhase::Splash => self.handle_splash_key(key, now),
            AppPhase::Content => self.handle_content_key(key),
        }
    }

    fn handle_splash_key(&mut self, key: KeyInput, now: I) -> Vec<AppAction> {
        if key == KeyInput::Esc {
            return vec![AppAction::Quit];
        }
        let advanced = self.advance_splash(now);
        let Some(splash) = self.splash.as_mut() else {
            return vec![];
        };
        if !splash.is_revealed() {
            return redraw_if(advanced);
        }

        match key {
            KeyInput::Char(c) => splash.push(c),
            KeyInput::Backspace => splash.backspace(),
            KeyInput::Enter => {
                if splash.submit(now) == Some(GateOutcome::Success) {
                    return self.unlock();
                }
            },
            _ => return redraw_if(advanced),
        }
        vec![AppAction::Render]
    }

    fn handle_content_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let last = self.feed.as_ref().map_or(0, |feed| feed.entries().len().saturating_sub(1));
        let page = self.config.page_size.max(1);

        let scroll = match key {
            KeyInput::Esc => return vec![AppAction::Quit],
            KeyInput::Up => self.scroll.saturating_sub(1),
            KeyInput::Down => self.scroll.saturating_add(1),
            KeyInput::PageUp => self.scroll.saturating_sub(page),
            KeyInput::PageDown => self.scroll.saturating_add(page),
            KeyInput::Home => 0,
            KeyInput::End => last,
            _ => return vec![],
        }
        .min(last);

        if scroll == self.scroll {
            return vec![];
        }
        self.scroll = scroll;
        vec![AppAction::Render]
    }

    fn enter_boot(&mut self, now: I, actions: &mut Vec<AppAction>) {
        self.phase = AppPhase::Boot;
        self.boot = Some(BootScreen::mount(&self.config, now));
        if !self.capturing {
            self.capturing = true;
            actions.push(AppAction::CaptureAnyInput);
        }
    }

    fn leave_boot(&mut self, now: I) -> Vec<AppAction> {
        let mut actions = Vec::new();
        if let Some(mut boot) = self.boot.take() {
            boot.cancel();
        }
        if self.capturing {
            self.capturing = false;
            actions.push(AppAction::ReleaseAnyInput);
        }

        tracing::debug!("boot -> splash");
        self.phase = AppPhase::Splash;
        self.splash = Some(SplashScreen::mount(&self.config, now));
        actions.push(AppAction::Render);
        actions
    }

    /// Gate success: leave the splash for good and persist the flag.
    fn unlock(&mut self) -> Vec<AppAction> {
        if let Some(mut splash) = self.splash.take() {
            splash.cancel();
        }
        tracing::debug!("splash -> content");

        let mut actions = vec![AppAction::PersistUnlock];
        self.enter_content(&mut actions);
        actions.push(AppAction::Render);
        actions
    }

    fn enter_content(&mut self, actions: &mut Vec<AppAction>) {
        self.phase = AppPhase::Content;
        self.feed = Some(Feed::from_config(&self.config));
        self.scroll = 0;
        actions.push(AppAction::FetchPosts);
    }

    /// Active phase.
    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    /// Whether [`Self::start`] ran.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Boot screen. `Some` only in Boot.
    pub fn boot(&self) -> Option<&BootScreen<I>> {
        self.boot.as_ref()
    }

    /// Splash screen. `Some` only in Splash.
    pub fn splash(&self) -> Option<&SplashScreen<I>> {
        self.splash.as_ref()
    }

    /// Post feed. `Some` only in Content.
    pub fn feed(&self) -> Option<&Feed<I>> {
        self.feed.as_ref()
    }

    /// Whether any key or click is captured as input.
    pub fn is_capturing_input(&self) -> bool {
        self.capturing
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Index of the first feed entry on screen.
    pub fn scroll(&self) -> usize {
        self.scroll
    }
}

fn redraw_if(redraw: bool) -> Vec<AppAction> {
    if redraw { vec![AppAction::Render] } else { vec![] }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn started(unlocked: bool) -> (App<Instant>, Instant, Vec<AppAction>) {
        let t0 = Instant::now();
        let mut app = App::new(AppConfig::default(), unlocked);
        let actions = app.start(t0);
        (app, t0, actions)
    }

    #[test]
    fn locked_session_starts_in_boot_with_capture() {
        let (app, _, actions) = started(false);
        assert_eq!(app.phase(), AppPhase::Boot);
        assert_eq!(actions, vec![AppAction::CaptureAnyInput, AppAction::Render]);
        assert!(app.is_capturing_input());
    }

    #[test]
    fn unlocked_session_skips_to_content_without_persisting() {
        let (app, _, actions) = started(true);
        assert_eq!(app.phase(), AppPhase::Content);
        assert_eq!(actions, vec![AppAction::FetchPosts, AppAction::Render]);
        assert!(app.boot().is_none());
    }

    #[test]
    fn events_before_start_are_ignored() {
        let mut app: App<Instant> = App::new(AppConfig::default(), false);
        assert!(app.handle(AppEvent::Key(KeyInput::Enter), Instant::now()).is_empty());
        assert_eq!(app.phase(), AppPhase::Boot);
    }

    #[test]
    fn any_key_leaves_boot_and_releases_capture() {
        let (mut app, t0, _) = started(false);
        let actions = app.handle(AppEvent::Key(KeyInput::Esc), t0 + ms(5));

        assert_eq!(actions, vec![AppAction::ReleaseAnyInput, AppAction::Render]);
        assert_eq!(app.phase(), AppPhase::Splash);
        assert!(!app.is_capturing_input());
        assert!(app.boot().is_none());
    }

    #[test]
    fn click_leaves_boot_but_not_splash() {
        let (mut app, t0, _) = started(false);
        app.handle(AppEvent::Click, t0);
        assert_eq!(app.phase(), AppPhase::Splash);

        assert!(app.handle(AppEvent::Click, t0).is_empty());
        assert_eq!(app.phase(), AppPhase::Splash);
    }

    #[test]
    fn interrupt_quits_from_boot() {
        let (mut app, t0, _) = started(false);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Interrupt), t0), vec![AppAction::Quit]);
        assert_eq!(app.phase(), AppPhase::Boot);
    }

    #[test]
    fn resize_is_recorded() {
        let (mut app, t0, _) = started(true);
        assert_eq!(app.handle(AppEvent::Resize(120, 40), t0), vec![AppAction::Render]);
        assert_eq!(app.terminal_size(), (120, 40));
    }

    #[test]
    fn failed_fetch_renders_once() {
        let (mut app, t0, _) = started(true);
        let failed = || AppEvent::PostsFailed { message: "offline".into() };

        assert_eq!(app.handle(failed(), t0), vec![AppAction::Render]);
        assert_eq!(app.feed().map(Feed::placeholder), Some(Some(crate::feed::ERROR_MESSAGE)));
        assert!(app.handle(failed(), t0 + ms(10)).is_empty());
    }

    #[test]
    fn typing_catches_up_logo_without_ticks() {
        let (mut app, t0, _) = started(false);
        app.handle(AppEvent::Click, t0);

        // No tick since the splash mounted; the key itself advances the logo.
        let actions = app.handle(AppEvent::Key(KeyInput::Char('b')), t0 + ms(2000));
        assert_eq!(actions, vec![AppAction::Render]);

        let splash = app.splash().unwrap();
        assert!(splash.is_revealed());
        assert_eq!(splash.gate().attempt(), "b");
    }

    #[test]
    fn click_advances_splash_logo() {
        let (mut app, t0, _) = started(false);
        app.handle(AppEvent::Click, t0);

        assert_eq!(app.handle(AppEvent::Click, t0 + ms(2000)), vec![AppAction::Render]);
        assert!(app.splash().is_some_and(SplashScreen::is_revealed));
        assert_eq!(app.phase(), AppPhase::Splash);
    }

    #[test]
    fn stray_posts_are_ignored_outside_content() {
        let (mut app, t0, _) = started(false);
        assert!(app.handle(AppEvent::PostsLoaded { posts: Vec::new() }, t0).is_empty());
        assert!(app.feed().is_none());
    }
}
