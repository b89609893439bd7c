//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: screen state machine
//! - [`Driver`]: platform-specific I/O
//! - [`PostStore`]: post listing collaborator
//! - [`SessionStore`]: session-scoped unlocked flag

use std::collections::VecDeque;

use bbs_core::{SessionStore, session};
use bbs_posts::{Post, PostStore};

use crate::{App, AppAction, AppConfig, AppEvent, Driver};

/// Generic runtime that orchestrates App, Driver and the two stores.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `P`: Post store backing the feed
/// - `S`: Session store holding the unlocked flag
pub struct Runtime<D, P, S>
where
    D: Driver,
{
    driver: D,
    app: App<D::Instant>,
    posts: P,
    session: S,
    /// Events produced by side effects, delivered before driver input.
    pending: VecDeque<AppEvent>,
    quit: bool,
}

impl<D, P, S> Runtime<D, P, S>
where
    D: Driver,
    P: PostStore,
    S: SessionStore,
{
    /// Create a runtime. The unlocked flag is read from `session` once, here.
    pub fn new(driver: D, config: AppConfig, posts: P, session: S) -> Self {
        let app = App::from_session(config, &session);
        Self { driver, app, posts, session, pending: VecDeque::new(), quit: false }
    }

    /// Run the main event loop until the app quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.run_loop().await;
        self.driver.stop();
        result
    }

    async fn run_loop(&mut self) -> Result<(), D::Error> {
        self.start()?;
        while !self.quit {
            self.step().await?;
        }
        Ok(())
    }

    /// Mount the app's initial phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to render or capture input.
    pub fn start(&mut self) -> Result<(), D::Error> {
        let now = self.driver.now();
        let actions = self.app.start(now);
        tracing::debug!(phase = %self.app.phase(), "app started");
        self.process_actions(actions)
    }

    /// Process one cycle: one event (or a tick) and the actions it produces.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn step(&mut self) -> Result<(), D::Error> {
        let event = match self.pending.pop_front() {
            Some(event) => event,
            None => self.driver.poll_event().await?.unwrap_or(AppEvent::Tick),
        };

        let now = self.driver.now();
        let actions = self.app.handle(event, now);
        self.process_actions(actions)
    }

    /// Execute actions returned by the App.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<(), D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => {
                    tracing::debug!(phase = %self.app.phase(), "quit requested");
                    self.quit = true;
                    return Ok(());
                },
                AppAction::CaptureAnyInput => self.driver.set_any_input_capture(true)?,
                AppAction::ReleaseAnyInput => self.driver.set_any_input_capture(false)?,
                AppAction::PersistUnlock => {
                    if let Err(e) = session::mark_unlocked(&mut self.session) {
                        tracing::warn!(error = %e, "failed to persist unlocked flag");
                    }
                },
                AppAction::FetchPosts => self.fetch_posts(),
            }
        }
        Ok(())
    }

    /// Single fetch per mount. The result is delivered on the next step so
    /// the loading placeholder is drawn at least once.
    fn fetch_posts(&mut self) {
        let event = match self.posts.list_published() {
            Ok(posts) => AppEvent::PostsLoaded { posts: posts.iter().map(Post::summary).collect() },
            Err(e) => AppEvent::PostsFailed { message: e.to_string() },
        };
        self.pending.push_back(event);
    }

    /// The application state.
    pub fn app(&self) -> &App<D::Instant> {
        &self.app
    }

    /// The I/O driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The I/O driver, mutably.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// The session store.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// The post store.
    pub fn posts(&self) -> &P {
        &self.posts
    }

    /// Whether the app asked to quit.
    pub fn is_finished(&self) -> bool {
        self.quit
    }
}
