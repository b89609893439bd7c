//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`bbs_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Input is a script of [`SimStep`]s. When the script runs dry, every poll
//! advances the virtual clock by one frame and reports no input, which the
//! runtime turns into a tick.

use std::{collections::VecDeque, time::Duration};

use bbs_app::{App, AppEvent, Driver, KeyInput};
use thiserror::Error;

use crate::{
    invariants::{AppSnapshot, InvariantRegistry},
    sim_clock::{SimClock, SimInstant},
};

/// Error type for simulation driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimDriverError {
    /// The runtime kept polling past the configured budget.
    #[error("poll budget of {max} exhausted")]
    Exhausted {
        /// Configured budget.
        max: usize,
    },

    /// Capture was enabled twice or released while not held.
    #[error("unpaired input capture change to {enabled}")]
    UnpairedCapture {
        /// Requested state.
        enabled: bool,
    },

    /// An invariant failed on a rendered frame.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimStep {
    /// Move the clock forward without input.
    Advance(Duration),
    /// Deliver an event.
    Event(AppEvent),
}

/// Simulation driver for deterministic testing.
pub struct SimDriver {
    clock: SimClock,
    script: VecDeque<SimStep>,
    frame: Duration,
    polls: usize,
    max_polls: usize,
    capture: bool,
    capture_changes: Vec<bool>,
    frames: Vec<AppSnapshot>,
    invariants: Option<InvariantRegistry>,
    stopped: bool,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Driver with a 16 ms frame and a budget of 10 000 polls.
    pub fn new() -> Self {
        Self {
            clock: SimClock::new(),
            script: VecDeque::new(),
            frame: Duration::from_millis(16),
            polls: 0,
            max_polls: 10_000,
            capture: false,
            capture_changes: Vec::new(),
            frames: Vec::new(),
            invariants: None,
            stopped: false,
        }
    }

    /// Enable invariant checking on every rendered frame.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Set the virtual frame length.
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    /// Set the poll budget.
    #[must_use]
    pub fn with_max_polls(mut self, max: usize) -> Self {
        self.max_polls = max;
        self
    }

    /// Append an event to the script.
    pub fn push_event(&mut self, event: AppEvent) {
        self.script.push_back(SimStep::Event(event));
    }

    /// Append a key press to the script.
    pub fn push_key(&mut self, key: KeyInput) {
        self.push_event(AppEvent::Key(key));
    }

    /// Append typed text, one key per character.
    pub fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            self.push_key(KeyInput::Char(c));
        }
    }

    /// Append a pause of `by` to the script.
    pub fn push_advance(&mut self, by: Duration) {
        self.script.push_back(SimStep::Advance(by));
    }

    /// Whether scripted steps remain.
    pub fn has_pending(&self) -> bool {
        !self.script.is_empty()
    }

    /// The virtual clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Snapshots of every rendered frame, in order.
    pub fn frames(&self) -> &[AppSnapshot] {
        &self.frames
    }

    /// Every capture change requested, in order.
    pub fn capture_changes(&self) -> &[bool] {
        &self.capture_changes
    }

    /// Whether any input is currently captured.
    pub fn is_capturing(&self) -> bool {
        self.capture
    }

    /// Number of polls so far.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Whether [`Driver::stop`] ran.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn check_frame(&self, snapshot: &AppSnapshot) -> Result<(), SimDriverError> {
        let Some(registry) = &self.invariants else {
            return Ok(());
        };

        let mut violations = registry.check_all(snapshot).err().unwrap_or_default();
        if let Some(before) = self.frames.last() {
            violations.extend(registry.check_transition_all(before, snapshot).err().unwrap_or_default());
        }
        if violations.is_empty() {
            return Ok(());
        }

        let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
        Err(SimDriverError::Invariant(messages.join("; ")))
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = SimInstant;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        self.polls += 1;
        if self.polls > self.max_polls {
            return Err(SimDriverError::Exhausted { max: self.max_polls });
        }

        while let Some(step) = self.script.pop_front() {
            match step {
                SimStep::Advance(by) => self.clock.advance(by),
                SimStep::Event(event) => return Ok(Some(event)),
            }
        }

        self.clock.advance(self.frame);
        Ok(None)
    }

    fn now(&self) -> Self::Instant {
        self.clock.now()
    }

    fn render(&mut self, app: &App<SimInstant>) -> Result<(), Self::Error> {
        let snapshot = AppSnapshot::from_app(app).with_platform_capture(self.capture);
        self.check_frame(&snapshot)?;
        self.frames.push(snapshot);
        Ok(())
    }

    fn set_any_input_capture(&mut self, enabled: bool) -> Result<(), Self::Error> {
        if self.capture == enabled {
            return Err(SimDriverError::UnpairedCapture { enabled });
        }
        tracing::trace!(enabled, "input capture changed");
        self.capture = enabled;
        self.capture_changes.push(enabled);
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
