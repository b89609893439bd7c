//! Character reveal engine.
//!
//! Reveals a text one character at a time at a fixed cadence. The engine is a
//! pure state machine: [`CharReveal::start`] mounts it, [`CharReveal::poll`]
//! advances it to a given instant, [`CharReveal::cancel`] unmounts it. Progress
//! is reported as an ordered list of [`RevealEvent`]s.
//!
//! # Invariants
//!
//! - `visible_count` never decreases and never exceeds `len`.
//! - [`RevealEvent::Completed`] is emitted exactly once, and only once
//!   `visible_count == len`.
//! - After [`CharReveal::cancel`] no further events are emitted.

use std::time::Duration;

use crate::time::{Timestamp, TimerSlot, scaled};

/// Reveal timing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    /// Time between consecutive characters. Zero reveals everything at once.
    pub cadence: Duration,
    /// Wait before the first cadence starts counting.
    pub start_delay: Duration,
}

impl RevealConfig {
    /// Reveal at `cadence` per character with no start delay.
    pub const fn new(cadence: Duration) -> Self {
        Self { cadence, start_delay: Duration::ZERO }
    }

    /// Delay the first character by an additional `delay`.
    #[must_use]
    pub const fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }
}

/// Lifecycle of a reveal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Created, not started.
    Idle,
    /// Revealing characters.
    Running,
    /// Every character visible. Terminal.
    Complete,
    /// Torn down before completion. Terminal.
    Cancelled,
}

/// Progress reported by [`CharReveal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// One more character became visible.
    Revealed {
        /// Visible character count after this step.
        visible: usize,
    },
    /// The whole text is visible.
    Completed,
}

/// Character-by-character reveal of a single text.
#[derive(Debug, Clone)]
pub struct CharReveal<I> {
    source: String,
    /// Length in chars.
    len: usize,
    visible: usize,
    /// Byte offset of the first hidden char.
    visible_bytes: usize,
    config: RevealConfig,
    phase: RevealPhase,
    timer: TimerSlot<I>,
    /// Instant the first cadence starts counting from.
    origin: Option<I>,
    completed_at: Option<I>,
}

impl<I: Timestamp> CharReveal<I> {
    /// Create an idle engine for `text`.
    pub fn new(text: impl Into<String>, config: RevealConfig) -> Self {
        let source = text.into();
        let len = source.chars().count();
        Self {
            source,
            len,
            visible: 0,
            visible_bytes: 0,
            config,
            phase: RevealPhase::Idle,
            timer: TimerSlot::idle(),
            origin: None,
            completed_at: None,
        }
    }

    /// Mount the engine at `now`.
    ///
    /// Empty text or a zero cadence completes immediately. Calling `start` on
    /// an engine that is not idle does nothing.
    pub fn start(&mut self, now: I) -> Vec<RevealEvent> {
        if self.phase != RevealPhase::Idle {
            return Vec::new();
        }

        if self.len == 0 || self.config.cadence.is_zero() {
            self.visible = self.len;
            self.visible_bytes = self.source.len();
            self.phase = RevealPhase::Complete;
            self.completed_at = Some(now);
            return vec![RevealEvent::Completed];
        }

        let origin = now + self.config.start_delay;
        self.origin = Some(origin);
        self.timer.arm(origin + self.config.cadence);
        self.phase = RevealPhase::Running;
        Vec::new()
    }

    /// Advance to `now`, revealing one character per elapsed cadence.
    pub fn poll(&mut self, now: I) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        if self.phase != RevealPhase::Running {
            return events;
        }

        while let Some(at) = self.timer.fire_if_due(now) {
            self.reveal_next();
            events.push(RevealEvent::Revealed { visible: self.visible });

            if self.visible == self.len {
                self.phase = RevealPhase::Complete;
                self.completed_at = Some(at);
                events.push(RevealEvent::Completed);
                break;
            }
            self.timer.arm(at + self.config.cadence);
        }

        events
    }

    /// Unmount the engine. Pending deadlines are dropped; a completed engine
    /// stays complete.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        if self.phase != RevealPhase::Complete {
            self.phase = RevealPhase::Cancelled;
        }
    }

    fn reveal_next(&mut self) {
        let width = self.source[self.visible_bytes..].chars().next().map_or(0, char::len_utf8);
        self.visible_bytes += width;
        self.visible += 1;
    }

    /// Full source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text length in chars (newlines included).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the source text is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of visible chars.
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// The visible prefix of the source text.
    pub fn visible_text(&self) -> &str {
        &self.source[..self.visible_bytes]
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Whether every character is visible.
    pub fn is_complete(&self) -> bool {
        self.phase == RevealPhase::Complete
    }

    /// Timing parameters.
    pub fn config(&self) -> RevealConfig {
        self.config
    }

    /// Instant the first cadence counts from. `None` until started, and for
    /// engines that completed on start.
    pub fn origin(&self) -> Option<I> {
        self.origin
    }

    /// Instant the last character became visible. `None` until complete.
    pub fn completed_at(&self) -> Option<I> {
        self.completed_at
    }

    /// Next scheduled reveal. `None` if nothing is pending.
    pub fn next_deadline(&self) -> Option<I> {
        self.timer.deadline()
    }

    /// Instant the char at `index` became visible. `None` if still hidden.
    pub fn revealed_at(&self, index: usize) -> Option<I> {
        if index >= self.visible {
            return None;
        }
        match self.origin {
            Some(origin) => Some(origin + scaled(self.config.cadence, index + 1)),
            None => self.completed_at,
        }
    }

    /// Visual cursor position `(line, column)` after the visible text.
    ///
    /// Newlines move the cursor to the start of the next line and do not
    /// occupy a column.
    pub fn cursor(&self) -> (usize, usize) {
        let text = self.visible_text();
        let line = text.matches('\n').count();
        let column = text.rsplit('\n').next().map_or(0, |tail| tail.chars().count());
        (line, column)
    }
}
