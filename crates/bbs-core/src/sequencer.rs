//! Multi-line reveal sequencer.
//!
//! Chains [`CharReveal`] engines over an ordered list of lines: a line is
//! revealed character by character, then after a pause the next line starts.
//! Finished lines are kept whole and are never re-animated.
//!
//! # Invariants
//!
//! - `completed_lines() == lines()[..current_index()]` at every point.
//! - Line `n + 1` never starts before line `n` completes.
//! - [`SequenceEvent::Completed`] is emitted exactly once, after the last
//!   [`SequenceEvent::LineCompleted`].

use std::time::Duration;

use crate::{
    reveal::{CharReveal, RevealConfig, RevealEvent},
    time::{Timestamp, TimerSlot},
};

/// Sequencer timing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Per-character cadence within a line.
    pub cadence: Duration,
    /// Pause between one line completing and the next starting.
    pub line_delay: Duration,
}

impl SequenceConfig {
    /// Create a config with the given cadence and inter-line pause.
    pub const fn new(cadence: Duration, line_delay: Duration) -> Self {
        Self { cadence, line_delay }
    }
}

/// Lifecycle of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
    /// Created, not started.
    Idle,
    /// A line is being revealed.
    Revealing,
    /// Between two lines.
    Pausing,
    /// Every line revealed. Terminal.
    Complete,
    /// Torn down before completion. Terminal.
    Cancelled,
}

/// Progress reported by [`LineSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    /// One more character of `line` became visible.
    CharRevealed {
        /// Index of the line being revealed.
        line: usize,
        /// Visible chars of that line.
        visible: usize,
    },
    /// A line finished revealing.
    LineCompleted {
        /// Index of the finished line.
        line: usize,
    },
    /// Every line finished revealing.
    Completed,
}

/// Line-by-line sequencer over character reveals.
#[derive(Debug, Clone)]
pub struct LineSequencer<I> {
    lines: Vec<String>,
    config: SequenceConfig,
    /// Index of the line being revealed (or next to reveal while pausing).
    current: usize,
    completed: Vec<String>,
    active: Option<CharReveal<I>>,
    pause: TimerSlot<I>,
    phase: SequencePhase,
    completed_at: Option<I>,
}

impl<I: Timestamp> LineSequencer<I> {
    /// Create an idle sequencer over `lines`.
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>, config: SequenceConfig) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            config,
            current: 0,
            completed: Vec::new(),
            active: None,
            pause: TimerSlot::idle(),
            phase: SequencePhase::Idle,
            completed_at: None,
        }
    }

    /// Mount the sequencer at `now` and start the first line.
    ///
    /// An empty line list completes immediately.
    pub fn start(&mut self, now: I) -> Vec<SequenceEvent> {
        let mut events = Vec::new();
        if self.phase != SequencePhase::Idle {
            return events;
        }

        if self.lines.is_empty() {
            self.phase = SequencePhase::Complete;
            self.completed_at = Some(now);
            events.push(SequenceEvent::Completed);
            return events;
        }

        self.start_line(now, &mut events);
        events
    }

    /// Advance to `now`, chaining lines and pauses that fall due.
    pub fn poll(&mut self, now: I) -> Vec<SequenceEvent> {
        let mut events = Vec::new();

        loop {
            match self.phase {
                SequencePhase::Revealing => {
                    let Some(engine) = self.active.as_mut() else {
                        break;
                    };
                    let reveal_events = engine.poll(now);
                    if !self.absorb(reveal_events, &mut events) {
                        break;
                    }
                },
                SequencePhase::Pausing => match self.pause.fire_if_due(now) {
                    Some(at) => self.start_line(at, &mut events),
                    None => break,
                },
                SequencePhase::Idle | SequencePhase::Complete | SequencePhase::Cancelled => break,
            }
        }

        events
    }

    /// Unmount the sequencer, dropping the active engine and any pause.
    pub fn cancel(&mut self) {
        if let Some(engine) = self.active.as_mut() {
            engine.cancel();
        }
        self.active = None;
        self.pause.cancel();
        if self.phase != SequencePhase::Complete {
            self.phase = SequencePhase::Cancelled;
        }
    }

    /// Start revealing `lines[current]` at `at`.
    fn start_line(&mut self, at: I, events: &mut Vec<SequenceEvent>) {
        let Some(text) = self.lines.get(self.current) else {
            return;
        };
        let mut engine = CharReveal::new(text.clone(), RevealConfig::new(self.config.cadence));
        let reveal_events = engine.start(at);
        self.active = Some(engine);
        self.phase = SequencePhase::Revealing;
        self.absorb(reveal_events, events);
    }

    /// Translate engine events. Returns `true` if the active line finished.
    fn absorb(&mut self, reveal_events: Vec<RevealEvent>, events: &mut Vec<SequenceEvent>) -> bool {
        let line = self.current;
        let mut finished = false;

        for event in reveal_events {
            match event {
                RevealEvent::Revealed { visible } => {
                    events.push(SequenceEvent::CharRevealed { line, visible });
                },
                RevealEvent::Completed => finished = true,
            }
        }

        if finished {
            self.finish_line(events);
        }
        finished
    }

    fn finish_line(&mut self, events: &mut Vec<SequenceEvent>) {
        let Some(engine) = self.active.take() else {
            return;
        };
        let Some(done_at) = engine.completed_at() else {
            return;
        };

        let line = self.current;
        self.completed.push(engine.source().to_owned());
        self.current += 1;
        events.push(SequenceEvent::LineCompleted { line });

        if self.current == self.lines.len() {
            self.phase = SequencePhase::Complete;
            self.completed_at = Some(done_at);
            events.push(SequenceEvent::Completed);
        } else {
            self.phase = SequencePhase::Pausing;
            self.pause.arm(done_at + self.config.line_delay);
        }
    }

    /// All lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines that finished revealing, in order.
    pub fn completed_lines(&self) -> &[String] {
        &self.completed
    }

    /// Number of finished lines.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Engine of the line being revealed. `None` while pausing or when done.
    pub fn active_line(&self) -> Option<&CharReveal<I>> {
        self.active.as_ref()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    /// Whether every line finished revealing.
    pub fn is_complete(&self) -> bool {
        self.phase == SequencePhase::Complete
    }

    /// Instant the last line finished. `None` until complete.
    pub fn completed_at(&self) -> Option<I> {
        self.completed_at
    }

    /// Timing parameters.
    pub fn config(&self) -> SequenceConfig {
        self.config
    }
}
