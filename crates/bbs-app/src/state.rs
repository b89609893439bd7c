//! Per-screen state.
//!
//! Each screen owns the engines it mounts. Leaving a screen cancels and drops
//! them, so no deadline of a departed screen can fire.

use std::{fmt, time::Duration};

use bbs_core::{
    CharReveal, CredentialGate, GateOutcome, LineSequencer, RevealConfig, SequenceConfig,
    SequenceEvent, Timestamp,
};

use crate::AppConfig;

/// Which screen is active. Exactly one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AppPhase {
    /// Prompt waiting for any key or click.
    Boot,
    /// Logo reveal followed by the credential gate.
    Splash,
    /// Post feed. Terminal for the session.
    Content,
}

impl fmt::Display for AppPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boot => "boot",
            Self::Splash => "splash",
            Self::Content => "content",
        };
        f.write_str(name)
    }
}

/// Boot screen: typed prompt with a blinking cursor.
#[derive(Debug, Clone)]
pub struct BootScreen<I> {
    prompt: CharReveal<I>,
    blink: Duration,
    mounted_at: I,
    /// Cursor visibility at the last poll.
    cursor_shown: bool,
}

impl<I: Timestamp> BootScreen<I> {
    /// Mount the boot screen at `now`.
    pub fn mount(config: &AppConfig, now: I) -> Self {
        let mut prompt =
            CharReveal::new(config.boot_text.clone(), RevealConfig::new(config.boot_cadence));
        prompt.start(now);
        Self { prompt, blink: config.cursor_blink, mounted_at: now, cursor_shown: true }
    }

    /// Advance to `now`. Returns `true` if a redraw is needed.
    pub fn poll(&mut self, now: I) -> bool {
        let revealed = !self.prompt.poll(now).is_empty();
        let cursor = self.cursor_visible(now);
        let blinked = cursor != self.cursor_shown;
        self.cursor_shown = cursor;
        revealed || blinked
    }

    /// Unmount, dropping the pending reveal.
    pub fn cancel(&mut self) {
        self.prompt.cancel();
    }

    /// The prompt engine.
    pub fn prompt(&self) -> &CharReveal<I> {
        &self.prompt
    }

    /// Whether the block cursor is drawn at `now`. The cursor blinks while
    /// the prompt types and disappears once it is complete.
    pub fn cursor_visible(&self, now: I) -> bool {
        if self.prompt.is_complete() {
            return false;
        }
        if self.blink.is_zero() || now <= self.mounted_at {
            return true;
        }
        let elapsed = now - self.mounted_at;
        (elapsed.as_nanos() / self.blink.as_nanos()).is_multiple_of(2)
    }
}

/// Splash screen: logo reveal, then footer and credential gate.
#[derive(Debug, Clone)]
pub struct SplashScreen<I> {
    logo: LineSequencer<I>,
    gate: CredentialGate<I>,
    footer: Vec<String>,
    /// Footer shown and gate mounted.
    revealed: bool,
}

impl<I: Timestamp> SplashScreen<I> {
    /// Mount the splash screen at `now` and start the logo reveal.
    pub fn mount(config: &AppConfig, now: I) -> Self {
        let mut logo = LineSequencer::new(
            config.logo_lines.clone(),
            SequenceConfig::new(config.logo_cadence, config.logo_line_delay),
        );
        let done = logo.start(now).contains(&SequenceEvent::Completed);

        let mut splash = Self {
            logo,
            gate: CredentialGate::new(config.password.clone()).with_cooldown(config.gate_cooldown),
            footer: config.footer_lines(),
            revealed: false,
        };
        if done {
            splash.reveal_gate();
        }
        splash
    }

    /// Advance to `now`. Returns `true` if a redraw is needed.
    pub fn poll(&mut self, now: I) -> bool {
        let events = self.logo.poll(now);
        if events.contains(&SequenceEvent::Completed) {
            self.reveal_gate();
        }
        let cleared = self.gate.poll(now);
        !events.is_empty() || cleared
    }

    fn reveal_gate(&mut self) {
        self.revealed = true;
        self.gate.mount();
        tracing::debug!("logo complete, gate mounted");
    }

    /// Type a character into the gate. Ignored before the gate mounts.
    pub fn push(&mut self, c: char) {
        self.gate.push(c);
    }

    /// Delete the last typed character.
    pub fn backspace(&mut self) {
        self.gate.backspace();
    }

    /// Submit the typed attempt. `None` before the gate mounts.
    pub fn submit(&mut self, now: I) -> Option<GateOutcome> {
        self.revealed.then(|| self.gate.submit(now))
    }

    /// Unmount, dropping the logo reveal and the gate cooldown.
    pub fn cancel(&mut self) {
        self.logo.cancel();
        self.gate.cancel();
    }

    /// The logo sequencer.
    pub fn logo(&self) -> &LineSequencer<I> {
        &self.logo
    }

    /// The credential gate.
    pub fn gate(&self) -> &CredentialGate<I> {
        &self.gate
    }

    /// Footer lines. Only drawn once [`Self::is_revealed`].
    pub fn footer(&self) -> &[String] {
        &self.footer
    }

    /// Whether the logo finished and the gate is mounted.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}
