//! Credential gate.
//!
//! Compares a typed attempt against an expected secret, case-insensitively.
//! A failed attempt clears the input and raises a transient error flag that
//! clears itself after [`ERROR_COOLDOWN`]. The flag is cosmetic: resubmitting
//! is allowed at any time.
//!
//! This is an experience wall, not a security boundary. There is no lockout
//! and no attempt counting.

use std::{fmt, time::Duration};

use crate::time::{Timestamp, TimerSlot};

/// How long the error flag stays raised after a failed attempt.
pub const ERROR_COOLDOWN: Duration = Duration::from_secs(1);

/// Result of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The attempt matched.
    Success,
    /// The attempt did not match.
    Failure,
}

/// Case-insensitive exact comparison of `attempt` against `expected`.
pub fn check(attempt: &str, expected: &str) -> GateOutcome {
    if attempt.to_lowercase() == expected.to_lowercase() {
        GateOutcome::Success
    } else {
        GateOutcome::Failure
    }
}

/// Interactive gate state: attempt buffer, focus and error flag.
#[derive(Clone)]
pub struct CredentialGate<I> {
    expected: String,
    attempt: String,
    focused: bool,
    cooldown: Duration,
    /// Armed while the error flag is raised.
    error: TimerSlot<I>,
}

impl<I: Timestamp> CredentialGate<I> {
    /// Create an unfocused gate expecting `expected`.
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            attempt: String::new(),
            focused: false,
            cooldown: ERROR_COOLDOWN,
            error: TimerSlot::idle(),
        }
    }

    /// Override the error cooldown.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Mount the gate. Input is focused on mount.
    pub fn mount(&mut self) {
        self.focused = true;
    }

    /// Unmount the gate, dropping the pending error cooldown.
    pub fn cancel(&mut self) {
        self.focused = false;
        self.error.cancel();
    }

    /// Append a character to the attempt. Ignored while unfocused.
    pub fn push(&mut self, c: char) {
        if self.focused && !c.is_control() {
            self.attempt.push(c);
        }
    }

    /// Remove the last character of the attempt.
    pub fn backspace(&mut self) {
        if self.focused {
            self.attempt.pop();
        }
    }

    /// Submit the current attempt.
    ///
    /// On success the attempt is left as typed. On failure the attempt is
    /// cleared and the error flag is raised until `now + cooldown`.
    pub fn submit(&mut self, now: I) -> GateOutcome {
        let outcome = check(&self.attempt, &self.expected);
        if outcome == GateOutcome::Failure {
            self.attempt.clear();
            self.error.arm(now + self.cooldown);
        }
        outcome
    }

    /// Clear the error flag once its cooldown elapsed.
    ///
    /// Returns `true` if the flag was cleared by this call.
    pub fn poll(&mut self, now: I) -> bool {
        self.error.fire_if_due(now).is_some()
    }

    /// Typed attempt.
    pub fn attempt(&self) -> &str {
        &self.attempt
    }

    /// Attempt masked with one `*` per character.
    pub fn masked(&self) -> String {
        "*".repeat(self.attempt.chars().count())
    }

    /// Whether the error flag is raised.
    pub fn error_flag(&self) -> bool {
        self.error.is_armed()
    }

    /// Whether the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl<I> fmt::Debug for CredentialGate<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialGate")
            .field("expected", &"<redacted>")
            .field("attempt_len", &self.attempt.chars().count())
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn typed(gate: &mut CredentialGate<Instant>, text: &str) {
        for c in text.chars() {
            gate.push(c);
        }
    }

    #[test]
    fn check_ignores_case() {
        assert_eq!(check("BASEMENT", "basement"), GateOutcome::Success);
        assert_eq!(check("wrong", "basement"), GateOutcome::Failure);
        assert_eq!(check("basement ", "basement"), GateOutcome::Failure);
    }

    #[test]
    fn success_keeps_attempt() {
        let t0 = Instant::now();
        let mut gate = CredentialGate::new("basement");
        gate.mount();
        typed(&mut gate, "BaSeMeNt");

        assert_eq!(gate.submit(t0), GateOutcome::Success);
        assert_eq!(gate.attempt(), "BaSeMeNt");
        assert!(!gate.error_flag());
    }

    #[test]
    fn failure_clears_attempt_and_flags_error() {
        let t0 = Instant::now();
        let mut gate = CredentialGate::new("basement");
        gate.mount();
        typed(&mut gate, "wrong");

        assert_eq!(gate.submit(t0), GateOutcome::Failure);
        assert_eq!(gate.attempt(), "");
        assert!(gate.error_flag());

        assert!(!gate.poll(t0 + Duration::from_millis(999)));
        assert!(gate.error_flag());
        assert!(gate.poll(t0 + ERROR_COOLDOWN));
        assert!(!gate.error_flag());
    }

    #[test]
    fn resubmit_allowed_during_cooldown() {
        let t0 = Instant::now();
        let mut gate = CredentialGate::new("basement");
        gate.mount();
        gate.submit(t0);

        typed(&mut gate, "basement");
        assert_eq!(gate.submit(t0 + Duration::from_millis(10)), GateOutcome::Success);
    }

    #[test]
    fn unfocused_gate_ignores_typing() {
        let mut gate: CredentialGate<Instant> = CredentialGate::new("basement");
        gate.push('x');
        assert_eq!(gate.attempt(), "");

        gate.mount();
        gate.push('x');
        gate.push('\n');
        assert_eq!(gate.masked(), "*");
    }

    #[test]
    fn debug_redacts_secret() {
        let gate: CredentialGate<Instant> = CredentialGate::new("basement");
        assert!(!format!("{gate:?}").contains("basement"));
    }
}
