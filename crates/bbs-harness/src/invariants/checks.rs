//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use bbs_app::AppPhase;

use super::{AppSnapshot, Invariant, InvariantResult, Violation};

/// Input capture is held exactly while Boot is active.
///
/// Once started, the app captures any input in Boot and nowhere else. If the
/// platform state is known it must agree with the app.
pub struct CaptureMatchesPhase;

impl Invariant for CaptureMatchesPhase {
    fn name(&self) -> &'static str {
        "capture_matches_phase"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if !state.started {
            return Ok(());
        }
        let expected = state.phase == AppPhase::Boot;
        if state.capturing != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!("phase {} with capturing = {}", state.phase, state.capturing),
            });
        }
        if let Some(platform) = state.platform_capture
            && platform != state.capturing
        {
            return Err(Violation {
                invariant: self.name(),
                message: format!("app capturing = {} but platform = {platform}", state.capturing),
            });
        }
        Ok(())
    }
}

/// Exactly the screen of the active phase is mounted.
///
/// A screen left behind would keep its deadlines alive.
pub struct ScreenMatchesPhase;

impl Invariant for ScreenMatchesPhase {
    fn name(&self) -> &'static str {
        "screen_matches_phase"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if !state.started {
            return Ok(());
        }
        let mounted = (state.boot_reveal.is_some(), state.logo.is_some(), state.feed.is_some());
        let expected = match state.phase {
            AppPhase::Boot => (true, false, false),
            AppPhase::Splash => (false, true, false),
            AppPhase::Content => (false, false, true),
        };
        if mounted != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "phase {}: mounted (boot, splash, feed) = {mounted:?}",
                    state.phase
                ),
            });
        }
        Ok(())
    }
}

/// Completed logo lines are exactly the prefix `lines[..current_index]`, and
/// the gate has focus only after the logo completes.
pub struct SequencePrefix;

impl Invariant for SequencePrefix {
    fn name(&self) -> &'static str {
        "sequence_prefix"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let Some(logo) = &state.logo else {
            return Ok(());
        };
        let prefix = logo.lines.get(..logo.current_index);
        if prefix != Some(logo.completed.as_slice()) {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "completed {:?} is not lines[..{}]",
                    logo.completed, logo.current_index
                ),
            });
        }
        if logo.gate_focused != logo.complete {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "gate focused = {} with logo complete = {}",
                    logo.gate_focused, logo.complete
                ),
            });
        }
        Ok(())
    }
}

/// Boot prompt never shows more characters than it has.
pub struct RevealBounds;

impl Invariant for RevealBounds {
    fn name(&self) -> &'static str {
        "reveal_bounds"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        match state.boot_reveal {
            Some((visible, len)) if visible > len => Err(Violation {
                invariant: self.name(),
                message: format!("visible {visible} > len {len}"),
            }),
            _ => Ok(()),
        }
    }
}

/// Feed scroll never points past the last entry.
pub struct ScrollInRange;

impl Invariant for ScrollInRange {
    fn name(&self) -> &'static str {
        "scroll_in_range"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let Some(feed) = &state.feed else {
            return Ok(());
        };
        if feed.scroll > feed.entries.saturating_sub(1) {
            return Err(Violation {
                invariant: self.name(),
                message: format!("scroll {} with {} entries", feed.scroll, feed.entries),
            });
        }
        Ok(())
    }
}

/// Phases only move forward: Boot, then Splash, then Content.
///
/// Also checks that the boot prompt never hides characters and that the
/// logo never un-completes lines.
pub struct PhaseNeverRegresses;

impl Invariant for PhaseNeverRegresses {
    fn name(&self) -> &'static str {
        "phase_never_regresses"
    }

    fn check(&self, _state: &AppSnapshot) -> InvariantResult {
        Ok(())
    }

    fn check_transition(&self, before: &AppSnapshot, after: &AppSnapshot) -> InvariantResult {
        if after.phase < before.phase {
            return Err(Violation {
                invariant: self.name(),
                message: format!("phase went {} -> {}", before.phase, after.phase),
            });
        }
        if let (Some((was, _)), Some((now, _))) = (before.boot_reveal, after.boot_reveal)
            && now < was
        {
            return Err(Violation {
                invariant: self.name(),
                message: format!("boot prompt shrank {was} -> {now}"),
            });
        }
        if let (Some(was), Some(now)) = (&before.logo, &after.logo)
            && now.current_index < was.current_index
        {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "logo index went {} -> {}",
                    was.current_index, now.current_index
                ),
            });
        }
        Ok(())
    }
}
