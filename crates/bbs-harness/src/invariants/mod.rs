//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during execution. Unlike
//! example-based tests that check specific scenarios, invariants verify
//! behavioral properties across all possible execution paths.
//!
//! # Architecture
//!
//! The invariant system extracts observable state from the App into an
//! [`AppSnapshot`], then runs registered [`Invariant`] checks against it.
//! Transition checks compare two consecutive snapshots.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = AppSnapshot::from_app(&app);
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    CaptureMatchesPhase, PhaseNeverRegresses, RevealBounds, ScreenMatchesPhase, ScrollInRange,
    SequencePrefix,
};
pub use snapshot::{AppSnapshot, FeedSnapshot, LogoSnapshot};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against app state.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against the current state.
    fn check(&self, state: &AppSnapshot) -> InvariantResult;

    /// Check a step from `before` to `after`. Holds by default.
    fn check_transition(&self, _before: &AppSnapshot, _after: &AppSnapshot) -> InvariantResult {
        Ok(())
    }
}

/// Registry of invariants to check.
///
/// Use [`InvariantRegistry::standard()`] for the common App invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard App invariants.
    ///
    /// Includes:
    /// - [`CaptureMatchesPhase`]: input capture held exactly during Boot
    /// - [`ScreenMatchesPhase`]: only the active screen is mounted
    /// - [`SequencePrefix`]: completed logo lines are a prefix of the logo
    /// - [`RevealBounds`]: boot prompt within its length
    /// - [`ScrollInRange`]: feed scroll within the entries
    /// - [`PhaseNeverRegresses`]: phases and reveals only move forward
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(CaptureMatchesPhase);
        registry.add(ScreenMatchesPhase);
        registry.add(SequencePrefix);
        registry.add(RevealBounds);
        registry.add(ScrollInRange);
        registry.add(PhaseNeverRegresses);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &AppSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all transition invariants for a step from `before` to `after`.
    pub fn check_transition_all(
        &self,
        before: &AppSnapshot,
        after: &AppSnapshot,
    ) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> = self
            .invariants
            .iter()
            .filter_map(|inv| inv.check_transition(before, after).err())
            .collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on any violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    pub fn assert_all(&self, state: &AppSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
