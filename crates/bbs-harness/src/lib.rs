//! Deterministic simulation harness for the BBS terminal.
//!
//! A virtual clock and a scripted implementation of the [`bbs_app::Driver`]
//! trait, so the production [`bbs_app::Runtime`] runs unchanged under test
//! with fully reproducible timing.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! App invariants.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod invariants;
pub mod sim_clock;
pub mod sim_driver;
pub mod sim_store;

pub use invariants::{
    AppSnapshot, CaptureMatchesPhase, Invariant, InvariantRegistry, InvariantResult,
    PhaseNeverRegresses, RevealBounds, ScreenMatchesPhase, ScrollInRange, SequencePrefix,
    Violation,
};
pub use sim_clock::{SimClock, SimInstant};
pub use sim_driver::{SimDriver, SimDriverError, SimStep};
pub use sim_store::FailingPostStore;
