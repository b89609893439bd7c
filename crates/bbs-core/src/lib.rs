//! Core engines for the BBS terminal.
//!
//! Pure, time-parameterised state machines behind the staged reveal of the
//! boot and splash screens, plus the session flag storage that lets a client
//! skip the gate for the rest of its session.
//!
//! # Components
//!
//! - [`CharReveal`]: Reveals one text character by character
//! - [`LineSequencer`]: Chains character reveals over an ordered list of lines
//! - [`CredentialGate`]: Case-insensitive secret check with a transient error
//!   flag
//! - [`SessionStore`]: Injectable key-value store for the unlocked flag
//!
//! # Time
//!
//! No engine reads a clock. Operations take an explicit instant of any type
//! implementing [`Timestamp`], so tests drive them with exact instants and the
//! terminal drives them with `std::time::Instant`. Mounting is `start(now)`,
//! unmounting is `cancel()`; a cancelled engine never reports progress again.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
pub mod gate;
pub mod persist;
pub mod reveal;
pub mod sequencer;
pub mod session;
pub mod time;

pub use error::SessionError;
pub use gate::{CredentialGate, ERROR_COOLDOWN, GateOutcome};
pub use persist::replace_file;
pub use reveal::{CharReveal, RevealConfig, RevealEvent, RevealPhase};
pub use sequencer::{LineSequencer, SequenceConfig, SequenceEvent, SequencePhase};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, UNLOCK_KEY, UNLOCK_VALUE};
pub use time::{Timestamp, TimerSlot};
