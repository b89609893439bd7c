//! Application layer for the BBS terminal
//!
//! Pure state machines and a generic runtime, so the same screen logic runs
//! in the terminal and in deterministic simulation.
//!
//! # Components
//!
//! - [`App`]: screen progression (boot, splash, content) and input handling
//! - [`Feed`]: post feed shaping (placeholders, timestamps, entrance timing)
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic orchestration loop using a Driver, a post store and
//!   a session store

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod config;
mod driver;
mod event;
pub mod feed;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use config::{AppConfig, DEFAULT_PASSWORD, DisplayZone};
pub use driver::Driver;
pub use event::AppEvent;
pub use feed::{Feed, FeedEntry, FeedStatus};
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::{AppPhase, BootScreen, SplashScreen};
