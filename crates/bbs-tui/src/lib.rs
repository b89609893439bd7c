//! Terminal UI for the BBS terminal
//!
//! A thin shell over [`bbs_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`bbs_app::Runtime`].
//!
//! This crate only handles terminal rendering, input mapping and start-up
//! wiring (arguments, stores, logging).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod session_file;
pub mod terminal;
pub mod ui;

pub use bbs_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use cli::{Args, BUILD_PASSWORD, ConfigError};
pub use terminal::{TerminalDriver, TerminalError};
