//! Command-line arguments and start-up wiring.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use bbs_app::{AppConfig, DEFAULT_PASSWORD, DisplayZone};
use bbs_core::{FileSessionStore, MemorySessionStore, SessionStore};
use bbs_posts::{FilePostStore, MemoryPostStore, PostStore, StoreError, sample_posts};
use clap::Parser;
use thiserror::Error;

use crate::session_file;

/// Gate secret baked in at build time from `BBS_PASSWORD`.
pub const BUILD_PASSWORD: &str = match option_env!("BBS_PASSWORD") {
    Some(password) => password,
    None => DEFAULT_PASSWORD,
};

/// Invalid command-line configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// UTC offset outside -23..=23 hours.
    #[error("UTC offset out of range: {0} hours")]
    InvalidOffset(i32),

    /// Zero frames per second.
    #[error("frame rate must be at least 1")]
    ZeroFps,
}

/// BBS terminal
#[derive(Parser, Debug)]
#[command(name = "bbs-tui")]
#[command(about = "Password-gated BBS-style post feed in the terminal")]
#[command(version)]
pub struct Args {
    /// JSON file holding posts (created with the sample feed if missing)
    ///
    /// If not provided, the built-in sample feed is served from memory.
    #[arg(long)]
    pub posts: Option<PathBuf>,

    /// Override the gate password baked in at build time
    #[arg(long)]
    pub password: Option<String>,

    /// Session flag file (defaults to one per terminal session)
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Forget a previous unlock before starting
    #[arg(long)]
    pub reset_session: bool,

    /// Hours east of UTC used for post timestamps
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub utc_offset: i32,

    /// Zone label printed after post times
    #[arg(long, default_value = "GMT")]
    pub zone_label: String,

    /// Animation frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Application configuration described by these arguments.
    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        let zone = DisplayZone::from_hours(self.utc_offset, self.zone_label.clone())
            .ok_or(ConfigError::InvalidOffset(self.utc_offset))?;
        let password = self.password.clone().unwrap_or_else(|| BUILD_PASSWORD.to_owned());

        Ok(AppConfig { password, zone, ..AppConfig::default() })
    }

    /// Time between animation frames.
    pub fn frame_interval(&self) -> Result<Duration, ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(Duration::from_secs(1) / self.fps)
    }

    /// Session flag file in use.
    pub fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(session_file::default_path)
    }

    /// Open the post store: the JSON file if given, else the sample feed.
    pub fn open_posts(&self) -> Result<Box<dyn PostStore>, StoreError> {
        match &self.posts {
            Some(path) => Ok(Box::new(FilePostStore::open_or_seed(path, sample_posts())?)),
            None => Ok(Box::new(MemoryPostStore::seeded())),
        }
    }

    /// Open the session store, applying `--reset-session`.
    ///
    /// An unreadable session file is logged and replaced by an in-memory
    /// store, so the app starts locked.
    pub fn open_session(&self) -> Box<dyn SessionStore> {
        let path = self.session_path();
        if self.session_file.is_none() {
            session_file::prune_stale(&session_file::directory(), &path);
        }
        let mut store = open_session_file(&path);
        if self.reset_session {
            match store.clear() {
                Ok(()) => tracing::info!(path = %path.display(), "session reset"),
                Err(e) => tracing::warn!(error = %e, "failed to reset session"),
            }
        }
        store
    }
}

fn open_session_file(path: &Path) -> Box<dyn SessionStore> {
    match FileSessionStore::open(path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "session file unreadable, starting locked");
            Box::new(MemorySessionStore::new())
        },
    }
}
