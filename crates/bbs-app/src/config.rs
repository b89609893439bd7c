//! Application configuration: timings, texts and the display zone.

use std::time::Duration;

use bbs_core::ERROR_COOLDOWN;
use chrono::{FixedOffset, Offset, Utc};

/// Gate secret used when none is supplied at build time.
pub const DEFAULT_PASSWORD: &str = "basement";

const LOGO: [&str; 3] = [
    "█▄ █ ▄▀█ █▀█ █▀▀ █▀█ ▀█▀ █ █▀▀",
    "█ ▀█ █▀█ █▀▄ █▄▄ █▄█  █  █ █▄▄",
    "═════════════════════════════",
];

/// Zone used to format post timestamps: a fixed UTC offset plus the short
/// label printed after the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayZone {
    offset: FixedOffset,
    label: String,
}

impl DisplayZone {
    /// Zone with an explicit offset and label.
    pub fn new(offset: FixedOffset, label: impl Into<String>) -> Self {
        Self { offset, label: label.into() }
    }

    /// Zone `hours` east of UTC. `None` if the offset is out of range.
    pub fn from_hours(hours: i32, label: impl Into<String>) -> Option<Self> {
        let offset = FixedOffset::east_opt(hours.checked_mul(3600)?)?;
        Some(Self::new(offset, label))
    }

    /// UTC, labelled `GMT`.
    pub fn gmt() -> Self {
        Self { offset: Utc.fix(), label: "GMT".into() }
    }

    /// UTC offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Short label, e.g. `GMT`.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::gmt()
    }
}

/// Everything the app needs to know that is not runtime state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential gate secret, compared case-insensitively.
    pub password: String,
    /// Boot prompt.
    pub boot_text: String,
    /// Boot prompt cadence per character.
    pub boot_cadence: Duration,
    /// Half-period of the boot cursor blink.
    pub cursor_blink: Duration,
    /// Splash logo, one entry per line.
    pub logo_lines: Vec<String>,
    /// Logo cadence per character.
    pub logo_cadence: Duration,
    /// Pause between logo lines.
    pub logo_line_delay: Duration,
    /// Footer presenter name.
    pub presenter: String,
    /// Footer year.
    pub year: i32,
    /// How long the gate error flag stays raised.
    pub gate_cooldown: Duration,
    /// Zone used for post dates and times.
    pub zone: DisplayZone,
    /// Entrance delay between consecutive feed entries.
    pub feed_stagger: Duration,
    /// Length of one feed entry's entrance.
    pub feed_entrance: Duration,
    /// Feed entries moved by PageUp/PageDown.
    pub page_size: usize,
}

impl AppConfig {
    /// Default configuration guarded by `password`.
    pub fn with_password(password: impl Into<String>) -> Self {
        Self { password: password.into(), ..Self::default() }
    }

    /// Splash footer lines.
    pub fn footer_lines(&self) -> Vec<String> {
        vec![format!("Presented by {}", self.presenter), format!("© {}", self.year)]
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_PASSWORD.to_owned(),
            boot_text: "Hello! Press any key to continue.".to_owned(),
            boot_cadence: Duration::from_millis(40),
            cursor_blink: Duration::from_millis(500),
            logo_lines: LOGO.iter().map(|line| (*line).to_owned()).collect(),
            logo_cadence: Duration::from_millis(2),
            logo_line_delay: Duration::from_millis(50),
            presenter: "NARCOTIC".to_owned(),
            year: 2026,
            gate_cooldown: ERROR_COOLDOWN,
            zone: DisplayZone::gmt(),
            feed_stagger: Duration::from_millis(100),
            feed_entrance: Duration::from_millis(300),
            page_size: 3,
        }
    }
}
