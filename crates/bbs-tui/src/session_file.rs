//! Location of the per-terminal-session flag file.
//!
//! A browsing session becomes a terminal session here: the flag file is keyed
//! by the parent shell, so closing the shell and opening a new one starts
//! locked again. On Linux the key also carries the shell's start time, so a
//! recycled pid never inherits an old unlock, and files left behind by shells
//! that have exited are removed at startup.

use std::{
    fs,
    path::{Path, PathBuf},
};

const PREFIX: &str = "session-";
const SUFFIX: &str = ".json";

/// Identity of the terminal session owning a flag file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKey {
    /// Pid of the owning shell.
    pub pid: u32,
    /// Start time of that process in clock ticks since boot, where known.
    pub started: Option<u64>,
}

impl SessionKey {
    /// Key of the shell this process runs in.
    #[must_use]
    pub fn current() -> Self {
        let pid = parent_pid();
        Self { pid, started: start_time(pid) }
    }

    /// Flag file name for this key.
    #[must_use]
    pub fn file_name(&self) -> String {
        match self.started {
            Some(started) => format!("{PREFIX}{}-{started}{SUFFIX}", self.pid),
            None => format!("{PREFIX}{}{SUFFIX}", self.pid),
        }
    }

    /// Parse a flag file name. `None` for anything else.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let stem = name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
        match stem.split_once('-') {
            Some((pid, started)) => Some(Self { pid: pid.parse().ok()?, started: Some(started.parse().ok()?) }),
            None => Some(Self { pid: stem.parse().ok()?, started: None }),
        }
    }

    /// Whether the owning shell is still running. Always `true` where that
    /// cannot be checked.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        if !cfg!(target_os = "linux") {
            return true;
        }
        match (start_time(self.pid), self.started) {
            (None, _) => false,
            (Some(now), Some(then)) => now == then,
            (Some(_), None) => true,
        }
    }
}

/// Directory holding the flag files.
#[must_use]
pub fn directory() -> PathBuf {
    std::env::temp_dir().join("bbs-terminal")
}

/// Default flag file for the current terminal session.
#[must_use]
pub fn default_path() -> PathBuf {
    directory().join(SessionKey::current().file_name())
}

/// Remove flag files in `dir` whose shell has exited, keeping `keep`.
///
/// Returns how many files were removed. Unreadable directories and entries
/// are skipped.
pub fn prune_stale(dir: &Path, keep: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path == keep {
            continue;
        }
        let Some(key) = path.file_name().and_then(|name| name.to_str()).and_then(SessionKey::parse)
        else {
            continue;
        };
        if key.is_alive() {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "stale session file kept"),
        }
    }
    if removed > 0 {
        tracing::debug!(removed, "pruned stale session files");
    }
    removed
}

#[cfg(unix)]
fn parent_pid() -> u32 {
    std::os::unix::process::parent_id()
}

#[cfg(not(unix))]
fn parent_pid() -> u32 {
    std::process::id()
}

/// Process start time from `/proc/<pid>/stat` (field 22).
#[cfg(target_os = "linux")]
fn start_time(pid: u32) -> Option<u64> {
    let stat = fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
    // The command name may contain spaces and parentheses; fields resume
    // after the last ')', starting at field 3.
    let (_, fields) = stat.rsplit_once(')')?;
    fields.split_whitespace().nth(19)?.parse().ok()
}

#[cfg(not(target_os = "linux"))]
fn start_time(_pid: u32) -> Option<u64> {
    None
}
