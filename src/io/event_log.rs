use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Size at which the log is trimmed to its newest half (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Environment variable overriding the log location.
pub const LOG_PATH_ENV: &str = "LANNO_LOG";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Warn => write!(f, "warn"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// Which collaborator an entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sidecar,
    Config,
    Editor,
    Directory,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Sidecar => write!(f, "sidecar"),
            Category::Config => write!(f, "config"),
            Category::Editor => write!(f, "editor"),
            Category::Directory => write!(f, "directory"),
        }
    }
}

/// A single line in the event log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub category: Category,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, category: Category, message: impl Into<String>) -> Self {
        LogEntry {
            timestamp: Utc::now(),
            level,
            category,
            message: message.into(),
        }
    }

    fn to_line(&self) -> String {
        // Keep one entry per line even if the message spans several
        let message = self.message.replace('\n', " ");
        format!(
            "{} {} {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.level,
            self.category,
            message,
        )
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Log file path: `$LANNO_LOG`, else `$XDG_STATE_HOME/lanno/lanno.log`.
#[cfg(not(test))]
pub fn log_path() -> PathBuf {
    resolve_log_path(
        std::env::var(LOG_PATH_ENV).ok().as_deref(),
        std::env::var("XDG_STATE_HOME").ok().as_deref(),
        &home_dir(),
    )
}

/// Unit tests log under the temp dir, never the user's state directory.
#[cfg(test)]
pub fn log_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("lanno-test-{}", std::process::id()))
        .join("lanno.log")
}

/// Pick the log location from the override, the XDG state dir, and home.
pub fn resolve_log_path(log_env: Option<&str>, state_home: Option<&str>, home: &Path) -> PathBuf {
    if let Some(path) = log_env
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    let state_dir = match state_home {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home.join(".local").join("state"),
    };
    state_dir.join("lanno").join("lanno.log")
}

pub(crate) fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append an entry to the default log. Errors are swallowed and printed to stderr.
pub fn log_event(level: Level, category: Category, message: impl Into<String>) {
    let path = log_path();
    if let Err(e) = append_entry(&path, &LogEntry::new(level, category, message)) {
        eprintln!("warning: could not write to {}: {}", path.display(), e);
    }
}

pub fn warn(category: Category, message: impl Into<String>) {
    log_event(Level::Warn, category, message);
}

pub fn error(category: Category, message: impl Into<String>) {
    log_event(Level::Error, category, message);
}

/// Append `entry` to the log at `path`, creating parent directories.
pub fn append_entry(path: &Path, entry: &LogEntry) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    if let Ok(meta) = fs::metadata(path)
        && meta.len() > MAX_LOG_SIZE
    {
        trim_log(path)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(entry.to_line().as_bytes())?;
    Ok(())
}

/// Keep the newest half of the log's lines.
fn trim_log(path: &Path) -> io::Result<()> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    let keep = &lines[lines.len() / 2..];
    let mut out = keep.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    atomic_write(path, out.as_bytes())
}
