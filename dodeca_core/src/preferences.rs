//! # Preferences
//!
//! The two settings that survive between sessions: display language and
//! color theme. Stored as a small JSON file.
//!
//! - **Atomic saves**: write to `.tmp`, sync, rename
//! - **Lock file**: `update_preferences` holds `<file>.lock` while it
//!   reads, modifies and writes, so two processes cannot interleave
//! - **Version check**: files written by a newer schema are refused
//!
//! ## Example
//!
//! ```rust,no_run
//! use dodeca_core::preferences::{update_preferences, Theme};
//! use std::path::Path;
//!
//! let prefs = update_preferences(Path::new("dodeca-prefs.json"), |p| {
//!     p.theme = p.theme.toggled();
//! })?;
//! assert_eq!(prefs.theme, Theme::Dark);
//! # Ok::<(), dodeca_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::i18n::{Language, MessageKey};

/// Current schema version for preference files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Environment variable that overrides the preferences path
pub const PREFS_ENV_VAR: &str = "DODECA_PREFS";

/// File name used when neither a flag nor the environment names one
pub const DEFAULT_FILE_NAME: &str = "dodeca-prefs.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn message_key(self) -> MessageKey {
        match self {
            Theme::Light => MessageKey::ThemeLight,
            Theme::Dark => MessageKey::ThemeDark,
        }
    }
}

impl FromStr for Theme {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(CalcError::invalid_input("theme", s, "Expected 'light' or 'dark'")),
        }
    }
}

/// Persisted user settings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "version": "0.1.0",
///   "language": "en",
///   "theme": "dark",
///   "saved_at": "2025-01-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Schema version the file was written with
    pub version: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: Theme,
    /// Last successful save
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            version: SCHEMA_VERSION.to_string(),
            language: Language::default(),
            theme: Theme::default(),
            saved_at: None,
        }
    }
}

/// Where preferences live: the explicit path if given, else `$DODECA_PREFS`,
/// else `dodeca-prefs.json` in the working directory.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(PREFS_ENV_VAR) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_FILE_NAME),
    }
}

// ============================================================================
// Locking
// ============================================================================

/// Who holds a preferences lock, recorded in `<file>.lock`.
///
/// Only used to name the holder in a `FileLocked` error; the OS lock on the
/// file decides who gets in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    pub fn current() -> Self {
        LockInfo {
            machine: whoami::fallible::hostname().unwrap_or_else(|_| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Exclusive lock on a preferences file, released on drop.
pub struct PreferencesLock {
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl PreferencesLock {
    /// Take the lock for `path` without waiting.
    ///
    /// A `.lock` file left behind by a killed process is simply reused, since
    /// the OS dropped that process's lock when it exited.
    ///
    /// # Returns
    ///
    /// * `Ok(PreferencesLock)` - Lock acquired
    /// * `Err(CalcError::FileLocked)` - Another process holds it
    pub fn acquire(path: &Path) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let io_error = |operation: &str, e: std::io::Error| {
            CalcError::file_error(operation, lock_path.display().to_string(), e.to_string())
        };

        // Not truncated: a live holder's record must survive for the error
        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| io_error("open lock", e))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(match read_holder(&mut lock_file) {
                Some(holder) => CalcError::file_locked(
                    path.display().to_string(),
                    format!("pid {} ({})", holder.pid, holder.machine),
                    holder.locked_at.to_rfc3339(),
                ),
                None => CalcError::file_locked(path.display().to_string(), "another process", "unknown"),
            });
        }

        if let Some(previous) = read_holder(&mut lock_file) {
            warn!(
                path = %lock_path.display(),
                pid = previous.pid,
                machine = %previous.machine,
                "reclaiming lock file left by an exited process"
            );
        }

        let info = LockInfo::current();
        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| CalcError::serialization(e.to_string()))?;

        lock_file
            .set_len(0)
            .and_then(|_| lock_file.seek(SeekFrom::Start(0)))
            .and_then(|_| lock_file.write_all(lock_json.as_bytes()))
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| io_error("write lock", e))?;

        Ok(PreferencesLock {
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }
}

impl Drop for PreferencesLock {
    fn drop(&mut self) {
        // The OS lock goes with the file handle right after this
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `prefs.json` → `prefs.json.lock`
fn lock_path_for(path: &Path) -> PathBuf {
    sibling_with_suffix(path, "lock")
}

/// `prefs.json` → `prefs.json.<suffix>`
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut sibling = path.to_path_buf();
    let extension = sibling
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    sibling.set_extension(extension);
    sibling
}

/// Record in an open lock file, if it holds a readable one
fn read_holder(lock_file: &mut File) -> Option<LockInfo> {
    let mut contents = String::new();
    lock_file.seek(SeekFrom::Start(0)).ok()?;
    lock_file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

// ============================================================================
// Load / Save
// ============================================================================

fn read_to_string(path: &Path, operation: &str) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Replace `path` with `contents` through a synced sibling `.tmp` file, so a
/// reader sees either the old file or the new one.
fn write_atomically(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = sibling_with_suffix(path, "tmp");

    File::create(&tmp_path)
        .and_then(|mut tmp| tmp.write_all(contents).and_then(|_| tmp.sync_all()))
        .map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("replace", path.display().to_string(), e.to_string())
    })
}

/// Write preferences to `path`, replacing any previous file in one step.
pub fn save_preferences(prefs: &Preferences, path: &Path) -> CalcResult<()> {
    let json =
        serde_json::to_string_pretty(prefs).map_err(|e| CalcError::serialization(e.to_string()))?;
    write_atomically(path, json.as_bytes())?;

    info!(path = %path.display(), language = %prefs.language, "preferences saved");
    Ok(())
}

/// Load preferences from a file.
///
/// # Returns
///
/// * `Ok(Preferences)` - Successfully loaded
/// * `Err(CalcError::VersionMismatch)` - File written by an incompatible schema
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_preferences(path: &Path) -> CalcResult<Preferences> {
    let contents = read_to_string(path, "read")?;

    let prefs: Preferences = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&prefs.version)?;

    Ok(prefs)
}

/// Load preferences, falling back to defaults when the file does not exist.
pub fn load_or_default(path: &Path) -> CalcResult<Preferences> {
    if !path.exists() {
        info!(path = %path.display(), "no preferences file, using defaults");
        return Ok(Preferences::default());
    }
    load_preferences(path)
}

/// Lock, load (or default), modify, save. Returns what was saved.
pub fn update_preferences(
    path: &Path,
    modify: impl FnOnce(&mut Preferences),
) -> CalcResult<Preferences> {
    let _lock = PreferencesLock::acquire(path)?;

    let mut prefs = load_or_default(path)?;
    modify(&mut prefs);
    prefs.version = SCHEMA_VERSION.to_string();
    prefs.saved_at = Some(Utc::now());

    save_preferences(&prefs, path)?;
    Ok(prefs)
}

/// Same major version; while on 0.x the file's minor may not be newer.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|_| mismatch())?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }

    Ok(())
}
