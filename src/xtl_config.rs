// Launcher settings persistence
// Where language resources live, where diagnostics go and how large a default window may be

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::xtl_log::{LogSink, TimestampLog};
use crate::xtl_screen::{DEFAULT_WINDOW_CAP, ScreenSize};

/// Default location of the `<CODE>.txt` language files, relative to the working directory
pub const DEFAULT_LANGUAGE_DIR: &str = "Source/Content";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User-editable launcher settings
/// Persisted to disk as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language_dir: PathBuf,     // Directory holding the language resource files
    pub log_file: Option<PathBuf>, // Diagnostics are appended here; stdout when unset
    pub window_cap: ScreenSize,    // Upper bound for the default windowed size
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language_dir: PathBuf::from(DEFAULT_LANGUAGE_DIR),
            log_file: None,
            window_cap: DEFAULT_WINDOW_CAP,
        }
    }
}

impl Settings {
    /// Open the diagnostic sink these settings ask for
    /// A log file that cannot be opened is an error; the caller decides whether to fall back
    pub fn open_log_sink(&self) -> Result<Box<dyn LogSink>, ConfigError> {
        match &self.log_file {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(Box::new(TimestampLog::new(file)))
            }
            None => Ok(Box::new(TimestampLog::stdout())),
        }
    }
}

/// Get the settings file path
/// Uses platform-specific config directory (e.g., ~/.config/xtlaunch/xtlaunch.toml on Linux)
/// Falls back to current directory if ProjectDirs is unavailable
pub fn config_path() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let name = exe.file_stem().and_then(|s| s.to_str())?;
    match ProjectDirs::from("com", "xhbl", name) {
        Some(proj) => Some(proj.config_dir().join(format!("{}.toml", name))),
        None => env::current_dir()
            .ok()
            .map(|dir| dir.join(format!("{}.toml", name))),
    }
}

/// Read and parse a settings file
pub fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let s = fs::read_to_string(path)?;
    Ok(toml::from_str::<Settings>(&s)?)
}

/// Write settings as TOML, creating parent directories as needed
pub fn write_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let s = toml::to_string(settings)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, s)?;
    Ok(())
}

/// Load settings from `path`, or create the file with defaults if it does not exist
/// A present but unreadable file is left untouched and defaults are used
pub fn load_or_create_at(path: &Path) -> Settings {
    if path.exists() {
        match read_settings(path) {
            Ok(settings) => return settings,
            Err(e) => {
                log::warn!("ignoring settings file {}: {e}", path.display());
                return Settings::default();
            }
        }
    }
    let settings = Settings::default();
    if let Err(e) = write_settings(path, &settings) {
        log::warn!("cannot create settings file {}: {e}", path.display());
    }
    settings
}

/// Load settings from the default location, or create them there
pub fn load_or_create_settings() -> Settings {
    match config_path() {
        Some(path) => load_or_create_at(&path),
        None => Settings::default(),
    }
}
