// Launch-time configuration for the game front end
// Resolves the display language and window geometry from loose command-line flags

pub mod xtl_config; // Persisted launcher settings
pub mod xtl_lang;   // Language flag parsing and resource validation
pub mod xtl_launch; // Composed start-up configuration
pub mod xtl_log;    // Timestamped diagnostic sink
pub mod xtl_screen; // Fullscreen/windowed geometry resolution

pub use xtl_config::{ConfigError, Settings, load_or_create_settings};
pub use xtl_lang::{DEFAULT_LANGUAGE, LanguageConfig, resolve_language};
pub use xtl_launch::LaunchConfig;
pub use xtl_log::{LogSink, MemoryLog, TimestampLog};
pub use xtl_screen::{NativeDisplay, ScreenConfig, ScreenSize, TerminalDisplay, resolve_screen};
