// Start-up configuration assembled from the launch arguments
// Both resolvers run once, independently, against the same argument list

use std::fmt;

use crate::xtl_config::Settings;
use crate::xtl_lang::{LanguageConfig, resolve_language};
use crate::xtl_log::LogSink;
use crate::xtl_screen::{NativeDisplay, ScreenConfig, resolve_screen};

/// Everything the rest of the application needs from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub language: LanguageConfig,
    pub screen: ScreenConfig,
}

impl LaunchConfig {
    pub fn resolve<S: AsRef<str>>(
        args: &[S],
        settings: &Settings,
        display: &dyn NativeDisplay,
        log: &dyn LogSink,
    ) -> Self {
        let language = resolve_language(args, &settings.language_dir, log);
        let screen = resolve_screen(args, display, settings.window_cap, log);
        log::info!("launch configuration: language {language}, {screen}");
        LaunchConfig { language, screen }
    }
}

impl fmt::Display for LaunchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "language {}, {}", self.language, self.screen)
    }
}
