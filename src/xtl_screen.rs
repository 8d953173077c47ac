// Window geometry resolution
// Fullscreen by default; `-windowed` switches to a window whose size can be set with
// `-w=`/`-width=` and `-h=`/`-height=`, bounded by the native display size

use crossterm::terminal;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::sync::LazyLock;

use crate::xtl_log::LogSink;

/// Tokens that request windowed mode (the second one is a long-standing typo kept for compatibility)
pub const WINDOWED_FLAGS: [&str; 2] = ["-windowed", "-windowd"];

/// Largest default window; an explicit size may go beyond it up to the native size
pub const DEFAULT_WINDOW_CAP: ScreenSize = ScreenSize {
    width: 800,
    height: 600,
};

// Anchored at the start only: anything after the digits is ignored
static WIDTH_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-w(?:idth)?=(?P<value>\d*)").unwrap());
static HEIGHT_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-h(?:eight)?=(?P<value>\d*)").unwrap());

/// Pixel extent of a display or window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        ScreenSize { width, height }
    }

    /// Component-wise minimum
    pub fn min(self, other: ScreenSize) -> ScreenSize {
        ScreenSize {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resolved display mode
/// Fullscreen carries no geometry: the windowing layer picks it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenConfig {
    Fullscreen,
    Windowed(ScreenSize),
}

impl ScreenConfig {
    pub fn fullscreen(&self) -> bool {
        matches!(self, ScreenConfig::Fullscreen)
    }

    pub fn window_size(&self) -> Option<ScreenSize> {
        match self {
            ScreenConfig::Fullscreen => None,
            ScreenConfig::Windowed(size) => Some(*size),
        }
    }

    pub fn width(&self) -> Option<u32> {
        self.window_size().map(|s| s.width)
    }

    pub fn height(&self) -> Option<u32> {
        self.window_size().map(|s| s.height)
    }
}

impl fmt::Display for ScreenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenConfig::Fullscreen => f.write_str("fullscreen"),
            ScreenConfig::Windowed(size) => write!(f, "windowed {size}"),
        }
    }
}

/// Source of the host display resolution
pub trait NativeDisplay {
    /// Pixel size of the display, or None when it cannot be determined
    fn native_size(&self) -> Option<ScreenSize>;
}

/// A fixed, known resolution
impl NativeDisplay for ScreenSize {
    fn native_size(&self) -> Option<ScreenSize> {
        Some(*self)
    }
}

/// Resolution reported by the controlling terminal
/// Many terminals do not report pixel sizes; those yield None
pub struct TerminalDisplay;

impl NativeDisplay for TerminalDisplay {
    fn native_size(&self) -> Option<ScreenSize> {
        match terminal::window_size() {
            Ok(ws) if ws.width > 0 && ws.height > 0 => {
                Some(ScreenSize::new(ws.width.into(), ws.height.into()))
            }
            Ok(_) => None,
            Err(e) => {
                log::debug!("terminal window size query failed: {e}");
                None
            }
        }
    }
}

/// True if any argument is exactly one of the windowed-mode tokens
pub fn windowed_requested<S: AsRef<str>>(args: &[S]) -> bool {
    args.iter()
        .any(|arg| WINDOWED_FLAGS.contains(&arg.as_ref()))
}

#[derive(Clone, Copy)]
enum Axis {
    Width,
    Height,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Axis::Width => "Width",
            Axis::Height => "Height",
        }
    }

    fn flag(self) -> &'static Regex {
        match self {
            Axis::Width => &WIDTH_FLAG,
            Axis::Height => &HEIGHT_FLAG,
        }
    }

    fn of(self, size: ScreenSize) -> u32 {
        match self {
            Axis::Width => size.width,
            Axis::Height => size.height,
        }
    }
}

/// One dimension being resolved: current value plus whether a flag already set it
struct Dimension {
    axis: Axis,
    native: u32,
    value: u32,
    set: bool,
}

impl Dimension {
    fn new(axis: Axis, native: ScreenSize, initial: ScreenSize) -> Self {
        Dimension {
            axis,
            native: axis.of(native),
            value: axis.of(initial),
            set: false,
        }
    }

    /// Try `arg` as a flag for this dimension; returns false if it is not one
    fn apply(&mut self, arg: &str, log: &dyn LogSink) -> bool {
        let Some(caps) = self.axis.flag().captures(arg) else {
            return false;
        };
        let raw = &caps["value"];
        let value = match raw.parse::<u32>() {
            Ok(v) => v,
            Err(e) => {
                log.log(&parse_failure(self.axis, raw, &e));
                return true;
            }
        };
        if value > self.native {
            log.log(&format!(
                "{} arguments set as {}, but the window's {} is only {}.",
                self.axis.label(),
                value,
                self.axis.name(),
                self.native
            ));
            return true;
        }
        if self.set {
            log.log(&format!(
                "Conflicts when more than one parameters for {} settings. The original value is {}, the surplus value is {}.",
                self.axis.name(),
                self.value,
                value
            ));
            return true;
        }
        self.set = true;
        self.value = value;
        true
    }
}

fn parse_failure(axis: Axis, raw: &str, e: &ParseIntError) -> String {
    format!("Invalid {} value \"{}\": {}", axis.name(), raw, e)
}

/// Resolve the display mode from the launch arguments
/// The display is only queried when windowed mode is requested; if it cannot be
/// queried, `cap` stands in for the native size
pub fn resolve_screen<S: AsRef<str>>(
    args: &[S],
    display: &dyn NativeDisplay,
    cap: ScreenSize,
    log: &dyn LogSink,
) -> ScreenConfig {
    if !windowed_requested(args) {
        return ScreenConfig::Fullscreen;
    }

    let native = display.native_size().unwrap_or_else(|| {
        log::warn!("native display size unavailable, assuming {cap}");
        cap
    });
    let initial = native.min(cap);
    let mut width = Dimension::new(Axis::Width, native, initial);
    let mut height = Dimension::new(Axis::Height, native, initial);

    for arg in args {
        let arg = arg.as_ref();
        if !width.apply(arg, log) {
            height.apply(arg, log);
        }
    }

    ScreenConfig::Windowed(ScreenSize::new(width.value, height.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xtl_log::MemoryLog;
    use std::cell::Cell;

    const NATIVE: ScreenSize = ScreenSize::new(1920, 1080);

    struct CountingDisplay {
        size: Option<ScreenSize>,
        calls: Cell<u32>,
    }

    impl NativeDisplay for CountingDisplay {
        fn native_size(&self) -> Option<ScreenSize> {
            self.calls.set(self.calls.get() + 1);
            self.size
        }
    }

    fn resolve(args: &[&str], native: ScreenSize) -> (ScreenConfig, Vec<String>) {
        let log = MemoryLog::new();
        let screen = resolve_screen(args, &native, DEFAULT_WINDOW_CAP, &log);
        (screen, log.messages())
    }

    #[test]
    fn test_fullscreen_without_windowed_token() {
        let display = CountingDisplay {
            size: Some(NATIVE),
            calls: Cell::new(0),
        };
        let log = MemoryLog::new();
        let args = ["-w=640", "-h=480", "-window", "--windowed", "-Windowed", "x-windowed"];
        let screen = resolve_screen(&args, &display, DEFAULT_WINDOW_CAP, &log);
        assert_eq!(screen, ScreenConfig::Fullscreen);
        assert!(screen.fullscreen());
        assert_eq!(screen.width(), None);
        assert_eq!(display.calls.get(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_windowed_typo_is_accepted() {
        let (screen, logs) = resolve(&["-windowd"], NATIVE);
        assert_eq!(screen, ScreenConfig::Windowed(ScreenSize::new(800, 600)));
        assert!(logs.is_empty());
    }

    #[test]
    fn test_default_size_clamped_to_native() {
        let (screen, _) = resolve(&["-windowed"], ScreenSize::new(640, 1024));
        assert_eq!(screen.window_size(), Some(ScreenSize::new(640, 600)));
    }

    #[test]
    fn test_explicit_size_applied() {
        let (screen, logs) = resolve(&["-windowed", "-width=1280", "-height=720"], NATIVE);
        assert_eq!(screen.width(), Some(1280));
        assert_eq!(screen.height(), Some(720));
        assert!(logs.is_empty());
    }

    #[test]
    fn test_width_beyond_native_rejected() {
        let (screen, logs) = resolve(&["-windowed", "-w=900"], ScreenSize::new(800, 600));
        assert_eq!(screen.width(), Some(800));
        assert_eq!(
            logs,
            vec!["Width arguments set as 900, but the window's width is only 800."]
        );
    }

    #[test]
    fn test_first_valid_width_wins() {
        let (screen, logs) = resolve(&["-windowed", "-w=300", "-w=400"], NATIVE);
        assert_eq!(screen.width(), Some(300));
        assert_eq!(logs.len(), 1);
        assert_eq!(
            logs[0],
            "Conflicts when more than one parameters for width settings. The original value is 300, the surplus value is 400."
        );
    }

    #[test]
    fn test_rejected_value_does_not_count_as_set() {
        let (screen, logs) = resolve(&["-windowed", "-h=5000", "-h=700"], NATIVE);
        assert_eq!(screen.height(), Some(700));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("Height arguments set as 5000"));
    }

    #[test]
    fn test_non_numeric_height_logged() {
        let (screen, logs) = resolve(&["-windowed", "-h=abc"], ScreenSize::new(1024, 500));
        assert_eq!(screen.height(), Some(500));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("Invalid height value \"\""), "{}", logs[0]);
    }

    #[test]
    fn test_overflowing_width_logged() {
        let (screen, logs) = resolve(&["-windowed", "-w=99999999999"], NATIVE);
        assert_eq!(screen.width(), Some(800));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("99999999999"));
    }

    #[test]
    fn test_trailing_text_after_digits_ignored() {
        let (screen, logs) = resolve(&["-windowed", "-w=640px", "-height=480;"], NATIVE);
        assert_eq!(screen.window_size(), Some(ScreenSize::new(640, 480)));
        assert!(logs.is_empty());
    }

    #[test]
    fn test_flags_must_start_the_argument() {
        let (screen, logs) = resolve(&["-windowed", "x-w=100", "--h=100", "-W=100", "-wide=100"], NATIVE);
        assert_eq!(screen.window_size(), Some(ScreenSize::new(800, 600)));
        assert!(logs.is_empty());
    }

    #[test]
    fn test_unknown_display_falls_back_to_cap() {
        let display = CountingDisplay {
            size: None,
            calls: Cell::new(0),
        };
        let log = MemoryLog::new();
        let screen = resolve_screen(&["-windowed", "-w=1024", "-h=480"], &display, DEFAULT_WINDOW_CAP, &log);
        assert_eq!(display.calls.get(), 1);
        assert_eq!(screen.window_size(), Some(ScreenSize::new(800, 480)));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_zero_is_a_valid_size() {
        let (screen, logs) = resolve(&["-windowed", "-w=0"], NATIVE);
        assert_eq!(screen.width(), Some(0));
        assert!(logs.is_empty());
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(ScreenConfig::Fullscreen.to_string(), "fullscreen");
        assert_eq!(
            ScreenConfig::Windowed(ScreenSize::new(640, 480)).to_string(),
            "windowed 640x480"
        );
    }
}
