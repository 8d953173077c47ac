// Diagnostic sink shared by the launch resolvers
// Every line is prefixed with the local ISO-8601 timestamp of the moment it was written

use chrono::Local;
use std::cell::RefCell;
use std::io::{self, Write};

/// Timestamp layout written in front of every diagnostic line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Write-only destination for resolver diagnostics
/// Implementations must never fail the caller; logging is best-effort
pub trait LogSink {
    fn log(&self, message: &str);
}

/// Builds the `<timestamp> <message>` line without the trailing newline
pub fn timestamped(message: &str) -> String {
    format!("{} {}", Local::now().format(TIMESTAMP_FORMAT), message)
}

/// Sink that appends timestamped lines to any writer (stdout, a log file, ...)
pub struct TimestampLog<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> TimestampLog<W> {
    pub fn new(out: W) -> Self {
        TimestampLog {
            out: RefCell::new(out),
        }
    }

    /// Consume the sink and hand back the underlying writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl TimestampLog<io::Stdout> {
    pub fn stdout() -> Self {
        TimestampLog::new(io::stdout())
    }
}

impl<W: Write> LogSink for TimestampLog<W> {
    fn log(&self, message: &str) {
        // A re-entrant write from the same thread would be dropped rather than panic
        if let Ok(mut out) = self.out.try_borrow_mut() {
            let _ = writeln!(out, "{}", timestamped(message));
            let _ = out.flush();
        }
    }
}

/// In-memory sink, keeps raw messages (no timestamp) in arrival order
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: RefCell<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl LogSink for MemoryLog {
    fn log(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}
