// Entry point for the launcher
// Loads settings, resolves language and window geometry from the arguments, and reports them

use env_logger::Env;
use std::env;
use std::error::Error;

use xtlaunch::xtl_log::{LogSink, TimestampLog};
use xtlaunch::{LaunchConfig, TerminalDisplay, load_or_create_settings};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // Load or create launcher settings (language directory, log destination, window cap)
    let settings = load_or_create_settings();

    // Diagnostics fall back to stdout if the configured log file is unusable
    let sink: Box<dyn LogSink> = match settings.open_log_sink() {
        Ok(sink) => sink,
        Err(e) => {
            log::warn!("{e}, logging to stdout");
            Box::new(TimestampLog::stdout())
        }
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let launch = LaunchConfig::resolve(&args, &settings, &TerminalDisplay, sink.as_ref());

    println!("{launch}");
    Ok(())
}
