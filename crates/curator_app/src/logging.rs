//! Logging setup for the operator console.
//!
//! Engine and loader diagnostics go to `./curator.log` by default so they do
//! not interleave with the console's own prompt output; `--log terminal`
//! trades that separation for immediacy, and `--verbose` raises the level to
//! debug (page-by-page fetch tracing).

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./curator.log";

/// Where diagnostics end up, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    File,
    Terminal,
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

pub struct LogSettings {
    pub destination: LogDestination,
    pub verbose: bool,
}

/// Initialize the global logger from the parsed CLI settings. Failure to
/// open the log file degrades to whatever sinks remain rather than aborting
/// the session.
pub fn initialize(settings: LogSettings) {
    let level = if settings.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut sinks: Vec<Box<dyn SharedLogger>> = Vec::new();
    if settings.destination.to_terminal() {
        sinks.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if settings.destination.to_file() {
        match File::create(Path::new(LOG_FILE)) {
            Ok(file) => sinks.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: could not create {LOG_FILE}: {err}"),
        }
    }

    if sinks.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(sinks);
}
