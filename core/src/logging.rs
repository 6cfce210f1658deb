//! Console log sink for the CLI.
//!
//! Library code logs through the `log` facade; the binary installs this
//! logger so records show up on stderr with the same prefixes as the
//! command output.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Target used for success lines (`log::info!(target: SUCCESS, ...)`).
pub const SUCCESS: &str = "success";

/// Writes log records to stderr.
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

/// Prefix for a record, indented under the command banner.
pub fn prefix(level: Level, target: &str) -> &'static str {
    match level {
        Level::Error => "   ❌",
        Level::Warn => "   ⚠️",
        Level::Info if target == SUCCESS => "   ✓",
        Level::Info => "   ",
        Level::Debug | Level::Trace => "   ·",
    }
}

/// Render one line.
pub fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("{} {}", prefix(level, target), message)
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "{}",
            format_line(record.level(), record.target(), &record.args().to_string())
        );
    }

    fn flush(&self) {}
}

/// Install the console logger. `verbose` enables debug output.
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if log::set_boxed_logger(Box::new(ConsoleLogger::new(level))).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(format_line(Level::Error, "flowmint", "boom"), "   ❌ boom");
        assert_eq!(format_line(Level::Info, SUCCESS, "done"), "   ✓ done");
        assert_eq!(format_line(Level::Info, "flowmint::reads", "x"), "    x");
    }

    #[test]
    fn test_level_filter() {
        let logger = ConsoleLogger::new(LevelFilter::Info);
        let debug = Metadata::builder().level(Level::Debug).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));
    }
}
