//! Minimal `log` backend writing to stderr.
//!
//! Good enough for the examples and the app runner; applications embedding
//! this crate are expected to install their own logger instead.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

struct StderrLogger {
    started: Instant,
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let t = self.started.elapsed().as_secs_f64();
        let tag = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        eprintln!("[{t:9.3}s {tag} {}] {}", record.target(), record.args());
    }

    fn flush(&self) {}
}

/// Parse a level name (`off`, `error`, ..., `trace`), defaulting to `info`.
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|s| LevelFilter::from_str(s).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger at `level`.
///
/// Calling this more than once only updates the level.
pub fn init_with_level(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| StderrLogger {
        started: Instant::now(),
    });
    log::set_max_level(level);
    if log::set_logger(logger).is_err() {
        log::debug!("a logger is already installed; only the level was updated");
    }
}
