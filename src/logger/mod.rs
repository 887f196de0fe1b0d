//! Logger module
//!
//! Provides logging utilities for the Sass bridge including:
//! - Level filtering (debug, info, warn, error)
//! - Compile logging with multiple formats
//! - File-based logging support
//!
//! Until [`init`] is called, messages go to stdout/stderr at `info` level.

mod format;
pub mod writer;

pub use format::{CompileLogEntry, CompileStatus};

use crate::config::LoggingConfig;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Current minimum level, stored as `LogLevel as u8`
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Log severity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            _ => Self::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("Unknown log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    let level = config
        .level
        .parse()
        .map_err(|e: String| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    set_level(level);
    writer::init(config.log_file.as_deref(), config.error_log_file.as_deref())
}

pub fn set_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn level() -> LogLevel {
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

fn enabled(level: LogLevel) -> bool {
    passes(level, self::level())
}

const fn passes(level: LogLevel, minimum: LogLevel) -> bool {
    level as u8 >= minimum as u8
}

/// Whether debug messages are currently written
pub fn debug_enabled() -> bool {
    enabled(LogLevel::Debug)
}

/// Write to info log
fn write_info(message: &str) {
    match writer::get() {
        Some(writer) => writer.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(writer) => writer.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_debug(message: &str) {
    if enabled(LogLevel::Debug) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

pub fn log_info(message: &str) {
    if enabled(LogLevel::Info) {
        write_info(message);
    }
}

/// Warnings share the error target
pub fn log_warning(message: &str) {
    if enabled(LogLevel::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

pub fn log_error(message: &str) {
    if enabled(LogLevel::Error) {
        write_error(&format!("[ERROR] {message}"));
    }
}

pub fn log_startup(config: &crate::config::Config, inputs: usize) {
    log_info("======================================");
    log_info("Sass bridge started");
    log_info(&format!("Interpreter: {}", config.sass.interpreter));
    log_info(&format!("Log level: {}", level()));
    if let Some(workers) = config.runtime.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.log_file {
        log_info(&format!("Log file: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    log_info(&format!("Input files: {inputs}"));
    log_info("======================================");
}

/// Log formatted compile entry; failures go to the error log
pub fn log_compile(entry: &CompileLogEntry, format: &str) {
    let line = entry.format(format);
    match entry.status {
        CompileStatus::Ok => log_info(&line),
        CompileStatus::Failed => {
            if enabled(LogLevel::Error) {
                write_error(&line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!(" INFO ".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::from_u8(LogLevel::Warn as u8), LogLevel::Warn);
    }

    #[test]
    fn test_warn_threshold() {
        assert!(passes(LogLevel::Warn, LogLevel::Debug));
        assert!(passes(LogLevel::Warn, LogLevel::Warn));
        assert!(!passes(LogLevel::Warn, LogLevel::Error));
        assert!(passes(LogLevel::Error, LogLevel::Warn));
        assert!(!passes(LogLevel::Info, LogLevel::Warn));
    }

    #[test]
    fn test_level_display_round_trip() {
        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        }
    }
}
