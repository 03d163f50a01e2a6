use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Severity of a log record.
///
/// Levels are ordered from least to most severe and carry the numeric
/// values used by the threshold check (`DEBUG` = 10 up to `CRITICAL` = 50).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

/// Returned when a string names no known level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level `{0}`, expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL")]
pub struct ParseLevelError(String);

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Upper-case name written into console lines and JSON records.
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Numeric severity compared against the threshold: 10, 20, 30, 40, 50.
    pub fn value(self) -> u8 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// The `tracing` level a record of this severity is emitted at.
    ///
    /// `tracing` has no level above `ERROR`, so `CRITICAL` shares it.
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warning => tracing::Level::WARN,
            Level::Error | Level::Critical => tracing::Level::ERROR,
        }
    }

    /// Most verbose `tracing` level let through at this threshold.
    pub fn as_level_filter(self) -> LevelFilter {
        LevelFilter::from_level(self.as_tracing())
    }

    /// Filter handed to the `log` bridge at this threshold.
    pub fn as_log_filter(self) -> tracing_log::log::LevelFilter {
        use tracing_log::log::LevelFilter as LogFilter;
        match self {
            Level::Debug => LogFilter::Debug,
            Level::Info => LogFilter::Info,
            Level::Warning => LogFilter::Warn,
            Level::Error | Level::Critical => LogFilter::Error,
        }
    }
}

/// Numeric severity of a `tracing` level on the same scale as [`Level::value`].
pub(crate) fn tracing_value(level: &tracing::Level) -> u8 {
    match *level {
        tracing::Level::TRACE => 5,
        tracing::Level::DEBUG => 10,
        tracing::Level::INFO => 20,
        tracing::Level::WARN => 30,
        tracing::Level::ERROR => 40,
    }
}

/// Level name used for events that did not come through a [`crate::Logger`].
pub(crate) fn tracing_name(level: &tracing::Level) -> &'static str {
    match *level {
        tracing::Level::TRACE => "TRACE",
        tracing::Level::DEBUG => "DEBUG",
        tracing::Level::INFO => "INFO",
        tracing::Level::WARN => "WARNING",
        tracing::Level::ERROR => "ERROR",
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let level = match trimmed.to_ascii_uppercase().as_str() {
            "DEBUG" | "10" => Level::Debug,
            "INFO" | "20" => Level::Info,
            "WARNING" | "WARN" | "30" => Level::Warning,
            "ERROR" | "40" => Level::Error,
            "CRITICAL" | "FATAL" | "50" => Level::Critical,
            _ => return Err(ParseLevelError(trimmed.to_string())),
        };
        Ok(level)
    }
}
