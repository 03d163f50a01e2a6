use crate::context::{LOGGER_TARGET, LoggingContext};
use crate::level::Level;
use std::fmt;
use std::sync::Arc;

/// A named handle writing to the console and to the JSON log file of the
/// [`LoggingContext`] it came from.
///
/// Loggers are only handed out by a context, so a logger without sinks
/// cannot exist. A logger keeps its context alive: after a new context is
/// set up, existing loggers continue to write to the old file.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    context: LoggingContext,
}

macro_rules! emit {
    ($level:expr, $name:ident, $levelname:ident, $message:ident) => {
        tracing::event!(
            target: LOGGER_TARGET,
            $level,
            logger = $name,
            levelname = $levelname,
            "{}",
            $message
        )
    };
}

impl Logger {
    pub(crate) fn new(name: &str, context: LoggingContext) -> Self {
        Logger {
            name: Arc::from(name),
            context,
        }
    }

    /// Name the logger was requested under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a record at `level` passes the context threshold.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.context.level()
    }

    /// Emits `message` at `level`. Records below the context threshold are dropped.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.is_enabled_for(level) {
            return;
        }

        let name: &str = &self.name;
        let levelname = level.name();
        tracing::dispatcher::with_default(self.context.dispatch(), || match level {
            Level::Debug => emit!(tracing::Level::DEBUG, name, levelname, message),
            Level::Info => emit!(tracing::Level::INFO, name, levelname, message),
            Level::Warning => emit!(tracing::Level::WARN, name, levelname, message),
            Level::Error | Level::Critical => {
                emit!(tracing::Level::ERROR, name, levelname, message)
            }
        });
    }

    /// Emits `message` at `DEBUG`.
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    /// Emits `message` at `INFO`.
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    /// Emits `message` at `WARNING`.
    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    /// Emits `message` at `ERROR`.
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    /// Emits `message` at `CRITICAL`.
    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.context.level())
            .finish()
    }
}
