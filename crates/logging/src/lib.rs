//! Console and JSON file logging for the CLI.
//!
//! A [`LoggingContext`] owns the sinks: a console stream rendering
//! `HH:MM:SS LEVEL name - message` and an append-only `log.json` holding
//! one JSON object per record. Named [`Logger`]s are handed out by the
//! context and write through both.
//!
//! ```no_run
//! use logging::{Level, LoggingContext};
//!
//! let context = LoggingContext::setup(Level::Info, "build")?;
//! let log = context.get_logger("svc");
//! log.warning("disk full");
//! # Ok::<(), logging::Error>(())
//! ```

mod attach;
mod console;
mod context;
mod error;
mod filter;
mod global;
mod json_file;
mod level;
mod logger;
mod record;
mod sink;

pub use attach::AttachPolicy;
pub use context::{LOG_FILE, LoggingBuilder, LoggingContext};
pub use error::{Error, Result};
pub use global::{get_logger, setup_logging};
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use record::{JsonRecord, TIME_FORMAT};
