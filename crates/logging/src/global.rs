//! Process-wide `setup_logging` / `get_logger` pair for code that cannot
//! thread a [`LoggingContext`] through.

use crate::context::LoggingContext;
use crate::error::{Error, Result};
use crate::level::Level;
use crate::logger::Logger;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

static CONTEXT: RwLock<Option<LoggingContext>> = RwLock::new(None);

/// Sets up console and `<output_dir>/log.json` logging at `level` and makes
/// it the context [`get_logger`] hands loggers out from.
///
/// Calling it again replaces that context. Loggers obtained before keep
/// writing to the file opened by the earlier call.
///
/// Only [`Logger`]s go through the returned context. It is not installed as
/// the process-wide `tracing` dispatcher and `log` records are not bridged,
/// so plain `tracing::info!` or `log::warn!` calls elsewhere are not written
/// anywhere. Call [`LoggingContext::install_global`] on the returned context
/// for that.
pub fn setup_logging(level: Level, output_dir: impl AsRef<Path>) -> Result<LoggingContext> {
    let context = LoggingContext::setup(level, output_dir)?;
    *CONTEXT.write().unwrap_or_else(PoisonError::into_inner) = Some(context.clone());
    Ok(context)
}

/// Returns a logger from the context of the last [`setup_logging`] call.
pub fn get_logger(name: &str) -> Result<Logger> {
    CONTEXT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|context| context.get_logger(name))
        .ok_or(Error::NotInitialized)
}
