use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up logging or handing out loggers.
#[derive(Debug, Error)]
pub enum Error {
    /// The JSON log file could not be opened for appending.
    ///
    /// The output directory is never created here, so a missing directory
    /// surfaces as this error.
    #[error("failed to open log file {}: {source}", path.display())]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A logger was requested from the process-wide facade before
    /// `setup_logging` ran.
    #[error("logging is not set up, call setup_logging before get_logger")]
    NotInitialized,

    #[error("failed to install global tracing dispatcher: {0}")]
    GlobalDefault(#[from] tracing::dispatcher::SetGlobalDefaultError),

    #[error("failed to bridge log records into tracing: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
