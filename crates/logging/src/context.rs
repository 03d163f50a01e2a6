use crate::attach::{AttachPolicy, Attachments};
use crate::console::ConsoleSink;
use crate::error::Result;
use crate::filter::Threshold;
use crate::json_file::JsonFileSink;
use crate::level::Level;
use crate::logger::Logger;
use crate::sink::Sinks;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Dispatch;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Name of the JSON log file inside the output directory.
pub const LOG_FILE: &str = "log.json";

/// Target of every event emitted through a [`Logger`].
pub(crate) const LOGGER_TARGET: &str = "logging::logger";

/// The shared sinks of a process: the console stream, the JSON log file and
/// the table of logger names the file is attached to.
///
/// Cloning is cheap; every clone and every [`Logger`] handed out refers to
/// the same file handle.
#[derive(Clone)]
pub struct LoggingContext {
    inner: Arc<Inner>,
}

struct Inner {
    level: Level,
    log_path: PathBuf,
    attachments: Arc<Attachments>,
    dispatch: Dispatch,
}

/// Configures a [`LoggingContext`].
pub struct LoggingBuilder {
    output_dir: PathBuf,
    file_name: String,
    level: Level,
    policy: AttachPolicy,
    console: Option<BoxMakeWriter>,
}

impl LoggingBuilder {
    fn new(output_dir: PathBuf) -> Self {
        LoggingBuilder {
            output_dir,
            file_name: LOG_FILE.to_string(),
            level: Level::Info,
            policy: AttachPolicy::default(),
            console: Some(BoxMakeWriter::new(std::io::stderr)),
        }
    }

    /// Severity threshold for both sinks.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Name of the JSON file inside the output directory, `log.json` by default.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// How repeated `get_logger` calls for one name attach the file sink.
    pub fn attach_policy(mut self, policy: AttachPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sends console lines to `writer` instead of stderr.
    pub fn console_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.console = Some(BoxMakeWriter::new(writer));
        self
    }

    /// Writes records to the JSON file only.
    pub fn without_console(mut self) -> Self {
        self.console = None;
        self
    }

    /// Opens the JSON log file and assembles the sinks.
    ///
    /// Fails with [`crate::Error::OpenLogFile`] when the output directory is
    /// missing or not writable.
    pub fn build(self) -> Result<LoggingContext> {
        let log_path = self.output_dir.join(&self.file_name);
        let attachments = Arc::new(Attachments::new(self.policy));
        let file = JsonFileSink::open(&log_path, attachments.clone())?;
        let console = self.console.map(ConsoleSink::new);

        let subscriber = tracing_subscriber::registry()
            .with(Threshold::new(self.level))
            .with(Sinks::new(console, file));

        Ok(LoggingContext {
            inner: Arc::new(Inner {
                level: self.level,
                log_path,
                attachments,
                dispatch: Dispatch::new(subscriber),
            }),
        })
    }
}

impl LoggingContext {
    /// Starts configuring a context writing into `output_dir`, which must
    /// already exist when [`LoggingBuilder::build`] runs.
    pub fn builder(output_dir: impl Into<PathBuf>) -> LoggingBuilder {
        LoggingBuilder::new(output_dir.into())
    }

    /// Console on stderr and `<output_dir>/log.json`, both at `level`.
    pub fn setup(level: Level, output_dir: impl AsRef<Path>) -> Result<Self> {
        Self::builder(output_dir.as_ref()).level(level).build()
    }

    /// Returns a logger named `name` with the JSON file sink attached to it.
    pub fn get_logger(&self, name: &str) -> Logger {
        self.inner.attachments.attach(name);
        Logger::new(name, self.clone())
    }

    /// Severity threshold shared by both sinks.
    pub fn level(&self) -> Level {
        self.inner.level
    }

    /// Full path of the JSON log file.
    pub fn log_path(&self) -> &Path {
        &self.inner.log_path
    }

    pub(crate) fn dispatch(&self) -> &Dispatch {
        &self.inner.dispatch
    }

    /// Routes `tracing` events and `log` records from the whole process
    /// through these sinks.
    ///
    /// `log` records are bridged with [`LogTracer`] and limited to the
    /// threshold. They reach the JSON file once the root logger `""` (or an
    /// ancestor of their target) is attached.
    ///
    /// Can succeed only once per process; later calls fail with
    /// [`crate::Error::LogBridge`].
    pub fn install_global(&self) -> Result<()> {
        LogTracer::init_with_filter(self.inner.level.as_log_filter())?;
        tracing::dispatcher::set_global_default(self.inner.dispatch.clone())?;
        Ok(())
    }
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("level", &self.inner.level)
            .field("log_path", &self.inner.log_path)
            .field("attachments", &self.inner.attachments)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Console(Arc<Mutex<Vec<u8>>>);

    impl Write for Console {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Console {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn context(dir: &Path, level: Level) -> (LoggingContext, Console) {
        let console = Console::default();
        let writer = console.clone();
        let context = LoggingContext::builder(dir)
            .level(level)
            .console_writer(move || writer.clone())
            .build()
            .unwrap();
        (context, console)
    }

    fn file_text(context: &LoggingContext) -> String {
        std::fs::read_to_string(context.log_path()).unwrap()
    }

    #[test]
    fn tracing_events_are_console_only_until_root_is_attached() {
        let dir = tempfile::tempdir().unwrap();
        let (context, console) = context(dir.path(), Level::Info);

        tracing::dispatcher::with_default(context.dispatch(), || {
            tracing::warn!("plain tracing event");
        });
        assert!(console.text().contains("WARNING logging::context::tests - plain tracing event"));
        assert!(file_text(&context).is_empty());

        context.get_logger("");
        tracing::dispatcher::with_default(context.dispatch(), || {
            tracing::warn!("now in the file");
        });
        let line: serde_json::Value = serde_json::from_str(file_text(&context).trim()).unwrap();
        assert_eq!(line["name"], "logging::context::tests");
        assert_eq!(line["levelname"], "WARNING");
        assert_eq!(line["message"], "now in the file");
    }

    #[test]
    fn tracing_events_below_threshold_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let (context, console) = context(dir.path(), Level::Warning);
        context.get_logger("");

        tracing::dispatcher::with_default(context.dispatch(), || {
            tracing::trace!("trace");
            tracing::debug!("debug");
            tracing::info!("info");
            tracing::error!("error");
        });

        let text = console.text();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("ERROR logging::context::tests - error"));
        assert_eq!(file_text(&context).lines().count(), 1);
    }

    #[test]
    fn critical_threshold_drops_error_events_whatever_their_target() {
        let dir = tempfile::tempdir().unwrap();
        let (context, console) = context(dir.path(), Level::Critical);
        let log = context.get_logger("");

        tracing::dispatcher::with_default(context.dispatch(), || {
            tracing::error!(target: "logging::logger", "posing as a logger");
            tracing::error!("plain error");
        });
        log.error("logger error");
        log.critical("logger critical");

        let text = console.text();
        assert_eq!(text.lines().count(), 1, "{text}");
        assert!(text.contains("CRITICAL  - logger critical"));
        assert_eq!(file_text(&context).lines().count(), 1);
    }

    #[test]
    fn debug_output_names_level_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let (context, _) = context(dir.path(), Level::Error);
        let rendered = format!("{context:?}");
        assert!(rendered.contains("Error"));
        assert!(rendered.contains("log.json"));
    }
}
