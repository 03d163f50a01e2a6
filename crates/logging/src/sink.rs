use crate::console::ConsoleSink;
use crate::json_file::JsonFileSink;
use crate::record::{Record, asctime};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Fans each record out to the console and the JSON file.
///
/// The record is stamped once, so both sinks carry the same time.
pub(crate) struct Sinks {
    console: Option<ConsoleSink>,
    file: JsonFileSink,
}

impl Sinks {
    pub fn new(console: Option<ConsoleSink>, file: JsonFileSink) -> Self {
        Sinks { console, file }
    }
}

impl<S: Subscriber> Layer<S> for Sinks {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let record = Record::from_event(event);
        let asctime = asctime();

        if let Some(console) = &self.console {
            if let Err(e) = console.write(event.metadata(), &asctime, &record) {
                eprintln!("failed to write log record to console: {}", e);
            }
        }
        // Records are best-effort once the file is open.
        if let Err(e) = self.file.write(&asctime, &record) {
            eprintln!(
                "failed to write log record to {}: {}",
                self.file.path().display(),
                e
            );
        }
    }
}
