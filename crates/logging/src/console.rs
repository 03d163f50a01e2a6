use crate::record::Record;
use std::io::{self, Write};
use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Human-readable sink, stderr unless the builder says otherwise.
pub(crate) struct ConsoleSink {
    writer: BoxMakeWriter,
}

impl ConsoleSink {
    pub fn new(writer: BoxMakeWriter) -> Self {
        ConsoleSink { writer }
    }

    /// Writes the record as a single `write_all` so concurrent lines never interleave.
    pub fn write(&self, meta: &Metadata<'_>, asctime: &str, record: &Record) -> io::Result<()> {
        let line = record.to_console_line(asctime);
        let mut writer = self.writer.make_writer_for(meta);
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}
