use crate::level::{Level, tracing_name, tracing_value};
use chrono::Local;
use serde::Serialize;
use std::fmt;
use tracing::Event;
use tracing::field::{Field, Visit};
use tracing_log::NormalizeEvent;

/// `strftime` pattern shared by the console and the JSON file: time of day, no date.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Field carrying the logger name on events emitted by a [`crate::Logger`].
pub(crate) const LOGGER_FIELD: &str = "logger";
/// Field carrying the level name on events emitted by a [`crate::Logger`].
pub(crate) const LEVEL_FIELD: &str = "levelname";

/// One log record as seen by the sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    pub name: String,
    pub level: String,
    pub message: String,
}

/// Line format of the JSON file. Field order is part of the format.
#[derive(Debug, Serialize)]
pub struct JsonRecord<'a> {
    pub asctime: &'a str,
    pub levelname: &'a str,
    pub name: &'a str,
    pub message: &'a str,
}

impl Record {
    /// Extracts a record from a `tracing` event.
    ///
    /// Events emitted by a `Logger` carry their name and level as fields.
    /// Anything else falls back to the event target and its `tracing` level,
    /// with `log` crate records normalized to their original target.
    pub fn from_event(event: &Event<'_>) -> Self {
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let normalized = event.normalized_metadata();
        let meta = normalized.as_ref().unwrap_or_else(|| event.metadata());

        Record {
            name: visitor
                .logger
                .unwrap_or_else(|| meta.target().to_string()),
            level: visitor
                .levelname
                .unwrap_or_else(|| tracing_name(meta.level()).to_string()),
            message: visitor.message,
        }
    }

    /// `<asctime> <LEVEL> <name> - <message>` with a trailing newline.
    pub fn to_console_line(&self, asctime: &str) -> String {
        format!(
            "{} {} {} - {}\n",
            asctime, self.level, self.name, self.message
        )
    }

    pub fn to_json_line(&self, asctime: &str) -> serde_json::Result<Vec<u8>> {
        let mut line = serde_json::to_vec(&JsonRecord {
            asctime,
            levelname: &self.level,
            name: &self.name,
            message: &self.message,
        })?;
        line.push(b'\n');
        Ok(line)
    }
}

/// Current local time rendered with [`TIME_FORMAT`].
pub(crate) fn asctime() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}

/// Severity of an event on the 10..50 scale.
///
/// A `levelname` field wins over the `tracing` level, which cannot tell
/// `CRITICAL` from `ERROR`.
pub(crate) fn event_severity(event: &Event<'_>) -> u8 {
    let mut visitor = LevelVisitor(None);
    event.record(&mut visitor);
    visitor
        .0
        .map(Level::value)
        .unwrap_or_else(|| tracing_value(event.metadata().level()))
}

struct LevelVisitor(Option<Level>);

impl Visit for LevelVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == LEVEL_FIELD {
            self.0 = value.parse().ok();
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

#[derive(Default)]
struct RecordVisitor {
    logger: Option<String>,
    levelname: Option<String>,
    message: String,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            LOGGER_FIELD => self.logger = Some(value.to_string()),
            LEVEL_FIELD => self.levelname = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            LOGGER_FIELD => self.logger = Some(format!("{value:?}")),
            LEVEL_FIELD => self.levelname = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> Record {
        Record {
            name: "svc".to_string(),
            level: "WARNING".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn json_line_keeps_field_order() {
        let line = record("disk full").to_json_line("12:34:56").unwrap();
        assert_eq!(
            String::from_utf8(line).unwrap(),
            "{\"asctime\":\"12:34:56\",\"levelname\":\"WARNING\",\"name\":\"svc\",\"message\":\"disk full\"}\n"
        );
    }

    #[test]
    fn console_line_uses_the_given_time() {
        assert_eq!(
            record("disk full").to_console_line("12:34:56"),
            "12:34:56 WARNING svc - disk full\n"
        );
    }

    #[test]
    fn json_line_escapes_message() {
        let line = record("quote \" and\nnewline").to_json_line("00:00:00").unwrap();
        assert_eq!(line.iter().filter(|b| **b == b'\n').count(), 1);

        let decoded: serde_json::Value = serde_json::from_slice(&line).unwrap();
        assert_eq!(decoded["message"], "quote \" and\nnewline");
        assert_eq!(decoded["name"], "svc");
    }

    #[test]
    fn asctime_has_no_date() {
        let now = asctime();
        let parts: Vec<&str> = now.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 2 && p.parse::<u8>().is_ok()));
    }
}
