use crate::attach::Attachments;
use crate::error::{Error, Result};
use crate::record::Record;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Appends one JSON object per record to the shared log file.
///
/// Only records whose logger (or an ancestor) has the sink attached are
/// written.
pub(crate) struct JsonFileSink {
    path: PathBuf,
    file: Mutex<File>,
    attachments: Arc<Attachments>,
}

impl JsonFileSink {
    /// Opens `path` for appending. The parent directory must already exist.
    pub fn open(path: &Path, attachments: Arc<Attachments>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::OpenLogFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(JsonFileSink {
            path: path.to_path_buf(),
            file: Mutex::new(file),
            attachments,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, asctime: &str, record: &Record) -> io::Result<()> {
        let copies = self.attachments.copies_for(&record.name);
        if copies == 0 {
            return Ok(());
        }

        let line = record.to_json_line(asctime)?;
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        for _ in 0..copies {
            file.write_all(&line)?;
        }
        file.flush()
    }
}
