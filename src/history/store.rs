use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::OperationRecord;
use crate::utils::history_file_path;

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

/// Append-only operation history for one session
///
/// Records are kept in memory for the life of the store and mirrored to
/// `history.txt` in the data directory. The file is opened, written and
/// closed on every append; nothing is ever read back from it here.
#[derive(Debug)]
pub struct HistoryStore {
    entries: Vec<OperationRecord>,
    path: PathBuf,
}

impl HistoryStore {
    /// Creates the data directory (and parents) and prepares the store
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        let path = history_file_path(data_dir);
        debug!(path = %path.display(), "history store ready");

        Ok(Self { entries: Vec::new(), path })
    }

    /// Records `record` in memory, then appends it to the history file
    ///
    /// The in-memory entry is kept even when the file write fails; the
    /// returned error is for the caller to report.
    pub fn append(&mut self, record: OperationRecord) -> io::Result<()> {
        let line = record.to_string();
        self.entries.push(record);

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(LINE_SEPARATOR.as_bytes())?;
        file.flush()?;

        debug!(line = %line, "appended history record");
        Ok(())
    }

    /// All records of this session, oldest first
    pub fn all(&self) -> &[OperationRecord] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Path of the backing history file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
