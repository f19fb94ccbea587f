use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::models::OperationRecord;
use crate::utils::validate_file_size;

/// A run this long of unreadable records means the file is not a history file
const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Share of unreadable records above which read-back gives up
const MAX_FAILURE_RATIO: f64 = 0.5;

/// Running count of good and bad record lines
#[derive(Debug, Default)]
struct ReadTally {
    records: usize,
    skipped: usize,
    bad_run: usize,
}

impl ReadTally {
    fn accept(&mut self) {
        self.records += 1;
        self.bad_run = 0;
    }

    fn reject(&mut self) -> Result<()> {
        self.skipped += 1;
        self.bad_run += 1;
        if self.bad_run >= MAX_CONSECUTIVE_ERRORS {
            bail!(
                "Too many consecutive parse errors ({}) in history file - file may be corrupted",
                self.bad_run
            );
        }
        Ok(())
    }

    fn check_ratio(&self) -> Result<()> {
        let total = self.records + self.skipped;
        if total == 0 {
            return Ok(());
        }
        let ratio = self.skipped as f64 / total as f64;
        if ratio > MAX_FAILURE_RATIO {
            bail!(
                "Too many parse failures in history file: {} of {} lines failed ({:.1}%)",
                self.skipped,
                total,
                ratio * 100.0
            );
        }
        Ok(())
    }
}

/// Reads `history.txt` back into records, in file order
///
/// Blank lines are ignored. Lines that are not `a|b|op|result` records,
/// including lines that are not valid UTF-8, are skipped with a warning.
///
/// # Errors
///
/// Fails if the file cannot be opened or exceeds the size limit, if more
/// than half of its record lines are unreadable, or if 100 unreadable lines
/// occur in a row.
pub fn parse_history_file(path: &Path) -> Result<Vec<OperationRecord>> {
    // Size is checked on the open handle, not a separate stat
    let file = File::open(path)
        .with_context(|| format!("Failed to open history file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut reader = BufReader::new(file);
    let mut records = Vec::new();
    let mut tally = ReadTally::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read line from history file")?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let parsed = match std::str::from_utf8(&buf) {
            Ok(text) => {
                let text = text.trim_end_matches(['\n', '\r']);
                if text.trim().is_empty() {
                    continue;
                }
                text.parse::<OperationRecord>()
            }
            Err(e) => Err(anyhow::Error::new(e).context("line is not valid UTF-8")),
        };

        match parsed {
            Ok(record) => {
                tally.accept();
                records.push(record);
            }
            Err(e) => {
                warn!(line = line_no, error = %format!("{e:#}"), "skipping malformed history line");
                tally.reject()?;
            }
        }
    }

    tally.check_ratio()?;
    debug!(records = tally.records, skipped = tally.skipped, path = %path.display(), "history read back");

    Ok(records)
}
