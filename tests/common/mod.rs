//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use badcalc::{HistoryStore, Session};
use tempfile::TempDir;

/// Builder for a temporary home directory containing `.badcalc/`
pub struct DataDirBuilder {
    temp_home: TempDir,
}

impl DataDirBuilder {
    /// Create a new builder with an empty home directory (no `.badcalc` yet)
    pub fn new() -> Self {
        let temp_home = TempDir::new().expect("Failed to create temp dir");
        Self { temp_home }
    }

    /// Get the path to the fake home directory
    pub fn home(&self) -> &Path {
        self.temp_home.path()
    }

    /// Get the path to the `.badcalc` data directory
    pub fn data_dir(&self) -> PathBuf {
        self.temp_home.path().join(".badcalc")
    }

    /// Get the path to the history file
    pub fn history_path(&self) -> PathBuf {
        self.data_dir().join("history.txt")
    }

    /// Add a history.txt file with the given content
    pub fn with_history(self, content: &str) -> Self {
        fs::create_dir_all(self.data_dir()).expect("Failed to create data dir");
        let mut file =
            fs::File::create(self.history_path()).expect("Failed to create history.txt");
        file.write_all(content.as_bytes()).expect("Failed to write history.txt");
        self
    }

    /// Add history records given as `a|b|op|result` lines
    pub fn with_records(self, lines: &[&str]) -> Self {
        let content: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        self.with_history(&content)
    }

    /// Read the history file back, one entry per line
    pub fn history_lines(&self) -> Vec<String> {
        match fs::read_to_string(self.history_path()) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of a scripted session
pub struct SessionRun {
    pub stdout: String,
    pub stderr: String,
    pub records: Vec<String>,
}

/// Runs an in-process session against `data_dir` with the given input lines
pub fn run_scripted(data_dir: &Path, lines: &[&str]) -> SessionRun {
    let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
    let store = HistoryStore::open(data_dir).expect("Failed to open history store");
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let mut session = Session::new(store, Cursor::new(input), &mut stdout, &mut stderr);
    session.run().expect("Session I/O failed");
    let records = session.history().all().iter().map(ToString::to_string).collect();
    drop(session);

    SessionRun {
        stdout: String::from_utf8(stdout).expect("stdout is UTF-8"),
        stderr: String::from_utf8(stderr).expect("stderr is UTF-8"),
        records,
    }
}

/// Command for the binary with HOME pointed at `home` and no data-dir override
pub fn calc_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_badcalc"));
    cmd.env("HOME", home).env_remove("BADCALC_DATA_DIR").env_remove("RUST_LOG");
    cmd
}
