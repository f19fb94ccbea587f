//! Operation history: the per-session store and the on-disk log reader
//!
//! # Error Handling Strategy
//!
//! - **Startup**: failing to create the data directory is fatal and surfaces
//!   from [`HistoryStore::open`] as an error.
//! - **Appends**: persistence is best-effort. [`HistoryStore::append`] keeps the
//!   in-memory record and hands any I/O error back to the caller to report.
//! - **Reading back**: [`parse_history_file`] skips malformed lines with a
//!   warning and only fails when more than half the lines (or 100 in a row)
//!   are unreadable.

pub mod reader;
pub mod store;

pub use reader::parse_history_file;
pub use store::HistoryStore;
