//! badcalc - an interactive two-operand calculator with a persistent history
//!
//! The calculator reads a menu choice and two operands, applies one of
//! `+ - * / ^ %`, prints the result and records the operation. Records are
//! kept in memory for the session and appended to `~/.badcalc/history.txt`.
//!
//! - [`calculator`] - operand parsing and arithmetic, with a `NaN` sentinel for
//!   undefined results
//! - [`history`] - the append-only store and the on-disk log reader
//! - [`session`] - the interactive menu loop over injectable I/O
//!
//! # Example
//!
//! ```no_run
//! use std::io::Cursor;
//! use std::path::Path;
//! use badcalc::{HistoryStore, Session};
//!
//! let store = HistoryStore::open(Path::new("/tmp/badcalc"))?;
//! let input = Cursor::new("1\n5\n3\n0\n");
//! let mut session = Session::new(store, input, std::io::stdout(), std::io::stderr());
//! session.run()?;
//! assert_eq!(session.history().all()[0].to_string(), "5|3|+|8.0");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod calculator;
pub mod cli;
pub mod error;
pub mod history;
pub mod models;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use calculator::{Operator, compute, is_undefined, parse_operand};
pub use error::InvalidInput;
pub use history::{HistoryStore, parse_history_file};
pub use models::OperationRecord;
pub use session::Session;
pub use utils::paths::format_path_with_tilde;
