//! Data models for calculator history.
//!
//! - [`OperationRecord`] - One successfully computed operation, as stored in the
//!   history file (`a|b|op|result`)
//! - [`format_result`] - Text rendering shared by the result display and the
//!   history line

pub mod record;

pub use record::{FIELD_DELIMITER, OperationRecord, format_result};
