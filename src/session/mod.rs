//! Interactive read-evaluate-display loop.
//!
//! The loop is a small state machine:
//!
//! ```text
//! Menu ──"0"/EOF──▶ Done
//!  │  ◀──"7" (show history)
//!  └─other──▶ AwaitOperandA ──▶ AwaitOperandB ──▶ (compute, record) ──▶ Menu
//! ```
//!
//! Every failure inside one operation (oversized line, bad number, undefined
//! result, history write error) is reported inline and the loop goes back to
//! the menu. A read error at the menu prompt is reported and ends the session
//! like end of input. Only write errors on the session's own output make
//! [`Session::run`] fail.
//!
//! Input and output are injected so the loop runs the same against a terminal
//! or an in-memory buffer.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::calculator::{MAX_NUMERIC_LENGTH, Operator, compute, is_undefined};
use crate::error::InvalidInput;
use crate::history::HistoryStore;
use crate::models::{OperationRecord, format_result};
use crate::utils::strip_control_chars;

pub const MENU_TITLE: &str = "CALCULADORA";
pub const MENU_OPTIONS: &str = "1:+ 2:- 3:* 4:/ 5:^ 6:% 7:hist 0:exit";
pub const MENU_PROMPT: &str = "opt: ";
pub const EMPTY_HISTORY: &str = "[Empty history]";

const EXIT_CODE: &str = "0";
const HISTORY_CODE: &str = "7";

/// Maximum length of a raw operand line, checked before parsing
pub const MAX_LINE_LENGTH: usize = MAX_NUMERIC_LENGTH;

#[derive(Debug, PartialEq)]
enum State {
    Menu,
    AwaitOperandA { code: String },
    AwaitOperandB { code: String, operand_a: String },
    Done,
}

/// Failure of a single operation; reported, never fatal to the loop
#[derive(Debug, Error)]
enum OperationError {
    #[error("Invalid input: {0}")]
    Invalid(#[from] InvalidInput),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] io::Error),
}

/// One interactive calculator session
pub struct Session<R, W, E> {
    history: HistoryStore,
    input: R,
    output: W,
    errors: E,
}

impl<R: BufRead, W: Write, E: Write> Session<R, W, E> {
    pub fn new(history: HistoryStore, input: R, output: W, errors: E) -> Self {
        Self { history, input, output, errors }
    }

    /// Runs until the exit option is chosen or input is exhausted
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = State::Menu;
        while state != State::Done {
            state = self.step(state)?;
        }
        debug!(records = self.history.len(), "session finished");
        Ok(())
    }

    /// History recorded during this session
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    fn step(&mut self, state: State) -> io::Result<State> {
        let next = match state {
            State::Menu => {
                self.display_menu()?;
                match self.read_line() {
                    Ok(None) => State::Done,
                    // An unreadable menu line is reported and treated as end of input
                    Err(e) => {
                        self.report(&OperationError::from(e))?;
                        State::Done
                    }
                    Ok(Some(choice)) if choice == EXIT_CODE => State::Done,
                    Ok(Some(choice)) if choice == HISTORY_CODE => {
                        self.display_history()?;
                        State::Menu
                    }
                    Ok(Some(code)) => State::AwaitOperandA { code },
                }
            }
            State::AwaitOperandA { code } => match self.read_operand("a: ") {
                Ok(operand_a) => State::AwaitOperandB { code, operand_a },
                Err(e) => {
                    self.report(&e)?;
                    State::Menu
                }
            },
            State::AwaitOperandB { code, operand_a } => {
                match self.read_operand("b: ") {
                    Ok(operand_b) => self.evaluate(&code, &operand_a, &operand_b)?,
                    Err(e) => self.report(&e)?,
                }
                State::Menu
            }
            State::Done => State::Done,
        };
        Ok(next)
    }

    fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", MENU_TITLE)?;
        writeln!(self.output, "{}", MENU_OPTIONS)?;
        write!(self.output, "{}", MENU_PROMPT)?;
        self.output.flush()
    }

    fn display_history(&mut self) -> io::Result<()> {
        if self.history.is_empty() {
            return writeln!(self.output, "{}", EMPTY_HISTORY);
        }
        for record in self.history.all() {
            writeln!(self.output, "{}", record)?;
        }
        Ok(())
    }

    /// Reads one line without its terminator; `None` at end of input
    ///
    /// Bytes that are not valid UTF-8 decode as U+FFFD, so a garbled line is
    /// just another line and the following input stays in step.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Prompts for an operand and returns its sanitized text
    ///
    /// End of input reads as an empty operand, which parsing later rejects.
    fn read_operand(&mut self, prompt: &str) -> Result<String, OperationError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let line = self.read_line()?.unwrap_or_default();
        if line.chars().count() > MAX_LINE_LENGTH {
            return Err(InvalidInput::LineTooLong { max: MAX_LINE_LENGTH }.into());
        }

        Ok(strip_control_chars(&line))
    }

    fn evaluate(&mut self, code: &str, operand_a: &str, operand_b: &str) -> io::Result<()> {
        let operator = Operator::from_menu_code(code);
        let result = match compute(operand_a, operand_b, operator) {
            Ok(result) => result,
            Err(e) => return self.report(&OperationError::from(e)),
        };

        if is_undefined(result) {
            debug!(code, "undefined result discarded");
            return writeln!(
                self.output,
                "[ERROR] Invalid operation (division by zero or undefined result)"
            );
        }

        let record = OperationRecord::new(operand_a, operand_b, operator, result);
        if let Err(e) = self.history.append(record) {
            warn!(path = %self.history.path().display(), error = %e, "history append failed");
            writeln!(self.errors, "[ERROR] Could not write history: {}", e)?;
        }

        writeln!(self.output, "= {}", format_result(result))
    }

    fn report(&mut self, error: &OperationError) -> io::Result<()> {
        debug!(%error, "operation aborted");
        writeln!(self.output, "[ERROR] {}", error)
    }
}
