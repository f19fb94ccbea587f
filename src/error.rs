use thiserror::Error;

/// Rejection reasons for user-supplied operand text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("numeric input cannot be empty")]
    Empty,

    #[error("numeric input too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("not a valid number: '{0}'")]
    NotANumber(String),

    #[error("numeric value out of range: infinite")]
    Infinite,

    #[error("input exceeds maximum length of {max} characters")]
    LineTooLong { max: usize },
}

pub type InputResult<T> = Result<T, InvalidInput>;
