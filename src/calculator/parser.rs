use tracing::debug;

use crate::error::{InputResult, InvalidInput};

/// Maximum length of a numeric operand, in characters
pub const MAX_NUMERIC_LENGTH: usize = 50;

/// Parses operand text into a finite `f64`
///
/// A comma decimal separator is accepted in place of a period, so `"3,5"`
/// and `"3.5"` both parse to `3.5`.
///
/// # Errors
///
/// Returns an error if:
/// - The text is empty or whitespace only
/// - The normalized text is longer than [`MAX_NUMERIC_LENGTH`] characters
/// - The text is not a decimal number
/// - The value is infinite (or a literal `NaN`)
///
/// # Examples
///
/// ```
/// use badcalc::calculator::parse_operand;
///
/// assert_eq!(parse_operand("3,5").unwrap(), 3.5);
/// assert!(parse_operand("").is_err());
/// ```
pub fn parse_operand(text: &str) -> InputResult<f64> {
    if text.trim().is_empty() {
        return Err(InvalidInput::Empty);
    }

    let normalized = text.replace(',', ".");
    let normalized = normalized.trim();

    if normalized.chars().count() > MAX_NUMERIC_LENGTH {
        debug!(len = normalized.chars().count(), "rejecting oversized operand");
        return Err(InvalidInput::TooLong { max: MAX_NUMERIC_LENGTH });
    }

    let value: f64 =
        normalized.parse().map_err(|_| InvalidInput::NotANumber(normalized.to_string()))?;

    if value.is_infinite() {
        return Err(InvalidInput::Infinite);
    }
    // Rust's float grammar admits "NaN"; only finite values leave this function
    if value.is_nan() {
        return Err(InvalidInput::NotANumber(normalized.to_string()));
    }

    Ok(value)
}
