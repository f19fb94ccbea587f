use std::fmt;

use tracing::debug;

use super::parser::parse_operand;
use crate::error::InputResult;

const SQRT_TOLERANCE: f64 = 0.0001;
const SQRT_MAX_ITERATIONS: u32 = 100_000;

/// Binary operators selectable from the menu
///
/// `Unknown` stands in for any unmapped menu code. Its symbol is the empty
/// string and it always evaluates to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
    Unknown,
}

impl Operator {
    /// Every operator, in menu order with `Unknown` last
    pub const ALL: [Operator; 7] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Modulo,
        Self::Unknown,
    ];

    /// Maps a menu option code (`"1"`..`"6"`) to an operator
    pub fn from_menu_code(code: &str) -> Self {
        match code {
            "1" => Self::Add,
            "2" => Self::Subtract,
            "3" => Self::Multiply,
            "4" => Self::Divide,
            "5" => Self::Power,
            "6" => Self::Modulo,
            _ => Self::Unknown,
        }
    }

    /// Maps a stored symbol back to an operator; the empty string is `Unknown`
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            "^" => Some(Self::Power),
            "%" => Some(Self::Modulo),
            "" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::Modulo => "%",
            Self::Unknown => "",
        }
    }

    /// Applies the operator to already-parsed operands
    ///
    /// Division and modulo by zero produce `NaN` instead of failing.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide if b == 0.0 => f64::NAN,
            Self::Divide => a / b,
            Self::Modulo if b == 0.0 => f64::NAN,
            Self::Modulo => a % b,
            Self::Power => repeated_power(a, b),
            Self::Unknown => 0.0,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parses both operand texts and applies `op`
///
/// Parse failures abort before any arithmetic. Undefined results are
/// reported through the `NaN` sentinel, see [`is_undefined`].
///
/// # Examples
///
/// ```
/// use badcalc::calculator::{Operator, compute, is_undefined};
///
/// assert_eq!(compute("5", "3", Operator::Add).unwrap(), 8.0);
/// assert!(is_undefined(compute("5", "0", Operator::Divide).unwrap()));
/// ```
pub fn compute(a: &str, b: &str, op: Operator) -> InputResult<f64> {
    let value_a = parse_operand(a)?;
    let value_b = parse_operand(b)?;
    let result = op.apply(value_a, value_b);
    debug!(a = value_a, b = value_b, op = %op, result, "computed");
    Ok(result)
}

/// Returns true if `result` is the undefined-result sentinel
pub fn is_undefined(result: f64) -> bool {
    result.is_nan()
}

/// Integer power by repeated multiplication
///
/// The exponent is truncated toward zero (saturating at `i32` bounds).
/// Exponents of zero or below yield `1.0`, so negative powers are not
/// reciprocals.
fn repeated_power(base: f64, exponent: f64) -> f64 {
    let mut remaining = exponent as i32;
    let mut product = 1.0;

    while remaining > 0 {
        product *= base;
        remaining -= 1;

        // Magnitude is fixed from here on; only the sign can still change
        if product == 0.0 || product.is_infinite() || base.abs() == 1.0 {
            if base.is_sign_negative() && remaining % 2 == 1 {
                product = -product;
            }
            return product;
        }
    }

    product
}

/// Square root by Newton's iteration, starting from `v` itself
///
/// Stops once `|g*g - v| <= 1e-4` or after 100 000 iterations. Negative
/// inputs never converge and return whatever the last iterate was.
pub fn newton_sqrt(v: f64) -> f64 {
    let mut guess = v;
    let mut iterations = 0;

    while (guess * guess - v).abs() > SQRT_TOLERANCE && iterations < SQRT_MAX_ITERATIONS {
        guess = (guess + v / guess) / 2.0;
        iterations += 1;
    }

    guess
}
