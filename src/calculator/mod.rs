//! Operand parsing and binary arithmetic.
//!
//! [`parse_operand`] turns user text into a finite `f64`. [`compute`] parses two
//! operands and applies an [`Operator`], signalling undefined results (division
//! or modulo by zero) with a `NaN` sentinel that callers check via
//! [`is_undefined`].

pub mod evaluator;
pub mod parser;

pub use evaluator::{Operator, compute, is_undefined, newton_sqrt};
pub use parser::{MAX_NUMERIC_LENGTH, parse_operand};
