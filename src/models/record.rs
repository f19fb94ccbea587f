use std::fmt;
use std::str::FromStr;

use anyhow::{Context, bail};
use serde::{Serialize, Serializer};

use crate::calculator::Operator;

/// Separator between the fields of a history line
pub const FIELD_DELIMITER: char = '|';

/// A computed operation as kept in history
///
/// Operands are the text the user typed (after control-character removal),
/// not the parsed values, so `3,5` stays `3,5`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRecord {
    pub operand_a: String,
    pub operand_b: String,
    #[serde(serialize_with = "serialize_symbol")]
    pub operator: Operator,
    /// Serialized as its history-line text, so `Infinity` survives JSON
    #[serde(serialize_with = "serialize_result")]
    pub result: f64,
}

impl OperationRecord {
    pub fn new(operand_a: &str, operand_b: &str, operator: Operator, result: f64) -> Self {
        Self {
            operand_a: operand_a.to_string(),
            operand_b: operand_b.to_string(),
            operator,
            result,
        }
    }
}

impl fmt::Display for OperationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{a}{d}{b}{d}{op}{d}{res}",
            a = self.operand_a,
            b = self.operand_b,
            op = self.operator,
            res = format_result(self.result),
            d = FIELD_DELIMITER
        )
    }
}

impl FromStr for OperationRecord {
    type Err = anyhow::Error;

    /// Parses a history line of the form `a|b|op|result`
    fn from_str(line: &str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        let [operand_a, operand_b, symbol, result] = fields.as_slice() else {
            bail!("Expected 4 fields, found {}", fields.len());
        };

        let Some(operator) = Operator::from_symbol(symbol) else {
            bail!("Unknown operator symbol: '{}'", symbol);
        };

        let result: f64 =
            result.trim().parse().with_context(|| format!("Invalid result field: '{}'", result))?;
        if result.is_nan() {
            bail!("Result field is NaN");
        }

        Ok(Self::new(operand_a, operand_b, operator, result))
    }
}

fn serialize_symbol<S: Serializer>(operator: &Operator, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(operator.symbol())
}

fn serialize_result<S: Serializer>(result: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_result(*result))
}

/// Renders a result the way the history file and `= ...` line show it
///
/// Integral values keep one decimal place (`8.0`), values outside
/// `[1e-3, 1e7)` use an upper-case exponent (`1.0E10`), and infinities print
/// as `Infinity`.
///
/// # Examples
///
/// ```
/// use badcalc::models::format_result;
///
/// assert_eq!(format_result(8.0), "8.0");
/// assert_eq!(format_result(0.25), "0.25");
/// assert_eq!(format_result(1e10), "1.0E10");
/// ```
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let plain = value.to_string();
        return if plain.contains('.') { plain } else { format!("{}.0", plain) };
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{}E{}", mantissa, exponent),
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integral() {
        assert_eq!(format_result(8.0), "8.0");
        assert_eq!(format_result(-3.0), "-3.0");
        assert_eq!(format_result(0.0), "0.0");
        assert_eq!(format_result(-0.0), "-0.0");
        assert_eq!(format_result(1_000_000.0), "1000000.0");
    }

    #[test]
    fn test_format_fractional() {
        assert_eq!(format_result(3.5), "3.5");
        assert_eq!(format_result(0.001), "0.001");
        assert_eq!(format_result(-2.25), "-2.25");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_result(1e7), "1.0E7");
        assert_eq!(format_result(1.5e-5), "1.5E-5");
        assert_eq!(format_result(-2.5e20), "-2.5E20");
        assert_eq!(format_result(0.0001), "1.0E-4");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_result(f64::INFINITY), "Infinity");
        assert_eq!(format_result(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_result(f64::NAN), "NaN");
    }

    #[test]
    fn test_record_line_keeps_operand_text() {
        let record = OperationRecord::new("3,5", "2", Operator::Add, 5.5);
        assert_eq!(record.to_string(), "3,5|2|+|5.5");
    }

    #[test]
    fn test_record_line_unknown_operator() {
        let record = OperationRecord::new("5", "3", Operator::Unknown, 0.0);
        assert_eq!(record.to_string(), "5|3||0.0");
    }

    #[test]
    fn test_parse_record_line() {
        let record: OperationRecord = "5|3|+|8.0".parse().unwrap();
        assert_eq!(record, OperationRecord::new("5", "3", Operator::Add, 8.0));

        let unknown: OperationRecord = "5|3||0.0".parse().unwrap();
        assert_eq!(unknown.operator, Operator::Unknown);

        let overflow: OperationRecord = "1e308|10|*|Infinity".parse().unwrap();
        assert!(overflow.result.is_infinite());

        let scientific: OperationRecord = "1e5|1e5|*|1.0E10".parse().unwrap();
        assert_eq!(scientific.result, 1e10);
    }

    #[test]
    fn test_parse_record_line_rejects_malformed() {
        assert!("5|3|+".parse::<OperationRecord>().is_err());
        assert!("5|3|+|8.0|extra".parse::<OperationRecord>().is_err());
        assert!("5|3|&|8.0".parse::<OperationRecord>().is_err());
        assert!("5|3|+|eight".parse::<OperationRecord>().is_err());
        assert!("5|0|/|NaN".parse::<OperationRecord>().is_err());
    }

    #[test]
    fn test_record_serializes_symbol() {
        let record = OperationRecord::new("2", "3", Operator::Power, 8.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["operator"], "^");
        assert_eq!(json["operand_a"], "2");
        assert_eq!(json["result"], "8.0");
    }

    #[test]
    fn test_record_serializes_infinite_result_as_text() {
        let record = OperationRecord::new("1e308", "10", Operator::Multiply, f64::INFINITY);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["result"], "Infinity");

        let negative = OperationRecord::new("-1e308", "10", Operator::Multiply, f64::NEG_INFINITY);
        assert_eq!(serde_json::to_value(&negative).unwrap()["result"], "-Infinity");
    }
}
