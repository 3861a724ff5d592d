use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::TallyError;

/// The closed set of binary arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `left + right`
    Add,
    /// `left - right`
    Subtract,
    /// `left * right`
    Multiply,
    /// `left / right`
    Divide,
    /// `left ^ right`
    Power,
    /// `left % right`, remainder takes the sign of the dividend
    Modulo,
}

impl Operator {
    /// Every operator, in display order.
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
        Operator::Modulo,
    ];

    /// Canonical token, also used when rendering a calculation.
    pub const fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
            Operator::Power => "power",
            Operator::Modulo => "modulo",
        }
    }

    /// Symbolic alias accepted on input.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "**",
            Operator::Modulo => "%",
        }
    }

    /// Resolve a token by canonical name or symbol. Surrounding whitespace is
    /// ignored, case is not.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL.into_iter().find(|op| op.name() == token || op.symbol() == token)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| TallyError::UnsupportedOperator { symbol: s.to_string() })
    }
}

/// Render a number the way the calculator displays it.
///
/// Integral values drop the fractional part (`8`, not `8.0`), other finite
/// values use the shortest round-trip form, and non-finite values are spelled
/// `Infinity`, `-Infinity` and `NaN`.
pub fn format_operand(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // -0 renders as 0
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// A single requested calculation. Built per action and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationRequest {
    /// First operand
    pub left: f64,
    /// Operation to apply
    pub operator: Operator,
    /// Second operand
    pub right: f64,
}

impl CalculationRequest {
    /// Creates a new request.
    pub const fn new(left: f64, operator: Operator, right: f64) -> Self {
        Self { left, operator, right }
    }
}

/// Unique identifier of a history record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An immutable, timestamped record of one successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    id: RecordId,
    left: f64,
    operator: Operator,
    right: f64,
    result: f64,
    timestamp: DateTime<Utc>,
}

impl CalculationRecord {
    /// Records `request` with its `result`, stamped with the current time.
    pub fn new(request: CalculationRequest, result: f64) -> Self {
        Self::at(request, result, Utc::now())
    }

    /// Records `request` with an explicit completion time.
    pub fn at(request: CalculationRequest, result: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: RecordId(Uuid::new_v4()),
            left: request.left,
            operator: request.operator,
            right: request.right,
            result,
            timestamp,
        }
    }

    /// Unique id of this record.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// First operand.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Operator applied.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Second operand.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Computed result.
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Wall-clock time the calculation completed.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The inputs that produced this record, for replay.
    pub fn request(&self) -> CalculationRequest {
        CalculationRequest::new(self.left, self.operator, self.right)
    }
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            format_operand(self.left),
            self.operator,
            format_operand(self.right),
            format_operand(self.result)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_and_symbols() {
        assert_eq!(Operator::from_token("add"), Some(Operator::Add));
        assert_eq!(Operator::from_token(" ** "), Some(Operator::Power));
        assert_eq!(Operator::from_token("%"), Some(Operator::Modulo));
        assert_eq!(Operator::from_token("ADD"), None);
        assert_eq!(Operator::from_token("^"), None);
        assert_eq!(Operator::from_token(""), None);
    }

    #[test]
    fn parse_reports_unsupported_symbol() {
        let err = "sqrt".parse::<Operator>().unwrap_err();
        assert!(matches!(err, TallyError::UnsupportedOperator { ref symbol } if symbol == "sqrt"));
    }

    #[test]
    fn formats_like_the_display() {
        assert_eq!(format_operand(8.0), "8");
        assert_eq!(format_operand(-2.5), "-2.5");
        assert_eq!(format_operand(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_operand(-0.0), "0");
        assert_eq!(format_operand(f64::INFINITY), "Infinity");
        assert_eq!(format_operand(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_operand(f64::NAN), "NaN");
    }

    #[test]
    fn record_renders_calculation_line() {
        let record = CalculationRecord::new(CalculationRequest::new(5.0, Operator::Add, 3.0), 8.0);
        assert_eq!(record.to_string(), "5 add 3 = 8");
        assert_eq!(record.request(), CalculationRequest::new(5.0, Operator::Add, 3.0));
    }

    #[test]
    fn identical_requests_get_distinct_ids() {
        let request = CalculationRequest::new(1.0, Operator::Multiply, 1.0);
        let a = CalculationRecord::new(request, 1.0);
        let b = CalculationRecord::new(request, 1.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn record_serializes_with_snake_case_operator() {
        let record = CalculationRecord::new(CalculationRequest::new(2.0, Operator::Power, 10.0), 1024.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["operator"], "power");
        assert_eq!(json["result"], 1024.0);
    }
}
