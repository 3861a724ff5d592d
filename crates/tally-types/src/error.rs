//! Error handling for Tally
//!
//! Every failure in the calculator is local and recoverable: the session turns
//! it into a displayed message and stays interactive.

use std::fmt;
use thiserror::Error;

use crate::types::Operator;

/// Result alias used across the workspace
pub type Result<T, E = TallyError> = std::result::Result<T, E>;

/// Which operand of a two-operand calculation an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandPosition {
    /// The left-hand operand
    First,
    /// The right-hand operand
    Second,
}

impl fmt::Display for OperandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandPosition::First => f.write_str("first"),
            OperandPosition::Second => f.write_str("second"),
        }
    }
}

/// Error type for validation, calculation and history operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TallyError {
    /// Operand text is not a finite decimal number
    #[error("Enter a valid {position} number.")]
    InvalidNumber { position: OperandPosition, input: String },

    /// Operator token rejected by validation
    #[error("Invalid operation.")]
    InvalidOperator { symbol: String },

    /// Divide or modulo with a zero right operand
    #[error("{}", division_by_zero_message(.operator))]
    DivisionByZero { operator: Operator },

    /// Calculator was asked for an operation outside its table
    #[error("Unsupported operation: {symbol}")]
    UnsupportedOperator { symbol: String },

    /// History lookup past the end
    #[error("History entry {index} does not exist (history holds {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn division_by_zero_message(operator: &Operator) -> &'static str {
    match operator {
        Operator::Modulo => "Division by zero is impossible when computing the remainder.",
        _ => "Division by zero is impossible.",
    }
}

impl TallyError {
    /// Stable tag for structured logging
    pub fn category(&self) -> &'static str {
        match self {
            TallyError::InvalidNumber { .. } => "invalid_number",
            TallyError::InvalidOperator { .. } => "invalid_operator",
            TallyError::DivisionByZero { .. } => "division_by_zero",
            TallyError::UnsupportedOperator { .. } => "unsupported_operator",
            TallyError::IndexOutOfRange { .. } => "index_out_of_range",
            TallyError::Configuration { .. } => "configuration",
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        TallyError::Configuration { message: message.into() }
    }
}
