//! Arithmetic operations
//!
//! Each operation is a plain `fn(f64, f64) -> Result<f64>` so it can sit in the
//! operation table as a function pointer.

use tally_types::{Operator, Result, TallyError};

use crate::operation_table::BinaryOp;

/// Function implementing `operator`.
pub fn resolve(operator: Operator) -> BinaryOp {
    match operator {
        Operator::Add => add,
        Operator::Subtract => subtract,
        Operator::Multiply => multiply,
        Operator::Divide => divide,
        Operator::Power => power,
        Operator::Modulo => modulo,
    }
}

pub fn add(left: f64, right: f64) -> Result<f64> {
    Ok(left + right)
}

pub fn subtract(left: f64, right: f64) -> Result<f64> {
    Ok(left - right)
}

pub fn multiply(left: f64, right: f64) -> Result<f64> {
    Ok(left * right)
}

/// Fails with `DivisionByZero` when `right` is zero (either sign).
pub fn divide(left: f64, right: f64) -> Result<f64> {
    if right == 0.0 {
        return Err(TallyError::DivisionByZero { operator: Operator::Divide });
    }
    Ok(left / right)
}

/// Real exponentiation. Invalid combinations such as a negative base with a
/// fractional exponent yield NaN rather than an error.
pub fn power(left: f64, right: f64) -> Result<f64> {
    Ok(left.powf(right))
}

/// Truncated remainder: the result has the sign of `left`.
pub fn modulo(left: f64, right: f64) -> Result<f64> {
    if right == 0.0 {
        return Err(TallyError::DivisionByZero { operator: Operator::Modulo });
    }
    Ok(left % right)
}
