//! Tally Types
//!
//! This crate defines the types shared across the Tally workspace: the closed
//! [`Operator`] set, the immutable [`CalculationRecord`] kept in history, and the
//! [`TallyError`] taxonomy. Keeping them here lets `tally-calculator` and
//! `tally-core` agree on shapes without depending on each other.

#![deny(warnings)]

mod error;
mod types;

pub use error::{OperandPosition, Result, TallyError};
pub use types::{CalculationRecord, CalculationRequest, Operator, RecordId, format_operand};
