#![deny(warnings)]
//! The calculator for Tally.
//!
//! This crate provides the operation table mapping each [`Operator`] to a pure
//! binary function, the [`Calculator`] that dispatches through it, and the
//! [`Validator`] that checks raw input against the calculator's live table.

pub mod built_in;
pub mod calculator;
pub mod operation_table;
pub mod validator;

pub use calculator::Calculator;
pub use operation_table::{BinaryOp, OperationTable};
pub use validator::Validator;

pub use tally_types::{CalculationRequest, Operator, Result, TallyError};
