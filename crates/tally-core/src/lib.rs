#![deny(warnings)]
#![allow(missing_docs)]
//! Core functionality for the Tally calculator.
//!
//! This crate holds the bounded [`HistoryLog`] of successful calculations and
//! the [`Session`] that turns user actions into validated calculations,
//! display updates and history entries.

/// Bounded, newest-first calculation history
pub mod history;
/// Orchestration of submit, reset, clear and replay actions
pub mod session;

pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryEvent, HistoryLog, HistoryObserver};
pub use session::{DisplayState, PendingInput, Session};

pub use tally_calculator::{Calculator, Validator};
pub use tally_types::{
    CalculationRecord, CalculationRequest, OperandPosition, Operator, RecordId, Result,
    TallyError, format_operand,
};
