//! Calculator session
//!
//! A [`Session`] wires user actions to the calculator and the history log:
//! validate the pending input, calculate, show the result or the error, and
//! record successful calculations. It owns all mutable state, so a front end
//! only needs to hold one session for the lifetime of the program.

use std::fmt;

use tally_calculator::Calculator;
use tally_types::{
    CalculationRecord, CalculationRequest, OperandPosition, Operator, Result, TallyError,
    format_operand,
};
use tracing::{debug, instrument, warn};

use crate::history::{HistoryLog, HistoryObserver};

/// Raw text currently entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub left: String,
    pub operator: String,
    pub right: String,
}

impl PendingInput {
    pub fn new(left: impl Into<String>, operator: impl Into<String>, right: impl Into<String>) -> Self {
        Self { left: left.into(), operator: operator.into(), right: right.into() }
    }

    /// Input that reproduces `request` exactly, including the sign of zero.
    pub fn from_request(request: &CalculationRequest) -> Self {
        Self::new(operand_text(request.left), request.operator.name(), operand_text(request.right))
    }
}

/// Text that parses back to `value` bit for bit. Finite values use the
/// shortest round-trip form, which keeps `-0`.
fn operand_text(value: f64) -> String {
    if value.is_finite() { value.to_string() } else { format_operand(value) }
}

/// What the output area shows. A result and an error are never shown together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayState {
    /// Nothing shown, before the first action or after a reset
    #[default]
    Idle,
    /// Formatted calculation, e.g. `5 add 3 = 8`
    Result(String),
    /// Error message without the `Error:` prefix
    Error(String),
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayState::Idle => Ok(()),
            DisplayState::Result(line) => f.write_str(line),
            DisplayState::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    calculator: Calculator,
    history: HistoryLog,
    pending: PendingInput,
    display: DisplayState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_parts(Calculator::new(), HistoryLog::new())
    }

    pub fn with_parts(calculator: Calculator, history: HistoryLog) -> Self {
        Self { calculator, history, pending: PendingInput::default(), display: DisplayState::Idle }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Operators offered for selection.
    pub fn operators(&self) -> Vec<Operator> {
        self.calculator.operators()
    }

    pub fn subscribe_history(&mut self, observer: Box<dyn HistoryObserver>) {
        self.history.subscribe(observer);
    }

    pub fn set_input(
        &mut self,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) {
        self.pending = PendingInput::new(left, operator, right);
    }

    /// Validate the pending input, calculate and record the result.
    ///
    /// Operands are checked in order first, operator, second; the first
    /// failure is shown. On failure nothing is added to history.
    #[instrument(skip(self), fields(left = %self.pending.left, operator = %self.pending.operator, right = %self.pending.right))]
    pub fn submit(&mut self) -> Result<CalculationRecord> {
        let outcome = self.validated_request().and_then(|request| {
            let result = self.calculator.evaluate(&request)?;
            Ok(CalculationRecord::new(request, result))
        });

        match outcome {
            Ok(record) => {
                self.display = DisplayState::Result(record.to_string());
                self.history.add_entry(record.clone());
                debug!(record = %record.id(), "calculation recorded");
                Ok(record)
            }
            Err(err) => {
                self.show_error(&err);
                Err(err)
            }
        }
    }

    /// Re-run the calculation stored at history `index` as a new request.
    ///
    /// An index past the end shows the error and leaves the pending input
    /// untouched.
    pub fn replay(&mut self, index: usize) -> Result<CalculationRecord> {
        let request = match self.history.entry_at(index).map(CalculationRecord::request) {
            Ok(request) => request,
            Err(err) => {
                self.show_error(&err);
                return Err(err);
            }
        };
        debug!(index, "replaying history entry");
        self.pending = PendingInput::from_request(&request);
        self.submit()
    }

    /// Clear pending input and hide result and error. History is kept.
    pub fn reset(&mut self) {
        self.pending = PendingInput::default();
        self.display = DisplayState::Idle;
    }

    /// Empty the history. Pending input and display are kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn validated_request(&self) -> Result<CalculationRequest> {
        let validator = self.calculator.validator();
        let left = validator.parse_operand(&self.pending.left).ok_or_else(|| {
            TallyError::InvalidNumber {
                position: OperandPosition::First,
                input: self.pending.left.clone(),
            }
        })?;
        let operator = validator.resolve_operator(&self.pending.operator).ok_or_else(|| {
            TallyError::InvalidOperator { symbol: self.pending.operator.clone() }
        })?;
        let right = validator.parse_operand(&self.pending.right).ok_or_else(|| {
            TallyError::InvalidNumber {
                position: OperandPosition::Second,
                input: self.pending.right.clone(),
            }
        })?;
        Ok(CalculationRequest::new(left, operator, right))
    }

    fn show_error(&mut self, err: &TallyError) {
        warn!(category = err.category(), error = %err, "calculation rejected");
        self.display = DisplayState::Error(err.to_string());
    }
}
