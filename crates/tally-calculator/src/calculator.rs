use tally_types::{CalculationRequest, Operator, Result, TallyError};
use tracing::debug;

use crate::operation_table::OperationTable;
use crate::validator::Validator;

#[derive(Debug)]
pub struct Calculator {
    table: OperationTable,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self { table: OperationTable::standard() }
    }

    /// A calculator that only supports `operators`.
    pub fn with_operators(operators: impl IntoIterator<Item = Operator>) -> Self {
        Self { table: OperationTable::with_operators(operators) }
    }

    pub fn table(&self) -> &OperationTable {
        &self.table
    }

    /// Live operator set, in display order.
    pub fn operators(&self) -> Vec<Operator> {
        self.table.operators().collect()
    }

    pub fn supports(&self, operator: Operator) -> bool {
        self.table.contains(operator)
    }

    /// Validator bound to this calculator's operator set.
    pub fn validator(&self) -> Validator<'_> {
        Validator::new(self)
    }

    /// Resolve `symbol` and apply it to the operands.
    ///
    /// Unknown symbols and operators missing from this table both fail with
    /// `UnsupportedOperator`, whatever the caller validated beforehand.
    pub fn perform_calculation(&self, left: f64, symbol: &str, right: f64) -> Result<f64> {
        let operator = Operator::from_token(symbol)
            .filter(|op| self.supports(*op))
            .ok_or_else(|| TallyError::UnsupportedOperator { symbol: symbol.to_string() })?;
        self.calculate(left, operator, right)
    }

    pub fn calculate(&self, left: f64, operator: Operator, right: f64) -> Result<f64> {
        let Some(op) = self.table.get(operator) else {
            return Err(TallyError::UnsupportedOperator { symbol: operator.name().to_string() });
        };
        let result = op(left, right)?;
        debug!(%operator, left, right, result, "calculation performed");
        Ok(result)
    }

    pub fn evaluate(&self, request: &CalculationRequest) -> Result<f64> {
        self.calculate(request.left, request.operator, request.right)
    }
}
