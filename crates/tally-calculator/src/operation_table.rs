use std::collections::BTreeMap;

use tally_types::{Operator, Result};

use crate::built_in;

/// A binary arithmetic function stored in the table.
pub type BinaryOp = fn(f64, f64) -> Result<f64>;

/// Mapping from operator to the function implementing it.
///
/// The table is the single source of truth for which operators a calculator
/// supports; the validator asks it rather than keeping its own list.
#[derive(Debug, Clone)]
pub struct OperationTable {
    operations: BTreeMap<Operator, BinaryOp>,
}

impl Default for OperationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl OperationTable {
    /// An empty table.
    pub fn new() -> Self {
        Self { operations: BTreeMap::new() }
    }

    /// A table holding every built-in operator.
    pub fn standard() -> Self {
        Self::with_operators(Operator::ALL)
    }

    /// A table restricted to `operators`.
    pub fn with_operators(operators: impl IntoIterator<Item = Operator>) -> Self {
        let mut table = Self::new();
        for operator in operators {
            table.register(operator);
        }
        table
    }

    pub fn register(&mut self, operator: Operator) {
        self.operations.insert(operator, built_in::resolve(operator));
    }

    pub fn get(&self, operator: Operator) -> Option<BinaryOp> {
        self.operations.get(&operator).copied()
    }

    pub fn contains(&self, operator: Operator) -> bool {
        self.operations.contains_key(&operator)
    }

    /// Registered operators in display order.
    pub fn operators(&self) -> impl Iterator<Item = Operator> + '_ {
        self.operations.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
