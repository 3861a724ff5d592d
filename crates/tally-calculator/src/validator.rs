use tally_types::Operator;

use crate::Calculator;

/// Input checks against a calculator's live operator set.
#[derive(Clone, Copy)]
pub struct Validator<'a> {
    calculator: &'a Calculator,
}

impl<'a> Validator<'a> {
    pub fn new(calculator: &'a Calculator) -> Self {
        Self { calculator }
    }

    /// Parsed value of `text` if it is a finite decimal number.
    ///
    /// Surrounding whitespace is ignored. `NaN`, `inf` and literals that
    /// overflow to infinity are rejected.
    pub fn parse_operand(&self, text: &str) -> Option<f64> {
        text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
    }

    pub fn is_valid_number(&self, text: &str) -> bool {
        self.parse_operand(text).is_some()
    }

    /// Supported operator for `symbol`, if any.
    pub fn resolve_operator(&self, symbol: &str) -> Option<Operator> {
        Operator::from_token(symbol).filter(|op| self.calculator.supports(*op))
    }

    pub fn is_valid_operator(&self, symbol: &str) -> bool {
        self.resolve_operator(symbol).is_some()
    }
}
