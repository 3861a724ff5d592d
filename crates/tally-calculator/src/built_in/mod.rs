//! Built-in operations provided by the Tally calculator.

pub mod arithmetic;

pub use arithmetic::resolve;
