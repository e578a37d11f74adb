//! Errors raised while resolving addresses, parsing formulas and evaluating them.

use thiserror::Error;

/// Errors that can occur while evaluating a formula.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("invalid cell address: not found: {0}")]
    AddressNotFound(String),

    #[error("invalid cell expression: not a formula: {0}")]
    NotAFormula(String),

    #[error("invalid cell expression: {0}")]
    FormulaTooShort(String),

    #[error("invalid cell: operator not found: {0}")]
    OperatorNotFound(String),

    #[error("invalid cell: no left operand: {0}")]
    MissingLeftOperand(String),

    #[error("invalid cell: no right operand: {0}")]
    MissingRightOperand(String),

    #[error("invalid cell address: recursion: {address} value is {value}")]
    SelfReferenceDetected { address: String, value: String },

    #[error("circular reference: {}", path.join(" -> "))]
    CircularReference { path: Vec<String> },

    #[error("invalid expression {expression}: division by zero")]
    DivisionByZero { expression: String },

    #[error("invalid expression {expression}: integer overflow")]
    ArithmeticOverflow { expression: String },

    #[error("recursion too deep while resolving {address} (limit {limit})")]
    RecursionTooDeep { address: String, limit: usize },
}

pub type Result<T> = std::result::Result<T, EvalError>;
