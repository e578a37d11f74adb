//! Spreadsheet engine API.
//!
//! - [`Sheet`], [`CellPos`] - Dense grid of raw cell text with label lookups
//! - [`Sheet::resolve`] - Address resolution (`<column label><row label>`)
//! - [`Expression`], [`Operator`] - Formula parsing
//! - [`Evaluator`] - Recursive formula evaluation with loop protection
//! - [`EvalError`] - Everything that can go wrong while evaluating

mod address;
mod cycle;
mod error;
mod eval;
mod expression;
mod sheet;

pub use cycle::CyclePolicy;
pub use error::{EvalError, Result};
pub use eval::{
    DEFAULT_MAX_DEPTH, EvalOptions, Evaluator, MAX_DEPTH_LIMIT, ValueCache, stack_size_for_depth,
    validate_max_depth,
};
pub use expression::{Expression, Operator};
pub use sheet::{CellPos, Sheet};
