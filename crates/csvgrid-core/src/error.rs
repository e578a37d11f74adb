//! Error types for csvgrid core.

use csvgrid_engine::engine::EvalError;
use thiserror::Error;

/// Errors that can occur while loading or processing a workbook
#[derive(Error, Debug)]
pub enum CsvGridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is empty")]
    EmptyInput,

    #[error("missing column name in col {col}")]
    InvalidHeader { col: usize },

    #[error("column name must not contain numbers: {label} in col {col}")]
    InvalidColumnLabel { label: String, col: usize },

    #[error("duplicate column name: {label} in cols {first} and {col}")]
    DuplicateColumnLabel {
        label: String,
        first: usize,
        col: usize,
    },

    #[error("mismatched row lengths: row {row} has length {found} instead of {expected}")]
    RowLengthMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("empty cell at [{row}][{col}]")]
    EmptyCell { row: usize, col: usize },

    #[error("row number must be numerical: {label}")]
    InvalidRowLabel { label: String },

    #[error("invalid cell value: {value} at [{row}][{col}]")]
    InvalidCellValue {
        value: String,
        row: usize,
        col: usize,
    },

    #[error("{address}: {source}")]
    Cell {
        address: String,
        #[source]
        source: EvalError,
    },
}

impl CsvGridError {
    /// The evaluation error behind this error, if any.
    pub fn eval_error(&self) -> Option<&EvalError> {
        match self {
            CsvGridError::Cell { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvGridError>;
