//! csvgrid-core - Workbook loading, batch evaluation and CSV storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{ProcessSummary, Workbook, load_sheet};
pub use error::{CsvGridError, Result};

pub use csvgrid_engine::engine::{CellPos, CyclePolicy, EvalError, EvalOptions, Sheet};

/// Load CSV lines, evaluate every formula and return the finished sheet.
pub fn evaluate_lines<S: AsRef<str>>(lines: &[S], options: EvalOptions) -> Result<Sheet> {
    let mut workbook = Workbook::from_lines(lines, options)?;
    workbook.process_cells()?;
    Ok(workbook.into_sheet())
}
