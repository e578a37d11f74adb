use super::Workbook;
use crate::error::{CsvGridError, Result};
use csvgrid_engine::engine::{CellPos, EvalError, Evaluator, Expression};
use tracing::debug;

/// Counts of the data cells visited by a batch pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub literals: usize,
    pub formulas: usize,
}

impl Workbook {
    /// Evaluate every formula cell in row-major order and replace it with its
    /// value. Stops at the first error; cells already rewritten stay rewritten
    /// but the caller is expected to discard the workbook.
    pub fn process_cells(&mut self) -> Result<ProcessSummary> {
        let mut summary = ProcessSummary::default();
        let positions: Vec<CellPos> = self.sheet.data_positions().collect();

        for pos in positions {
            let Some(raw) = self.sheet.get(pos) else {
                continue;
            };

            if !raw.starts_with('=') {
                if raw.parse::<i64>().is_err() {
                    return Err(CsvGridError::InvalidCellValue {
                        value: raw.to_string(),
                        row: pos.row,
                        col: pos.col,
                    });
                }
                summary.literals += 1;
                continue;
            }

            let exp = Expression::parse(raw).map_err(|e| self.cell_error(pos, e))?;
            let value = Evaluator::with_cache(&self.sheet, self.options, &self.value_cache)
                .calc_cell(pos, &exp)
                .map_err(|e| self.cell_error(pos, e))?;

            debug!(cell = %pos, formula = %exp, value, "evaluated formula");
            self.sheet.set(pos, value.to_string());
            summary.formulas += 1;
        }

        Ok(summary)
    }

    fn cell_error(&self, pos: CellPos, source: EvalError) -> CsvGridError {
        CsvGridError::Cell {
            address: self.sheet.address_of(pos).unwrap_or_else(|| pos.to_string()),
            source,
        }
    }
}
