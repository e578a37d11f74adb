use crate::error::Result;
use crate::storage::read_lines;
use csvgrid_engine::engine::{EvalOptions, Sheet, ValueCache};
use std::path::Path;

use super::load::load_sheet;

/// A loaded sheet together with the settings used to evaluate it.
///
/// The workbook is the single owner of its sheet; [`Workbook::process_cells`]
/// rewrites formula cells in place.
pub struct Workbook {
    pub sheet: Sheet,
    pub options: EvalOptions,
    /// Formula values computed so far (only filled when memoizing)
    pub value_cache: ValueCache,
}

impl Workbook {
    pub fn new(sheet: Sheet, options: EvalOptions) -> Self {
        Workbook {
            sheet,
            options,
            value_cache: ValueCache::new(),
        }
    }

    /// Build a workbook from in-memory CSV lines.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], options: EvalOptions) -> Result<Self> {
        Ok(Self::new(load_sheet(lines)?, options))
    }

    /// Read and validate a CSV file.
    pub fn load_file(path: &Path, options: EvalOptions) -> Result<Self> {
        let lines = read_lines(path)?;
        Self::from_lines(&lines, options)
    }

    pub fn into_sheet(self) -> Sheet {
        self.sheet
    }
}
