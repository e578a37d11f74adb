//! Cell address resolution.
//!
//! Addresses have no delimiter between the column label and the row label
//! (`Cell30` is column `Cell`, row `30`), so the split point is found by
//! scanning. The leftmost split at which both halves are known labels wins.
//! With overlapping label sets this can pick a different cell than the author
//! intended; that tie-break is part of the format and must stay stable.

use super::error::{EvalError, Result};
use super::sheet::{CellPos, Sheet};

impl Sheet {
    /// Find the data cell named by `address`.
    pub fn locate(&self, address: &str) -> Result<CellPos> {
        address
            .char_indices()
            .skip(1)
            .find_map(|(split, _)| self.split_at(address, split))
            .ok_or_else(|| EvalError::AddressNotFound(address.to_string()))
    }

    /// Find the data cell named by `address` and return its raw text.
    pub fn resolve(&self, address: &str) -> Result<(CellPos, &str)> {
        let pos = self.locate(address)?;
        let value = self
            .get(pos)
            .ok_or_else(|| EvalError::AddressNotFound(address.to_string()))?;
        Ok((pos, value))
    }

    pub fn raw_value(&self, address: &str) -> Result<&str> {
        self.resolve(address).map(|(_, value)| value)
    }

    fn split_at(&self, address: &str, split: usize) -> Option<CellPos> {
        let (col_label, row_label) = address.split_at(split);
        // Index 0 is the header row/column and is never addressable.
        let col = self.col_index(col_label).filter(|&c| c != 0)?;
        let row = self.row_index(row_label).filter(|&r| r != 0)?;
        Some(CellPos::new(row, col))
    }
}
