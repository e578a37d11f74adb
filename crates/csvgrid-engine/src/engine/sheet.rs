//! Sheet data structures.
//!
//! A [`Sheet`] is a dense, rectangular grid of raw cell strings. Row 0 holds the
//! column labels and column 0 holds the row labels; everything else is data.
//! The label maps let formulas address cells by `<column label><row label>`.

use std::collections::HashMap;
use std::fmt;

/// A position in the sheet (0-indexed, header row and column included).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> CellPos {
        CellPos { row, col }
    }

    /// True for the label row and the label column.
    pub fn is_header(&self) -> bool {
        self.row == 0 || self.col == 0
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}]", self.row, self.col)
    }
}

/// Raw cells plus the label lookups used for addressing.
///
/// The sheet itself does not validate anything; the loader in `csvgrid-core`
/// is responsible for keeping it rectangular and the labels well formed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    cells: Vec<Vec<String>>,
    col_labels: HashMap<String, usize>,
    row_labels: HashMap<String, usize>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row of raw fields. Returns its row index.
    pub fn push_row(&mut self, fields: Vec<String>) -> usize {
        self.cells.push(fields);
        self.cells.len() - 1
    }

    /// Register a column label. Returns the index previously bound to it, if any.
    pub fn insert_col_label(&mut self, label: &str, col: usize) -> Option<usize> {
        self.col_labels.insert(label.to_string(), col)
    }

    /// Register a row label. Returns the index previously bound to it, if any.
    pub fn insert_row_label(&mut self, label: &str, row: usize) -> Option<usize> {
        self.row_labels.insert(label.to_string(), row)
    }

    pub fn col_index(&self, label: &str) -> Option<usize> {
        self.col_labels.get(label).copied()
    }

    pub fn row_index(&self, label: &str) -> Option<usize> {
        self.row_labels.get(label).copied()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn get(&self, pos: CellPos) -> Option<&str> {
        self.cells
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .map(String::as_str)
    }

    /// Overwrite a cell. Returns false if the position is outside the grid.
    pub fn set(&mut self, pos: CellPos, value: String) -> bool {
        match self.cells.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Positions of every data cell in row-major order.
    pub fn data_positions(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.cells.iter().enumerate().skip(1).flat_map(|(row, fields)| {
            (1..fields.len()).map(move |col| CellPos::new(row, col))
        })
    }

    /// Build the address of a data cell from its header labels.
    pub fn address_of(&self, pos: CellPos) -> Option<String> {
        if pos.is_header() {
            return None;
        }
        let col_label = self.get(CellPos::new(0, pos.col))?;
        let row_label = self.get(CellPos::new(pos.row, 0))?;
        Some(format!("{}{}", col_label, row_label))
    }
}
