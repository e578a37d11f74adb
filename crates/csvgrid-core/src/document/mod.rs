//! Workbook loading and batch evaluation.

mod load;
mod process;
mod state;

pub use load::load_sheet;
pub use process::ProcessSummary;
pub use state::Workbook;
