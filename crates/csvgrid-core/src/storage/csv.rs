//! Plain comma-separated input and output.
//!
//! The format has no quoting or escaping: a field is whatever lies between
//! two commas, and a comma can never appear inside a cell.

use crate::error::{CsvGridError, Result};
use csvgrid_engine::engine::Sheet;
use std::io::Write;
use std::path::Path;

/// Largest input file we are willing to read.
pub const MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

/// Read a file and split it into lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_INPUT_BYTES {
        return Err(CsvGridError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_INPUT_BYTES
            ),
        )));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_lines(&content))
}

/// Split text into lines. `\r\n` endings are accepted and a trailing newline
/// does not produce an empty last row.
pub fn parse_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

/// Render a sheet, one `\n`-terminated line per row.
pub fn write_csv_content(sheet: &Sheet) -> String {
    let mut out = String::new();
    for row in sheet.rows() {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

pub fn write_to<W: Write>(writer: &mut W, sheet: &Sheet) -> Result<()> {
    for row in sheet.rows() {
        writeln!(writer, "{}", row.join(","))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a sheet to a file, replacing it if it exists.
pub fn write_csv(path: &Path, sheet: &Sheet) -> Result<()> {
    std::fs::write(path, write_csv_content(sheet))?;
    Ok(())
}
