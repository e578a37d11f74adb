//! Storage module for reading and writing sheets

mod csv;

pub use csv::{MAX_INPUT_BYTES, parse_lines, read_lines, write_csv, write_csv_content, write_to};
