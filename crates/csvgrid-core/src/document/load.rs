use regex::Regex;
use std::sync::OnceLock;

use crate::error::{CsvGridError, Result};
use csvgrid_engine::engine::Sheet;

/// Build a sheet from raw CSV lines, validating its structure.
///
/// The first line is the header: every field after the first is a column
/// label. Every following line is a data row whose first field is the row
/// label. The first violation found aborts the load.
pub fn load_sheet<S: AsRef<str>>(lines: &[S]) -> Result<Sheet> {
    let Some(header_line) = lines.first() else {
        return Err(CsvGridError::EmptyInput);
    };
    let header: Vec<&str> = header_line.as_ref().split(',').collect();
    let width = header.len();

    let mut sheet = Sheet::new();
    for (col, label) in header.iter().enumerate().skip(1) {
        if label.is_empty() {
            return Err(CsvGridError::InvalidHeader { col });
        }
        if digit_re().is_match(label) {
            return Err(CsvGridError::InvalidColumnLabel {
                label: label.to_string(),
                col,
            });
        }
        if let Some(first) = sheet.insert_col_label(label, col) {
            return Err(CsvGridError::DuplicateColumnLabel {
                label: label.to_string(),
                first,
                col,
            });
        }
    }

    for (row, line) in lines.iter().enumerate() {
        let fields: Vec<String> = line.as_ref().split(',').map(str::to_string).collect();
        if fields.len() != width {
            return Err(CsvGridError::RowLengthMismatch {
                row,
                found: fields.len(),
                expected: width,
            });
        }

        if row != 0 {
            let label = &fields[0];
            if label.is_empty() {
                return Err(CsvGridError::EmptyCell { row, col: 0 });
            }
            if label.parse::<i64>().is_err() {
                return Err(CsvGridError::InvalidRowLabel {
                    label: label.clone(),
                });
            }
            if let Some(col) = fields.iter().position(String::is_empty) {
                return Err(CsvGridError::EmptyCell { row, col });
            }
            // A repeated row label rebinds to the later row.
            sheet.insert_row_label(label, row);
        }

        sheet.push_row(fields);
    }

    Ok(sheet)
}

fn digit_re() -> &'static Regex {
    static DIGIT_RE: OnceLock<Regex> = OnceLock::new();
    DIGIT_RE.get_or_init(|| Regex::new(r"[0-9]").expect("column label digit regex must compile"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvgrid_engine::engine::CellPos;

    const SAMPLE: [&str; 4] = [",A,B,Cell", "1,1,0,1", "2,2,=A1+Cell30,0", "30,0,=B1+A1,5"];

    fn load_err(lines: &[&str]) -> String {
        load_sheet(lines).unwrap_err().to_string()
    }

    #[test]
    fn test_load_sample() {
        let sheet = load_sheet(&SAMPLE).unwrap();
        let want: Vec<Vec<String>> = [
            ["", "A", "B", "Cell"],
            ["1", "1", "0", "1"],
            ["2", "2", "=A1+Cell30", "0"],
            ["30", "0", "=B1+A1", "5"],
        ]
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect();
        assert_eq!(sheet.rows(), want.as_slice());
        assert_eq!(sheet.col_index("Cell"), Some(3));
        assert_eq!(sheet.row_index("30"), Some(3));
        assert_eq!(sheet.row_index(""), None);
        assert_eq!(sheet.locate("Cell30").unwrap(), CellPos::new(3, 3));
    }

    #[test]
    fn test_load_errors() {
        let cases: [(&str, &[&str], &str); 8] = [
            (
                "missing column name",
                &[",,B,Cell", "1,1,0,1"],
                "missing column name",
            ),
            ("empty row name element", &[",A,B", ",1,0"], "empty cell"),
            ("empty cell element", &[",A,B", "1,1,0", "2,,0"], "empty cell"),
            (
                "incorrect row length (less)",
                &[",A,B,Cell", "1,1,0"],
                "mismatched row lengths",
            ),
            (
                "incorrect row length (more)",
                &[",A,B,Cell", "1,1,0,1,2"],
                "mismatched row lengths",
            ),
            (
                "column name has digits",
                &[",A1,B,Cell", "1,1,0,1"],
                "must not contain numbers",
            ),
            (
                "row number has non-digits",
                &[",A,B", "1a,1,0"],
                "row number must be numerical",
            ),
            ("duplicate column", &[",A,A", "1,1,0"], "duplicate column name"),
        ];
        for (name, lines, want) in cases {
            let err = load_err(lines);
            assert!(err.contains(want), "{name}: got {err:?}, want {want:?}");
        }
    }

    #[test]
    fn test_repeated_row_label_binds_last_row() {
        let sheet = load_sheet(&[",A", "1,5", "1,7"]).unwrap();
        assert_eq!(sheet.row_index("1"), Some(2));
        assert_eq!(sheet.locate("A1").unwrap(), CellPos::new(2, 1));
        assert_eq!(sheet.raw_value("A1").unwrap(), "7");
    }

    #[test]
    fn test_row_label_checked_before_other_fields() {
        let err = load_sheet(&[",A,B", "x,,1"]).unwrap_err();
        assert!(matches!(err, CsvGridError::InvalidRowLabel { ref label } if label == "x"));

        let err = load_sheet(&[",A,B", ",,1"]).unwrap_err();
        assert!(matches!(err, CsvGridError::EmptyCell { row: 1, col: 0 }));

        let err = load_sheet(&[",A,B", "1,2,"]).unwrap_err();
        assert!(matches!(err, CsvGridError::EmptyCell { row: 1, col: 2 }));
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(matches!(load_sheet(&lines), Err(CsvGridError::EmptyInput)));
    }

    #[test]
    fn test_header_only_is_valid() {
        let sheet = load_sheet(&[",A,B"]).unwrap();
        assert_eq!(sheet.rows().len(), 1);
        assert_eq!(sheet.col_index("B"), Some(2));
        assert!(sheet.data_positions().next().is_none());
    }

    #[test]
    fn test_blank_line_is_a_length_mismatch() {
        let err = load_sheet(&[",A", "1,1", "", "2,2"]).unwrap_err();
        assert!(matches!(
            err,
            CsvGridError::RowLengthMismatch {
                row: 2,
                found: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_signed_and_padded_row_labels_are_numbers() {
        let sheet = load_sheet(&[",A", "+1,1", "-2,2", "007,3"]).unwrap();
        assert_eq!(sheet.raw_value("A+1").unwrap(), "1");
        assert_eq!(sheet.raw_value("A007").unwrap(), "3");
    }
}
