//! csvgrid_engine - Sheet model and formula evaluation.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    /// The sample sheet used throughout the docs:
    ///
    /// ```text
    /// ,A,B,Cell
    /// 1,1,0,1
    /// 2,2,=A1+Cell30,0
    /// 30,0,=B1+A1,5
    /// ```
    fn sample() -> Sheet {
        let rows = [
            ["", "A", "B", "Cell"],
            ["1", "1", "0", "1"],
            ["2", "2", "=A1+Cell30", "0"],
            ["30", "0", "=B1+A1", "5"],
        ];
        let mut sheet = Sheet::new();
        for (r, fields) in rows.iter().enumerate() {
            sheet.push_row(fields.iter().map(|s| s.to_string()).collect());
            if r == 0 {
                for (c, label) in fields.iter().enumerate().skip(1) {
                    sheet.insert_col_label(label, c);
                }
            } else {
                sheet.insert_row_label(fields[0], r);
            }
        }
        sheet
    }

    #[test]
    fn test_resolve_matches_grid_for_every_address() {
        let sheet = sample();
        let cols = ["A", "B", "Cell"];
        let rows = ["1", "2", "30"];
        for (ci, col) in cols.iter().enumerate() {
            for (ri, row) in rows.iter().enumerate() {
                let address = format!("{}{}", col, row);
                let pos = CellPos::new(ri + 1, ci + 1);
                assert_eq!(sheet.raw_value(&address).ok(), sheet.get(pos), "{address}");
                assert_eq!(sheet.address_of(pos), Some(address));
            }
        }
    }

    #[test]
    fn test_sample_formulas() {
        let sheet = sample();
        let eval = Evaluator::new(&sheet, EvalOptions::default());
        assert_eq!(eval.resolve_operand("B2"), Ok(6));
        assert_eq!(eval.resolve_operand("B30"), Ok(1));
        assert_eq!(eval.evaluate_formula("=B2*B30"), Ok(6));
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        assert_eq!(
            EvalError::AddressNotFound("Q7".into()).to_string(),
            "invalid cell address: not found: Q7"
        );
        assert_eq!(
            EvalError::DivisionByZero {
                expression: "5/0".into()
            }
            .to_string(),
            "invalid expression 5/0: division by zero"
        );
        assert_eq!(
            EvalError::CircularReference {
                path: vec!["A1".into(), "B1".into(), "A1".into()]
            }
            .to_string(),
            "circular reference: A1 -> B1 -> A1"
        );
    }
}
