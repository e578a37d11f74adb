//! Formula parsing.
//!
//! A formula is `=<operand><op><operand>` with exactly one operator. The first
//! `+`, `-`, `*` or `/` after the `=` is the operator, so operands can never
//! contain those characters (and a leading minus sign is not a literal).

use std::fmt;
use std::str::FromStr;

use super::error::{EvalError, Result};

/// Shortest well-formed formula, e.g. `=1+1`.
const MIN_FORMULA_LEN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Apply the operator with checked arithmetic. Division truncates toward zero.
    /// Returns None on overflow or division by zero.
    pub fn apply(self, left: i64, right: i64) -> Option<i64> {
        match self {
            Operator::Add => left.checked_add(right),
            Operator::Sub => left.checked_sub(right),
            Operator::Mul => left.checked_mul(right),
            Operator::Div => left.checked_div(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A flat binary expression taken from a formula cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    pub left: String,
    pub op: Operator,
    pub right: String,
}

impl Expression {
    pub fn new(left: &str, op: Operator, right: &str) -> Expression {
        Expression {
            left: left.to_string(),
            op,
            right: right.to_string(),
        }
    }

    /// Parse a formula cell such as `=A1+B1`.
    pub fn parse(formula: &str) -> Result<Expression> {
        let Some(body) = formula.strip_prefix('=') else {
            return Err(EvalError::NotAFormula(formula.to_string()));
        };
        if formula.len() < MIN_FORMULA_LEN {
            return Err(EvalError::FormulaTooShort(formula.to_string()));
        }

        let Some((split, op)) = body
            .char_indices()
            .find_map(|(i, c)| Operator::from_char(c).map(|op| (i, op)))
        else {
            return Err(EvalError::OperatorNotFound(body.to_string()));
        };

        let left = &body[..split];
        if left.is_empty() {
            return Err(EvalError::MissingLeftOperand(body.to_string()));
        }

        // Operators are all one byte wide.
        let right = &body[split + 1..];
        if right.is_empty() {
            return Err(EvalError::MissingRightOperand(body.to_string()));
        }

        Ok(Expression::new(left, op, right))
    }

    /// True if either operand is textually `operand`.
    pub fn references(&self, operand: &str) -> bool {
        self.left == operand || self.right == operand
    }
}

impl FromStr for Expression {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        Expression::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.op, self.right)
    }
}
