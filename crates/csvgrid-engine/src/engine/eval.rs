//! Formula evaluation.
//!
//! Operands are resolved recursively: a literal is returned as is, an address
//! is looked up and, if the cell holds another formula, that formula is
//! evaluated in turn. Nothing is memoized unless a [`ValueCache`] is supplied.

use dashmap::DashMap;
use tracing::trace;

use super::cycle::{CyclePolicy, Trail};
use super::error::{EvalError, Result};
use super::expression::{Expression, Operator};
use super::sheet::{CellPos, Sheet};

/// Default bound on nested formula resolution.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Largest accepted `max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 4096;

/// Stack reserved for each nested formula, plus a fixed base.
const STACK_BYTES_PER_LEVEL: usize = 16 * 1024;
const BASE_STACK_BYTES: usize = 1024 * 1024;

/// Check a requested nesting depth against `1..=MAX_DEPTH_LIMIT`.
pub fn validate_max_depth(depth: usize) -> std::result::Result<usize, String> {
    if depth == 0 || depth > MAX_DEPTH_LIMIT {
        return Err(format!(
            "max depth must be between 1 and {}, got {}",
            MAX_DEPTH_LIMIT, depth
        ));
    }
    Ok(depth)
}

/// Thread stack size that fits a resolution chain `depth` formulas deep.
pub fn stack_size_for_depth(depth: usize) -> usize {
    BASE_STACK_BYTES + depth.min(MAX_DEPTH_LIMIT) * STACK_BYTES_PER_LEVEL
}

/// Computed formula values keyed by cell position.
pub type ValueCache = DashMap<CellPos, i64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    pub max_depth: usize,
    pub cycle_policy: CyclePolicy,
    pub memoize: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            cycle_policy: CyclePolicy::default(),
            memoize: false,
        }
    }
}

/// Evaluates formulas against a borrowed sheet.
pub struct Evaluator<'a> {
    sheet: &'a Sheet,
    options: EvalOptions,
    cache: Option<&'a ValueCache>,
}

impl<'a> Evaluator<'a> {
    pub fn new(sheet: &'a Sheet, options: EvalOptions) -> Self {
        Evaluator {
            sheet,
            options,
            cache: None,
        }
    }

    /// Evaluator that reads and fills `cache` when `options.memoize` is set.
    pub fn with_cache(sheet: &'a Sheet, options: EvalOptions, cache: &'a ValueCache) -> Self {
        Evaluator {
            sheet,
            options,
            cache: options.memoize.then_some(cache),
        }
    }

    /// Parse and evaluate a formula that does not live in the sheet.
    pub fn evaluate_formula(&self, formula: &str) -> Result<i64> {
        let exp = Expression::parse(formula)?;
        self.calc_expression(&exp)
    }

    /// Resolve a single operand (literal or address) to an integer.
    pub fn resolve_operand(&self, operand: &str) -> Result<i64> {
        let mut trail = self.trail();
        self.resolve(operand, &mut trail)
    }

    pub fn calc_expression(&self, exp: &Expression) -> Result<i64> {
        let mut trail = self.trail();
        self.calc(exp, &mut trail)
    }

    /// Evaluate the formula stored at `pos`. The cell itself counts as the
    /// first step of the resolution chain, so loops back to it are caught.
    pub fn calc_cell(&self, pos: CellPos, exp: &Expression) -> Result<i64> {
        let mut trail = self.trail();
        let address = self
            .sheet
            .address_of(pos)
            .unwrap_or_else(|| pos.to_string());
        trail.enter(pos, &address)?;
        let value = self.calc(exp, &mut trail);
        trail.leave();
        value
    }

    fn trail(&self) -> Trail {
        Trail::new(self.options.cycle_policy, self.options.max_depth)
    }

    fn resolve(&self, operand: &str, trail: &mut Trail) -> Result<i64> {
        if let Ok(value) = operand.parse::<i64>() {
            return Ok(value);
        }

        let (pos, raw) = self.sheet.resolve(operand)?;
        if let Ok(value) = raw.parse::<i64>() {
            return Ok(value);
        }

        if let Some(value) = self.cache.and_then(|cache| cache.get(&pos).map(|v| *v)) {
            trace!(address = operand, value, "value cache hit");
            return Ok(value);
        }

        let exp = Expression::parse(raw)?;
        if exp.references(operand) {
            return Err(EvalError::SelfReferenceDetected {
                address: operand.to_string(),
                value: raw.to_string(),
            });
        }

        trace!(address = operand, formula = raw, depth = trail.depth(), "resolving");
        trail.enter(pos, operand)?;
        let value = self.calc(&exp, trail);
        trail.leave();
        let value = value?;

        if let Some(cache) = self.cache {
            cache.insert(pos, value);
        }
        Ok(value)
    }

    fn calc(&self, exp: &Expression, trail: &mut Trail) -> Result<i64> {
        let left = self.resolve(&exp.left, trail)?;
        let right = self.resolve(&exp.right, trail)?;

        exp.op.apply(left, right).ok_or_else(|| {
            let expression = exp.to_string();
            if exp.op == Operator::Div && right == 0 {
                EvalError::DivisionByZero { expression }
            } else {
                EvalError::ArithmeticOverflow { expression }
            }
        })
    }
}
