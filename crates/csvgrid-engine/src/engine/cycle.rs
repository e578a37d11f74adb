//! Reference-loop protection for recursive formula resolution.
//!
//! Every formula cell entered during resolution is pushed onto a [`Trail`].
//! The trail bounds the nesting depth and, under [`CyclePolicy::Full`], keeps
//! a set of cells currently being resolved so that revisiting one is reported
//! with the full loop instead of recursing until the depth limit.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::error::{EvalError, Result};
use super::sheet::CellPos;

/// How aggressively reference loops are detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Only a formula naming its own address is rejected. Longer loops run
    /// until the depth limit.
    #[default]
    SelfOnly,
    /// Any loop, however long, is rejected as soon as it closes.
    Full,
}

impl FromStr for CyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "self" | "self-only" => Ok(CyclePolicy::SelfOnly),
            "full" => Ok(CyclePolicy::Full),
            other => Err(format!(
                "Unknown cycle detection mode: {} (expected self or full)",
                other
            )),
        }
    }
}

impl fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CyclePolicy::SelfOnly => write!(f, "self"),
            CyclePolicy::Full => write!(f, "full"),
        }
    }
}

/// The chain of formula cells currently being resolved.
#[derive(Debug)]
pub(crate) struct Trail {
    policy: CyclePolicy,
    limit: usize,
    visiting: HashSet<CellPos>,
    path: Vec<(CellPos, String)>,
}

impl Trail {
    pub(crate) fn new(policy: CyclePolicy, limit: usize) -> Self {
        Trail {
            policy,
            limit,
            visiting: HashSet::new(),
            path: Vec::new(),
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.path.len()
    }

    /// Push a formula cell. Fails if that would close a loop (full policy) or
    /// exceed the depth limit.
    pub(crate) fn enter(&mut self, pos: CellPos, address: &str) -> Result<()> {
        if self.policy == CyclePolicy::Full && self.visiting.contains(&pos) {
            let start = self
                .path
                .iter()
                .position(|(p, _)| *p == pos)
                .unwrap_or_default();
            let mut path: Vec<String> =
                self.path[start..].iter().map(|(_, a)| a.clone()).collect();
            path.push(address.to_string());
            return Err(EvalError::CircularReference { path });
        }

        if self.path.len() >= self.limit {
            return Err(EvalError::RecursionTooDeep {
                address: address.to_string(),
                limit: self.limit,
            });
        }

        if self.policy == CyclePolicy::Full {
            self.visiting.insert(pos);
        }
        self.path.push((pos, address.to_string()));
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        if let Some((pos, _)) = self.path.pop() {
            self.visiting.remove(&pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_policy_reports_loop_path() {
        let mut trail = Trail::new(CyclePolicy::Full, 10);
        trail.enter(CellPos::new(1, 1), "A1").unwrap();
        trail.enter(CellPos::new(2, 1), "A2").unwrap();
        trail.enter(CellPos::new(3, 1), "A3").unwrap();
        let err = trail.enter(CellPos::new(2, 1), "A2").unwrap_err();
        assert_eq!(
            err,
            EvalError::CircularReference {
                path: vec!["A2".into(), "A3".into(), "A2".into()]
            }
        );
    }

    #[test]
    fn test_self_only_policy_allows_revisit_until_limit() {
        let mut trail = Trail::new(CyclePolicy::SelfOnly, 3);
        trail.enter(CellPos::new(1, 1), "A1").unwrap();
        trail.enter(CellPos::new(2, 1), "A2").unwrap();
        trail.enter(CellPos::new(1, 1), "A1").unwrap();
        let err = trail.enter(CellPos::new(2, 1), "A2").unwrap_err();
        assert_eq!(
            err,
            EvalError::RecursionTooDeep {
                address: "A2".into(),
                limit: 3
            }
        );
    }

    #[test]
    fn test_leave_allows_sibling_reuse() {
        let mut trail = Trail::new(CyclePolicy::Full, 10);
        trail.enter(CellPos::new(1, 1), "A1").unwrap();
        trail.enter(CellPos::new(2, 1), "A2").unwrap();
        trail.leave();
        assert_eq!(trail.depth(), 1);
        // A diamond (A1 -> A2, A1 -> A2 again) is not a loop.
        trail.enter(CellPos::new(2, 1), "A2").unwrap();
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("full".parse::<CyclePolicy>(), Ok(CyclePolicy::Full));
        assert_eq!(" Self ".parse::<CyclePolicy>(), Ok(CyclePolicy::SelfOnly));
        assert!("sometimes".parse::<CyclePolicy>().is_err());
    }
}
