//! The single-step rewrite driver: finds the first rule (in [`RULES`][crate::rules::RULES]
//! priority order) that matches anywhere in a tree, applies it, and hands back exactly one
//! changed tree per call. [`simplify`] iterates this to a fixed point.

use std::fmt;

use crate::grammar::{Expr, FunctionCall, RcExpr};
use crate::normalize::flatten;
use crate::rules::{ChangeKind, RULES};

/// One application of a rule: the whole tree before and after, and which rule fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// The tree before this step was taken.
    pub before: RcExpr,
    /// The tree after this step was taken.
    pub after: RcExpr,
    /// Which rule fired.
    pub kind: ChangeKind,
}

/// Raised by [`simplify`]/[`step_through`] when a tree does not reach a fixed point within the
/// iteration cap; most likely two rules are rewriting a subtree back and forth.
#[derive(Clone, Debug, PartialEq)]
pub enum DriverError {
    /// No rule fired for `limit` consecutive steps without reaching a fixed point.
    RuleLoop { limit: usize, last: RcExpr },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::RuleLoop { limit, last } => write!(
                f,
                "simplification did not converge after {} steps; last tree was `{}`",
                limit, last
            ),
        }
    }
}

impl std::error::Error for DriverError {}

/// The iteration cap used by [`simplify`] and [`step_through`].
pub const MAX_STEPS: usize = 1024;

/// Tries every rule in [`RULES`] against `expr` itself, returning the first match.
fn try_rules(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    RULES.iter().find_map(|rule| rule(expr))
}

/// Performs a single rewrite step: a post-order (innermost-first) search for the first node
/// anywhere in the tree against which some rule in [`RULES`] fires. Returns `None` once no rule
/// fires anywhere, meaning `expr` is fully simplified.
///
/// The replaced subtree is re-flattened before being handed back: a rule builds only the
/// replacement for the node it matched, so a fresh `Add`/`Mult` it introduces (e.g.
/// [`distribute`][crate::rules::distribute]) may nest under a parent of the same kind.
pub fn step(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    find_step(expr).map(|(new_tree, kind)| (flatten(&new_tree), kind))
}

fn find_step(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    match expr.as_ref() {
        Expr::Const(_) | Expr::Symbol(_) => try_rules(expr),
        Expr::Operator(op) => {
            for (i, child) in op.children.iter().enumerate() {
                if let Some((new_child, kind)) = find_step(child) {
                    let mut new_children = op.children.clone();
                    new_children[i] = new_child;
                    let mut new_op = op.clone();
                    new_op.children = new_children;
                    return Some((RcExpr::new(Expr::Operator(new_op)), kind));
                }
            }
            try_rules(expr)
        }
        Expr::UnaryMinus(inner) => {
            if let Some((new_inner, kind)) = find_step(inner) {
                return Some((Expr::unary_minus(new_inner), kind));
            }
            try_rules(expr)
        }
        Expr::Parens(inner) => {
            if let Some((new_inner, kind)) = find_step(inner) {
                return Some((Expr::parens(new_inner), kind));
            }
            try_rules(expr)
        }
        Expr::Function(call) => {
            if let Some((new_arg, kind)) = find_step(&call.arg) {
                return Some((
                    RcExpr::new(Expr::Function(FunctionCall {
                        name: call.name,
                        arg: new_arg,
                    })),
                    kind,
                ));
            }
            try_rules(expr)
        }
    }
}

/// Drives `expr` to a fixed point, returning the collected trace of every step taken.
pub fn step_through(expr: &RcExpr) -> Result<Vec<Step>, DriverError> {
    let mut steps = Vec::new();
    let mut current = expr.clone();
    for _ in 0..MAX_STEPS {
        match step(&current) {
            Some((next, kind)) => {
                steps.push(Step {
                    before: current.clone(),
                    after: next.clone(),
                    kind,
                });
                current = next;
            }
            None => return Ok(steps),
        }
    }
    Err(DriverError::RuleLoop {
        limit: MAX_STEPS,
        last: current,
    })
}

/// Drives `expr` to a fixed point, returning only the final tree.
pub fn simplify(expr: &RcExpr) -> Result<RcExpr, DriverError> {
    let mut current = expr.clone();
    for _ in 0..MAX_STEPS {
        match step(&current) {
            Some((next, _)) => current = next,
            None => return Ok(current),
        }
    }
    Err(DriverError::RuleLoop {
        limit: MAX_STEPS,
        last: current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expr;

    #[test]
    fn simplifies_to_fixed_point() {
        let e = parse_expr!("2x + 3x + 1");
        let result = simplify(&e).unwrap();
        assert_eq!(result.to_string(), "5x + 1");
    }

    #[test]
    fn step_through_collects_every_intermediate_step() {
        let e = parse_expr!("1 + 2 + 3");
        let steps = step_through(&e).unwrap();
        assert!(!steps.is_empty());
        assert_eq!(steps.last().unwrap().after.to_string(), "6");
    }

    #[test]
    fn already_simplified_tree_takes_no_steps() {
        let e = parse_expr!("x + y");
        assert!(step(&e).is_none());
        let steps = step_through(&e).unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn distributes_then_combines() {
        let e = parse_expr!("2 * (x + 3)");
        let result = simplify(&e).unwrap();
        assert_eq!(result.to_string(), "2x + 6");
    }

    #[test]
    fn cancels_and_then_collapses_exponent() {
        let e = parse_expr!("x ^ 3 / x");
        let result = simplify(&e).unwrap();
        assert_eq!(result.to_string(), "x^2");
    }

    #[test]
    fn cancellation_down_to_exponent_one_drops_the_exponent() {
        let e = parse_expr!("x ^ 2 / x");
        let result = simplify(&e).unwrap();
        assert_eq!(result.to_string(), "x");
    }

    #[test]
    fn expands_and_recombines_a_squared_sum() {
        let e = parse_expr!("(x + 1) ^ 2");
        let result = simplify(&e).unwrap();
        assert_eq!(result.to_string(), "2x + x^2 + 1");
    }
}
