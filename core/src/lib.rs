//! stepalg-core is the rewrite engine at the heart of stepalg, a calculator that shows its work.
//!
//! Given a program like `2x + 3x + 1` or `2x + 1 = 5`, stepalg-core parses it into an expression
//! tree, then either simplifies it to a fixed point or isolates its variable, one rule
//! application at a time. Every intermediate tree is kept, so a caller can show a full
//! derivation rather than just a final answer.
//!
//! ## Architecture
//!
//! The pipeline has four stages, each its own module:
//!
//! - [`scanner`] tokenizes source text, producing [`diagnostics::Diagnostic`]s for anything it
//!   cannot lex.
//! - [`parser`] is a hand-written, precedence-climbing recursive-descent parser that turns
//!   tokens into a [`grammar::Stmt`]: either a bare expression or an equation/inequality.
//! - [`normalize`] enforces the invariants the rule library relies on: `+`/`*` chains are n-ary
//!   and flat, `a - b` is `a + (-b)`, and redundant parentheses are gone.
//! - [`rules`] is a library of independent, single-node rewrite functions; [`driver`] applies
//!   them one at a time to a fixed point, and [`solver`] layers equation isolation on top of
//!   that.
//!
//! [`emit`] renders a tree back out as ASCII math, an S-expression debug form, or LaTeX.
//!
//! ## Expression representation
//!
//! Expressions are held behind [`grammar::RcExpr`] (a plain `Rc<Expr>`), not interned in a
//! global table: two calls to [`parse`] never need to share structure, so there is no benefit to
//! interning and a real cost to the shared mutable state a global interner would require.
//!
//! Constants are exact [`rational::Rational`]s rather than floats: a rewrite engine that shows
//! its steps must never let `0.1 + 0.2` drift from what a person expects.
//!
//! ## Rules
//!
//! Each rule in [`rules`] has the signature
//!
//! ```ignore
//! fn(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)>
//! ```
//!
//! and is given a single node (never a whole tree) to examine. It returns `None` if it doesn't
//! apply, or the node's replacement tagged with a [`rules::ChangeKind`] describing what kind of
//! step was taken. Keeping a rule's scope to one node is what makes each one independently
//! readable, testable, and obviously terminating; [`driver::step`] is the only thing that
//! searches a whole tree, trying [`rules::RULES`] in priority order at each node until one fires.

#![deny(missing_docs)]

mod common;
pub use common::*;

pub mod diagnostics;
use diagnostics::Diagnostic;

pub mod scanner;
pub use scanner::scan;

mod parser;
pub use parser::parse_expression;

pub mod grammar;
pub use grammar::{
    Comparator, Equation, Expr, FunctionCall, FunctionName, Op, Operator, PolyTerm, RcExpr, Stmt,
};

pub mod rational;
pub use rational::Rational;

pub mod normalize;

pub mod rules;
pub use rules::ChangeKind;

pub mod driver;
pub use driver::{simplify, step, step_through, DriverError, Step};

pub mod solver;
pub use solver::{solve, solve_steps, EquationStep, Solved, SolveError};

pub mod emit;
pub use emit::{Emit, EmitFormat};

pub mod visitor;

mod math;

mod utils;

/// Parses and flattens `input`, the single entry point the rest of the crate is built around.
///
/// Returns every diagnostic collected while scanning or parsing as `Err` the moment either stage
/// produces one; a caller that wants best-effort recovery should call [`scan`] and
/// [`parse_expression`] directly instead.
pub fn parse(input: &str) -> Result<Stmt, Vec<Diagnostic>> {
    let scanned = scan(input);
    if !scanned.diagnostics.is_empty() {
        return Err(scanned.diagnostics);
    }

    let (stmt, diagnostics) = parse_expression(scanned.tokens);
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    Ok(match stmt {
        Stmt::Expr(e) => Stmt::Expr(normalize::flatten(&e)),
        Stmt::Equation(eq) => Stmt::Equation(Equation {
            lhs: normalize::flatten(&eq.lhs),
            comparator: eq.comparator,
            rhs: normalize::flatten(&eq.rhs),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flattens_the_result() {
        let stmt = parse("1 + (2 + 3)").unwrap();
        match stmt {
            Stmt::Expr(e) => assert_eq!(e.to_string(), "1 + 2 + 3"),
            other => panic!("expected an expression, got {:?}", other),
        }
    }

    #[test]
    fn parse_surfaces_scan_diagnostics() {
        let err = parse("1 + @").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].code, "S0001");
    }

    #[test]
    fn parse_surfaces_parse_diagnostics() {
        let err = parse("1 + 2 3").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].code, "P0001");
    }

    #[test]
    fn end_to_end_simplify_and_solve() {
        let stmt = parse("2x + 1 = 5").unwrap();
        let eq = match stmt {
            Stmt::Equation(eq) => eq,
            _ => unreachable!(),
        };
        let solved = match solve(&eq).unwrap() {
            Solved::Equation(eq) => eq,
            Solved::Boolean(b) => panic!("expected an isolated equation, got Boolean({})", b),
        };
        assert_eq!(solved.lhs.to_string(), "x");
        assert_eq!(solved.rhs.to_string(), "2");
    }
}
