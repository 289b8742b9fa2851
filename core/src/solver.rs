//! Solves a single-variable linear equation or inequality by tracing the same moves a person
//! works through by hand: simplify both sides, put the variable on one side, put everything else
//! on the other, then divide out its coefficient.
//!
//! Only linear (degree-1) equations in exactly one variable are supported; anything else is
//! reported as [`SolveError::Unsolvable`] rather than guessed at.

use std::fmt;

use crate::driver::{self, DriverError};
use crate::grammar::{Comparator, Equation, Expr, Op, Operator, PolyTerm, RcExpr};
use crate::rational::Rational;
use crate::rules::ChangeKind;

/// Why an equation could not be solved, or that the driver itself failed to converge while
/// simplifying one of its sides.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// Simplifying one side of the equation failed to converge.
    Driver(DriverError),
    /// The equation is not a single-variable linear relation, or uses a symbol inconsistently.
    Unsolvable(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Driver(e) => write!(f, "{}", e),
            SolveError::Unsolvable(reason) => write!(f, "cannot solve: {}", reason),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<DriverError> for SolveError {
    fn from(e: DriverError) -> Self {
        SolveError::Driver(e)
    }
}

/// One equation-level move: the equation before and after, and which kind of move it was.
#[derive(Clone, Debug, PartialEq)]
pub struct EquationStep {
    /// The equation before this move was made.
    pub before: Equation,
    /// The equation after this move was made.
    pub after: Equation,
    /// Which kind of move was made.
    pub kind: ChangeKind,
}

/// What an equation or inequality resolves to: either an isolated `var = value` relation, or,
/// when no variable remains, a plain true/false verdict on the constants involved.
#[derive(Clone, Debug, PartialEq)]
pub enum Solved {
    /// The variable was isolated on one side.
    Equation(Equation),
    /// No variable remained; the comparator was evaluated directly on the two constant sides.
    Boolean(bool),
}

/// Solves `eq`, returning only the final, isolated equation (or boolean verdict).
pub fn solve(eq: &Equation) -> Result<Solved, SolveError> {
    let (steps, solved) = solve_steps(eq)?;
    Ok(steps
        .last()
        .map(|s| Solved::Equation(s.after.clone()))
        .unwrap_or(solved))
}

/// Solves `eq`, returning every intermediate move taken to get there along with the final
/// verdict.
pub fn solve_steps(eq: &Equation) -> Result<(Vec<EquationStep>, Solved), SolveError> {
    let mut steps = Vec::new();
    let mut current = Equation {
        lhs: driver::simplify(&eq.lhs)?,
        comparator: eq.comparator,
        rhs: driver::simplify(&eq.rhs)?,
    };

    let mut vars = Vec::new();
    collect_symbols(&current.lhs, &mut vars);
    collect_symbols(&current.rhs, &mut vars);
    vars.sort();
    vars.dedup();

    let var = match vars.len() {
        0 => {
            let lhs = current.lhs.as_const().ok_or_else(|| {
                SolveError::Unsolvable(format!("`{}` is not a constant", current.lhs))
            })?;
            let rhs = current.rhs.as_const().ok_or_else(|| {
                SolveError::Unsolvable(format!("`{}` is not a constant", current.rhs))
            })?;
            let verdict = evaluate_comparator(current.comparator, lhs, rhs);
            return Ok((steps, Solved::Boolean(verdict)));
        }
        1 => vars.into_iter().next().unwrap(),
        _ => {
            return Err(SolveError::Unsolvable(format!(
                "equation has more than one variable: {}",
                vars.join(", ")
            )))
        }
    };

    let mut lhs_vars = Vec::new();
    collect_symbols(&current.lhs, &mut lhs_vars);
    if lhs_vars.is_empty() {
        let swapped = Equation {
            lhs: current.rhs.clone(),
            comparator: current.comparator.flip_sides(),
            rhs: current.lhs.clone(),
        };
        steps.push(EquationStep {
            before: current.clone(),
            after: swapped.clone(),
            kind: ChangeKind::SwapSides,
        });
        current = swapped;
    }

    let (a1, b1) = classify_side(&current.lhs, &var)?;
    let (a2, b2) = classify_side(&current.rhs, &var)?;
    let coef = a1 - a2;

    if !a2.is_zero() {
        let after = Equation {
            lhs: poly_and_constant(coef, &var, b1),
            comparator: current.comparator,
            rhs: Expr::rational(b2),
        };
        steps.push(EquationStep {
            before: current.clone(),
            after: after.clone(),
            kind: move_kind(a2),
        });
        current = after;
    }

    if coef.is_zero() {
        // The variable cancelled out entirely; there is nothing left to isolate.
        let comparator = current.comparator;
        if a2.is_zero() {
            steps.push(EquationStep {
                before: current.clone(),
                after: Equation {
                    lhs: Expr::rational(b1),
                    comparator,
                    rhs: Expr::rational(b2),
                },
                kind: ChangeKind::SubtractFromBothSides,
            });
        }
        return Ok((steps, Solved::Boolean(evaluate_comparator(comparator, b1, b2))));
    }

    if !b1.is_zero() {
        let after = Equation {
            lhs: poly_and_constant(coef, &var, Rational::from_int(0)),
            comparator: current.comparator,
            rhs: Expr::rational(b2 - b1),
        };
        steps.push(EquationStep {
            before: current.clone(),
            after: after.clone(),
            kind: move_kind(b1),
        });
        current = after;
    }

    if !coef.is_zero() && !coef.is_one() {
        let value = (b2 - b1) / coef;
        let comparator = if coef.is_negative() {
            current.comparator.negate_direction()
        } else {
            current.comparator
        };
        let after = Equation {
            lhs: Expr::symbol(var),
            comparator,
            rhs: Expr::rational(value),
        };
        steps.push(EquationStep {
            before: current.clone(),
            after: after.clone(),
            kind: ChangeKind::DivideFromBothSides,
        });
        current = after;
    }

    Ok((steps, Solved::Equation(current)))
}

/// Evaluates a comparator directly on two constant sides, once no variable remains to isolate.
fn evaluate_comparator(comparator: Comparator, lhs: Rational, rhs: Rational) -> bool {
    match comparator {
        Comparator::Eq => lhs == rhs,
        Comparator::Lt => lhs < rhs,
        Comparator::Le => lhs <= rhs,
        Comparator::Gt => lhs > rhs,
        Comparator::Ge => lhs >= rhs,
    }
}

/// Eliminating a positive term from a side means subtracting it from both sides; eliminating a
/// negative one means adding its absolute value to both.
fn move_kind(eliminated: Rational) -> ChangeKind {
    if eliminated.is_negative() {
        ChangeKind::AddToBothSides
    } else {
        ChangeKind::SubtractFromBothSides
    }
}

/// Builds `coefficient * var + constant`, omitting either part when it is zero.
fn poly_and_constant(coefficient: Rational, var: &str, constant: Rational) -> RcExpr {
    let var_part = if coefficient.is_zero() {
        None
    } else {
        Some(
            PolyTerm {
                coefficient,
                symbol: var.to_string(),
                exponent: None,
            }
            .into_expr(),
        )
    };

    match (var_part, constant.is_zero()) {
        (Some(v), true) => v,
        (Some(v), false) => Expr::operator(Op::Add, vec![v, Expr::rational(constant)]),
        (None, _) => Expr::rational(constant),
    }
}

/// Views a (already simplified) side as `coefficient * var + constant`.
fn classify_side(expr: &RcExpr, var: &str) -> Result<(Rational, Rational), SolveError> {
    let children: Vec<RcExpr> = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Add,
            children,
            ..
        }) => children.clone(),
        _ => vec![expr.clone()],
    };

    let mut var_coef = Rational::from_int(0);
    let mut constant = Rational::from_int(0);

    for child in children {
        if let Some(c) = child.as_const() {
            constant = constant + c;
            continue;
        }
        if let Some(term) = PolyTerm::from_expr(&child) {
            if term.symbol != var {
                return Err(SolveError::Unsolvable(format!(
                    "equation has more than one variable: {}, {}",
                    var, term.symbol
                )));
            }
            match &term.exponent {
                None => var_coef = var_coef + term.coefficient,
                Some(e) if e.as_const() == Some(Rational::from_int(1)) => {
                    var_coef = var_coef + term.coefficient
                }
                Some(_) => {
                    return Err(SolveError::Unsolvable(format!(
                        "`{}` is not linear in `{}`",
                        expr, var
                    )))
                }
            }
            continue;
        }
        return Err(SolveError::Unsolvable(format!(
            "don't know how to isolate a variable across `{}`",
            child
        )));
    }

    Ok((var_coef, constant))
}

fn collect_symbols(expr: &RcExpr, out: &mut Vec<String>) {
    match expr.as_ref() {
        Expr::Const(_) => {}
        Expr::Symbol(name) => out.push(name.clone()),
        Expr::Operator(op) => op.children.iter().for_each(|c| collect_symbols(c, out)),
        Expr::UnaryMinus(inner) | Expr::Parens(inner) => collect_symbols(inner, out),
        Expr::Function(call) => collect_symbols(&call.arg, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, Stmt};

    fn parse_eq(s: &str) -> Equation {
        match parse(s).unwrap() {
            Stmt::Equation(eq) => eq,
            _ => panic!("expected an equation"),
        }
    }

    fn expect_equation(solved: Solved) -> Equation {
        match solved {
            Solved::Equation(eq) => eq,
            Solved::Boolean(b) => panic!("expected an isolated equation, got Boolean({})", b),
        }
    }

    #[test]
    fn solves_simple_linear_equation() {
        let eq = parse_eq("2x + 1 = 5");
        let solved = expect_equation(solve(&eq).unwrap());
        assert_eq!(solved.comparator, Comparator::Eq);
        assert_eq!(solved.lhs.to_string(), "x");
        assert_eq!(solved.rhs.to_string(), "2");
    }

    #[test]
    fn solves_with_variable_on_both_sides() {
        let eq = parse_eq("2x + 1 = x + 4");
        let solved = expect_equation(solve(&eq).unwrap());
        assert_eq!(solved.lhs.to_string(), "x");
        assert_eq!(solved.rhs.to_string(), "3");
    }

    #[test]
    fn flips_comparator_on_negative_coefficient() {
        let eq = parse_eq("-x < 2");
        let solved = expect_equation(solve(&eq).unwrap());
        assert_eq!(solved.comparator, Comparator::Gt);
        assert_eq!(solved.rhs.to_string(), "-2");
    }

    #[test]
    fn unsolvable_for_quadratic() {
        let eq = parse_eq("x ^ 2 = 4");
        assert!(matches!(solve(&eq), Err(SolveError::Unsolvable(_))));
    }

    #[test]
    fn unsolvable_for_multiple_variables() {
        let eq = parse_eq("x + y = 1");
        assert!(matches!(solve(&eq), Err(SolveError::Unsolvable(_))));
    }

    #[test]
    fn degenerate_identity_is_always_true() {
        let eq = parse_eq("x + 1 = x + 1");
        assert_eq!(solve(&eq).unwrap(), Solved::Boolean(true));
    }

    #[test]
    fn constant_only_equation_is_evaluated_directly() {
        let eq = parse_eq("1 < 2");
        assert_eq!(solve(&eq).unwrap(), Solved::Boolean(true));
    }

    #[test]
    fn constant_only_equation_can_be_false() {
        let eq = parse_eq("3 = 4");
        assert_eq!(solve(&eq).unwrap(), Solved::Boolean(false));
    }

    #[test]
    fn solve_steps_swaps_when_variable_is_on_the_right() {
        let eq = parse_eq("5 = x + 1");
        let (steps, solved) = solve_steps(&eq).unwrap();
        assert_eq!(steps[0].kind, ChangeKind::SwapSides);
        assert_eq!(steps.last().unwrap().after.rhs.to_string(), "4");
        assert_eq!(expect_equation(solved).rhs.to_string(), "4");
    }

    #[test]
    fn solve_steps_records_every_move() {
        let eq = parse_eq("2x + 1 = x + 4");
        let (steps, _) = solve_steps(&eq).unwrap();
        let kinds: Vec<_> = steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::SubtractFromBothSides,
                ChangeKind::SubtractFromBothSides,
            ]
        );
    }
}
