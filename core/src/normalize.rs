//! Normalization passes applied once after parsing, and re-applied to any subtree a rule
//! produces that might violate the flatness or canonical-sign invariants.

use std::rc::Rc;

use crate::grammar::*;

/// Normalizes a tree to satisfy the flatness and canonical-sign invariants:
/// - `a + (b + c)` collapses into a single n-ary `+`.
/// - `a * (b * c)` collapses similarly.
/// - `a - b` becomes `a + (-b)`.
/// - `a / b / c` becomes `a / (b * c)`.
/// - Redundant parentheses are removed.
pub fn flatten(expr: &RcExpr) -> RcExpr {
    let desubbed = eliminate_sub(expr);
    let collapsed = flatten_nary(&desubbed);
    let grouped = group_division(&collapsed);
    let reflattened = flatten_nary(&grouped);
    remove_unnecessary_parens(&reflattened)
}

/// Rewrites every binary `Op::Sub` as `a + UnaryMinus(b)`.
fn eliminate_sub(expr: &RcExpr) -> RcExpr {
    match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Sub,
            children,
            ..
        }) if children.len() == 2 => {
            let lhs = eliminate_sub(&children[0]);
            let rhs = eliminate_sub(&children[1]);
            Expr::operator(Op::Add, vec![lhs, Expr::unary_minus(rhs)])
        }
        Expr::Operator(op) => {
            let children = op.children.iter().map(eliminate_sub).collect();
            Rc::new(Expr::Operator(Operator {
                op: op.op,
                children,
            }))
        }
        Expr::UnaryMinus(inner) => Expr::unary_minus(eliminate_sub(inner)),
        Expr::Parens(inner) => Expr::parens(eliminate_sub(inner)),
        Expr::Function(call) => Rc::new(Expr::Function(FunctionCall {
            name: call.name,
            arg: eliminate_sub(&call.arg),
        })),
        Expr::Const(_) | Expr::Symbol(_) => expr.clone(),
    }
}

/// Collapses nested same-operator `+`/`*` chains into one n-ary node, bottom-up.
fn flatten_nary(expr: &RcExpr) -> RcExpr {
    match expr.as_ref() {
        Expr::Operator(op) if op.op.is_flattenable() => {
            let mut children = Vec::with_capacity(op.children.len());
            for child in &op.children {
                let child = flatten_nary(child);
                match child.as_ref() {
                    Expr::Operator(inner) if inner.op == op.op => {
                        children.extend(inner.children.iter().cloned());
                    }
                    _ => children.push(child),
                }
            }
            Expr::operator(op.op, children)
        }
        Expr::Operator(op) => {
            let children = op.children.iter().map(flatten_nary).collect();
            Rc::new(Expr::Operator(Operator {
                op: op.op,
                children,
            }))
        }
        Expr::UnaryMinus(inner) => Expr::unary_minus(flatten_nary(inner)),
        Expr::Parens(inner) => Expr::parens(flatten_nary(inner)),
        Expr::Function(call) => Rc::new(Expr::Function(FunctionCall {
            name: call.name,
            arg: flatten_nary(&call.arg),
        })),
        Expr::Const(_) | Expr::Symbol(_) => expr.clone(),
    }
}

/// Rewrites a chain of left-nested divisions into one division by a product: `a / b / c`, which
/// the parser builds as `Div(Div(a, b), c)`, becomes `Div(a, Mult(b, c))`.
fn group_division(expr: &RcExpr) -> RcExpr {
    match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Div,
            children,
            ..
        }) if children.len() == 2 => {
            let lhs = group_division(&children[0]);
            let rhs = group_division(&children[1]);
            match lhs.as_ref() {
                Expr::Operator(Operator {
                    op: Op::Div,
                    children: inner,
                    ..
                }) if inner.len() == 2 => {
                    Expr::binary(Op::Div, inner[0].clone(), Expr::operator(Op::Mult, vec![inner[1].clone(), rhs]))
                }
                _ => Expr::binary(Op::Div, lhs, rhs),
            }
        }
        Expr::Operator(op) => {
            let children = op.children.iter().map(group_division).collect();
            Rc::new(Expr::Operator(Operator {
                op: op.op,
                children,
            }))
        }
        Expr::UnaryMinus(inner) => Expr::unary_minus(group_division(inner)),
        Expr::Parens(inner) => Expr::parens(group_division(inner)),
        Expr::Function(call) => Rc::new(Expr::Function(FunctionCall {
            name: call.name,
            arg: group_division(&call.arg),
        })),
        Expr::Const(_) | Expr::Symbol(_) => expr.clone(),
    }
}

/// Strips a [`Expr::Parens`] wrapper when it carries no grouping information that its parent
/// doesn't already make explicit: at the root, directly under another `Parens`, or around a
/// single leaf.
pub fn remove_unnecessary_parens(expr: &RcExpr) -> RcExpr {
    match expr.as_ref() {
        Expr::Parens(inner) => {
            let inner = remove_unnecessary_parens(inner);
            match inner.as_ref() {
                Expr::Const(_) | Expr::Symbol(_) | Expr::Parens(_) => inner,
                _ => Expr::parens(inner),
            }
        }
        Expr::Operator(op) => {
            let children = op.children.iter().map(remove_unnecessary_parens).collect();
            Rc::new(Expr::Operator(Operator {
                op: op.op,
                children,
            }))
        }
        Expr::UnaryMinus(inner) => Expr::unary_minus(remove_unnecessary_parens(inner)),
        Expr::Function(call) => Rc::new(Expr::Function(FunctionCall {
            name: call.name,
            arg: remove_unnecessary_parens(&call.arg),
        })),
        Expr::Const(_) | Expr::Symbol(_) => expr.clone(),
    }
}

/// Folds a subtree all of whose leaves are constants into a single constant, using exact
/// rational arithmetic. Returns `None` if no folding occurred (not all-constant, or already a
/// single constant).
pub fn arithmetic_search(expr: &RcExpr) -> Option<RcExpr> {
    use crate::rational::Rational;

    fn eval(expr: &RcExpr) -> Option<Rational> {
        match expr.as_ref() {
            Expr::Const(r) => Some(*r),
            Expr::UnaryMinus(inner) => eval(inner).map(|r| -r),
            Expr::Parens(inner) => eval(inner),
            Expr::Operator(Operator { op, children, .. }) => {
                let mut vals = children.iter().map(eval);
                let first = vals.next()??;
                match op {
                    Op::Add => vals.try_fold(first, |acc, v| Some(acc + v?)),
                    Op::Mult => vals.try_fold(first, |acc, v| Some(acc * v?)),
                    Op::Sub if children.len() == 2 => Some(first - vals.next()??),
                    // Division of constants is deliberately left to the dedicated fraction rules
                    // (`simplify_fraction`, `add_constant_fractions`, ...), which expose the
                    // common-denominator step instead of folding straight to a single value.
                    Op::Div => None,
                    Op::Exp if children.len() == 2 => {
                        let exp = vals.next()??;
                        if !exp.is_integer() || exp.numer() < 0 {
                            return None;
                        }
                        let mut acc = Rational::from_int(1);
                        for _ in 0..exp.numer() {
                            acc = acc * first;
                        }
                        Some(acc)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    match expr.as_ref() {
        Expr::Const(_) => None,
        _ => eval(expr).map(Expr::rational),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, Stmt};

    fn parse_expr(s: &str) -> RcExpr {
        match parse(s).unwrap() {
            Stmt::Expr(e) => e,
            _ => unreachable!(),
        }
    }

    #[test]
    fn flattens_nested_addition() {
        let e = flatten(&parse_expr("1 + 2 + 3"));
        match e.as_ref() {
            Expr::Operator(Operator { op: Op::Add, children, .. }) => {
                assert_eq!(children.len(), 3);
            }
            other => panic!("expected flattened Add, got {:?}", other),
        }
    }

    #[test]
    fn subtraction_becomes_unary_minus() {
        let e = flatten(&parse_expr("1 - 2"));
        match e.as_ref() {
            Expr::Operator(Operator { op: Op::Add, children, .. }) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[1].as_ref(), Expr::UnaryMinus(_)));
            }
            other => panic!("expected Add(1, -2), got {:?}", other),
        }
    }

    #[test]
    fn chained_division_groups_into_single_denominator() {
        let e = flatten(&parse_expr("x / y / z"));
        match e.as_ref() {
            Expr::Operator(Operator { op: Op::Div, children, .. }) => {
                assert_eq!(children[0].to_string(), "x");
                match children[1].as_ref() {
                    Expr::Operator(Operator { op: Op::Mult, children, .. }) => {
                        assert_eq!(children.len(), 2);
                        assert_eq!(children[0].to_string(), "y");
                        assert_eq!(children[1].to_string(), "z");
                    }
                    other => panic!("expected Mult(y, z), got {:?}", other),
                }
            }
            other => panic!("expected Div(x, Mult(y, z)), got {:?}", other),
        }
    }

    #[test]
    fn arithmetic_search_folds_all_constant_subtree() {
        let e = parse_expr("2 + 3 * 4");
        let folded = arithmetic_search(&e).expect("fully constant subtree should fold");
        assert_eq!(folded.to_string(), "14");
    }

    #[test]
    fn arithmetic_search_skips_tree_with_a_symbol() {
        let e = parse_expr("2 + 3 * x");
        assert_eq!(arithmetic_search(&e), None);
    }
}
