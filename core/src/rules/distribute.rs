use super::ChangeKind;
use crate::grammar::{Expr, Op, Operator, RcExpr};

/// Caps how large an exponent [`distribute_exp`] will expand into a product, so a typo like
/// `x ^ 1000` doesn't blow up a single step into a thousand-term multiplication.
const MAX_EXPANDED_EXPONENT: i64 = 6;

/// Finds a parenthesized (or bare) sum among the factors of an n-ary `*` and distributes every
/// other factor across it, or expands a small positive integer power of a sum.
pub fn distribute(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    distribute_mult(expr).or_else(|| distribute_exp(expr))
}

/// `a * (b + c) => a*b + a*c`.
fn distribute_mult(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let children = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Mult,
            children,
            ..
        }) if children.len() >= 2 => children,
        _ => return None,
    };

    for (i, child) in children.iter().enumerate() {
        if let Some(sum_children) = as_sum(child) {
            let rest: Vec<RcExpr> = children
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, c)| c.clone())
                .collect();
            let rest_factor = if rest.len() == 1 {
                rest.into_iter().next().unwrap()
            } else {
                Expr::operator(Op::Mult, rest)
            };

            let distributed: Vec<RcExpr> = sum_children
                .iter()
                .map(|term| Expr::operator(Op::Mult, vec![rest_factor.clone(), term.clone()]))
                .collect();

            return Some((Expr::operator(Op::Add, distributed), ChangeKind::Distribute));
        }
    }
    None
}

/// `(b + c) ^ n => (b + c) * (b + c) * ... * (b + c)` (`n` factors), for a small positive
/// integer `n`. Leaves the multiplication for [`distribute_mult`] (or `multiply_like_terms`) to
/// take from there, one step at a time.
fn distribute_exp(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let (base, exponent) = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Exp,
            children,
            ..
        }) if children.len() == 2 => (&children[0], &children[1]),
        _ => return None,
    };
    as_sum(base)?;
    let exponent = exponent.as_const()?;
    if !exponent.is_integer() {
        return None;
    }
    let n = exponent.numer();
    if n <= 1 || n > MAX_EXPANDED_EXPONENT {
        return None;
    }
    let factors = vec![base.clone(); n as usize];
    Some((Expr::operator(Op::Mult, factors), ChangeKind::Distribute))
}

/// Returns the children of an `Op::Add` node, looking through at most one layer of parentheses.
fn as_sum(expr: &RcExpr) -> Option<&Vec<RcExpr>> {
    match expr.unwrap_parens().as_ref() {
        Expr::Operator(Operator {
            op: Op::Add,
            children,
            ..
        }) => Some(children),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expr;

    #[test]
    fn distributes_over_parenthesized_sum() {
        let e = parse_expr!("2 * (x + 3)");
        let (result, kind) = distribute(&e).unwrap();
        assert_eq!(kind, ChangeKind::Distribute);
        assert_eq!(result.to_string(), "2x + 2·3");
    }

    #[test]
    fn does_not_fire_without_a_sum_factor() {
        let e = parse_expr!("2 * x * y");
        assert!(distribute(&e).is_none());
    }

    #[test]
    fn expands_square_of_a_sum() {
        let e = parse_expr!("(x + 1) ^ 2");
        let (result, kind) = distribute(&e).unwrap();
        assert_eq!(kind, ChangeKind::Distribute);
        assert_eq!(result.to_string(), "(x + 1)·(x + 1)");
    }

    #[test]
    fn does_not_expand_non_integer_or_oversized_exponents() {
        let e = parse_expr!("(x + 1) ^ 20");
        assert!(distribute(&e).is_none());
    }

    #[test]
    fn does_not_expand_exponent_of_a_plain_symbol() {
        let e = parse_expr!("x ^ 2");
        assert!(distribute(&e).is_none());
    }
}
