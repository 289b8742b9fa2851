use super::ChangeKind;
use crate::grammar::{Expr, Op, Operator, PolyTerm, RcExpr};
use crate::rational::Rational;

/// Groups children of an n-ary `+` by `(symbol, exponent)` and, for any group of two or more,
/// collapses it to a single polynomial term whose coefficient is the sum of the group's
/// coefficients. Non-polynomial-term children are left untouched.
pub fn combine_like_terms(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let children = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Add,
            children,
            ..
        }) if children.len() >= 2 => children,
        _ => return None,
    };

    let terms: Vec<Option<PolyTerm>> = children.iter().map(PolyTerm::from_expr).collect();

    // Find the first group of >= 2 terms sharing a (symbol, exponent) key.
    for i in 0..terms.len() {
        let Some(term_i) = &terms[i] else { continue };
        let mut group = vec![i];
        for (j, term_j) in terms.iter().enumerate().skip(i + 1) {
            if let Some(term_j) = term_j {
                if term_j.symbol == term_i.symbol && term_j.exponent == term_i.exponent {
                    group.push(j);
                }
            }
        }
        if group.len() < 2 {
            continue;
        }

        let mut coefficient = Rational::from_int(0);
        for &idx in &group {
            coefficient = coefficient + terms[idx].as_ref().unwrap().coefficient;
        }
        let combined = PolyTerm {
            coefficient,
            symbol: term_i.symbol.clone(),
            exponent: term_i.exponent.clone(),
        }
        .into_expr();

        let mut new_children = Vec::with_capacity(children.len() - group.len() + 1);
        new_children.push(combined);
        for (k, child) in children.iter().enumerate() {
            if !group.contains(&k) {
                new_children.push(child.clone());
            }
        }
        let result = if new_children.len() == 1 {
            new_children.pop().unwrap()
        } else {
            Expr::operator(Op::Add, new_children)
        };
        return Some((result, ChangeKind::CombineLikeTerms));
    }
    None
}

/// Groups children of an n-ary `*` by symbol (ignoring exponent) and, for any group of two or
/// more, collapses it to `symbol ^ (sum of exponents)` with coefficients multiplied together.
pub fn multiply_like_terms(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let children = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Mult,
            children,
            ..
        }) if children.len() >= 2 => children,
        _ => return None,
    };

    let terms: Vec<Option<PolyTerm>> = children.iter().map(PolyTerm::from_expr).collect();

    for i in 0..terms.len() {
        let Some(term_i) = &terms[i] else { continue };
        let mut group = vec![i];
        for (j, term_j) in terms.iter().enumerate().skip(i + 1) {
            if let Some(term_j) = term_j {
                if term_j.symbol == term_i.symbol {
                    group.push(j);
                }
            }
        }
        if group.len() < 2 {
            continue;
        }

        let mut coefficient = Rational::from_int(1);
        let mut exponent_terms: Vec<RcExpr> = Vec::with_capacity(group.len());
        for &idx in &group {
            let t = terms[idx].as_ref().unwrap();
            coefficient = coefficient * t.coefficient;
            match &t.exponent {
                Some(e) => exponent_terms.push(e.clone()),
                None => exponent_terms.push(Expr::constant(1)),
            }
        }
        // Exponents are exact rationals as often as not (a bare symbol contributes an implicit
        // `1`); sum them directly rather than deferring to a follow-up arithmetic step.
        let exponent = match exponent_terms.iter().map(|e| e.as_const()).collect::<Option<Vec<_>>>() {
            Some(consts) => Expr::rational(consts.into_iter().fold(Rational::from_int(0), |a, b| a + b)),
            None if exponent_terms.len() == 1 => exponent_terms.pop().unwrap(),
            None => Expr::operator(Op::Add, exponent_terms),
        };
        let combined = PolyTerm {
            coefficient,
            symbol: term_i.symbol.clone(),
            exponent: Some(exponent),
        }
        .into_expr();

        let mut new_children = Vec::with_capacity(children.len() - group.len() + 1);
        new_children.push(combined);
        for (k, child) in children.iter().enumerate() {
            if !group.contains(&k) {
                new_children.push(child.clone());
            }
        }
        let result = if new_children.len() == 1 {
            new_children.pop().unwrap()
        } else {
            Expr::operator(Op::Mult, new_children)
        };
        return Some((result, ChangeKind::MultiplyPolyTerms));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expr;

    #[test]
    fn combines_simple_like_terms() {
        let e = parse_expr!("2x + 3x");
        let (result, kind) = combine_like_terms(&e).unwrap();
        assert_eq!(kind, ChangeKind::CombineLikeTerms);
        assert_eq!(result.to_string(), "5x");
    }

    #[test]
    fn combines_with_bystander() {
        let e = parse_expr!("2x + 1 + 3x");
        let (result, _) = combine_like_terms(&e).unwrap();
        assert_eq!(result.to_string(), "5x + 1");
    }

    #[test]
    fn does_not_combine_unlike_terms() {
        let e = parse_expr!("2x + 3y");
        assert!(combine_like_terms(&e).is_none());
    }

    #[test]
    fn multiplies_like_terms() {
        let e = parse_expr!("2x * 3x");
        let (result, kind) = multiply_like_terms(&e).unwrap();
        assert_eq!(kind, ChangeKind::MultiplyPolyTerms);
        assert_eq!(result.to_string(), "6x^2");
    }

    #[test]
    fn multiplies_plain_symbols() {
        let e = parse_expr!("x * x");
        let (result, _) = multiply_like_terms(&e).unwrap();
        assert_eq!(result.to_string(), "x^2");
    }
}
