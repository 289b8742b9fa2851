use super::ChangeKind;
use crate::grammar::{Expr, Op, Operator, RcExpr};
use crate::rational::Rational;

fn fraction_parts(expr: &RcExpr) -> Option<(Rational, Rational)> {
    match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Div,
            children,
            ..
        }) if children.len() == 2 => Some((children[0].as_const()?, children[1].as_const()?)),
        _ => None,
    }
}

/// A constant fraction whose numerator and denominator share a common factor reduces it, and
/// collapses to a bare integer when the denominator becomes 1.
pub fn simplify_fraction(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let (numer, denom) = fraction_parts(expr)?;
    let reduced = Rational::new(numer.numer(), denom.numer());
    if reduced.denom() == denom.numer() && reduced.numer() == numer.numer() {
        return None; // already reduced
    }
    Some((Expr::rational(reduced), ChangeKind::SimplifyFraction))
}

/// Adds an n-ary `+` all of whose children are constant fractions (or bare constants). If every
/// denominator already matches, emits the unevaluated sum of the numerators over that shared
/// denominator; otherwise first rewrites every fraction over the LCM of all denominators as
/// `(num · f)/(den · f)` and reports that as the (separate) step. Either way the arithmetic rule
/// folds the numerator/denominator products on a later step; this rule only ever regroups.
pub fn add_constant_fractions(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let children = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Add,
            children,
            ..
        }) if children.len() >= 2 => children,
        _ => return None,
    };

    let parts: Option<Vec<(Rational, Rational)>> = children
        .iter()
        .map(|c| match fraction_parts(c) {
            Some(p) => Some(p),
            None => c.as_const().map(|n| (n, Rational::from_int(1))),
        })
        .collect();
    let parts = parts?;
    // Only fire when at least one child is a genuine fraction; otherwise arithmetic_collapse
    // already handles the all-integer case.
    if !parts.iter().any(|(_, d)| !d.is_one()) {
        return None;
    }

    let denoms: Vec<i64> = parts.iter().map(|(_, d)| d.numer()).collect();
    let lcm = denoms.iter().copied().fold(1, Rational::lcm);

    if denoms.iter().all(|&d| d == lcm) {
        let numer_sum = Expr::operator(
            Op::Add,
            parts.iter().map(|(n, _)| Expr::rational(*n)).collect(),
        );
        return Some((
            Expr::binary(Op::Div, numer_sum, Expr::rational(Rational::from_int(lcm))),
            ChangeKind::AddFractions,
        ));
    }

    let rewritten: Vec<RcExpr> = parts
        .iter()
        .map(|(n, d)| {
            let factor = Expr::rational(Rational::from_int(lcm / d.numer()));
            let numer = Expr::operator(Op::Mult, vec![Expr::rational(*n), factor.clone()]);
            let denom = Expr::operator(Op::Mult, vec![Expr::rational(*d), factor]);
            Expr::binary(Op::Div, numer, denom)
        })
        .collect();
    Some((
        Expr::operator(Op::Add, rewritten),
        ChangeKind::CommonDenominator,
    ))
}

/// Multiplies an n-ary `*` in which at least one child is a constant fraction, gathering every
/// numerator (the fraction numerators together with any bare integer factors) into one product
/// node and every fraction's denominator into another, unwrapped to a bare constant when only one
/// denominator factor is present. The products themselves are left for the arithmetic rule to
/// fold on a later step.
pub fn multiply_constants_and_fractions(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let children = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Mult,
            children,
            ..
        }) if children.len() >= 2 => children,
        _ => return None,
    };

    if !children.iter().any(|c| c.is_constant_fraction()) {
        return None;
    }
    if !children
        .iter()
        .all(|c| c.is_const() || c.is_constant_fraction())
    {
        return None;
    }

    let mut numers = Vec::with_capacity(children.len());
    let mut denoms = Vec::new();
    for c in children {
        match fraction_parts(c) {
            Some((n, d)) => {
                numers.push(Expr::rational(n));
                denoms.push(Expr::rational(d));
            }
            None => numers.push(Expr::rational(c.as_const().unwrap())),
        }
    }

    let numer = Expr::operator(Op::Mult, numers);
    let denom = if denoms.len() == 1 {
        denoms.into_iter().next().unwrap()
    } else {
        Expr::operator(Op::Mult, denoms)
    };

    Some((
        Expr::binary(Op::Div, numer, denom),
        ChangeKind::MultiplyFractions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expr;

    #[test]
    fn adds_same_denominator() {
        let e = parse_expr!("1 / 3 + 1 / 3");
        let (result, kind) = add_constant_fractions(&e).unwrap();
        // The numerators are summed as an unevaluated `+`; arithmetic_collapse folds it next.
        assert_eq!(result.to_string(), "(1 + 1) / 3");
        assert_eq!(kind, ChangeKind::AddFractions);
    }

    #[test]
    fn common_denominator_first() {
        let e = parse_expr!("1 / 2 + 1 / 3");
        let (result, kind) = add_constant_fractions(&e).unwrap();
        assert_eq!(kind, ChangeKind::CommonDenominator);
        // Each fraction becomes `(num * factor) / (den * factor)`, still unevaluated.
        assert_eq!(result.to_string(), "1·3 / (2·3) + 1·2 / (3·2)");
    }

    #[test]
    fn multiplies_fractions() {
        let e = parse_expr!("1 / 2 * 2 / 3");
        let (result, kind) = multiply_constants_and_fractions(&e).unwrap();
        // Numerators and denominators are gathered into unevaluated products.
        assert_eq!(result.to_string(), "1·2 / (2·3)");
        assert_eq!(kind, ChangeKind::MultiplyFractions);
    }

    #[test]
    fn simplifies_fraction() {
        let e = parse_expr!("2 / 4");
        let (result, kind) = simplify_fraction(&e).unwrap();
        assert_eq!(result.to_string(), "1/2");
        assert_eq!(kind, ChangeKind::SimplifyFraction);
    }

    #[test]
    fn simplifies_fraction_to_integer() {
        let e = parse_expr!("6 / 2");
        let (result, _) = simplify_fraction(&e).unwrap();
        assert_eq!(result.to_string(), "3");
    }
}
