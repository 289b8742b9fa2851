use super::ChangeKind;
use crate::grammar::{Expr, Op, Operator, PolyTerm, RcExpr};
use crate::rational::Rational;

/// Views a factor list (the flattened multiplicative structure of an expression) as a bag of
/// non-constant factors plus one aggregate constant coefficient.
fn factor_list(expr: &RcExpr) -> (Rational, Vec<RcExpr>) {
    match expr.unwrap_parens().as_ref() {
        Expr::Const(r) => (*r, vec![]),
        Expr::UnaryMinus(inner) => {
            let (c, f) = factor_list(inner);
            (-c, f)
        }
        Expr::Operator(Operator {
            op: Op::Mult,
            children,
            ..
        }) => {
            let mut coef = Rational::from_int(1);
            let mut factors = vec![];
            for child in children {
                let (c, mut f) = factor_list(child);
                coef = coef * c;
                factors.append(&mut f);
            }
            (coef, factors)
        }
        _ => (Rational::from_int(1), vec![expr.clone()]),
    }
}

fn rebuild(coef: Rational, factors: Vec<RcExpr>) -> RcExpr {
    let mut parts = vec![];
    if !coef.is_one() || factors.is_empty() {
        parts.push(Expr::rational(coef));
    }
    parts.extend(factors);
    if parts.len() == 1 {
        parts.pop().unwrap()
    } else {
        Expr::operator(Op::Mult, parts)
    }
}

/// Cancels factors common to the numerator and denominator of `Op::Div`: matching symbols (via
/// exponent subtraction) and a gcd reduction of the constant coefficients.
pub fn cancel_division(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let (numer, denom) = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Div,
            children,
            ..
        }) if children.len() == 2 => (&children[0], &children[1]),
        _ => return None,
    };
    // Constant fractions are handled by the fraction rules, not here.
    if numer.is_const() && denom.is_const() {
        return None;
    }

    let (mut numer_coef, numer_factors) = factor_list(numer);
    let (mut denom_coef, mut denom_factors) = factor_list(denom);

    let mut new_numer_factors: Vec<RcExpr> = vec![];
    let mut cancelled = false;

    for nf in numer_factors {
        if let Some(term) = PolyTerm::from_expr(&nf) {
            if let Some(pos) = denom_factors
                .iter()
                .position(|df| PolyTerm::from_expr(df).map_or(false, |dt| dt.symbol == term.symbol))
            {
                let dterm = PolyTerm::from_expr(&denom_factors[pos]).unwrap();
                denom_factors.remove(pos);
                cancelled = true;

                let n_exp = term.exponent.clone();
                let d_exp = dterm.exponent.clone();
                numer_coef = numer_coef * term.coefficient;
                denom_coef = denom_coef * dterm.coefficient;

                match (n_exp, d_exp) {
                    (None, None) => {}
                    (Some(e), None) => new_numer_factors.push(
                        PolyTerm {
                            coefficient: Rational::from_int(1),
                            symbol: term.symbol,
                            exponent: Some(Expr::binary(
                                Op::Sub,
                                e,
                                Expr::constant(1),
                            )),
                        }
                        .into_expr(),
                    ),
                    (None, Some(e)) => denom_factors.push(
                        PolyTerm {
                            coefficient: Rational::from_int(1),
                            symbol: term.symbol,
                            exponent: Some(Expr::binary(
                                Op::Sub,
                                e,
                                Expr::constant(1),
                            )),
                        }
                        .into_expr(),
                    ),
                    (Some(ne), Some(de)) => {
                        if ne == de {
                            // fully cancels
                        } else {
                            new_numer_factors.push(
                                PolyTerm {
                                    coefficient: Rational::from_int(1),
                                    symbol: term.symbol,
                                    exponent: Some(Expr::binary(Op::Sub, ne, de)),
                                }
                                .into_expr(),
                            );
                        }
                    }
                }
                continue;
            }
        }
        new_numer_factors.push(nf);
    }

    let const_gcd_reduced = {
        let g = crate::math::gcd(
            numer_coef.numer().unsigned_abs(),
            denom_coef.numer().unsigned_abs(),
        )
        .max(1) as i64;
        if g > 1 {
            numer_coef = Rational::new(numer_coef.numer() / g, 1);
            denom_coef = Rational::new(denom_coef.numer() / g, 1);
            true
        } else {
            false
        }
    };

    if !cancelled && !const_gcd_reduced {
        return None;
    }

    let new_numer = rebuild(numer_coef, new_numer_factors);
    let new_denom = rebuild(denom_coef, denom_factors);

    let result = if new_denom.as_const().map_or(false, |r| r.is_one()) {
        new_numer
    } else {
        Expr::binary(Op::Div, new_numer, new_denom)
    };
    Some((result, ChangeKind::Cancel))
}

/// Removes an exponent once it has collapsed to `0` or `1`: `x^1 -> x`, `x^0 -> 1`.
pub fn normalize_exponent(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    let (base, exponent) = match expr.as_ref() {
        Expr::Operator(Operator {
            op: Op::Exp,
            children,
            ..
        }) if children.len() == 2 => (&children[0], children[1].as_const()?),
        _ => return None,
    };
    if exponent.is_one() {
        Some((base.clone(), ChangeKind::NormalizeExponent))
    } else if exponent.is_zero() {
        Some((Expr::constant(1), ChangeKind::NormalizeExponent))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expr;

    #[test]
    fn cancels_identical_symbol() {
        let e = parse_expr!("x / x");
        let (result, kind) = cancel_division(&e).unwrap();
        assert_eq!(kind, ChangeKind::Cancel);
        assert_eq!(result.to_string(), "1");
    }

    #[test]
    fn cancels_exponent_difference() {
        let e = parse_expr!("x ^ 3 / x");
        let (result, _) = cancel_division(&e).unwrap();
        assert_eq!(result.to_string(), "x^(3 - 1)");
    }

    #[test]
    fn reduces_constant_coefficients() {
        let e = parse_expr!("4 * x / (2 * y)");
        let (result, _) = cancel_division(&e).unwrap();
        assert_eq!(result.to_string(), "2x / y");
    }

    #[test]
    fn does_not_fire_without_common_factors() {
        let e = parse_expr!("x / y");
        assert!(cancel_division(&e).is_none());
    }

    #[test]
    fn normalizes_exponent_of_one() {
        let e = parse_expr!("x ^ 1");
        let (result, kind) = normalize_exponent(&e).unwrap();
        assert_eq!(kind, ChangeKind::NormalizeExponent);
        assert_eq!(result.to_string(), "x");
    }

    #[test]
    fn normalizes_exponent_of_zero() {
        let e = parse_expr!("x ^ 0");
        let (result, _) = normalize_exponent(&e).unwrap();
        assert_eq!(result.to_string(), "1");
    }

    #[test]
    fn does_not_normalize_other_exponents() {
        let e = parse_expr!("x ^ 2");
        assert!(normalize_exponent(&e).is_none());
    }
}
