use super::ChangeKind;
use crate::grammar::RcExpr;
use crate::normalize::arithmetic_search;

/// Folds an all-constant subtree to a single rational, via exact arithmetic.
pub fn arithmetic_collapse(expr: &RcExpr) -> Option<(RcExpr, ChangeKind)> {
    arithmetic_search(expr).map(|folded| (folded, ChangeKind::Arithmetic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expr;

    #[test]
    fn folds_constant_product() {
        let e = parse_expr!("3 * 4");
        let (result, kind) = arithmetic_collapse(&e).unwrap();
        assert_eq!(result.to_string(), "12");
        assert_eq!(kind, ChangeKind::Arithmetic);
    }

    #[test]
    fn does_not_fire_on_symbol() {
        let e = parse_expr!("x");
        assert!(arithmetic_collapse(&e).is_none());
    }
}
