/// Parses a string expression into an [`RcExpr`][crate::grammar::RcExpr], panicking on any
/// scan/parse diagnostics. Intended for use in tests only.
#[macro_export]
macro_rules! parse_expr {
    ($expr:expr) => {{
        use crate::{parse, Stmt};

        match parse($expr) {
            Ok(Stmt::Expr(expr)) => expr,
            Ok(Stmt::Equation(_)) => panic!("expected an expression, got an equation"),
            Err(diags) => panic!("failed to parse {:?}: {:?}", $expr, diags),
        }
    }};
}
