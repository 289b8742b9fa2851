//! A hand-written, precedence-climbing recursive-descent parser.
//!
//! Produces a raw (pre-[`flatten`][crate::normalize::flatten]) tree: `+`/`*` chains are parsed
//! as n-ary directly (there is no reason to build a binary chain only to immediately flatten it),
//! but parenthesized subexpressions, unary minus, and comparators are left exactly as written.

#[macro_use]
mod errors;
pub use errors::ParseErrors;
use errors::*;

use std::rc::Rc;

use crate::common::Span;
use crate::diagnostics::Diagnostic;
use crate::grammar::*;
use crate::scanner::{Token, TokenType as TT};
use crate::utils::PeekIter;

/// Parses a complete program: a bare expression, or an equation/inequality relating two
/// expressions with a single comparator.
pub fn parse_expression(tokens: Vec<Token>) -> (Stmt, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    let stmt = parser.parse_stmt();
    (stmt, parser.diagnostics)
}

struct Parser {
    input: PeekIter<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            input: PeekIter::new(tokens.into_iter()),
            diagnostics: Vec::new(),
        }
    }

    fn push_diag(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    fn done(&mut self) -> bool {
        matches!(self.input.peek().map(|t| &t.ty), Some(TT::EOF))
    }

    fn peek_span(&mut self) -> Span {
        self.input.peek().map(|t| t.span).unwrap_or((0, 0).into())
    }

    fn parse_stmt(&mut self) -> Stmt {
        let lhs = self.expr();

        let comparator = match self.input.peek().map(|t| &t.ty) {
            Some(TT::Equal) => Some(Comparator::Eq),
            Some(TT::Lt) => Some(Comparator::Lt),
            Some(TT::Le) => Some(Comparator::Le),
            Some(TT::Gt) => Some(Comparator::Gt),
            Some(TT::Ge) => Some(Comparator::Ge),
            _ => None,
        };

        let stmt = if let Some(comparator) = comparator {
            self.input.next();
            let rhs = self.expr();
            Stmt::Equation(Equation {
                lhs,
                comparator,
                rhs,
            })
        } else {
            Stmt::Expr(lhs)
        };

        if !self.done() {
            let span = self.peek_span();
            self.push_diag(ExtraTokens!(span));
        }

        stmt
    }

    fn expr(&mut self) -> RcExpr {
        self.add_sub_term()
    }

    /// Level 1: `+`, `-`. Left-associative; collects same-level `+` runs into one n-ary
    /// [`Op::Add`], since they will be flattened to that shape regardless.
    fn add_sub_term(&mut self) -> RcExpr {
        let mut children = vec![self.mul_div_term()];

        loop {
            match self.input.peek().map(|t| &t.ty) {
                Some(TT::Plus) => {
                    self.input.next();
                    children.push(self.mul_div_term());
                }
                Some(TT::Minus) => {
                    self.input.next();
                    let rhs = self.mul_div_term();
                    children.push(Expr::unary_minus(rhs));
                }
                _ => break,
            }
        }

        if children.len() == 1 {
            children.pop().unwrap()
        } else {
            Expr::operator(Op::Add, children)
        }
    }

    /// Level 2: `*`, `/`. Multiplication runs are collected n-ary; division stays binary and
    /// left-associates by nesting (`a / b / c` parses as `(a / b) / c`, which `flatten` then
    /// turns into `a / (b * c)`).
    fn mul_div_term(&mut self) -> RcExpr {
        let mut mult_children = vec![self.exp_term()];

        loop {
            match self.input.peek().map(|t| &t.ty) {
                Some(TT::Mult) => {
                    self.input.next();
                    mult_children.push(self.exp_term());
                }
                Some(TT::Div) => {
                    self.input.next();
                    let lhs = if mult_children.len() == 1 {
                        mult_children.pop().unwrap()
                    } else {
                        Expr::operator(Op::Mult, std::mem::take(&mut mult_children))
                    };
                    let rhs = self.exp_term();
                    mult_children.push(Expr::binary(Op::Div, lhs, rhs));
                }
                _ => break,
            }
        }

        if mult_children.len() == 1 {
            mult_children.pop().unwrap()
        } else {
            Expr::operator(Op::Mult, mult_children)
        }
    }

    /// Level 3: `^`, right-associative.
    fn exp_term(&mut self) -> RcExpr {
        let base = self.unary_term();
        match self.input.peek().map(|t| &t.ty) {
            Some(TT::Exp) => {
                self.input.next();
                let exp = self.exp_term();
                Expr::binary(Op::Exp, base, exp)
            }
            _ => base,
        }
    }

    fn unary_term(&mut self) -> RcExpr {
        match self.input.peek().map(|t| &t.ty) {
            Some(TT::Minus) => {
                self.input.next();
                let rhs = self.exp_term();
                Expr::unary_minus(rhs)
            }
            Some(TT::Plus) => {
                self.input.next();
                self.exp_term()
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> RcExpr {
        if self.done() {
            let span = self.peek_span();
            self.push_diag(ExpectedExpr!(span, "end of file"));
            return Expr::constant(0);
        }

        let Token { ty, span } = self.input.next().unwrap();
        let node = match ty {
            TT::Int(n) => Expr::constant(n),
            TT::Ident(name) => {
                if matches!(self.input.peek().map(|t| &t.ty), Some(TT::OpenParen)) {
                    self.parse_call(name, span)
                } else {
                    Expr::symbol(name)
                }
            }
            TT::OpenParen => self.parse_parens(span),
            TT::CloseParen => {
                self.push_diag(UnmatchedClosingParen!(span));
                Expr::constant(0)
            }
            other => {
                self.push_diag(ExpectedExpr!(span, format!("{:?}", other)));
                Expr::constant(0)
            }
        };

        // Implicit multiplication: `2x`, `2(1)`, `x(1)`, `-2x`.
        match self.input.peek().map(|t| &t.ty) {
            Some(TT::Ident(_)) | Some(TT::OpenParen) => Expr::operator(
                Op::Mult,
                vec![node, self.mul_div_term()],
            ),
            _ => node,
        }
    }

    fn parse_call(&mut self, name: String, name_span: Span) -> RcExpr {
        self.input.next(); // consume '('
        let arg = self.expr();
        self.expect_close_paren(name_span);
        match name.as_str() {
            "abs" => Expr::abs(arg),
            _ => {
                self.push_diag(UnknownFunction!(name_span, name));
                arg
            }
        }
    }

    fn parse_parens(&mut self, open_span: Span) -> RcExpr {
        let inner = self.expr();
        self.expect_close_paren(open_span);
        Expr::parens(inner)
    }

    fn expect_close_paren(&mut self, open_span: Span) {
        match self.input.peek().map(|t| &t.ty) {
            Some(TT::CloseParen) => {
                self.input.next();
            }
            _ => {
                self.push_diag(UnclosedParen!(open_span));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;

    fn parse(s: &str) -> RcExpr {
        let tokens = scan(s).tokens;
        match parse_expression(tokens) {
            (Stmt::Expr(e), diags) if diags.is_empty() => e,
            (stmt, diags) => panic!("unexpected parse of {:?}: {:?} ({:?})", s, stmt, diags),
        }
    }

    macro_rules! parser_tests {
        ($($name:ident: $program:expr, $format_str:expr)*) => {
        $(
            #[test]
            fn $name() {
                assert_eq!(parse($program).to_string(), $format_str);
            }
        )*
        }
    }

    parser_tests! {
        addition: "2 + 2", "2 + 2"
        addition_nested: "1 + 2 + 3", "1 + 2 + 3"
        subtraction: "2 - 2", "2 - 2"
        multiplication: "2 * 2", "2·2"
        division: "2 / 2", "2 / 2"
        exponent: "2 ^ 3", "2^3"
        exponent_right_assoc: "2 ^ 3 ^ 2", "2^3^2"
        precedence_plus_times: "1 + 2 * 3", "1 + 2·3"
        parens: "(1 + 2) * 3", "(1 + 2)·3"
        unary_minus: "-2", "-2"
        implicit_mult: "2x", "2x"
        implicit_mult_paren: "2(1)", "2(1)"
        abs_call: "abs(x - 1)", "abs(x - 1)"
    }

    #[test]
    fn equation() {
        let tokens = scan("2x + 1 = 5").tokens;
        match parse_expression(tokens) {
            (Stmt::Equation(eq), diags) if diags.is_empty() => {
                assert_eq!(eq.comparator, Comparator::Eq);
            }
            other => panic!("expected an equation, got {:?}", other),
        }
    }

    #[test]
    fn extra_tokens_diagnostic() {
        let tokens = scan("1 + 2 3").tokens;
        let (_, diags) = parse_expression(tokens);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "P0001");
    }
}
