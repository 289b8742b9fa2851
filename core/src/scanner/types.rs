//! Token definitions produced by the scanner.

use core::fmt;

pub use crate::common::Span;

/// The kind of a scanned token.
#[derive(PartialEq, Clone, Debug)]
pub enum TokenType {
    /// An integer literal. Fractions are built from two of these via `/`, never scanned as a
    /// single decimal token.
    Int(i64),

    /// `+`.
    Plus,
    /// `-`.
    Minus,
    /// `*`.
    Mult,
    /// `/`.
    Div,
    /// `^`.
    Exp,

    /// `=`.
    Equal,
    /// `<`.
    Lt,
    /// `<=`.
    Le,
    /// `>`.
    Gt,
    /// `>=`.
    Ge,

    /// `(`.
    OpenParen,
    /// `)`.
    CloseParen,

    /// An identifier: a variable name, or (when followed by `(`) a function name like `abs`.
    Ident(String),

    /// A token the scanner could not make sense of.
    Invalid(String),

    /// End of input.
    EOF,
}

/// A scanned token together with its source span and the span of any leading trivia
/// (whitespace) it absorbed.
#[derive(PartialEq, Clone, Debug)]
pub struct Token {
    /// The kind of token this is.
    pub ty: TokenType,
    /// The span of the token's own text.
    pub span: Span,
    /// The span including any leading trivia before the token.
    pub full_span: Span,
}

impl Token {
    /// Builds a token from its kind and spans.
    pub fn new<S: Into<Span>>(ty: TokenType, span: S, full_span: S) -> Self {
        Self {
            ty,
            span: span.into(),
            full_span: full_span.into(),
        }
    }
}

impl Span {
    /// Slices `source` by this span.
    pub fn over<'a>(&self, source: &'a str) -> &'a str {
        &source[self.lo..self.hi]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenType::*;
        write!(
            f,
            "{}",
            match &self.ty {
                Int(n) => n.to_string(),
                Plus => "+".into(),
                Minus => "-".into(),
                Mult => "*".into(),
                Div => "/".into(),
                Exp => "^".into(),
                Equal => "=".into(),
                Lt => "<".into(),
                Le => "<=".into(),
                Gt => ">".into(),
                Ge => ">=".into(),
                OpenParen => "(".into(),
                CloseParen => ")".into(),
                Ident(s) => s.to_string(),
                Invalid(s) => s.to_string(),
                EOF => "<EOF>".into(),
            }
        )
    }
}

#[cfg(test)]
mod tests {
    mod format {
        use crate::scanner::types::*;

        macro_rules! format_tests {
            ($($name:ident: $ty:expr, $format_str:expr)*) => {
            $(
                #[test]
                fn $name() {
                    use TokenType::*;
                    let tok = Token { ty: $ty, span: (0, 0).into(), full_span: (0, 0).into() };
                    assert_eq!(tok.to_string(), $format_str);
                }
            )*
            }
        }

        format_tests! {
            int: Int(13), "13"
            plus: Plus, "+"
            minus: Minus, "-"
            mult: Mult, "*"
            div: Div, "/"
            exp: Exp, "^"
            equal: Equal, "="
            lt: Lt, "<"
            le: Le, "<="
            gt: Gt, ">"
            ge: Ge, ">="
            open_paren: OpenParen, "("
            close_paren: CloseParen, ")"
            ident: Ident("ab".into()), "ab"
            invalid: Invalid("@&@".into()), "@&@"
        }
    }
}
