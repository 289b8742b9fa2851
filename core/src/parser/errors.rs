//! Diagnostic errors produced by the parser.

use crate::diagnostics::{DiagnosticRecord, DiagnosticRegistry};

macro_rules! define_errors {
    ($($(#[doc = $doc:expr])+ $code:ident: $error:ident)*) => {$(
        $(#[doc = $doc])+
        pub(crate) struct $error;

        impl DiagnosticRecord for $error {
            const CODE: &'static str = stringify!($code);
            const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
        }
    )*

        /// Diagnostic errors produced by the parser.
        pub struct ParseErrors;

        impl DiagnosticRegistry for ParseErrors {
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                let mut vec = Vec::new();
                $(vec.push(($error::CODE, $error::EXPLANATION));)*
                vec
            }
        }
    };
}

define_errors! {
    ///Fires when tokens remain after a complete expression or equation has been parsed.
    ///
    ///For example, in `1 + 2 3 + 4`, the tokens `3 + 4` are not connected to the primary
    ///expression `1 + 2`.
    P0001: ExtraTokens

    ///Fires on token sequences that are expected to parse as an expression, but do not, for
    ///example `1 + +` or an unclosed `1 /`.
    P0002: ExpectedExpr

    ///Fires when a closing parenthesis is found with no corresponding opening parenthesis.
    P0003: UnmatchedClosingParen

    ///Fires when an opening parenthesis is never closed.
    P0004: UnclosedParen

    ///Fires when a function call name is not recognized.
    P0005: UnknownFunction
}

macro_rules! ExtraTokens {
    ($span:expr) => {{
        use crate::diagnostics::*;
        Diagnostic::span_err(
            $span,
            "Unexpected extra tokens",
            ExtraTokens::CODE,
            "not connected to a primary expression".to_string(),
        )
    }};
}

macro_rules! ExpectedExpr {
    ($span:expr, $found:expr) => {{
        use crate::diagnostics::*;
        Diagnostic::span_err(
            $span,
            format!("Expected an expression, found {}", $found),
            ExpectedExpr::CODE,
            "expected an expression".to_string(),
        )
    }};
}

macro_rules! UnmatchedClosingParen {
    ($span:expr) => {{
        use crate::diagnostics::*;
        Diagnostic::span_err(
            $span,
            "Unmatched closing delimiter \")\"",
            UnmatchedClosingParen::CODE,
            "has no matching opening \"(\"".to_string(),
        )
    }};
}

macro_rules! UnclosedParen {
    ($span:expr) => {{
        use crate::diagnostics::*;
        Diagnostic::span_err(
            $span,
            "Unclosed delimiter \"(\"",
            UnclosedParen::CODE,
            "expected a matching \")\"".to_string(),
        )
    }};
}

macro_rules! UnknownFunction {
    ($span:expr, $name:expr) => {{
        use crate::diagnostics::*;
        Diagnostic::span_err(
            $span,
            format!("Unknown function \"{}\"", $name),
            UnknownFunction::CODE,
            "expected a supported function name".to_string(),
        )
    }};
}
