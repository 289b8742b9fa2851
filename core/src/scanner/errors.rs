//! Diagnostic errors produced by the scanner.

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

        /// Diagnostic errors produced by the scanner.
        pub struct ScanErrors;

        impl DiagnosticRegistry for ScanErrors {
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                let mut vec = Vec::new();
                $(vec.push(($error::CODE, $error::EXPLANATION));)*
                vec
            }
        }
    };
}

define_errors! {
    ///Tokens must be drawn from the supported subset of mathematical notation: integers,
    ///`+ - * / ^ = < <= > >=`, parentheses, and identifiers.
    S0001: InvalidToken
}

macro_rules! InvalidToken {
    ($span:expr) => {{
        use crate::diagnostics::*;

        Diagnostic::span_err(
            $span,
            "Invalid token",
            InvalidToken::CODE,
            None,
        )
        .with_note("token must be drawn from supported mathematical notation")
    }};
}
