//! The diagnostic types shared by the scanner and parser.
//!
//! The engine itself does not render diagnostics to a terminal; it only produces structured
//! [`Diagnostic`] values so a consumer (the CLI, or any other embedder) can format them however
//! it likes.

use crate::common::Span;

/// The kind of a diagnostic.
pub enum DiagnosticKind {
    /// An unrecoverable error; the engine refuses the input.
    Error,
    /// A generic annotation with no specific connotation, often used to expand on a primary
    /// error.
    Note,
    /// Instructs the user how their input could be changed to parse successfully.
    Help,
}

/// A secondary diagnostic associated with a primary [`Diagnostic`].
pub struct AssociatedDiagnostic {
    /// Whether this is a note, a help suggestion, etc.
    pub kind: DiagnosticKind,
    /// Where this associated diagnostic points.
    pub span: Span,
    /// Its message.
    pub msg: String,
}

/// A diagnostic produced while scanning or parsing an input.
pub struct Diagnostic {
    /// Whether this is an error, a note, etc.
    pub kind: DiagnosticKind,
    /// Where the diagnostic points in the source.
    pub span: Span,
    /// The stable error code, e.g. `"P0002"`.
    pub code: &'static str,
    /// A summarizing title for the diagnostic.
    pub title: String,
    /// A more specific message about this particular occurrence.
    pub msg: Option<String>,
    /// Secondary notes and suggestions attached to this diagnostic.
    pub associated_diagnostics: Vec<AssociatedDiagnostic>,
}

impl Diagnostic {
    /// Creates an error diagnostic at a span.
    pub(crate) fn span_err<S, M, N>(span: S, title: M, code: &'static str, msg: N) -> Diagnostic
    where
        S: Into<Span>,
        M: Into<String>,
        N: Into<Option<String>>,
    {
        Diagnostic {
            kind: DiagnosticKind::Error,
            span: span.into(),
            code,
            title: title.into(),
            msg: msg.into(),
            associated_diagnostics: Vec::with_capacity(2),
        }
    }

    pub(crate) fn with_note<M: Into<String>>(mut self, note: M) -> Diagnostic {
        self.associated_diagnostics.push(AssociatedDiagnostic {
            kind: DiagnosticKind::Note,
            span: self.span,
            msg: note.into(),
        });
        self
    }

    pub(crate) fn with_help<M: Into<String>>(mut self, note: M) -> Diagnostic {
        self.associated_diagnostics.push(AssociatedDiagnostic {
            kind: DiagnosticKind::Help,
            span: self.span,
            msg: note.into(),
        });
        self
    }

    pub(crate) fn with_help_note<S: Into<Span>, M: Into<String>>(
        mut self,
        span: S,
        note: M,
    ) -> Diagnostic {
        self.associated_diagnostics.push(AssociatedDiagnostic {
            kind: DiagnosticKind::Help,
            span: span.into(),
            msg: note.into(),
        });
        self
    }
}

/// A single error code's identity: a stable code plus the long-form explanation shown by
/// `--explain`-style tooling.
pub trait DiagnosticRecord {
    /// The stable error code, e.g. `"P0002"`.
    const CODE: &'static str;
    /// The long-form explanation shown by `--explain`-style tooling.
    const EXPLANATION: &'static str;
}

/// A registry of all error codes a component (the scanner, the parser) can emit.
pub trait DiagnosticRegistry {
    /// Every code this component can emit, paired with its explanation.
    fn codes_with_explanations() -> Vec<(&'static str, &'static str)>;
}
