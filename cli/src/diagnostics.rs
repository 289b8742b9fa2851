//! User-facing diagnostics.
//!
//! Demarshalls [stepalg_core diagnostics][stepalg_core::diagnostics] into a form pleasant for
//! standard output.

use stepalg_core::diagnostics::{Diagnostic, DiagnosticKind};

use annotate_snippets::{
    display_list::{DisplayList, FormatOptions},
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};

/// Renders every diagnostic in `diagnostics` as an annotated source snippet.
pub fn emit_diagnostics(
    file: Option<&str>,
    source: String,
    diagnostics: Vec<Diagnostic>,
    color: bool,
) -> String {
    let source = source + " "; // we might emit an EOF diagnostic, so add extra space.

    let mut emitted_diagnostics = String::new();

    for diagnostic in diagnostics {
        let main_annotation_type = convert_diagnostic_kind(&diagnostic.kind);
        let mut annotations = Vec::with_capacity(diagnostic.associated_diagnostics.len() + 1);
        // The first annotation always points to the code that generated this diagnostic.
        let label = diagnostic.msg.unwrap_or_default();
        annotations.push(SourceAnnotation {
            label: &label,
            annotation_type: main_annotation_type,
            range: diagnostic.span.into(),
        });
        // Add the associated diagnostics as the remaining annotations for the main diagnostic.
        for associated_diagnostic in diagnostic.associated_diagnostics.iter() {
            annotations.push(SourceAnnotation {
                label: &associated_diagnostic.msg,
                annotation_type: convert_diagnostic_kind(&associated_diagnostic.kind),
                range: associated_diagnostic.span.into(),
            });
        }

        let snippet = Snippet {
            title: Some(Annotation {
                label: Some(&diagnostic.title),
                id: Some(diagnostic.code),
                annotation_type: main_annotation_type,
            }),
            footer: vec![],
            slices: vec![Slice {
                source: &source,
                line_start: 1,
                origin: file,
                fold: true,
                annotations,
            }],
            opt: FormatOptions {
                color,
                ..Default::default()
            },
        };
        emitted_diagnostics.push_str(&format!("{}\n\n", DisplayList::from(snippet)));
    }
    emitted_diagnostics
}

/// Converts a stepalg_core `DiagnosticKind` to an `AnnotationType`.
fn convert_diagnostic_kind(diagnostic_kind: &DiagnosticKind) -> AnnotationType {
    match diagnostic_kind {
        DiagnosticKind::Error => AnnotationType::Error,
        DiagnosticKind::Note => AnnotationType::Note,
        DiagnosticKind::Help => AnnotationType::Help,
    }
}
