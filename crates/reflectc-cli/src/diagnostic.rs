// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Terminal diagnostics using miette.
//!
//! Converts reflectc-core diagnostics into miette-formatted errors with
//! source code context, arrows pointing to the error location, and
//! diagnostic codes for easy reference.

use miette::{Diagnostic, SourceSpan};

use reflectc_core::source_analysis::{
    Diagnostic as CoreDiagnostic, DiagnosticKind, Severity,
};

/// A compilation diagnostic with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(reflectc::parse))]
pub struct CompileDiagnostic {
    /// Error or warning
    pub severity: Severity,
    /// The core diagnostic category
    pub kind: DiagnosticKind,
    /// Human-readable error message
    pub message: String,
    /// Source code for context
    #[source_code]
    pub src: miette::NamedSource<String>,
    /// Location of the error
    #[label("{label}")]
    pub span: SourceSpan,
    /// Label for the error span
    pub label: String,
}

impl CompileDiagnostic {
    /// Create a rich diagnostic from a reflectc-core diagnostic.
    pub fn from_core(diagnostic: &CoreDiagnostic, source_path: &str, source: &str) -> Self {
        let label = match diagnostic.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
        };

        Self {
            severity: diagnostic.severity,
            kind: diagnostic.kind,
            message: diagnostic.message.to_string(),
            src: miette::NamedSource::new(source_path, source.to_string()),
            span: diagnostic.span.into(),
            label: label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflectc_core::source_analysis::Span;

    #[test]
    fn from_core_diagnostic() {
        let core = CoreDiagnostic::error(
            DiagnosticKind::Syntax,
            "expected class name",
            Span::new(10, 15),
        );
        let source = "CLASS() class ;";
        let diagnostic = CompileDiagnostic::from_core(&core, "test.h", source);

        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
        assert_eq!(diagnostic.message, "expected class name");
        assert_eq!(diagnostic.span.offset(), 10);
        assert_eq!(diagnostic.span.len(), 5);
    }
}
