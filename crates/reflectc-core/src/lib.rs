// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Reflection compiler core.
//!
//! This crate contains the core of the `reflectc` build-time reflection
//! compiler:
//! - Lexical analysis (tokenization of annotated declaration files)
//! - Parsing (extraction of the declaration model)
//! - Code generation (companion reflection and serialisation sources)
//!
//! The compiler scans declaration files for the `ENUM`, `CLASS`, `STRUCT`
//! and `PROPERTY` annotations, builds a typed model of the annotated
//! declarations, and emits a pair of generated files per input that provide
//! reflection metadata and byte-stream/JSON serialisation against the
//! runtime support library.

pub mod codegen;
pub mod model;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::codegen::{EncodeError, Encoder, GeneratedUnit};
    pub use crate::model::{
        Meta, Property, SymbolKind, SymbolTable, TypeClass, TypeCollection, TypeEnum,
    };
    pub use crate::source_analysis::{Diagnostic, DiagnosticKind, ParsedUnit, Severity, Span};
}
