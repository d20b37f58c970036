// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source analysis for annotated declaration files.
//!
//! This module contains the lexer, the tokens it produces, and the parser
//! that extracts the declaration model from a token stream.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s. Each token
//! carries its source location via [`Span`]; whitespace and comments are
//! attached to tokens as [`Trivia`] rather than emitted as tokens of their
//! own.
//!
//! ```
//! use reflectc_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("int x;").collect();
//! assert_eq!(tokens.len(), 3); // int, x, ;
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function scans the token stream for the reflection
//! annotations (`ENUM`, `CLASS`, `STRUCT`, `PROPERTY`) and builds a
//! [`ParsedUnit`] containing the file's [`TypeCollection`] and its symbol
//! list. Declarations that do not carry an annotation are skipped, so
//! ordinary host-language code may surround the annotated declarations.
//!
//! [`TypeCollection`]: crate::model::TypeCollection
//!
//! # Error Handling
//!
//! The lexer uses error recovery: unterminated strings and block comments
//! become [`TokenKind::Error`] tokens rather than stopping the scan. The
//! parser converts them into [`Diagnostic`]s alongside its own syntax
//! diagnostics, so a single pass reports every problem in a file.

mod lexer;
mod parser;
mod span;
mod token;


pub use lexer::{Lexer, lex, lex_with_eof};
pub use parser::{Diagnostic, DiagnosticKind, ParsedUnit, Severity, parse};
pub use span::Span;
pub use token::{Token, TokenKind, Trivia};
