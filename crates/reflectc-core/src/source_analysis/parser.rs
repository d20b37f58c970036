// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Annotation parser for declaration files.
//!
//! The parser does not understand the host language. It scans the token
//! stream for the reflection annotations and parses only the declarations
//! they introduce:
//!
//! - `ENUM` — an enumeration: name plus a brace-delimited option list.
//! - `CLASS` / `STRUCT` — a class declaration: optional meta block, the
//!   `class`/`struct` keyword, name, optional `: parent`, and a body.
//! - `PROPERTY` — inside a class body: optional meta block, a declared type
//!   and a name, terminated by `;`.
//!
//! Everything else is skipped, so annotated declarations can live in
//! ordinary headers next to includes, functions, and unannotated types.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** — the parser always produces a unit
//! - **Multiple errors** — report all diagnostics, don't stop at the first
//! - **Precise spans** — every diagnostic points to an exact source location
//! - **Synchronization points** — recover at the next annotation
//!
//! # Usage
//!
//! ```
//! use reflectc_core::model::SymbolTable;
//! use reflectc_core::source_analysis::parse;
//!
//! let source = "ENUM() enum class Color { Red, Green, Blue };";
//! let mut symbols = SymbolTable::new();
//! let (unit, diagnostics) = parse(source, &mut symbols);
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(unit.symbol_list.len(), 1);
//! assert!(unit.collection.find_enum("Color").is_some());
//! ```

use ecow::EcoString;

use crate::model::{
    Meta, Property, ROOT_TYPE, SymbolKind, SymbolTable, TypeClass, TypeCollection, TypeEnum,
};
use crate::source_analysis::{Span, Token, TokenKind, lex_with_eof};

/// The marker annotation introducing an enumeration.
const ANNOTATION_ENUM: &str = "ENUM";
/// The marker annotation introducing a class.
const ANNOTATION_CLASS: &str = "CLASS";
/// The marker annotation introducing a struct.
const ANNOTATION_STRUCT: &str = "STRUCT";
/// The marker annotation introducing a property.
const ANNOTATION_PROPERTY: &str = "PROPERTY";

/// The declarations extracted from one translation unit.
#[derive(Debug, Default)]
pub struct ParsedUnit {
    /// The file's classes and enums.
    pub collection: TypeCollection,
    /// Declared names in source order; drives deterministic emission.
    pub symbol_list: Vec<EcoString>,
}

/// A diagnostic message (error or warning).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The category of failure.
    pub kind: DiagnosticKind,
    /// The error message.
    pub message: EcoString,
    /// The source location.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    #[must_use]
    pub fn error(kind: DiagnosticKind, message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            span,
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An error that prevents generation for the file.
    Error,
    /// A warning that should be addressed.
    Warning,
}

/// The category of a parse diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Mismatched punctuation, missing braces, malformed declarations.
    Syntax,
    /// A second declaration of an already declared symbol name.
    Redeclaration,
    /// A `PROPERTY` annotation outside a class body.
    Orphan,
    /// A malformed meta block.
    Meta,
    /// An unterminated string literal.
    UnterminatedString,
    /// An unterminated block comment.
    UnterminatedComment,
}

/// Parses a declaration file into a [`ParsedUnit`].
///
/// Newly declared names are registered in the process-wide `symbols` table;
/// a name already present there is reported as a redeclaration. This is the
/// main entry point for parsing. It always returns a unit, even when the
/// source has errors — check the returned diagnostics before using it.
#[must_use]
pub fn parse(source: &str, symbols: &mut SymbolTable) -> (ParsedUnit, Vec<Diagnostic>) {
    let tokens = lex_with_eof(source);
    let mut parser = Parser::new(source, tokens);
    parser.report_lex_errors();
    parser.parse_unit(symbols);
    (parser.unit, parser.diagnostics)
}

/// The parser state.
struct Parser<'src> {
    /// The source text, for verbatim type-string extraction.
    source: &'src str,
    /// The tokens being parsed.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Accumulated diagnostics.
    diagnostics: Vec<Diagnostic>,
    /// The unit being built.
    unit: ParsedUnit,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source and tokens.
    fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            current: 0,
            diagnostics: Vec::new(),
            unit: ParsedUnit::default(),
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    fn current_token(&self) -> &Token {
        if self.current < self.tokens.len() {
            &self.tokens[self.current]
        } else {
            self.tokens
                .last()
                .expect("Parser has no tokens; expected at least an EOF token")
        }
    }

    /// Returns the current token kind.
    fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Checks if we're at the end of input.
    fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Advances to the next token and returns the previous one.
    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current - 1].clone()
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consumes the current token if it matches the given kind.
    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given identifier.
    fn match_ident(&mut self, text: &str) -> bool {
        if self.current_kind().is_ident(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects an identifier, reporting a syntax error otherwise.
    fn expect_identifier(&mut self, context: &str) -> Option<(EcoString, Span)> {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let name = name.clone();
            let span = self.current_token().span();
            self.advance();
            Some((name, span))
        } else {
            let span = self.current_token().span();
            self.error(
                DiagnosticKind::Syntax,
                format!("expected {context}, found '{}'", self.current_kind()),
                span,
            );
            None
        }
    }

    /// Expects the given token kind, reporting a syntax error otherwise.
    fn expect(&mut self, kind: &TokenKind, message: &str) -> bool {
        if self.match_token(kind) {
            true
        } else {
            let span = self.current_token().span();
            self.error(DiagnosticKind::Syntax, message, span);
            false
        }
    }

    /// Records an error diagnostic.
    fn error(&mut self, kind: DiagnosticKind, message: impl Into<EcoString>, span: Span) {
        self.diagnostics.push(Diagnostic::error(kind, message, span));
    }

    /// Skips forward to the next annotation (or EOF) after a failed parse.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if let TokenKind::Identifier(name) = self.current_kind() {
                if matches!(
                    name.as_str(),
                    ANNOTATION_ENUM | ANNOTATION_CLASS | ANNOTATION_STRUCT
                ) {
                    return;
                }
            }
            self.advance();
        }
    }

    // ========================================================================
    // Lex Error Reporting
    // ========================================================================

    /// Converts lexer error tokens into diagnostics.
    fn report_lex_errors(&mut self) {
        let errors: Vec<(EcoString, Span)> = self
            .tokens
            .iter()
            .filter_map(|t| match t.kind() {
                TokenKind::Error(message) => Some((message.clone(), t.span())),
                _ => None,
            })
            .collect();
        for (message, span) in errors {
            let kind = if message.contains("comment") {
                DiagnosticKind::UnterminatedComment
            } else {
                DiagnosticKind::UnterminatedString
            };
            self.error(kind, message, span);
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Parses the whole unit, scanning for annotations.
    fn parse_unit(&mut self, symbols: &mut SymbolTable) {
        while !self.is_at_end() {
            match self.current_kind() {
                TokenKind::Identifier(name) if name == ANNOTATION_ENUM => {
                    self.parse_enum(symbols);
                }
                TokenKind::Identifier(name)
                    if name == ANNOTATION_CLASS || name == ANNOTATION_STRUCT =>
                {
                    self.parse_class(symbols);
                }
                TokenKind::Identifier(name) if name == ANNOTATION_PROPERTY => {
                    let span = self.current_token().span();
                    self.error(
                        DiagnosticKind::Orphan,
                        "PROPERTY annotation outside of a class body",
                        span,
                    );
                    self.advance();
                    if self.check(&TokenKind::LeftParen) {
                        self.parse_meta_block();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Registers a declared symbol, reporting a redeclaration otherwise.
    ///
    /// Returns `true` if the name was fresh.
    fn declare_symbol(
        &mut self,
        symbols: &mut SymbolTable,
        name: &EcoString,
        kind: SymbolKind,
        span: Span,
    ) -> bool {
        if symbols.declare(name.clone(), kind) {
            self.unit.symbol_list.push(name.clone());
            true
        } else {
            self.error(
                DiagnosticKind::Redeclaration,
                format!("symbol '{name}' is already declared"),
                span,
            );
            false
        }
    }

    /// Parses an enum declaration:
    /// `ENUM` `(`…`)`? `enum`? (`class`|`struct`)? Name `{` Opt `,` … `}` `;`?
    fn parse_enum(&mut self, symbols: &mut SymbolTable) {
        self.advance(); // ENUM

        // An annotation argument list is tolerated but enums carry no meta.
        if self.check(&TokenKind::LeftParen) {
            self.parse_meta_block();
        }

        self.match_ident("enum");
        if !self.match_ident("class") {
            self.match_ident("struct");
        }

        let Some((name, name_span)) = self.expect_identifier("enum name") else {
            self.synchronize();
            return;
        };

        if !self.expect(&TokenKind::LeftBrace, "expected '{' to open enum body") {
            self.synchronize();
            return;
        }

        let mut options: Vec<EcoString> = Vec::new();
        loop {
            if self.match_token(&TokenKind::RightBrace) {
                break;
            }
            if self.is_at_end() {
                let span = self.current_token().span();
                self.error(DiagnosticKind::Syntax, "missing '}' to close enum body", span);
                return;
            }

            let Some((option, option_span)) = self.expect_identifier("enum option") else {
                self.synchronize();
                return;
            };
            if options.contains(&option) {
                self.error(
                    DiagnosticKind::Syntax,
                    format!("duplicate enum option '{option}'"),
                    option_span,
                );
            } else {
                options.push(option);
            }

            // Comma-separated, trailing comma allowed.
            if !self.match_token(&TokenKind::Comma) && !self.check(&TokenKind::RightBrace) {
                let span = self.current_token().span();
                self.error(
                    DiagnosticKind::Syntax,
                    "expected ',' or '}' after enum option",
                    span,
                );
                self.synchronize();
                return;
            }
        }
        self.match_token(&TokenKind::Semicolon);

        if self.declare_symbol(symbols, &name, SymbolKind::Enum, name_span) {
            self.unit.collection.add_enum(TypeEnum { name, options });
        }
    }

    /// Parses a class declaration:
    /// (`CLASS`|`STRUCT`) `(`meta`)`? (`class`|`struct`) Name (`:` access? Parent)? `{` body `}` `;`?
    fn parse_class(&mut self, symbols: &mut SymbolTable) {
        self.advance(); // CLASS or STRUCT

        let meta = if self.check(&TokenKind::LeftParen) {
            self.parse_meta_block()
        } else {
            Meta::new()
        };

        // The keyword discriminates class vs struct.
        let is_struct = if self.match_ident("struct") {
            true
        } else if self.match_ident("class") {
            false
        } else {
            let span = self.current_token().span();
            self.error(
                DiagnosticKind::Syntax,
                "expected 'class' or 'struct' after annotation",
                span,
            );
            self.synchronize();
            return;
        };

        let Some((name, name_span)) = self.expect_identifier("class name") else {
            self.synchronize();
            return;
        };

        let mut parent: EcoString = ROOT_TYPE.into();
        if self.match_token(&TokenKind::Colon) {
            // Skip access specifiers; only the first base is reflected.
            while self.match_ident("public") || self.match_ident("protected")
                || self.match_ident("private") || self.match_ident("virtual")
            {}
            let Some((parent_name, _)) = self.expect_identifier("parent class name") else {
                self.synchronize();
                return;
            };
            parent = parent_name;
            // Further bases are outside the reflected model.
            while !self.check(&TokenKind::LeftBrace) && !self.is_at_end() {
                self.advance();
            }
        }

        if !self.expect(&TokenKind::LeftBrace, "expected '{' to open class body") {
            self.synchronize();
            return;
        }

        let mut properties: Vec<Property> = Vec::new();
        let mut depth = 0usize;
        loop {
            match self.current_kind() {
                TokenKind::Eof => {
                    let span = self.current_token().span();
                    self.error(DiagnosticKind::Syntax, "missing '}' to close class body", span);
                    return;
                }
                TokenKind::LeftBrace => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RightBrace => {
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Identifier(text) if depth == 0 && text == ANNOTATION_PROPERTY => {
                    if let Some(property) = self.parse_property() {
                        if properties.iter().any(|p| p.name == property.name) {
                            let span = self.current_token().span();
                            self.error(
                                DiagnosticKind::Syntax,
                                format!("duplicate property '{}'", property.name),
                                span,
                            );
                        } else {
                            properties.push(property);
                        }
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
        self.match_token(&TokenKind::Semicolon);

        if self.declare_symbol(symbols, &name, SymbolKind::Class, name_span) {
            self.unit.collection.add_class(TypeClass {
                name,
                is_struct,
                parent,
                meta,
                properties,
            });
        }
    }

    /// Parses a property declaration:
    /// `PROPERTY` `(`meta`)`? Type Name `;`
    ///
    /// The declared type is captured verbatim from source: everything from
    /// the first type token to the start of the property name.
    fn parse_property(&mut self) -> Option<Property> {
        self.advance(); // PROPERTY

        let meta = if self.check(&TokenKind::LeftParen) {
            self.parse_meta_block()
        } else {
            Meta::new()
        };

        let start_index = self.current;
        let mut name_index: Option<usize> = None;
        while !self.check(&TokenKind::Semicolon) {
            if self.is_at_end() || self.check(&TokenKind::RightBrace) {
                let span = self.current_token().span();
                self.error(
                    DiagnosticKind::Syntax,
                    "expected ';' after property declaration",
                    span,
                );
                return None;
            }
            if self.current_kind().is_identifier() {
                name_index = Some(self.current);
            }
            self.advance();
        }
        self.advance(); // ;

        let Some(name_index) = name_index else {
            let span = self.current_token().span();
            self.error(DiagnosticKind::Syntax, "expected property name", span);
            return None;
        };
        if name_index == start_index {
            let span = self.tokens[name_index].span();
            self.error(DiagnosticKind::Syntax, "expected property type", span);
            return None;
        }

        let name_token = &self.tokens[name_index];
        let TokenKind::Identifier(name) = name_token.kind() else {
            unreachable!("name_index always points at an identifier");
        };
        let type_span = Span::new(
            self.tokens[start_index].span().start(),
            name_token.span().start(),
        );
        let ty = self.source[type_span.as_range()].trim();

        Some(Property {
            name: name.clone(),
            ty: EcoString::from(ty),
            meta,
        })
    }

    /// Parses a parenthesised meta block: `(` key `=` value `,` … `)`.
    ///
    /// Values are identifiers, numbers, or quoted strings. Malformed blocks
    /// produce [`DiagnosticKind::Meta`] diagnostics; parsing recovers at the
    /// closing parenthesis.
    fn parse_meta_block(&mut self) -> Meta {
        self.advance(); // (

        let mut meta = Meta::new();
        loop {
            if self.match_token(&TokenKind::RightParen) {
                break;
            }
            if self.is_at_end() {
                let span = self.current_token().span();
                self.error(DiagnosticKind::Meta, "unterminated meta block", span);
                break;
            }

            // key
            let key = if let TokenKind::Identifier(key) = self.current_kind() {
                let key = key.clone();
                self.advance();
                key
            } else {
                let span = self.current_token().span();
                self.error(
                    DiagnosticKind::Meta,
                    format!("expected meta key, found '{}'", self.current_kind()),
                    span,
                );
                self.recover_meta_block();
                break;
            };

            // =
            if !self.match_token(&TokenKind::Equals) {
                let span = self.current_token().span();
                self.error(DiagnosticKind::Meta, "expected '=' after meta key", span);
                self.recover_meta_block();
                break;
            }

            // value
            let value = match self.current_kind() {
                TokenKind::Identifier(v) | TokenKind::Number(v) | TokenKind::String(v) => v.clone(),
                _ => {
                    let span = self.current_token().span();
                    self.error(
                        DiagnosticKind::Meta,
                        format!("expected meta value, found '{}'", self.current_kind()),
                        span,
                    );
                    self.recover_meta_block();
                    break;
                }
            };
            let value_span = self.current_token().span();
            self.advance();

            if !meta.insert(key.clone(), value) {
                self.error(
                    DiagnosticKind::Meta,
                    format!("duplicate meta key '{key}'"),
                    value_span,
                );
            }

            // separator
            if !self.match_token(&TokenKind::Comma) && !self.check(&TokenKind::RightParen) {
                let span = self.current_token().span();
                self.error(
                    DiagnosticKind::Meta,
                    "expected ',' or ')' in meta block",
                    span,
                );
                self.recover_meta_block();
                break;
            }
        }

        meta
    }

    /// Skips to the closing parenthesis of a malformed meta block.
    fn recover_meta_block(&mut self) {
        while !self.is_at_end() && !self.match_token(&TokenKind::RightParen) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> ParsedUnit {
        let mut symbols = SymbolTable::new();
        let (unit, diagnostics) = parse(source, &mut symbols);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        unit
    }

    fn parse_err(source: &str) -> Vec<Diagnostic> {
        let mut symbols = SymbolTable::new();
        let (_, diagnostics) = parse(source, &mut symbols);
        diagnostics
    }

    #[test]
    fn parse_empty_file() {
        let unit = parse_ok("");
        assert!(unit.symbol_list.is_empty());
        assert!(unit.collection.is_empty());
    }

    #[test]
    fn parse_skips_unannotated_code() {
        let unit = parse_ok("#include <string>\n\nclass Plain { int x; };\nvoid f();\n");
        assert!(unit.symbol_list.is_empty());
    }

    #[test]
    fn parse_enum_declaration() {
        let unit = parse_ok("ENUM()\nenum class Color\n{\n    Red,\n    Green,\n    Blue\n};");
        let e = unit.collection.find_enum("Color").expect("enum parsed");
        assert_eq!(e.options, vec!["Red", "Green", "Blue"]);
        assert_eq!(unit.symbol_list, vec!["Color"]);
    }

    #[test]
    fn parse_enum_trailing_comma() {
        let unit = parse_ok("ENUM() enum class Mode { A, B, };");
        let e = unit.collection.find_enum("Mode").expect("enum parsed");
        assert_eq!(e.options, vec!["A", "B"]);
    }

    #[test]
    fn parse_enum_duplicate_option() {
        let diagnostics = parse_err("ENUM() enum class Mode { A, A };");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::Syntax && d.message.contains("duplicate"))
        );
    }

    #[test]
    fn parse_class_with_default_parent() {
        let unit = parse_ok("CLASS()\nclass Foo\n{\n};");
        let class = unit.collection.find_class("Foo").expect("class parsed");
        assert_eq!(class.parent, ROOT_TYPE);
        assert!(!class.is_struct);
        assert!(class.properties.is_empty());
    }

    #[test]
    fn parse_struct_keyword_discriminates() {
        let unit = parse_ok("STRUCT()\nstruct Vec2\n{\n    PROPERTY() float x;\n    PROPERTY() float y;\n};");
        let class = unit.collection.find_class("Vec2").expect("struct parsed");
        assert!(class.is_struct);
        assert_eq!(class.properties.len(), 2);
        assert_eq!(class.properties[0].name, "x");
        assert_eq!(class.properties[0].ty, "float");
    }

    #[test]
    fn parse_class_with_parent() {
        let unit = parse_ok("CLASS()\nclass Child : public Base\n{\n};");
        let class = unit.collection.find_class("Child").expect("class parsed");
        assert_eq!(class.parent, "Base");
    }

    #[test]
    fn parse_class_meta_block() {
        let unit =
            parse_ok("CLASS(Category = MyClass, Serializable = \"true\")\nclass Foo\n{\n};");
        let class = unit.collection.find_class("Foo").expect("class parsed");
        assert_eq!(class.meta.get("Category"), Some("MyClass"));
        assert_eq!(class.meta.get("Serializable"), Some("true"));
    }

    #[test]
    fn parse_property_meta_block() {
        let unit = parse_ok(
            "CLASS()\nclass Foo\n{\n    PROPERTY(JsonExport = true)\n    int m_value;\n};",
        );
        let class = unit.collection.find_class("Foo").expect("class parsed");
        assert_eq!(class.properties[0].meta.get("JsonExport"), Some("true"));
    }

    #[test]
    fn parse_property_template_type_verbatim() {
        let unit = parse_ok(
            "CLASS()\nclass Foo\n{\n    PROPERTY() std::map<std::string, int> dictionary;\n};",
        );
        let class = unit.collection.find_class("Foo").expect("class parsed");
        assert_eq!(class.properties[0].ty, "std::map<std::string, int>");
        assert_eq!(class.properties[0].name, "dictionary");
    }

    #[test]
    fn parse_property_pointer_type() {
        let unit = parse_ok("CLASS()\nclass Foo\n{\n    PROPERTY() Foo* ptr;\n};");
        let class = unit.collection.find_class("Foo").expect("class parsed");
        assert_eq!(class.properties[0].ty, "Foo*");
        assert_eq!(class.properties[0].name, "ptr");
    }

    #[test]
    fn parse_skips_unannotated_members() {
        let unit = parse_ok(
            "CLASS()\nclass Foo\n{\npublic:\n    Foo() = default;\n    void update() { x = 1; }\n    int x;\n    PROPERTY() int y;\n};",
        );
        let class = unit.collection.find_class("Foo").expect("class parsed");
        assert_eq!(class.properties.len(), 1);
        assert_eq!(class.properties[0].name, "y");
    }

    #[test]
    fn parse_multiple_declarations_in_order() {
        let unit = parse_ok(
            "ENUM() enum class Color { Red };\nCLASS() class Foo {};\nSTRUCT() struct Bar {};",
        );
        assert_eq!(unit.symbol_list, vec!["Color", "Foo", "Bar"]);
    }

    #[test]
    fn parse_redeclaration_is_an_error() {
        let diagnostics = parse_err("CLASS() class Foo {};\nCLASS() class Foo {};");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::Redeclaration)
        );
    }

    #[test]
    fn parse_redeclaration_across_files() {
        let mut symbols = SymbolTable::new();
        let (_, first) = parse("CLASS() class Foo {};", &mut symbols);
        assert!(first.is_empty());
        let (_, second) = parse("ENUM() enum class Foo { A };", &mut symbols);
        assert!(
            second
                .iter()
                .any(|d| d.kind == DiagnosticKind::Redeclaration)
        );
    }

    #[test]
    fn parse_orphan_property() {
        let diagnostics = parse_err("PROPERTY() int x;");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Orphan));
    }

    #[test]
    fn parse_missing_class_brace() {
        let diagnostics = parse_err("CLASS()\nclass Foo\n{\n    PROPERTY() int x;\n");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Syntax));
    }

    #[test]
    fn parse_malformed_meta_missing_value() {
        let diagnostics = parse_err("CLASS(Category = )\nclass Foo {};");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Meta));
    }

    #[test]
    fn parse_malformed_meta_missing_equals() {
        let diagnostics = parse_err("CLASS(Category)\nclass Foo {};");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Meta));
    }

    #[test]
    fn parse_duplicate_meta_key() {
        let diagnostics = parse_err("CLASS(a = 1, a = 2)\nclass Foo {};");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Meta));
    }

    #[test]
    fn parse_unterminated_string_reported() {
        let diagnostics = parse_err("CLASS(name = \"oops)\nclass Foo {};");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::UnterminatedString)
        );
    }

    #[test]
    fn parse_unterminated_comment_reported() {
        let diagnostics = parse_err("CLASS() class Foo {}; /* oops");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::UnterminatedComment)
        );
    }

    #[test]
    fn parse_duplicate_property_name() {
        let diagnostics =
            parse_err("CLASS()\nclass Foo\n{\n    PROPERTY() int x;\n    PROPERTY() float x;\n};");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.message.contains("duplicate property"))
        );
    }
}
