// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for declaration-file lexical analysis.
//!
//! Each token consists of:
//! - A [`TokenKind`] indicating the type of token
//! - A [`Span`] indicating its location in source
//! - Leading and trailing [`Trivia`] (whitespace and comments)
//!
//! The token set is deliberately small: the parser only needs identifiers,
//! literals, and the punctuation that structures annotated declarations.
//! Every other character passes through as [`TokenKind::Other`] so the
//! parser can skip unannotated host-language code without understanding it.

use ecow::EcoString;

use super::Span;

/// The kind of token, not including source location or trivia.
///
/// Tokens are designed to be cheap to clone (using [`EcoString`] for
/// string data).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier: `Foo`, `m_value`, `_private`
    Identifier(EcoString),

    /// An integer or decimal literal: `42`, `3.14`
    Number(EcoString),

    /// A double-quoted string literal (content without the quotes,
    /// `\"` and `\\` escapes resolved)
    String(EcoString),

    // === Punctuation ===
    /// Left brace: `{`
    LeftBrace,
    /// Right brace: `}`
    RightBrace,
    /// Left parenthesis: `(`
    LeftParen,
    /// Right parenthesis: `)`
    RightParen,
    /// Left angle bracket: `<`
    LeftAngle,
    /// Right angle bracket: `>`
    RightAngle,
    /// Comma: `,`
    Comma,
    /// Semicolon: `;`
    Semicolon,
    /// Colon: `:`
    Colon,
    /// Equals sign: `=`
    Equals,
    /// Asterisk (pointer decorator): `*`
    Star,
    /// Ampersand (reference decorator): `&`
    Ampersand,

    /// Any other character, passed through for the parser to skip.
    Other(char),

    /// End of file
    Eof,

    /// Invalid input (unterminated string or block comment); the text
    /// describes the failure for diagnostics.
    Error(EcoString),
}

impl TokenKind {
    /// Returns `true` if this token is an identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Returns `true` if this token is an identifier with the given text.
    #[must_use]
    pub fn is_ident(&self, text: &str) -> bool {
        matches!(self, Self::Identifier(s) if s == text)
    }

    /// Returns `true` if this is the end-of-file marker.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns `true` if this is an error token.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the string content if this token carries one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Identifier(s) | Self::Number(s) | Self::String(s) | Self::Error(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(s) | Self::Number(s) => write!(f, "{s}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Error(s) => write!(f, "<error: {s}>"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftAngle => write!(f, "<"),
            Self::RightAngle => write!(f, ">"),
            Self::Comma => write!(f, ","),
            Self::Semicolon => write!(f, ";"),
            Self::Colon => write!(f, ":"),
            Self::Equals => write!(f, "="),
            Self::Star => write!(f, "*"),
            Self::Ampersand => write!(f, "&"),
            Self::Other(c) => write!(f, "{c}"),
            Self::Eof => write!(f, "<eof>"),
        }
    }
}

/// Trivia represents non-semantic content like whitespace and comments.
///
/// Comments are stripped into trivia during lexing; the parser never sees
/// them as tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trivia {
    /// Whitespace (spaces, tabs, newlines)
    Whitespace(EcoString),

    /// A line comment: `// comment text`
    LineComment(EcoString),

    /// A block comment: `/* comment text */`
    BlockComment(EcoString),
}

impl Trivia {
    /// Returns the text content of this trivia.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Whitespace(s) | Self::LineComment(s) | Self::BlockComment(s) => s,
        }
    }
}

/// A token with its source location and surrounding trivia.
///
/// ```
/// use reflectc_core::source_analysis::{Token, TokenKind, Span};
///
/// let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
/// assert!(token.kind().is_identifier());
/// assert_eq!(token.span().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
    leading_trivia: Vec<Trivia>,
}

impl Token {
    /// Creates a new token with no trivia.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            leading_trivia: Vec::new(),
        }
    }

    /// Creates a new token with leading trivia.
    #[must_use]
    pub fn with_trivia(kind: TokenKind, span: Span, leading_trivia: Vec<Trivia>) -> Self {
        Self {
            kind,
            span,
            leading_trivia,
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token (excluding trivia).
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the trivia preceding this token.
    #[must_use]
    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.leading_trivia
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kind_predicates() {
        assert!(TokenKind::Identifier("foo".into()).is_identifier());
        assert!(TokenKind::Identifier("CLASS".into()).is_ident("CLASS"));
        assert!(!TokenKind::Identifier("CLASS".into()).is_ident("ENUM"));
        assert!(TokenKind::Eof.is_eof());
        assert!(TokenKind::Error("bad".into()).is_error());
    }

    #[test]
    fn token_kind_display() {
        assert_eq!(TokenKind::Identifier("foo".into()).to_string(), "foo");
        assert_eq!(TokenKind::String("hi".into()).to_string(), "\"hi\"");
        assert_eq!(TokenKind::LeftAngle.to_string(), "<");
        assert_eq!(TokenKind::Other('#').to_string(), "#");
    }

    #[test]
    fn token_accessors() {
        let token = Token::new(TokenKind::Semicolon, Span::new(3, 4));
        assert_eq!(token.span().start(), 3);
        assert!(token.leading_trivia().is_empty());
    }
}
