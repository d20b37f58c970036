// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for annotated declaration files.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written for maximum control over error recovery.
//!
//! # Design Principles
//!
//! - **Error recovery**: Never panic on malformed input; emit [`TokenKind::Error`]
//! - **Trivia preservation**: Whitespace and comments attach to the next token
//! - **Precise spans**: Every token carries its exact source location
//!
//! Declaration files are host-language headers, so the lexer must tolerate
//! arbitrary content: any character it does not recognise becomes a
//! [`TokenKind::Other`] token the parser skips.
//!
//! # Example
//!
//! ```
//! use reflectc_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("float x;").collect();
//! assert_eq!(tokens.len(), 3); // float, x, ; (EOF excluded from iterator)
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::{Span, Token, TokenKind, Trivia};

/// A lexer that tokenizes annotated declaration source.
///
/// The lexer produces tokens with their source spans and attached trivia.
/// It implements [`Iterator`] for easy consumption.
///
/// # Error Recovery
///
/// The lexer never fails completely. Unterminated strings and unterminated
/// block comments produce [`TokenKind::Error`] tokens, allowing parsing to
/// continue and report every problem in one pass.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Pending trivia to attach to the next token.
    pending_trivia: Vec<Trivia>,
    /// Error raised while collecting trivia (unterminated block comment).
    pending_error: Option<(EcoString, Span)>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            pending_trivia: Vec::new(),
            pending_error: None,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[allow(clippy::cast_possible_truncation)] // source files over 4GB are not supported
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips whitespace and comments, collecting them as trivia.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    let start = self.current_position();
                    self.advance_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
                    let text = self.text_for(self.span_from(start));
                    self.pending_trivia
                        .push(Trivia::Whitespace(EcoString::from(text)));
                }
                Some('/') if self.peek_char_n(1) == Some('/') => {
                    self.lex_line_comment();
                }
                Some('/') if self.peek_char_n(1) == Some('*') => {
                    self.lex_block_comment();
                }
                _ => break,
            }
        }
    }

    /// Lexes a line comment: `// ...`
    fn lex_line_comment(&mut self) {
        let start = self.current_position();
        self.advance(); // /
        self.advance(); // /
        self.advance_while(|c| c != '\n');
        let text = self.text_for(self.span_from(start));
        self.pending_trivia
            .push(Trivia::LineComment(EcoString::from(text)));
    }

    /// Lexes a block comment: `/* ... */`
    ///
    /// A block comment that reaches end-of-file without `*/` raises a
    /// pending error which surfaces as the next token.
    fn lex_block_comment(&mut self) {
        let start = self.current_position();
        self.advance(); // /
        self.advance(); // *

        let mut terminated = false;
        loop {
            match self.peek_char() {
                None => break,
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance(); // *
                    self.advance(); // /
                    terminated = true;
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }

        let span = self.span_from(start);
        if terminated {
            let text = self.text_for(span);
            self.pending_trivia
                .push(Trivia::BlockComment(EcoString::from(text)));
        } else {
            self.pending_error = Some((EcoString::from("unterminated block comment"), span));
        }
    }

    /// Lexes the next token.
    pub(super) fn lex_token(&mut self) -> Token {
        self.skip_trivia();
        let leading_trivia = std::mem::take(&mut self.pending_trivia);

        if let Some((message, span)) = self.pending_error.take() {
            return Token::with_trivia(TokenKind::Error(message), span, leading_trivia);
        }

        let start = self.current_position();

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => self.lex_token_kind(c),
        };

        Token::with_trivia(kind, self.span_from(start), leading_trivia)
    }

    /// Lexes a token kind based on the first character.
    fn lex_token_kind(&mut self, c: char) -> TokenKind {
        match c {
            'a'..='z' | 'A'..='Z' | '_' => self.lex_identifier(),
            '0'..='9' => self.lex_number(),
            '"' => self.lex_string(),

            '{' => self.single(TokenKind::LeftBrace),
            '}' => self.single(TokenKind::RightBrace),
            '(' => self.single(TokenKind::LeftParen),
            ')' => self.single(TokenKind::RightParen),
            '<' => self.single(TokenKind::LeftAngle),
            '>' => self.single(TokenKind::RightAngle),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            ':' => self.single(TokenKind::Colon),
            '=' => self.single(TokenKind::Equals),
            '*' => self.single(TokenKind::Star),
            '&' => self.single(TokenKind::Ampersand),

            // Anything else passes through; the parser skips it.
            other => self.single(TokenKind::Other(other)),
        }
    }

    /// Consumes one character and returns the given kind.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Lexes an identifier: `[A-Za-z_][A-Za-z0-9_]*`
    fn lex_identifier(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = self.text_for(self.span_from(start));
        TokenKind::Identifier(EcoString::from(text))
    }

    /// Lexes an integer or decimal literal.
    fn lex_number(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(|c| c.is_ascii_digit());

        // Decimal point followed by a digit
        if self.peek_char() == Some('.') && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
        }

        let text = self.text_for(self.span_from(start));
        TokenKind::Number(EcoString::from(text))
    }

    /// Lexes a double-quoted string literal with `\"` and `\\` escapes.
    fn lex_string(&mut self) -> TokenKind {
        self.advance(); // opening quote

        let mut content = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    return TokenKind::Error(EcoString::from("unterminated string literal"));
                }
                Some('"') => {
                    self.advance(); // closing quote
                    break;
                }
                Some('\\') => {
                    self.advance(); // backslash
                    match self.advance() {
                        Some('"') => content.push('"'),
                        Some('\\') => content.push('\\'),
                        Some(other) => {
                            // Unknown escapes pass through verbatim.
                            content.push('\\');
                            content.push(other);
                        }
                        None => {
                            return TokenKind::Error(EcoString::from(
                                "unterminated string literal",
                            ));
                        }
                    }
                }
                Some(other) => {
                    content.push(other);
                    self.advance();
                }
            }
        }

        TokenKind::String(EcoString::from(content.as_str()))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lex_token();
        if token.kind().is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

/// Convenience function to lex source into a vector of tokens (excluding EOF).
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Convenience function to lex source into a vector of tokens including EOF.
#[must_use]
pub fn lex_with_eof(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex_token();
        let is_eof = token.kind().is_eof();
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    tokens
}
