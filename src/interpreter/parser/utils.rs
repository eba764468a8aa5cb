use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::core::ParseResult,
    },
};

/// Read position over the token stream.
///
/// Keeps the source around so that errors can quote the offending token.
/// Error positions are token indices; the end of input is `tokens.len()`.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens:   &'a [(Token, Span)],
    source:   &'a str,
    position: usize,
}

impl<'a> TokenCursor<'a> {
    #[must_use]
    pub const fn new(tokens: &'a [(Token, Span)], source: &'a str) -> Self {
        Self { tokens,
               source,
               position: 0 }
    }

    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.peek_nth(0)
    }

    /// The token `n` places ahead of the current one.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.position + n).map(|(token, _)| token)
    }

    pub fn next(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Index of the current token, or the token count at the end.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.position
    }

    /// Consumes the current token if it equals `expected`.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            return true;
        }
        false
    }

    /// Consumes a closing delimiter or fails with `ExpectedClosing`.
    pub fn expect_closing(&mut self, expected: &Token, delimiter: &'static str) -> ParseResult<()> {
        if self.eat(expected) {
            return Ok(());
        }
        Err(ParseError::ExpectedClosing { delimiter,
                                          index: self.index() })
    }

    /// The error for finding the current token where it does not belong.
    #[must_use]
    pub fn unexpected(&self) -> ParseError {
        match self.tokens.get(self.position) {
            Some((_, span)) => ParseError::UnexpectedToken { token: self.source[span.clone()].to_string(),
                                                             index: self.position, },
            None => ParseError::UnexpectedEndOfInput { index: self.tokens.len() },
        }
    }
}
