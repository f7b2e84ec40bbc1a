//! A small cursor over a lexed line.
//!
//! Grammars are tried as ordered matchers: each takes a copy of the cursor
//! and returns `None` without side effects when the line has a different
//! shape. The first matcher that consumes the whole line wins.

use super::lexer::{Token, TokenKind};
use super::pattern;

/// Peek/bump cursor over the tokens of one line. `Copy`, so speculative
/// matching is a plain by-value pass.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    /// Consume and return the current token.
    pub fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a `Word` token and return its text.
    pub fn word(&mut self) -> Option<&'a str> {
        if self.at(TokenKind::Word) {
            self.bump().map(|t| t.text)
        } else {
            None
        }
    }

    /// Consume a `Word` token with exactly the given text.
    pub fn keyword(&mut self, text: &str) -> bool {
        if self.peek().is_some_and(|t| t.kind == TokenKind::Word && t.text == text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a `Word` token that has a numeric shape.
    pub fn number(&mut self) -> Option<f64> {
        let token = self.peek()?;
        if token.kind != TokenKind::Word {
            return None;
        }
        let value = pattern::parse_number(token.text)?;
        self.pos += 1;
        Some(value)
    }

    /// Whether every token has been consumed.
    pub fn done(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn speculative_matching_leaves_the_original_untouched() {
        let tokens = tokenize("x real [0, 1]");
        let cursor = Cursor::new(&tokens);
        let mut probe = cursor;
        assert_eq!(probe.word(), Some("x"));
        assert!(probe.keyword("real"));
        // the copy advanced, the original did not
        assert_eq!(cursor.peek().map(|t| t.text), Some("x"));
    }

    #[test]
    fn number_rejects_non_numeric_words() {
        let tokens = tokenize("abc 1.5");
        let mut cursor = Cursor::new(&tokens);
        assert_eq!(cursor.number(), None);
        assert_eq!(cursor.word(), Some("abc"));
        assert_eq!(cursor.number(), Some(1.5));
        assert!(cursor.done());
    }
}
