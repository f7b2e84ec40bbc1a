//! Logos-based lexer for one preprocessed line.
//!
//! Lines are short, so each is tokenized independently after comment and
//! quote stripping. A `Word` is a maximal run of name characters; whether it
//! is a name, a number, or a keyword is decided by the consuming grammar.

use logos::Logos;

/// A token with its kind and source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub enum TokenKind {
    // Multi-character punctuation first. `!` and `&` are name characters, so
    // these carry an explicit priority over the Word pattern.
    #[token("==")]
    EqEq,

    #[token("!=", priority = 10)]
    BangEq,

    #[token("&&", priority = 10)]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("=")]
    Eq,

    #[token("|")]
    Pipe,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    /// Maximal run of permitted name characters; also covers numbers.
    #[regex(r"[0-9A-Za-z_@.:;?!$%&*+<>\\/-]+")]
    Word,

    /// Anything the line grammar cannot contain.
    Error,
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = match self.inner.next()? {
            Ok(kind) => kind,
            Err(()) => TokenKind::Error,
        };
        Some(Token {
            kind,
            text: self.inner.slice(),
        })
    }
}

/// Tokenize an entire line into a Vec.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn continuous_declaration() {
        use TokenKind::*;
        assert_eq!(
            kinds("lr real [0.001, 1.0] [0.1]log"),
            [
                Word, Word, LBracket, Word, Comma, Word, RBracket, LBracket, Word, RBracket, Word
            ]
        );
    }

    #[test]
    fn operators_win_over_words() {
        use TokenKind::*;
        assert_eq!(kinds("a != b && c"), [Word, BangEq, Word, AmpAmp, Word]);
        assert_eq!(kinds("a == b || c"), [Word, EqEq, Word, PipePipe, Word]);
    }

    #[test]
    fn negative_numbers_lex_as_single_words() {
        let tokens = tokenize("[-1.5e-3, +2]");
        assert_eq!(tokens[1].text, "-1.5e-3");
        assert_eq!(tokens[3].text, "+2");
    }

    #[test]
    fn forbidden_literal() {
        use TokenKind::*;
        assert_eq!(
            kinds("{a=1, b=v2}"),
            [LBrace, Word, Eq, Word, Comma, Word, Eq, Word, RBrace]
        );
    }

    #[test]
    fn punctuation_heavy_names_stay_whole() {
        let tokens = tokenize("solver@v2.0:fast/mode");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Word);
    }

    #[test]
    fn unexpected_characters_become_error_tokens() {
        let tokens = tokenize("a ^ b");
        assert_eq!(tokens[1].kind, TokenKind::Error);
    }
}
