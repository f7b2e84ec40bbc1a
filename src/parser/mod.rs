//! Format-independent lexical layer: line preprocessing and classification,
//! the line lexer, and the token cursor the grammars run on.

pub mod cursor;
pub mod lexer;
pub mod line;
pub mod pattern;

pub use cursor::Cursor;
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use line::{LineClass, classify, preprocess};
