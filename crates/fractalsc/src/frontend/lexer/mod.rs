//! Lexer module

mod scanner;
mod token;

pub use scanner::{tokenize, Lexer};
pub use token::{Token, TokenKind};
