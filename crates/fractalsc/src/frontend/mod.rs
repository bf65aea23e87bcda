//! Fractals front end
//!
//! The front end runs in three stages:
//! 1. Lexing source code into tokens
//! 2. Parsing tokens into a syntax tree
//! 3. Semantic analysis, binding names and types in the tree

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod sema;

/// Options for one front end run
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    /// Print the token stream to stderr
    pub dump_tokens: bool,
    /// Print the analyzed syntax tree to stderr
    pub dump_ast: bool,
    pub verbose: bool,
}
