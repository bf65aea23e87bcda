//! Token definitions using logos

use crate::common::Span;
use logos::Logos;
use std::fmt;

/// A token with its kind and source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Token kinds.
///
/// Whitespace, line ends and comments are real tokens: statements end at a
/// line end, so the parser decides when to skip them.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Appended by the lexer, never matched
    EndOfFile,

    #[regex(r"\r\n|\n|\r")]
    EndOfLine,
    #[regex(r"[ \t\x0C]+")]
    Whitespace,
    #[regex(r"//[^\r\n]*")]
    Comment,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", priority = 1)]
    Identifier,
    #[token("int")]
    #[token("decimal")]
    #[token("bool")]
    #[token("str")]
    #[token("byte")]
    BuiltInType,
    #[token("nothing")]
    Nothing,
    #[token("true")]
    #[token("false")]
    Boolean,

    // A second dot is still a number, so the lexer can report it
    #[regex(r"[0-9]+(\.[0-9]+)*")]
    Integer,
    /// Produced by the lexer from `Integer` matches that contain a dot
    Decimal,
    // Unterminated literals stop at the line end and are reported
    #[regex(r#""[^"\r\n]*"?"#)]
    StringLiteral,

    // Keywords
    #[token("function")]
    Function,
    #[token("type")]
    Type,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("to")]
    To,
    #[token("import")]
    Import,
    #[token("path")]
    Path,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("new")]
    New,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,

    // Operators
    #[token("->")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,

    // Punctuation
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

impl TokenKind {
    /// Tokens the parser skips unless told otherwise
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::EndOfLine | TokenKind::Comment)
    }

    /// Names that may start a type reference
    pub fn is_type_name(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::BuiltInType | TokenKind::Nothing)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::EndOfFile => "end of file",
            TokenKind::EndOfLine => "end of line",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Identifier => "identifier",
            TokenKind::BuiltInType => "built-in type",
            TokenKind::Nothing => "nothing",
            TokenKind::Boolean => "boolean",
            TokenKind::Integer => "integer",
            TokenKind::Decimal => "decimal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Function => "function",
            TokenKind::Type => "type",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::To => "to",
            TokenKind::Import => "import",
            TokenKind::Path => "path",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::New => "new",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Assign => "->",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::GtEq => ">=",
            TokenKind::LtEq => "<=",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semi => ";",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
        };
        write!(f, "{s}")
    }
}
