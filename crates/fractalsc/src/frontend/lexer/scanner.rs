//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{Diagnostics, Span};
use logos::Logos;
use std::sync::Arc;

/// Lexer for Fractals source code
pub struct Lexer<'a> {
    source: &'a str,
    file_path: Arc<str>,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str, file_path: impl Into<Arc<str>>) -> Self {
        Self {
            source,
            file_path: file_path.into(),
            line: 1,
            line_start: 0,
        }
    }

    /// Tokenize the whole source.
    ///
    /// The result always ends with an `EndOfFile` token. Malformed literals
    /// and unknown characters are reported to `diagnostics`; malformed
    /// literals still produce a token.
    #[tracing::instrument(skip_all, fields(file = %self.file_path, source_len = self.source.len()))]
    pub fn tokenize(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut inner = TokenKind::lexer(self.source);

        while let Some(result) = inner.next() {
            let range = inner.span();
            let span = self.span_at(range.start, range.end);

            match result {
                Ok(TokenKind::Integer) => {
                    let dots = inner.slice().matches('.').count();
                    if dots > 1 {
                        diagnostics.lexical("Too many decimal points.", span.clone());
                    }
                    let kind = if dots > 0 { TokenKind::Decimal } else { TokenKind::Integer };
                    tokens.push(Token::new(kind, span));
                }
                Ok(TokenKind::StringLiteral) => {
                    let slice = inner.slice();
                    if slice.len() < 2 || !slice.ends_with('"') {
                        diagnostics.lexical("Missing end quote.", span.clone());
                    }
                    tokens.push(Token::new(TokenKind::StringLiteral, span));
                }
                Ok(TokenKind::EndOfLine) => {
                    tokens.push(Token::new(TokenKind::EndOfLine, span));
                    self.line += 1;
                    self.line_start = range.end;
                }
                Ok(kind) => tokens.push(Token::new(kind, span)),
                Err(()) => {
                    diagnostics.lexical(format!("Unexpected character '{}'.", inner.slice()), span);
                }
            }
        }

        let len = self.source.len();
        let mut eof = self.span_at(len, len);
        eof.text = None;
        tokens.push(Token::new(TokenKind::EndOfFile, eof));

        tracing::debug!(token_count = tokens.len(), "lexed");
        tokens
    }

    fn span_at(&self, start: usize, end: usize) -> Span {
        let column = self.source[self.line_start..start].chars().count() + 1;
        Span::new(
            Some(self.source[start..end].to_string()),
            Arc::clone(&self.file_path),
            start,
            end - start,
            self.line,
            column,
        )
    }
}

/// Tokenize `source` in one call
pub fn tokenize(source: &str, file_path: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    Lexer::new(source, file_path).tokenize(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut diagnostics = Diagnostics::new();
        tokenize(source, "test.fr", &mut diagnostics)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn significant(source: &str) -> Vec<TokenKind> {
        kinds(source).into_iter().filter(|k| !k.is_trivia()).collect()
    }

    #[test]
    fn test_keywords() {
        let source = "function type if else while for to import path return break continue new and or not";
        assert_eq!(
            significant(source),
            vec![
                TokenKind::Function,
                TokenKind::Type,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::For,
                TokenKind::To,
                TokenKind::Import,
                TokenKind::Path,
                TokenKind::Return,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::New,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_builtin_types_and_literals() {
        assert_eq!(
            significant("int decimal bool str byte nothing true false 42 3.5 \"hi\" integer"),
            vec![
                TokenKind::BuiltInType,
                TokenKind::BuiltInType,
                TokenKind::BuiltInType,
                TokenKind::BuiltInType,
                TokenKind::BuiltInType,
                TokenKind::Nothing,
                TokenKind::Boolean,
                TokenKind::Boolean,
                TokenKind::Integer,
                TokenKind::Decimal,
                TokenKind::StringLiteral,
                TokenKind::Identifier,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            significant("-> + - * / % == != > < >= <= . , : ; { } ( ) [ ]"),
            vec![
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::GtEq,
                TokenKind::LtEq,
                TokenKind::Dot,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semi,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_trivia_is_retained() {
        assert_eq!(
            kinds("x -> 1 // set\r\ny"),
            vec![
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Assign,
                TokenKind::Whitespace,
                TokenKind::Integer,
                TokenKind::Whitespace,
                TokenKind::Comment,
                TokenKind::EndOfLine,
                TokenKind::Identifier,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_spans_track_lines_and_columns() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("a\n  bc", "test.fr", &mut diagnostics);
        let bc = tokens.iter().find(|t| t.span.text() == "bc").unwrap();

        assert_eq!(bc.span.line, 2);
        assert_eq!(bc.span.column, 3);
        assert_eq!(bc.span.offset, 4);
        assert_eq!(&*bc.span.file_path, "test.fr");

        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::EndOfFile);
        assert_eq!(eof.span.text, None);
        assert_eq!(eof.span.offset, 6);
    }

    #[test]
    fn test_unterminated_string_is_reported() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("s -> \"abc\nx", "test.fr", &mut diagnostics);

        assert_eq!(diagnostics.messages(), vec!["Missing end quote."]);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::StringLiteral));
    }

    #[test]
    fn test_too_many_decimal_points() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("1.2.3", "test.fr", &mut diagnostics);

        assert_eq!(diagnostics.messages(), vec!["Too many decimal points."]);
        assert_eq!(tokens[0].kind, TokenKind::Decimal);
    }

    #[test]
    fn test_unexpected_character() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("a $ b", "test.fr", &mut diagnostics);

        assert_eq!(diagnostics.messages(), vec!["Unexpected character '$'."]);
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Identifier).count(),
            2
        );
    }
}
