//! Expressions, accessor chains and type references
//!
//! Binary operators are found by peeking past trivia, so an expression may
//! continue on the next line after an operator and still end on its last
//! token.

use super::parser::Parser;
use super::Sensitivity;
use crate::common::Span;
use crate::frontend::ast::*;
use crate::frontend::lexer::TokenKind;

impl Parser {
    pub(super) fn parse_expression(&mut self) -> Expression {
        Expression::new(self.parse_logical())
    }

    /// Left-associative binary level: `operand (op operand)*`
    fn parse_binary(
        &mut self,
        operand: fn(&mut Self) -> Expr,
        operator: fn(TokenKind) -> Option<BinaryKind>,
    ) -> Expr {
        let mut left = operand(self);
        while let Some(kind) = operator(self.peek()) {
            self.move_next();
            let op_span = self.span();
            self.move_next();
            let right = operand(self);
            left = Expr::Binary(Box::new(BinaryOp {
                kind,
                left,
                right,
                op_span,
                resolved_type: None,
            }));
        }
        left
    }

    fn parse_logical(&mut self) -> Expr {
        self.parse_binary(Self::parse_equality, |kind| match kind {
            TokenKind::And => Some(BinaryKind::And),
            TokenKind::Or => Some(BinaryKind::Or),
            _ => None,
        })
    }

    fn parse_equality(&mut self) -> Expr {
        self.parse_binary(Self::parse_relational, |kind| match kind {
            TokenKind::EqEq => Some(BinaryKind::Equal),
            TokenKind::NotEq => Some(BinaryKind::NotEqual),
            _ => None,
        })
    }

    fn parse_relational(&mut self) -> Expr {
        self.parse_binary(Self::parse_additive, |kind| match kind {
            TokenKind::Gt => Some(BinaryKind::Greater),
            TokenKind::Lt => Some(BinaryKind::Less),
            TokenKind::GtEq => Some(BinaryKind::GreaterEqual),
            TokenKind::LtEq => Some(BinaryKind::LessEqual),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> Expr {
        self.parse_binary(Self::parse_multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryKind::Add),
            TokenKind::Minus => Some(BinaryKind::Subtract),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> Expr {
        self.parse_binary(Self::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinaryKind::Multiply),
            TokenKind::Slash => Some(BinaryKind::Divide),
            TokenKind::Percent => Some(BinaryKind::Modulo),
            _ => None,
        })
    }

    fn parse_unary(&mut self) -> Expr {
        let kind = match self.kind() {
            TokenKind::Minus => UnaryKind::Negate,
            TokenKind::Not => UnaryKind::Not,
            _ => return self.parse_primary(),
        };
        let op_span = self.span();
        self.move_next();
        let operand = self.parse_unary();
        Expr::Unary(Box::new(UnaryOp {
            kind,
            operand,
            op_span,
            resolved_type: None,
        }))
    }

    fn parse_primary(&mut self) -> Expr {
        let span = self.span();
        match self.kind() {
            TokenKind::Integer => Expr::Integer(Literal::new(span)),
            TokenKind::Decimal => Expr::Decimal(Literal::new(span)),
            TokenKind::Boolean => Expr::Boolean(Literal::new(span)),
            TokenKind::StringLiteral => Expr::StringLiteral(Literal::new(span)),
            TokenKind::Nothing => Expr::Nothing(span),
            TokenKind::LParen => {
                self.move_next();
                let inner = self.parse_expression();
                self.close(TokenKind::RParen, "Expected a ).");
                inner.root
            }
            TokenKind::New => self.parse_new(),
            TokenKind::Identifier | TokenKind::BuiltInType => match self.parse_accessor_chain() {
                Some(chain) => Expr::Chain(chain),
                None => Expr::Missing(span),
            },
            _ => {
                self.error("Invalid term in expression.");
                Expr::Missing(span)
            }
        }
    }

    /// `new [expr]`, `new Name(args)`, `new Name<T>(args)` or `new int[size]`
    fn parse_new(&mut self) -> Expr {
        let span = self.span();
        self.move_next();

        if self.at(TokenKind::LBracket) {
            self.move_next();
            let expr = self.parse_expression();
            self.close(TokenKind::RBracket, "Expected ].");
            return Expr::ArrayInitializer(Box::new(ArrayInitializer { expr, span }));
        }

        match self.parse_accessor_chain() {
            Some(chain)
                if matches!(
                    chain.links.first(),
                    Some(Link::FunctionCall { .. } | Link::Indexor { .. })
                ) =>
            {
                Expr::New(New { chain, span })
            }
            _ => {
                self.error("Invalid new operation.");
                Expr::Missing(span)
            }
        }
    }

    /// Move onto the expected closing token when it is next, otherwise
    /// report it missing and stay. Returns the span of the closing token.
    fn close(&mut self, kind: TokenKind, message: &str) -> Span {
        if self.peek() == kind {
            self.move_next();
        } else {
            let span = self.peek_span();
            self.error_at(message, span);
        }
        self.span()
    }

    // ==================== Accessor chains ====================

    /// Parse `link(.link)*`. Returns `None` when the first token cannot
    /// start a link.
    pub(super) fn parse_accessor_chain(&mut self) -> Option<AccessorChain> {
        let span = self.span();
        let mut links = Vec::new();

        loop {
            links.push(self.parse_link()?);
            if self.peek() != TokenKind::Dot {
                break;
            }
            self.move_next();
            self.move_next();
        }

        Some(AccessorChain::new(links, span))
    }

    fn parse_link(&mut self) -> Option<Link> {
        let named = matches!(self.kind(), TokenKind::Identifier | TokenKind::BuiltInType);

        if named && self.peek() == TokenKind::LBracket {
            Some(self.parse_indexor())
        } else if named && (self.peek() == TokenKind::LParen || self.generic_call_ahead()) {
            Some(self.parse_call())
        } else if self.at(TokenKind::Identifier) {
            Some(Link::Identifier(Identifier::new(self.span())))
        } else {
            self.error("Expected indexor, identifier or function call.");
            None
        }
    }

    /// Whether the `<` after the current name opens the type arguments of a
    /// call: a list of type names, commas, brackets and nested lists, closed
    /// by `>` and directly followed by `(`.
    fn generic_call_ahead(&self) -> bool {
        let mut ahead = self.lookahead();
        if ahead.next() != Some(TokenKind::Lt) {
            return false;
        }

        let mut depth = 1usize;
        while let Some(kind) = ahead.next() {
            match kind {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        return ahead.next() == Some(TokenKind::LParen);
                    }
                }
                TokenKind::Identifier
                | TokenKind::BuiltInType
                | TokenKind::Nothing
                | TokenKind::Comma
                | TokenKind::LBracket
                | TokenKind::RBracket => {}
                _ => return false,
            }
        }
        false
    }

    fn parse_indexor(&mut self) -> Link {
        let identifier = Identifier::new(self.span());
        self.move_next();

        let (index, end) = if self.peek() == TokenKind::RBracket {
            self.move_next();
            self.error("Indexors require an index to be specified.");
            (Expression::new(Expr::Missing(self.span())), self.span())
        } else {
            self.move_next();
            let index = self.parse_expression();
            let end = self.close(TokenKind::RBracket, "Indexor is missing ].");
            (index, end)
        };

        Link::Indexor {
            identifier,
            index: Box::new(index),
            end,
        }
    }

    fn parse_call(&mut self) -> Link {
        let identifier = Identifier::new(self.span());
        self.move_next();

        let type_args = if self.at(TokenKind::Lt) {
            let types = self.parse_type_args();
            self.move_next();
            Some(types)
        } else {
            None
        };

        self.expect(TokenKind::LParen, "Function call is missing (.");
        let (args, end) = self.parse_arguments();

        Link::FunctionCall {
            identifier,
            type_args,
            args,
            end,
        }
    }

    /// Arguments of a call, starting on `(` and ending on `)`
    fn parse_arguments(&mut self) -> (Vec<Expression>, Span) {
        let mut args = Vec::new();
        if self.peek() == TokenKind::RParen {
            self.move_next();
            return (args, self.span());
        }

        self.move_next();
        loop {
            args.push(self.parse_expression());
            match self.peek() {
                TokenKind::RParen => {
                    self.move_next();
                    break;
                }
                TokenKind::Comma => {
                    self.move_next();
                    self.move_next();
                }
                TokenKind::EndOfFile
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::RBracket => {
                    let span = self.peek_span();
                    self.error_at("Function call is missing ).", span);
                    break;
                }
                _ => {
                    let span = self.peek_span();
                    self.error_at("Expected comma between function call parameters.", span);
                    self.move_next();
                }
            }
        }

        (args, self.span())
    }

    // ==================== Types ====================

    /// `name`, `name<T, U>`, `name[]`, starting on the name
    pub(super) fn parse_type(&mut self) -> TypeRef {
        if !self.kind().is_type_name() {
            self.error("Type should have a valid name.");
        }
        let builtin = matches!(self.kind(), TokenKind::BuiltInType | TokenKind::Nothing);
        let mut ty = TypeRef::new(self.span(), builtin);

        if self.peek() == TokenKind::Lt {
            self.move_next();
            ty.generics = self.parse_type_args();
        }

        if self.peek_with(Sensitivity::ALL) == TokenKind::LBracket {
            self.move_next_with(Sensitivity::ALL);
            if self.peek_with(Sensitivity::ALL) == TokenKind::RBracket {
                self.move_next_with(Sensitivity::ALL);
            } else {
                self.error("Expected ].");
            }
            ty.array = true;
        }

        ty
    }

    /// `<int, T[]>` after a type or call name, starting on `<`
    fn parse_type_args(&mut self) -> Vec<TypeRef> {
        let mut types = Vec::new();
        self.move_next();

        if self.at(TokenKind::Gt) {
            self.error("Generics list should have at least one type.");
            return types;
        }

        loop {
            if self.kind().is_type_name() {
                types.push(self.parse_type());
            } else {
                self.error("Expected type name.");
                types.push(TypeRef::new(self.span(), false));
            }
            self.move_next();

            if self.at(TokenKind::Gt) {
                break;
            }
            self.expect(TokenKind::Comma, "Expected comma.");
            if !self.move_next() {
                break;
            }
        }

        self.expect(TokenKind::Gt, "Generics list should end with >.");
        types
    }
}
