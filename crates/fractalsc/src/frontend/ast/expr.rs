//! Fractals expression AST nodes

use super::{Binding, TypeRef};
use crate::common::Span;
use crate::frontend::sema::TypeId;

/// A full expression as used by statements, with its resolved type
#[derive(Debug, Clone)]
pub struct Expression {
    pub root: Expr,
    pub resolved_type: Option<TypeId>,
}

impl Expression {
    pub fn new(root: Expr) -> Self {
        Self {
            root,
            resolved_type: None,
        }
    }
}

/// Expression kinds
#[derive(Debug, Clone)]
pub enum Expr {
    Binary(Box<BinaryOp>),
    Unary(Box<UnaryOp>),
    /// `a.b[0].c()`
    Chain(AccessorChain),
    Integer(Literal),
    Decimal(Literal),
    Boolean(Literal),
    StringLiteral(Literal),
    /// `new Point(1, 2)`, `new int[4]`
    New(New),
    /// `new [expr]`
    ArrayInitializer(Box<ArrayInitializer>),
    Nothing(Span),
    /// Placeholder for a malformed term, already reported by the parser
    Missing(Span),
}

impl Expr {
    /// Span of the expression's first token
    pub fn span(&self) -> &Span {
        match self {
            Expr::Binary(b) => b.left.span(),
            Expr::Unary(u) => &u.op_span,
            Expr::Chain(c) => &c.span,
            Expr::Integer(l) | Expr::Decimal(l) | Expr::Boolean(l) | Expr::StringLiteral(l) => &l.span,
            Expr::New(n) => &n.span,
            Expr::ArrayInitializer(a) => &a.span,
            Expr::Nothing(span) | Expr::Missing(span) => span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    And,
    Or,
    /// `target -> value`
    Assign,
}

impl BinaryKind {
    /// Operators whose result is `bool` regardless of the operand type
    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            BinaryKind::Equal
                | BinaryKind::NotEqual
                | BinaryKind::Greater
                | BinaryKind::Less
                | BinaryKind::GreaterEqual
                | BinaryKind::LessEqual
                | BinaryKind::And
                | BinaryKind::Or
        )
    }
}

#[derive(Debug, Clone)]
pub struct BinaryOp {
    pub kind: BinaryKind,
    pub left: Expr,
    pub right: Expr,
    pub op_span: Span,
    pub resolved_type: Option<TypeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryKind {
    Negate,
    Not,
}

#[derive(Debug, Clone)]
pub struct UnaryOp {
    pub kind: UnaryKind,
    pub operand: Expr,
    pub op_span: Span,
    pub resolved_type: Option<TypeId>,
}

#[derive(Debug, Clone)]
pub struct Literal {
    pub span: Span,
    pub resolved_type: Option<TypeId>,
}

impl Literal {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            resolved_type: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct New {
    pub chain: AccessorChain,
    /// `new` keyword
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ArrayInitializer {
    pub expr: Expression,
    pub span: Span,
}

/// Flat dot-separated access path. Never empty.
#[derive(Debug, Clone)]
pub struct AccessorChain {
    pub links: Vec<Link>,
    /// First token of the chain
    pub span: Span,
    pub resolved_type: Option<TypeId>,
}

impl AccessorChain {
    pub fn new(links: Vec<Link>, span: Span) -> Self {
        Self {
            links,
            span,
            resolved_type: None,
        }
    }

    pub fn last(&self) -> Option<&Link> {
        self.links.last()
    }

    /// `true` for a single plain name such as `x`
    pub fn is_single_identifier(&self) -> bool {
        matches!(self.links.as_slice(), [Link::Identifier(_)])
    }
}

/// A name within a chain and what it was bound to
#[derive(Debug, Clone)]
pub struct Identifier {
    pub span: Span,
    pub binding: Option<Binding>,
}

impl Identifier {
    pub fn new(span: Span) -> Self {
        Self { span, binding: None }
    }

    pub fn name(&self) -> &str {
        self.span.text()
    }
}

/// One hop of an accessor chain
#[derive(Debug, Clone)]
pub enum Link {
    /// `name`
    Identifier(Identifier),
    /// `name[index]`
    Indexor {
        identifier: Identifier,
        index: Box<Expression>,
        /// Closing `]`
        end: Span,
    },
    /// `name(args)` or `name<T>(args)`
    FunctionCall {
        identifier: Identifier,
        type_args: Option<Vec<TypeRef>>,
        args: Vec<Expression>,
        /// Closing `)`
        end: Span,
    },
}

impl Link {
    pub fn identifier(&self) -> &Identifier {
        match self {
            Link::Identifier(identifier)
            | Link::Indexor { identifier, .. }
            | Link::FunctionCall { identifier, .. } => identifier,
        }
    }

    /// Last token of the link
    pub fn end(&self) -> &Span {
        match self {
            Link::Identifier(identifier) => &identifier.span,
            Link::Indexor { end, .. } | Link::FunctionCall { end, .. } => end,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Link::FunctionCall { .. })
    }
}
