//! Fractals statement and definition nodes

use super::{AccessorChain, Block, Expression, NodeId, TypeRef};
use crate::common::Span;
use crate::frontend::sema::TypeId;

/// A statement inside a block
#[derive(Debug, Clone)]
pub enum Syntax {
    TypeDef(TypeDef),
    FunctionDef(FunctionDef),
    VarDecl(VarDecl),
    Return(Return),
    Break(Span),
    Continue(Span),
    While(While),
    If(If),
    /// `import a.b.c`
    Import(Import),
    /// `path a.b.c`
    Path(PathDecl),
    Expression(Expression),
}

/// `type Name<T> { fields and methods }`
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub id: NodeId,
    pub name: Span,
    pub type_params: Option<Vec<Span>>,
    pub fields: Vec<VarDecl>,
    pub methods: Vec<FunctionDef>,
    /// `type` keyword
    pub span: Span,
    pub binding: Option<TypeId>,
}

impl TypeDef {
    pub fn arity(&self) -> usize {
        self.type_params.as_ref().map_or(0, Vec::len)
    }
}

/// `function name<T>(a: int, b: T): int { ... }`
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub id: NodeId,
    pub name: Span,
    pub type_params: Option<Vec<Span>>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    pub body: Block,
    /// `function` keyword
    pub span: Span,
}

impl FunctionDef {
    pub fn arity(&self) -> usize {
        self.type_params.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub id: NodeId,
    pub name: Span,
    pub ty: TypeRef,
}

/// `name: type -> init`, `name: type` or `name: -> init`
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub id: NodeId,
    pub name: Span,
    pub declared_type: Option<TypeRef>,
    pub init: Option<Expression>,
    pub resolved_type: Option<TypeId>,
}

#[derive(Debug, Clone)]
pub struct Return {
    pub expr: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct While {
    pub cond: Expression,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct If {
    pub cond: Expression,
    pub body: Block,
    pub else_branch: Option<Box<ElseBranch>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ElseBranch {
    /// `else if ...`
    If(If),
    /// `else { ... }`
    Else(Block),
}

#[derive(Debug, Clone)]
pub struct Import {
    pub chain: AccessorChain,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PathDecl {
    pub chain: AccessorChain,
    pub span: Span,
}
