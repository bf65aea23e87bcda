//! Fractals AST definitions

mod expr;
mod stmt;
mod types;

pub use expr::*;
pub use stmt::*;
pub use types::*;

use crate::common::Span;
use crate::frontend::sema::TypeId;
use std::sync::Arc;

/// Identity of a scope-owning or declaring node.
///
/// Assigned by the parser; used as the key of the analyzer's side tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Result of parsing one source file
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub file_path: Arc<str>,
    pub root: Block,
}

impl SyntaxTree {
    pub fn new(file_path: Arc<str>, root: Block) -> Self {
        Self { file_path, root }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// The implicit block holding a whole file
    TopLevel,
    /// A `{ ... }` body
    Block,
}

/// A list of statements with its own scope
#[derive(Debug, Clone)]
pub struct Block {
    pub id: NodeId,
    pub kind: BlockKind,
    pub children: Vec<Syntax>,
    pub span: Span,
}

/// What a name resolved to during semantic analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// A `VarDecl` or a `Parameter`
    Variable(NodeId),
    /// A `FunctionDef`
    Function(NodeId),
    Type(TypeId),
}
