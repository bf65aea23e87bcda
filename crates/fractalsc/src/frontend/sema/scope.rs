//! Fractals scopes and symbol tables
//!
//! Scopes live in an arena owned by [`ScopeTable`] and point at their parent
//! by id. Each scope-owning node (block, function, type definition) gets its
//! scope closed into the table once during collection and reopened by node
//! id afterwards.

use super::TypeId;
use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::{NodeId, TypeRef};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Handle of a scope in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// How far a lookup goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Only the given scope
    Local,
    /// The given scope, then each parent in turn
    Parents,
}

/// Something a scope can declare
pub trait Symbol {
    /// Where the symbol was declared
    fn span(&self) -> &Span;
}

#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub ty: TypeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionSymbol {
    /// The `FunctionDef`
    pub id: NodeId,
    pub span: Span,
    /// The function's own scope, where its signature resolves
    pub scope: ScopeId,
    pub params: Vec<(NodeId, TypeRef)>,
    pub return_type: Option<TypeRef>,
}

#[derive(Debug, Clone)]
pub struct VariableSymbol {
    /// The `VarDecl` or `Parameter`
    pub id: NodeId,
    pub span: Span,
    /// Scope the variable was declared in
    pub scope: ScopeId,
    pub declared: Option<TypeRef>,
}

impl Symbol for TypeSymbol {
    fn span(&self) -> &Span {
        &self.span
    }
}

impl Symbol for FunctionSymbol {
    fn span(&self) -> &Span {
        &self.span
    }
}

impl Symbol for VariableSymbol {
    fn span(&self) -> &Span {
        &self.span
    }
}

/// One namespace level with separate type, function and variable tables.
///
/// Types and functions are keyed by mangled name.
#[derive(Debug, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    types: HashMap<DefaultSymbol, TypeSymbol>,
    functions: HashMap<DefaultSymbol, FunctionSymbol>,
    variables: HashMap<DefaultSymbol, VariableSymbol>,
}

impl Scope {
    fn types(&self) -> &HashMap<DefaultSymbol, TypeSymbol> {
        &self.types
    }

    fn types_mut(&mut self) -> &mut HashMap<DefaultSymbol, TypeSymbol> {
        &mut self.types
    }

    fn functions(&self) -> &HashMap<DefaultSymbol, FunctionSymbol> {
        &self.functions
    }

    fn functions_mut(&mut self) -> &mut HashMap<DefaultSymbol, FunctionSymbol> {
        &mut self.functions
    }

    fn variables(&self) -> &HashMap<DefaultSymbol, VariableSymbol> {
        &self.variables
    }

    fn variables_mut(&mut self) -> &mut HashMap<DefaultSymbol, VariableSymbol> {
        &mut self.variables
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.functions.len() + self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scope arena plus the node to scope side table
#[derive(Debug, Default)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
    closed: HashMap<NodeId, ScopeId>,
    names: DefaultStringInterner,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scope under `parent`
    pub fn open(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            ..Scope::default()
        });
        tracing::trace!(?id, ?parent, "open scope");
        id
    }

    /// Record `scope` as the scope of `node`. A node is closed once.
    pub fn close(&mut self, node: NodeId, scope: ScopeId) -> CompileResult<()> {
        match self.closed.entry(node) {
            Entry::Occupied(_) => Err(CompileError::internal(format!(
                "scope of node {} closed twice",
                node.0
            ))),
            Entry::Vacant(entry) => {
                tracing::trace!(?node, ?scope, "close scope");
                entry.insert(scope);
                Ok(())
            }
        }
    }

    /// Scope previously closed for `node`
    pub fn reopen(&self, node: NodeId) -> CompileResult<ScopeId> {
        let scope = self.scope_of(node).ok_or_else(|| {
            CompileError::internal(format!("node {} has no closed scope to reopen", node.0))
        })?;
        tracing::trace!(?node, ?scope, "reopen scope");
        Ok(scope)
    }

    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.closed.get(&node).copied()
    }

    pub fn get(&self, scope: ScopeId) -> Option<&Scope> {
        self.scopes.get(scope.index())
    }

    /// Number of scopes in the arena
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Number of nodes with a closed scope
    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    // ==================== Declarations ====================

    /// Declare a type. On a duplicate the first declaration is kept and its
    /// span returned.
    pub fn declare_type(&mut self, scope: ScopeId, name: &str, symbol: TypeSymbol) -> Result<(), Span> {
        self.declare(scope, name, symbol, Scope::types_mut)
    }

    pub fn declare_function(
        &mut self,
        scope: ScopeId,
        name: &str,
        symbol: FunctionSymbol,
    ) -> Result<(), Span> {
        self.declare(scope, name, symbol, Scope::functions_mut)
    }

    pub fn declare_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        symbol: VariableSymbol,
    ) -> Result<(), Span> {
        self.declare(scope, name, symbol, Scope::variables_mut)
    }

    fn declare<T: Symbol>(
        &mut self,
        scope: ScopeId,
        name: &str,
        symbol: T,
        table: fn(&mut Scope) -> &mut HashMap<DefaultSymbol, T>,
    ) -> Result<(), Span> {
        let key = self.names.get_or_intern(name);
        let Some(target) = self.scopes.get_mut(scope.index()) else {
            return Ok(());
        };
        match table(target).entry(key) {
            Entry::Occupied(existing) => {
                tracing::debug!(symbol = name, existing = %existing.get().span(), "duplicate declaration");
                Err(existing.get().span().clone())
            }
            Entry::Vacant(entry) => {
                entry.insert(symbol);
                Ok(())
            }
        }
    }

    // ==================== Lookups ====================

    pub fn find_type(&self, scope: ScopeId, name: &str, reach: Reach) -> Option<&TypeSymbol> {
        self.find(scope, name, reach, Scope::types)
    }

    pub fn find_function(&self, scope: ScopeId, name: &str, reach: Reach) -> Option<&FunctionSymbol> {
        self.find(scope, name, reach, Scope::functions)
    }

    pub fn find_variable(&self, scope: ScopeId, name: &str, reach: Reach) -> Option<&VariableSymbol> {
        self.find(scope, name, reach, Scope::variables)
    }

    fn find<T>(
        &self,
        scope: ScopeId,
        name: &str,
        reach: Reach,
        table: fn(&Scope) -> &HashMap<DefaultSymbol, T>,
    ) -> Option<&T> {
        // A name never interned was never declared
        let key = self.names.get(name)?;
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.get(id)?;
            if let Some(found) = table(scope).get(&key) {
                return Some(found);
            }
            if reach == Reach::Local {
                break;
            }
            current = scope.parent;
        }
        None
    }
}
