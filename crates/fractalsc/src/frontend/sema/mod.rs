//! Semantic analysis: scopes, name binding and type checking

mod analyzer;
mod expr;
mod scope;
mod types;

pub use analyzer::SemanticAnalyzer;
pub use scope::{FunctionSymbol, Reach, Scope, ScopeId, ScopeTable, TypeSymbol, VariableSymbol};
pub use types::{TypeId, TypeInfo, TypeKind, TypeRegistry};
