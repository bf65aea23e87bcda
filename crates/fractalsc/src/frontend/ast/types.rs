//! Syntactic type references

use crate::common::Span;
use crate::frontend::sema::TypeId;

/// A type as written in the source: `int`, `Point`, `List<int>[]`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub name: Span,
    /// `name` is a built-in keyword (`int`, `str`, `nothing`, ...)
    pub builtin: bool,
    pub generics: Vec<TypeRef>,
    pub array: bool,
    /// Set once by the analyzer
    pub binding: Option<TypeId>,
}

impl TypeRef {
    pub fn new(name: Span, builtin: bool) -> Self {
        Self {
            name,
            builtin,
            generics: Vec::new(),
            array: false,
            binding: None,
        }
    }

    /// Lookup key of the named type, without the array suffix
    pub fn mangled_name(&self) -> String {
        mangle(self.name.text(), self.generics.len())
    }
}

/// Name used as the symbol table key for `name` with `arity` generic
/// parameters: `id` for 0, `id'1` for 1 and so on.
pub fn mangle(name: &str, arity: usize) -> String {
    if arity == 0 {
        name.to_string()
    } else {
        format!("{name}'{arity}")
    }
}
