//! Type registry
//!
//! Types are handles into a per-analyzer registry and are compared by
//! identity. Built-ins occupy fixed handles.

use crate::frontend::ast::NodeId;
use std::collections::HashMap;

/// Handle of a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub const NOTHING: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const DECIMAL: TypeId = TypeId(2);
    pub const BOOL: TypeId = TypeId(3);
    pub const STR: TypeId = TypeId(4);
    pub const BYTE: TypeId = TypeId(5);

    fn index(self) -> usize {
        self.0 as usize
    }
}

const BUILTINS: [(&str, TypeId); 6] = [
    ("nothing", TypeId::NOTHING),
    ("int", TypeId::INT),
    ("decimal", TypeId::DECIMAL),
    ("bool", TypeId::BOOL),
    ("str", TypeId::STR),
    ("byte", TypeId::BYTE),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Builtin,
    /// Declared by the `TypeDef` with this id
    User { node: NodeId },
    /// Type parameter of a generic function or type
    Generic,
    /// `element[]`
    Array(TypeId),
}

#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub name: String,
    pub kind: TypeKind,
}

/// All types known to one compilation
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    arrays: HashMap<TypeId, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let types = BUILTINS
            .iter()
            .map(|(name, _)| TypeInfo {
                name: (*name).to_string(),
                kind: TypeKind::Builtin,
            })
            .collect();
        Self {
            types,
            arrays: HashMap::new(),
        }
    }

    /// Handle of a built-in type keyword
    pub fn builtin(name: &str) -> Option<TypeId> {
        BUILTINS.iter().find(|(n, _)| *n == name).map(|(_, id)| *id)
    }

    fn register(&mut self, name: String, kind: TypeKind) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        tracing::trace!(type_name = %name, ?kind, ?id, "register type");
        self.types.push(TypeInfo { name, kind });
        id
    }

    pub fn register_user(&mut self, name: &str, node: NodeId) -> TypeId {
        self.register(name.to_string(), TypeKind::User { node })
    }

    pub fn register_generic(&mut self, name: &str) -> TypeId {
        self.register(name.to_string(), TypeKind::Generic)
    }

    /// The array type of `element`, registered once per element type
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        if let Some(id) = self.arrays.get(&element) {
            return *id;
        }
        let name = format!("{}[]", self.name(element));
        let id = self.register(name, TypeKind::Array(element));
        self.arrays.insert(element, id);
        id
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeInfo> {
        self.types.get(id.index())
    }

    /// Display name, such as `int`, `Point` or `int[]`
    pub fn name(&self, id: TypeId) -> &str {
        self.get(id).map_or("?", |info| info.name.as_str())
    }

    pub fn kind(&self, id: TypeId) -> Option<TypeKind> {
        self.get(id).map(|info| info.kind)
    }

    /// The `TypeDef` that declared a user type
    pub fn user_node(&self, id: TypeId) -> Option<NodeId> {
        match self.kind(id)? {
            TypeKind::User { node } => Some(node),
            _ => None,
        }
    }

    pub fn element(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id)? {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Whether `id` is a type parameter or an array of one
    pub fn is_generic(&self, id: TypeId) -> bool {
        match self.kind(id) {
            Some(TypeKind::Generic) => true,
            Some(TypeKind::Array(element)) => self.is_generic(element),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
