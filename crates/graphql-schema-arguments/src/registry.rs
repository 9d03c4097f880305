use std::{collections::HashMap, hash::BuildHasher, sync::Arc};

use indexmap::IndexMap;

use crate::{NamedType, NamedTypeKind, RuntimeType};

/// Lookup of the types defined by a schema, by name.
///
/// Implementations must be callable any number of times and must be able to hand out references
/// to types whose bodies are not built yet, since type definitions can refer to each other.
pub trait TypeLookup {
    fn lookup(&self, name: &str) -> Option<RuntimeType>;
}

impl<T: TypeLookup + ?Sized> TypeLookup for &T {
    fn lookup(&self, name: &str) -> Option<RuntimeType> {
        (**self).lookup(name)
    }
}

impl<S: BuildHasher> TypeLookup for HashMap<String, RuntimeType, S> {
    fn lookup(&self, name: &str) -> Option<RuntimeType> {
        self.get(name).cloned()
    }
}

impl<S: BuildHasher> TypeLookup for IndexMap<String, RuntimeType, S> {
    fn lookup(&self, name: &str) -> Option<RuntimeType> {
        self.get(name).cloned()
    }
}

/// An in-memory type registry, in registration order.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: IndexMap<String, RuntimeType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named type and returns the reference handed out by lookups. Registering the
    /// same name twice keeps the first definition.
    pub fn register(&mut self, name: &str, kind: NamedTypeKind) -> RuntimeType {
        self.types
            .entry(name.to_owned())
            .or_insert_with(|| RuntimeType::NamedRef(Arc::new(NamedType::new(name, kind))))
            .clone()
    }

    /// Stores an arbitrary type under `name`, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, ty: RuntimeType) -> Option<RuntimeType> {
        self.types.insert(name.into(), ty)
    }

    pub fn get(&self, name: &str) -> Option<&RuntimeType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl TypeLookup for TypeRegistry {
    fn lookup(&self, name: &str) -> Option<RuntimeType> {
        self.types.get(name).cloned()
    }
}
