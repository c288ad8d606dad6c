//! The declaration index: every declared type, method, and field of a
//! compilation pass, owned in arenas and referenced by id handles.
//!
//! Built once per pass and immutable afterwards; an edit rebuilds a fresh
//! registry rather than mutating this one in place, so concurrent readers
//! never observe a half-built index.

mod members;
mod types;

use crate::entity_defs::{FieldDef, MethodDef, TypeDef};
use kscr_identity::{FieldId, MethodId, NameId, TypeDefId};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    pub(crate) type_defs: Vec<TypeDef>,
    pub(crate) method_defs: Vec<MethodDef>,
    pub(crate) field_defs: Vec<FieldDef>,
    pub(crate) type_by_name: FxHashMap<NameId, TypeDefId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_count(&self) -> usize {
        self.type_defs.len()
    }

    /// All registered types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.type_defs.iter()
    }

    pub fn get_type(&self, id: TypeDefId) -> &TypeDef {
        &self.type_defs[id.index() as usize]
    }

    pub(crate) fn get_type_mut(&mut self, id: TypeDefId) -> &mut TypeDef {
        &mut self.type_defs[id.index() as usize]
    }

    pub fn get_method(&self, id: MethodId) -> &MethodDef {
        &self.method_defs[id.index() as usize]
    }

    pub fn get_field(&self, id: FieldId) -> &FieldDef {
        &self.field_defs[id.index() as usize]
    }

    /// Look up a type by its interned fully-qualified name.
    #[must_use]
    pub fn type_by_name(&self, name_id: NameId) -> Option<TypeDefId> {
        self.type_by_name.get(&name_id).copied()
    }
}
