//! Method and field registration and lookup for EntityRegistry.

use super::EntityRegistry;
use crate::entity_defs::{FieldDef, MethodDef, ModifierSet, ParamDef};
use crate::types::Type;
use kscr_frontend::Symbol;
use kscr_identity::{FieldId, MethodId, TypeDefId};

impl EntityRegistry {
    /// Register a method on its owning type
    pub fn register_method(
        &mut self,
        owner: TypeDefId,
        name: Symbol,
        return_type: Type,
        params: Vec<ParamDef>,
        modifiers: ModifierSet,
    ) -> MethodId {
        let id = MethodId::new(self.method_defs.len() as u32);
        self.method_defs.push(MethodDef {
            id,
            name,
            return_type,
            params,
            modifiers,
            owner,
        });
        self.get_type_mut(owner).methods.push(id);
        id
    }

    /// Register a field on its owning type
    pub fn register_field(
        &mut self,
        owner: TypeDefId,
        name: Symbol,
        ty: Type,
        modifiers: ModifierSet,
    ) -> FieldId {
        let id = FieldId::new(self.field_defs.len() as u32);
        self.field_defs.push(FieldDef {
            id,
            name,
            ty,
            modifiers,
            owner,
        });
        self.get_type_mut(owner).fields.push(id);
        id
    }

    /// Patch a field's type after initializer inference.
    pub(crate) fn set_field_type(&mut self, id: FieldId, ty: Type) {
        self.field_defs[id.index() as usize].ty = ty;
    }

    /// First field named `name` declared directly on `owner`.
    pub fn field_on(&self, owner: TypeDefId, name: Symbol) -> Option<FieldId> {
        self.get_type(owner)
            .fields
            .iter()
            .copied()
            .find(|&f| self.get_field(f).name == name)
    }

    /// First field named `name` anywhere in the hierarchy of `owner`,
    /// nearest declaration wins.
    pub fn field_in_hierarchy(&self, owner: TypeDefId, name: Symbol) -> Option<FieldId> {
        self.hierarchy_of(owner)
            .into_iter()
            .find_map(|ty| self.field_on(ty, name))
    }

    /// Methods declared directly on `owner`, in declaration order.
    pub fn methods_on(&self, owner: TypeDefId) -> &[MethodId] {
        &self.get_type(owner).methods
    }

    /// Count registered static methods (for debugging)
    pub fn static_method_count(&self) -> usize {
        self.method_defs.iter().filter(|m| m.is_static()).count()
    }
}
