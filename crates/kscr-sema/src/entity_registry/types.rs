//! Type registration and hierarchy queries for EntityRegistry.

use super::EntityRegistry;
use crate::entity_defs::{ModifierSet, TypeDef, TypeDefKind};
use kscr_identity::{MethodId, NameId, PackageId, TypeDefId};
use rustc_hash::FxHashSet;

impl EntityRegistry {
    /// Register a new type declaration
    pub fn register_type(
        &mut self,
        name_id: NameId,
        kind: TypeDefKind,
        modifiers: ModifierSet,
        package: PackageId,
    ) -> TypeDefId {
        let id = TypeDefId::new(self.type_defs.len() as u32);
        self.type_defs.push(TypeDef {
            id,
            name_id,
            kind,
            modifiers,
            package,
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        });
        self.type_by_name.insert(name_id, id);
        id
    }

    pub fn set_superclass(&mut self, id: TypeDefId, superclass: TypeDefId) {
        self.get_type_mut(id).superclass = Some(superclass);
    }

    pub fn add_interface(&mut self, id: TypeDefId, interface: TypeDefId) {
        self.get_type_mut(id).interfaces.push(interface);
    }

    /// Whether `value` is, extends, or implements `target` — the class-level
    /// assignability walk. Superclass edge first, then interfaces, first
    /// success wins. The visited set guards against supertype cycles in
    /// malformed mid-edit source.
    pub fn extends_or_implements(&self, value: TypeDefId, target: TypeDefId) -> bool {
        let mut visited = FxHashSet::default();
        self.hierarchy_contains(value, target, &mut visited)
    }

    fn hierarchy_contains(
        &self,
        value: TypeDefId,
        target: TypeDefId,
        visited: &mut FxHashSet<TypeDefId>,
    ) -> bool {
        if value == target {
            return true;
        }
        if !visited.insert(value) {
            return false;
        }
        let def = self.get_type(value);
        if let Some(superclass) = def.superclass
            && self.hierarchy_contains(superclass, target, visited)
        {
            return true;
        }
        def.interfaces
            .iter()
            .any(|&i| self.hierarchy_contains(i, target, visited))
    }

    /// Every supertype of `id` (including itself), superclass chain before
    /// interfaces, in deterministic first-visit order.
    pub fn hierarchy_of(&self, id: TypeDefId) -> Vec<TypeDefId> {
        let mut out = Vec::new();
        let mut visited = FxHashSet::default();
        self.collect_hierarchy(id, &mut out, &mut visited);
        out
    }

    fn collect_hierarchy(
        &self,
        id: TypeDefId,
        out: &mut Vec<TypeDefId>,
        visited: &mut FxHashSet<TypeDefId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        out.push(id);
        let def = self.get_type(id);
        if let Some(superclass) = def.superclass {
            self.collect_hierarchy(superclass, out, visited);
        }
        for &interface in &def.interfaces {
            self.collect_hierarchy(interface, out, visited);
        }
    }

    /// Every method declared anywhere in the hierarchy of `id`, in
    /// deterministic order: declaring type first (declaration order), then
    /// its superclass chain, then interfaces.
    pub fn methods_in_hierarchy(&self, id: TypeDefId) -> Vec<MethodId> {
        let mut out = Vec::new();
        for ty in self.hierarchy_of(id) {
            out.extend_from_slice(&self.get_type(ty).methods);
        }
        tracing::trace!(ty = id.index(), count = out.len(), "gathered hierarchy methods");
        out
    }
}
