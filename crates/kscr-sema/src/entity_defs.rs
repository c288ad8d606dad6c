//! Definition structs for language entities.
//!
//! These structs hold the full information about declared types, methods,
//! and fields. The corresponding ID types (TypeDefId, MethodId, FieldId)
//! are indices into the registry's vectors, so back-references between
//! owners and members never form ownership cycles.

use crate::types::Type;
use kscr_frontend::{Modifier, Symbol, TypeKind};
use kscr_identity::{FieldId, MethodId, NameId, PackageId, TypeDefId};

/// What kind of type declaration this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
    Single,
}

impl TypeDefKind {
    pub fn from_ast(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Class => Self::Class,
            TypeKind::Interface => Self::Interface,
            TypeKind::Enum => Self::Enum,
            TypeKind::Record => Self::Record,
            TypeKind::Annotation => Self::Annotation,
            TypeKind::Single => Self::Single,
        }
    }

    /// Interfaces and annotations take the interface side of the
    /// extends/implements kind rules.
    pub fn is_interface_like(self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::Annotation => "annotation",
            Self::Single => "single",
        }
    }
}

/// Compact modifier set for declarations and members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSet(u16);

impl ModifierSet {
    pub fn from_ast(modifiers: &[Modifier]) -> Self {
        let mut set = Self::default();
        for &m in modifiers {
            set.0 |= Self::bit(m);
        }
        set
    }

    fn bit(m: Modifier) -> u16 {
        1 << match m {
            Modifier::Public => 0,
            Modifier::Private => 1,
            Modifier::Protected => 2,
            Modifier::Static => 3,
            Modifier::Final => 4,
            Modifier::Abstract => 5,
            Modifier::Native => 6,
            Modifier::Synchronised => 7,
        }
    }

    pub fn contains(self, m: Modifier) -> bool {
        self.0 & Self::bit(m) != 0
    }

    pub fn with(mut self, m: Modifier) -> Self {
        self.0 |= Self::bit(m);
        self
    }

    pub fn is_static(self) -> bool {
        self.contains(Modifier::Static)
    }

    pub fn is_final(self) -> bool {
        self.contains(Modifier::Final)
    }

    pub fn is_abstract(self) -> bool {
        self.contains(Modifier::Abstract)
    }
}

/// A declared class-like type. Built once when a compilation unit's type
/// declarations are discovered; immutable for the rest of the pass.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub id: TypeDefId,
    pub name_id: NameId,
    pub kind: TypeDefKind,
    pub modifiers: ModifierSet,
    pub package: PackageId,
    /// Declared superclass; absent for interfaces and unresolved clauses.
    pub superclass: Option<TypeDefId>,
    /// Declared (or, for interfaces, extended) interfaces.
    pub interfaces: Vec<TypeDefId>,
    pub methods: Vec<MethodId>,
    pub fields: Vec<FieldId>,
}

/// One method parameter. For a varargs parameter `ty` is the array type;
/// the flag is only ever set on the last parameter.
#[derive(Debug, Clone)]
pub struct ParamDef {
    pub name: Symbol,
    pub ty: Type,
    pub varargs: bool,
}

/// A method declaration (always belongs to a type)
#[derive(Debug, Clone)]
pub struct MethodDef {
    pub id: MethodId,
    pub name: Symbol,
    pub return_type: Type,
    pub params: Vec<ParamDef>,
    pub modifiers: ModifierSet,
    pub owner: TypeDefId,
}

impl MethodDef {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn is_varargs(&self) -> bool {
        self.params.last().is_some_and(|p| p.varargs)
    }
}

/// A field declaration (always belongs to a type)
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub id: FieldId,
    pub name: Symbol,
    /// May start as Unknown and be filled in by initializer inference.
    pub ty: Type,
    pub modifiers: ModifierSet,
    pub owner: TypeDefId,
}

impl FieldDef {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_set_roundtrip() {
        let set = ModifierSet::from_ast(&[Modifier::Public, Modifier::Static, Modifier::Final]);
        assert!(set.contains(Modifier::Public));
        assert!(set.is_static());
        assert!(set.is_final());
        assert!(!set.is_abstract());
        assert!(!set.contains(Modifier::Private));
    }

    #[test]
    fn interface_like_kinds() {
        assert!(TypeDefKind::Interface.is_interface_like());
        assert!(TypeDefKind::Annotation.is_interface_like());
        assert!(!TypeDefKind::Class.is_interface_like());
        assert!(!TypeDefKind::Enum.is_interface_like());
    }
}
