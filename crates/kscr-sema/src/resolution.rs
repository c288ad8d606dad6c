// src/resolution.rs

use crate::scope::Variable;
use kscr_identity::{FieldId, MethodId, TypeDefId};

/// What an identifier or call node resolved to. Sema populates this,
/// navigation and downstream passes consume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A local, parameter, or synthetic variable (a snapshot of the scope
    /// entry at resolution time).
    Variable(Variable),
    /// A field, possibly inherited.
    Field(FieldId),
    /// A type declaration.
    Type(TypeDefId),
    /// A package name (dotted).
    Package(String),
    /// The best-matching method overload at a call site.
    Method(MethodId),
    /// Nothing matched; diagnosed separately.
    Unresolved,
}

impl ResolvedTarget {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolvedTarget::Unresolved)
    }

    /// The declaration this target navigates to, when it is a type.
    pub fn as_type(&self) -> Option<TypeDefId> {
        match self {
            ResolvedTarget::Type(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<MethodId> {
        match self {
            ResolvedTarget::Method(id) => Some(*id),
            _ => None,
        }
    }
}
