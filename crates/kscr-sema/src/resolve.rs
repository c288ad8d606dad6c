// src/resolve.rs
//
// Type resolution: converts TypeRef (AST representation) to Type
// (semantic representation).

use crate::entity_registry::EntityRegistry;
use crate::types::Type;
use kscr_identity::{Resolver, TypeDefId};
use kscr_frontend::{TypeRef, TypeRefNode};

/// Extension trait for Resolver that adds entity resolution.
/// These methods need the EntityRegistry, so they live in sema rather
/// than in the identity crate.
pub trait ResolverEntityExt {
    /// Resolve a short or qualified name to a declared type through the
    /// candidate chain.
    fn resolve_type_str(&self, name: &str, registry: &EntityRegistry) -> Option<TypeDefId>;
}

impl ResolverEntityExt for Resolver<'_> {
    fn resolve_type_str(&self, name: &str, registry: &EntityRegistry) -> Option<TypeDefId> {
        self.resolve_str(name)
            .and_then(|name_id| registry.type_by_name(name_id))
    }
}

/// Resolve a syntactic type reference to a semantic type.
///
/// Unresolved names and inferred markers (`var`/`val`) come back as
/// `Unknown`; the caller decides whether that is a diagnostic
/// (a supertype clause) or an inference site (a variable declaration).
pub fn resolve_type_ref(
    node: &TypeRefNode,
    resolver: &Resolver<'_>,
    registry: &EntityRegistry,
) -> Type {
    resolve_ref(&node.ty, resolver, registry)
}

fn resolve_ref(ty: &TypeRef, resolver: &Resolver<'_>, registry: &EntityRegistry) -> Type {
    match ty {
        TypeRef::Primitive(kind) => Type::Primitive(*kind),
        TypeRef::Named(name) => match resolver.resolve_type_str(name, registry) {
            Some(id) => Type::Class(id),
            None => Type::Unknown,
        },
        TypeRef::Array(component) => {
            let component = resolve_ref(component, resolver, registry);
            if component.is_unknown() {
                Type::Unknown
            } else {
                Type::array(component)
            }
        }
        TypeRef::Inferred { .. } => Type::Unknown,
    }
}
