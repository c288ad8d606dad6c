// src/analyzer/declarations.rs
//
// Declaration passes: register every type in the compilation scope, link
// supertypes with kind checking, then register methods and fields. Field
// types declared `var`/`val` are inferred in a final pass once every
// signature is known.

use super::{Analyzer, BodyCtx};
use crate::entity_defs::{ModifierSet, ParamDef, TypeDefKind};
use crate::problems::{SemanticProblem, src_span};
use crate::resolve::ResolverEntityExt;
use crate::scope::Scope;
use crate::types::Type;
use kscr_frontend::{
    FieldDecl, Member, MethodDecl, Modifier, SourceFile, TypeDecl, TypeRef, TypeRefNode,
};
use kscr_identity::{PackageId, TypeDefId};

/// What a supertype clause entry resolved to, before linking.
enum SupertypeLink {
    Superclass(TypeDefId),
    Interface(TypeDefId),
    None,
}

impl<'a> Analyzer<'a> {
    // ========================================================================
    // Pass 1: type registration
    // ========================================================================

    /// Register every type declared by `file`, including nested ones.
    pub fn declare_types(&mut self, file: &SourceFile) {
        let package = self.db.names.package_id(file.package_name());
        if let Some(decl) = &file.type_decl {
            let mut path = Vec::new();
            self.declare_type_tree(decl, package, &mut path);
        }
    }

    fn declare_type_tree(&mut self, decl: &TypeDecl, package: PackageId, path: &mut Vec<&'a str>) {
        let interner = self.interner;
        path.push(interner.resolve(decl.name));
        let name_id = self.db.names.intern(package, path);
        let kind = TypeDefKind::from_ast(decl.kind);
        let modifiers = ModifierSet::from_ast(&decl.modifiers);
        let id = self.db.entities.register_type(name_id, kind, modifiers, package);
        tracing::debug!(ty = id.index(), name = %path.join("."), "registered type");

        for member in &decl.members {
            if let Member::Type(nested) = member {
                self.declare_type_tree(nested, package, path);
            }
        }
        path.pop();
    }

    // ========================================================================
    // Pass 2: supertype linking with kind checks
    // ========================================================================

    /// Resolve and kind-check the file's extends/implements clauses.
    /// Requires every file's types to be declared first.
    pub fn link_supertypes(&mut self, file: &SourceFile) {
        let Some(decl) = &file.type_decl else { return };
        let package = file.package_name().to_string();
        let mut path = Vec::new();
        self.link_type_tree(decl, file, &package, &mut path);
    }

    fn link_type_tree(
        &mut self,
        decl: &TypeDecl,
        file: &SourceFile,
        package: &str,
        path: &mut Vec<&'a str>,
    ) {
        let interner = self.interner;
        path.push(interner.resolve(decl.name));
        let Some(type_id) = self.lookup_declared(package, path) else {
            unreachable!("type not registered: {}", path.join("."));
        };
        let own_kind = self.db.entities.get_type(type_id).kind;

        for node in &decl.extends {
            match self.check_supertype(node, own_kind, file, /*implements*/ false) {
                SupertypeLink::Superclass(target) => {
                    // Only the first valid class supertype becomes the
                    // superclass; KScr grammar allows a list for interfaces.
                    if self.db.entities.get_type(type_id).superclass.is_none() {
                        self.db.entities.set_superclass(type_id, target);
                    }
                }
                SupertypeLink::Interface(target) => {
                    self.db.entities.add_interface(type_id, target);
                }
                SupertypeLink::None => {}
            }
        }
        for node in &decl.implements {
            match self.check_supertype(node, own_kind, file, /*implements*/ true) {
                SupertypeLink::Interface(target) => {
                    self.db.entities.add_interface(type_id, target);
                }
                SupertypeLink::Superclass(_) | SupertypeLink::None => {}
            }
        }

        for member in &decl.members {
            if let Member::Type(nested) = member {
                self.link_type_tree(nested, file, package, path);
            }
        }
        path.pop();
    }

    /// Resolve and kind-check one extends/implements entry.
    fn check_supertype(
        &mut self,
        node: &TypeRefNode,
        own_kind: TypeDefKind,
        file: &SourceFile,
        implements: bool,
    ) -> SupertypeLink {
        let span = src_span(node.span);
        let name = match &node.ty {
            TypeRef::Named(name) => name.clone(),
            TypeRef::Primitive(_) | TypeRef::Array(_) => {
                self.problems.push(SemanticProblem::InvalidSupertypeKind {
                    message: "expecting a class, not a primitive or array".into(),
                    swap_keyword: None,
                    span,
                });
                return SupertypeLink::None;
            }
            TypeRef::Inferred { .. } => return SupertypeLink::None,
        };

        let resolved = {
            let resolver = self.db.resolver_for(file);
            resolver.resolve_type_str(&name, &self.db.entities)
        };
        let Some(target) = resolved else {
            self.report_unresolved_type(&name, node.span);
            return SupertypeLink::None;
        };

        let (target_kind, target_final) = {
            let def = self.db.entities.get_type(target);
            (def.kind, def.modifiers.is_final())
        };

        let mut link = SupertypeLink::None;
        if implements {
            if own_kind.is_interface_like() {
                self.problems.push(SemanticProblem::InvalidSupertypeKind {
                    message: "interfaces cannot implement types".into(),
                    swap_keyword: None,
                    span,
                });
            } else if !target_kind.is_interface_like() {
                self.problems.push(SemanticProblem::InvalidSupertypeKind {
                    message: format!("expected an interface, not a {}", target_kind.describe()),
                    swap_keyword: Some("use 'extends' instead of 'implements'".into()),
                    span,
                });
            } else {
                link = SupertypeLink::Interface(target);
            }
            if target_final {
                self.problems.push(SemanticProblem::ExtendsFinalType {
                    verb: "implement",
                    name: self.db.names.display(self.db.entities.get_type(target).name_id),
                    span,
                });
            }
        } else {
            if own_kind.is_interface_like() && !target_kind.is_interface_like() {
                self.problems.push(SemanticProblem::InvalidSupertypeKind {
                    message: format!("expected an interface, not a {}", target_kind.describe()),
                    swap_keyword: None,
                    span,
                });
            } else if !own_kind.is_interface_like() && target_kind.is_interface_like() {
                self.problems.push(SemanticProblem::InvalidSupertypeKind {
                    message: format!("expected a class, not an {}", target_kind.describe()),
                    swap_keyword: Some("use 'implements' instead of 'extends'".into()),
                    span,
                });
            } else {
                link = if own_kind.is_interface_like() {
                    SupertypeLink::Interface(target)
                } else {
                    SupertypeLink::Superclass(target)
                };
            }
            if target_final {
                self.problems.push(SemanticProblem::ExtendsFinalType {
                    verb: "extend",
                    name: self.db.names.display(self.db.entities.get_type(target).name_id),
                    span,
                });
            }
        }
        link
    }

    // ========================================================================
    // Pass 3: member registration
    // ========================================================================

    /// Register the file's methods and fields with resolved signatures.
    pub fn declare_members(&mut self, file: &SourceFile) {
        let Some(decl) = &file.type_decl else { return };
        let package = file.package_name().to_string();
        let mut path = Vec::new();
        self.declare_member_tree(decl, file, &package, &mut path);
    }

    fn declare_member_tree(
        &mut self,
        decl: &TypeDecl,
        file: &SourceFile,
        package: &str,
        path: &mut Vec<&'a str>,
    ) {
        let interner = self.interner;
        path.push(interner.resolve(decl.name));
        let Some(type_id) = self.lookup_declared(package, path) else {
            unreachable!("type not registered: {}", path.join("."));
        };

        for member in &decl.members {
            match member {
                Member::Method(method) => self.declare_method(method, file, type_id),
                Member::Field(field) => self.declare_field(field, file, type_id, decl),
                Member::Type(nested) => self.declare_member_tree(nested, file, package, path),
            }
        }
        path.pop();
    }

    fn declare_method(&mut self, decl: &MethodDecl, file: &SourceFile, owner: TypeDefId) {
        let return_type = match &decl.return_type {
            Some(node) => self.resolve_signature_type(node, file),
            None => Type::VOID,
        };
        let params: Vec<ParamDef> = decl
            .params
            .iter()
            .map(|p| {
                let mut ty = self.resolve_signature_type(&p.ty, file);
                if p.varargs && !ty.is_unknown() {
                    ty = Type::array(ty);
                }
                ParamDef {
                    name: p.name,
                    ty,
                    varargs: p.varargs,
                }
            })
            .collect();
        let modifiers = ModifierSet::from_ast(&decl.modifiers);
        self.db
            .entities
            .register_method(owner, decl.name, return_type, params, modifiers);
    }

    fn declare_field(
        &mut self,
        decl: &FieldDecl,
        file: &SourceFile,
        owner: TypeDefId,
        owner_decl: &TypeDecl,
    ) {
        let mut modifiers = ModifierSet::from_ast(&decl.modifiers);
        let ty = match &decl.ty.ty {
            // Inference runs after every signature is registered.
            TypeRef::Inferred { val } => {
                // `val` members of enums and singles are implicitly
                // public static final constants of the containing type.
                if *val && is_constant_holder(owner_decl.kind) {
                    modifiers = modifiers
                        .with(Modifier::Public)
                        .with(Modifier::Static)
                        .with(Modifier::Final);
                }
                Type::Unknown
            }
            _ => self.resolve_signature_type(&decl.ty, file),
        };
        self.db.entities.register_field(owner, decl.name, ty, modifiers);
    }

    /// Resolve a signature type, reporting unresolved names here so the
    /// body pass can stay quiet about them.
    fn resolve_signature_type(&mut self, node: &TypeRefNode, file: &SourceFile) -> Type {
        self.resolve_type_checked(node, file)
    }

    // ========================================================================
    // Pass 4: field type inference
    // ========================================================================

    /// Fill in `var`/`val` field types from their initializers.
    pub fn infer_field_types(&mut self, file: &SourceFile) {
        let Some(decl) = &file.type_decl else { return };
        let package = file.package_name().to_string();
        let mut path = Vec::new();
        self.infer_field_tree(decl, file, &package, &mut path);
    }

    fn infer_field_tree(
        &mut self,
        decl: &TypeDecl,
        file: &SourceFile,
        package: &str,
        path: &mut Vec<&'a str>,
    ) {
        let interner = self.interner;
        path.push(interner.resolve(decl.name));
        let Some(type_id) = self.lookup_declared(package, path) else {
            unreachable!("type not registered: {}", path.join("."));
        };

        for member in &decl.members {
            match member {
                Member::Field(field) => {
                    if let TypeRef::Inferred { val } = &field.ty.ty {
                        let ty = self.inferred_field_type(field, *val, file, type_id, decl.kind);
                        if let Some(field_id) = self.db.entities.field_on(type_id, field.name) {
                            self.db.entities.set_field_type(field_id, ty);
                        }
                    }
                }
                Member::Type(nested) => self.infer_field_tree(nested, file, package, path),
                Member::Method(_) => {}
            }
        }
        path.pop();
    }

    fn inferred_field_type(
        &mut self,
        field: &FieldDecl,
        val: bool,
        file: &SourceFile,
        owner: TypeDefId,
        owner_kind: kscr_frontend::TypeKind,
    ) -> Type {
        // `val` entries of an enum or single take the containing type.
        if val && is_constant_holder(owner_kind) {
            return Type::Class(owner);
        }
        let Some(init) = &field.initializer else {
            return Type::Unknown;
        };
        let ctx = BodyCtx {
            file,
            enclosing: owner,
            in_static: field.has_modifier(Modifier::Static),
        };
        let scope = Scope::root();
        self.type_of_expr(init, &scope, &ctx)
    }
}

fn is_constant_holder(kind: kscr_frontend::TypeKind) -> bool {
    matches!(
        kind,
        kscr_frontend::TypeKind::Enum | kscr_frontend::TypeKind::Single
    )
}
