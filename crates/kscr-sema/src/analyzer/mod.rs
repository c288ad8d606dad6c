// src/analyzer/mod.rs
//
// The analysis driver. Declaration passes build the compilation db from
// the AST; the body pass walks every method body with a scope stack,
// annotating each expression with its static type and resolved target.

mod calls;
mod declarations;
mod exprs;

use crate::compilation_db::CompilationDb;
use crate::entity_defs::TypeDefKind;
use crate::expression_data::ExpressionData;
use crate::problems::SemanticProblem;
use crate::resolve::resolve_type_ref;
use crate::scope::{Scope, Variable};
use crate::types::Type;
use kscr_frontend::{
    Block, Interner, Member, MethodDecl, SourceFile, Stmt, TypeDecl, TypeRef, TypeRefNode,
};
use kscr_identity::TypeDefId;

/// Result of analyzing a set of source files: the immutable declaration
/// index plus per-node annotations and the collected problems.
#[derive(Debug)]
pub struct Analysis {
    pub db: CompilationDb,
    pub expr_data: ExpressionData,
    pub problems: Vec<SemanticProblem>,
}

/// Analyze a set of files as one compilation scope.
///
/// Node ids must be unique across the set (one [`kscr_frontend::AstBuilder`]
/// per analysis guarantees this). Rebuilding after an edit means calling
/// this again and swapping the returned [`Analysis`] in whole.
pub fn analyze_files(files: &[SourceFile], interner: &Interner) -> Analysis {
    let mut analyzer = Analyzer::new(interner);
    for file in files {
        analyzer.declare_types(file);
    }
    for file in files {
        analyzer.link_supertypes(file);
    }
    for file in files {
        analyzer.declare_members(file);
    }
    for file in files {
        analyzer.infer_field_types(file);
    }
    for file in files {
        analyzer.check_file(file);
    }
    analyzer.finish()
}

/// Context for one body walk: the file (for import-aware resolution), the
/// enclosing type, and whether the surrounding member is static.
#[derive(Clone, Copy)]
pub(crate) struct BodyCtx<'f> {
    pub(crate) file: &'f SourceFile,
    pub(crate) enclosing: TypeDefId,
    pub(crate) in_static: bool,
}

pub struct Analyzer<'a> {
    pub(crate) db: CompilationDb,
    pub(crate) interner: &'a Interner,
    pub(crate) expr_data: ExpressionData,
    pub(crate) problems: Vec<SemanticProblem>,
}

impl<'a> Analyzer<'a> {
    pub fn new(interner: &'a Interner) -> Self {
        Self {
            db: CompilationDb::new(),
            interner,
            expr_data: ExpressionData::new(),
            problems: Vec::new(),
        }
    }

    pub fn finish(self) -> Analysis {
        Analysis {
            db: self.db,
            expr_data: self.expr_data,
            problems: self.problems,
        }
    }

    // ========================================================================
    // Body pass
    // ========================================================================

    /// Walk the file's method bodies and field initializers, annotating
    /// every expression. Requires all declaration passes to have run.
    pub fn check_file(&mut self, file: &SourceFile) {
        let Some(decl) = &file.type_decl else { return };
        let package = file.package_name().to_string();
        let mut path = Vec::new();
        self.check_type(decl, file, &package, &mut path);
    }

    fn check_type(
        &mut self,
        decl: &TypeDecl,
        file: &SourceFile,
        package: &str,
        path: &mut Vec<&'a str>,
    ) {
        let interner = self.interner;
        path.push(interner.resolve(decl.name));
        let Some(type_id) = self.lookup_declared(package, path) else {
            // Declaration pass registers every type; a miss is a caller
            // contract violation, not a user-source condition.
            unreachable!("type not registered: {}", path.join("."));
        };

        for member in &decl.members {
            match member {
                Member::Method(method) => self.check_method(method, file, type_id),
                Member::Field(field) => {
                    let ctx = BodyCtx {
                        file,
                        enclosing: type_id,
                        in_static: field.has_modifier(kscr_frontend::Modifier::Static),
                    };
                    if let Some(init) = &field.initializer
                        && self.expr_data.type_of(init.id).is_none()
                    {
                        let scope = Scope::root();
                        self.type_of_expr(init, &scope, &ctx);
                    }
                }
                Member::Type(nested) => self.check_type(nested, file, package, path),
            }
        }
        path.pop();
    }

    fn check_method(&mut self, decl: &MethodDecl, file: &SourceFile, owner: TypeDefId) {
        let Some(body) = &decl.body else { return };
        let ctx = BodyCtx {
            file,
            enclosing: owner,
            in_static: decl.is_static(),
        };

        // A method body is the outermost scope within its class; it holds
        // the parameters and nothing else.
        let mut scope = Scope::root();
        for param in &decl.params {
            let mut ty = self.resolve_type_quiet(&param.ty, file);
            if param.varargs && !ty.is_unknown() {
                ty = Type::array(ty);
            }
            scope.define(Variable::local(param.name, ty));
        }
        self.check_block(body, &scope, &ctx);
    }

    fn check_block(&mut self, block: &Block, parent: &Scope<'_>, ctx: &BodyCtx<'_>) {
        let mut scope = Scope::child(parent);
        for stmt in &block.stmts {
            self.check_stmt(stmt, &mut scope, ctx);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt, scope: &mut Scope<'_>, ctx: &BodyCtx<'_>) {
        match stmt {
            Stmt::Block(block) => self.check_block(block, scope, ctx),
            Stmt::Var(var) => {
                let ty = match &var.ty.ty {
                    TypeRef::Inferred { .. } => match &var.initializer {
                        Some(init) => self.type_of_expr(init, scope, ctx),
                        None => Type::Unknown,
                    },
                    _ => {
                        let ty = self.resolve_type_checked(&var.ty, ctx.file);
                        if let Some(init) = &var.initializer {
                            self.type_of_expr(init, scope, ctx);
                        }
                        ty
                    }
                };
                scope.define(Variable {
                    name: var.name,
                    ty,
                    is_final: var.modifiers.contains(&kscr_frontend::Modifier::Final),
                    local: true,
                });
            }
            Stmt::Expr(stmt) => {
                self.type_of_expr(&stmt.expr, scope, ctx);
            }
            Stmt::If(stmt) => {
                self.type_of_expr(&stmt.condition, scope, ctx);
                self.check_nested(&stmt.then_branch, scope, ctx);
                if let Some(else_branch) = &stmt.else_branch {
                    self.check_nested(else_branch, scope, ctx);
                }
            }
            Stmt::While(stmt) => {
                self.type_of_expr(&stmt.condition, scope, ctx);
                self.check_nested(&stmt.body, scope, ctx);
            }
            Stmt::For(stmt) => {
                // The loop header is its own scope; an init declaration is
                // visible in the condition, update, and body.
                let mut loop_scope = Scope::child(scope);
                if let Some(init) = &stmt.init {
                    self.check_stmt(init, &mut loop_scope, ctx);
                }
                if let Some(condition) = &stmt.condition {
                    self.type_of_expr(condition, &loop_scope, ctx);
                }
                if let Some(update) = &stmt.update {
                    self.check_stmt(update, &mut loop_scope, ctx);
                }
                self.check_nested(&stmt.body, &mut loop_scope, ctx);
            }
            Stmt::Foreach(stmt) => {
                let iter_ty = self.type_of_expr(&stmt.iterable, scope, ctx);
                let var_ty = self.foreach_var_type(stmt, &iter_ty, ctx);
                let mut loop_scope = Scope::child(scope);
                loop_scope.define(Variable {
                    name: stmt.var_name,
                    ty: var_ty,
                    is_final: stmt.is_final,
                    local: true,
                });
                self.check_nested(&stmt.body, &mut loop_scope, ctx);
            }
            Stmt::Try(stmt) => {
                self.check_block(&stmt.body, scope, ctx);
                for catch in &stmt.catches {
                    let ty = self.resolve_type_checked(&catch.ty, ctx.file);
                    let mut catch_scope = Scope::child(scope);
                    catch_scope.define(Variable::local(catch.var_name, ty));
                    self.check_block(&catch.body, &catch_scope, ctx);
                }
                if let Some(finally) = &stmt.finally {
                    self.check_block(finally, scope, ctx);
                }
            }
            Stmt::Return(stmt) => {
                if let Some(value) = &stmt.value {
                    self.type_of_expr(value, scope, ctx);
                }
            }
            Stmt::Throw(stmt) => {
                self.type_of_expr(&stmt.value, scope, ctx);
            }
            Stmt::Break(_) | Stmt::Continue(_) => {}
        }
    }

    /// Check a branch/body statement in a fresh child scope, so a bare
    /// declaration as a loop or if body never leaks outward.
    fn check_nested(&mut self, stmt: &Stmt, parent: &Scope<'_>, ctx: &BodyCtx<'_>) {
        let mut scope = Scope::child(parent);
        self.check_stmt(stmt, &mut scope, ctx);
    }

    /// The foreach iteration variable's type: the declared type if given,
    /// else the component of an iterated array, else the class itself when
    /// iterating an enum type reference, else the root class.
    fn foreach_var_type(
        &mut self,
        stmt: &kscr_frontend::ForeachStmt,
        iter_ty: &Type,
        ctx: &BodyCtx<'_>,
    ) -> Type {
        if !matches!(stmt.var_ty.ty, TypeRef::Inferred { .. }) {
            return self.resolve_type_checked(&stmt.var_ty, ctx.file);
        }
        if let Some(target) = self.expr_data.target_of(stmt.iterable.id)
            && let Some(type_id) = target.as_type()
            && self.db.entities.get_type(type_id).kind == TypeDefKind::Enum
        {
            return Type::Class(type_id);
        }
        if let Some(component) = iter_ty.component() {
            return component.clone();
        }
        match self.db.object_type() {
            Some(object) => Type::Class(object),
            None => Type::Unknown,
        }
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Look up a type registered by the declaration pass.
    pub(crate) fn lookup_declared(&self, package: &str, path: &[&str]) -> Option<TypeDefId> {
        let pkg = self.db.names.lookup_package(package)?;
        let name_id = self.db.names.name_id(pkg, path)?;
        self.db.entities.type_by_name(name_id)
    }

    /// Resolve a type reference without emitting problems (signature types
    /// are diagnosed once by the declaration pass).
    pub(crate) fn resolve_type_quiet(&self, node: &TypeRefNode, file: &SourceFile) -> Type {
        let resolver = self.db.resolver_for(file);
        resolve_type_ref(node, &resolver, &self.db.entities)
    }

    /// Resolve a type reference, reporting an unresolved named base type.
    pub(crate) fn resolve_type_checked(&mut self, node: &TypeRefNode, file: &SourceFile) -> Type {
        let ty = self.resolve_type_quiet(node, file);
        if ty.is_unknown()
            && let Some(name) = base_named(&node.ty)
        {
            let name = name.to_string();
            self.report_unresolved_type(&name, node.span);
        }
        ty
    }

    pub(crate) fn report_unresolved_type(&mut self, name: &str, span: kscr_frontend::Span) {
        let add_import = self.import_suggestion(name);
        self.problems.push(SemanticProblem::UnresolvedTypeRef {
            name: name.to_string(),
            add_import,
            span: crate::problems::src_span(span),
        });
    }

    /// Suggest an import when a declaration with the same short name
    /// exists somewhere in the compilation scope.
    fn import_suggestion(&self, short_name: &str) -> Option<String> {
        if short_name.contains('.') {
            return None;
        }
        self.db
            .entities
            .types()
            .find(|def| self.db.names.short_name(def.name_id) == short_name)
            .map(|def| format!("import {}", self.db.names.display(def.name_id)))
    }
}

/// The named base of a type reference, unwrapping array suffixes.
fn base_named(ty: &TypeRef) -> Option<&str> {
    match ty {
        TypeRef::Named(name) => Some(name),
        TypeRef::Array(component) => base_named(component),
        TypeRef::Primitive(_) | TypeRef::Inferred { .. } => None,
    }
}
