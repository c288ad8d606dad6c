// src/analyzer/exprs.rs
//
// Expression typing and identifier resolution. Every visited expression
// node gets a Type annotation; identifier and call nodes also get a
// ResolvedTarget. All functions are total: failures produce Unknown and
// a soft problem, never a panic.

use super::{Analyzer, BodyCtx};
use crate::compatibility::promote;
use crate::problems::{SemanticProblem, src_span};
use crate::resolution::ResolvedTarget;
use crate::resolve::ResolverEntityExt;
use crate::scope::Scope;
use crate::types::Type;
use kscr_frontend::{BinaryOp, Expr, ExprKind, IdentExpr, PrimitiveKind, UnaryOp};

/// Outcome of resolving one identifier link in a dotted chain. A partial
/// result is a qualified-name prefix that is not yet a type or package;
/// the enclosing link narrows it by concatenation.
pub(crate) enum IdentResolution {
    Resolved { target: ResolvedTarget, ty: Type },
    Partial(String),
}

impl<'a> Analyzer<'a> {
    /// Compute (and record) the static type of an expression.
    pub(crate) fn type_of_expr(
        &mut self,
        expr: &Expr,
        scope: &Scope<'_>,
        ctx: &BodyCtx<'_>,
    ) -> Type {
        let ty = match &expr.kind {
            ExprKind::IntLiteral(_) => Type::INT,
            ExprKind::LongLiteral(_) => Type::LONG,
            ExprKind::FloatLiteral(_) => Type::FLOAT,
            ExprKind::DoubleLiteral(_) => Type::DOUBLE,
            ExprKind::BoolLiteral(_) => Type::BOOLEAN,
            ExprKind::CharLiteral(_) => Type::CHAR,
            ExprKind::StringLiteral(_) => self.string_class_type(),
            ExprKind::NullLiteral => Type::Unknown,

            ExprKind::This => {
                if ctx.in_static {
                    self.problems.push(SemanticProblem::ThisInStaticMethod {
                        span: src_span(expr.span),
                    });
                }
                Type::Class(ctx.enclosing)
            }

            ExprKind::Ident(ident) => {
                let resolution = self.resolve_ident(ident, scope, ctx);
                self.record_ident(expr, ident, resolution)
            }

            ExprKind::Call(call) => self.resolve_call(expr, call, &[], scope, ctx),

            ExprKind::Binary(binary) => {
                if binary.op == BinaryOp::Pipe {
                    self.type_of_expr(&binary.left, scope, ctx);
                    self.type_of_pipe_rhs(&binary.right, vec![&binary.left], scope, ctx)
                } else {
                    let left = self.type_of_expr(&binary.left, scope, ctx);
                    let right = self.type_of_expr(&binary.right, scope, ctx);
                    self.binary_type(binary.op, &left, &right)
                }
            }

            ExprKind::Unary(unary) => {
                let operand = self.type_of_expr(&unary.operand, scope, ctx);
                match unary.op {
                    UnaryOp::Not => Type::BOOLEAN,
                    UnaryOp::Neg | UnaryOp::BitNot | UnaryOp::Inc | UnaryOp::Dec => operand,
                }
            }

            ExprKind::Paren(inner) => self.type_of_expr(inner, scope, ctx),

            ExprKind::Cast(cast) => {
                self.type_of_expr(&cast.expr, scope, ctx);
                self.resolve_type_checked(&cast.ty, ctx.file)
            }

            ExprKind::Index(index) => {
                let array = self.type_of_expr(&index.array, scope, ctx);
                self.type_of_expr(&index.index, scope, ctx);
                array.component().cloned().unwrap_or(Type::Unknown)
            }

            ExprKind::NewArray(new_array) => {
                for dim in &new_array.dims {
                    self.type_of_expr(dim, scope, ctx);
                }
                let element = self.resolve_type_checked(&new_array.element, ctx.file);
                if element.is_unknown() {
                    Type::Unknown
                } else {
                    (0..new_array.dims.len().max(1)).fold(element, |ty, _| Type::array(ty))
                }
            }

            ExprKind::New(ctor) => {
                for arg in &ctor.args {
                    self.type_of_expr(arg, scope, ctx);
                }
                self.resolve_type_checked(&ctor.ty, ctx.file)
            }

            ExprKind::InstanceOf(test) => {
                self.type_of_expr(&test.expr, scope, ctx);
                self.resolve_type_checked(&test.ty, ctx.file);
                Type::BOOLEAN
            }

            ExprKind::ClassLiteral(node) => {
                let ty = self.resolve_type_checked(node, ctx.file);
                if let Some(id) = ty.as_class() {
                    self.expr_data.set_target(expr.id, ResolvedTarget::Type(id));
                }
                // The literal's own type would be the reflective class
                // object, which this type model does not represent.
                Type::Unknown
            }
        };
        self.expr_data.set_type(expr.id, ty.clone());
        ty
    }

    /// Record the outcome of an identifier resolution on its node,
    /// diagnosing an unresolved chain at its outermost link only.
    fn record_ident(&mut self, expr: &Expr, ident: &IdentExpr, resolution: IdentResolution) -> Type {
        let name = self.interner.resolve(ident.name).to_string();
        match resolution {
            IdentResolution::Resolved { target, ty } => {
                if target.is_unresolved() {
                    self.report_unresolved_ident(&name, expr, ident);
                }
                self.expr_data.set_target(expr.id, target);
                ty
            }
            IdentResolution::Partial(_) => {
                self.report_unresolved_ident(&name, expr, ident);
                self.expr_data.set_target(expr.id, ResolvedTarget::Unresolved);
                Type::Unknown
            }
        }
    }

    fn report_unresolved_ident(&mut self, name: &str, expr: &Expr, ident: &IdentExpr) {
        // The eight primitive spellings are always valid and never flagged.
        if ident.receiver.is_none() && PrimitiveKind::is_reserved_spelling(name) {
            return;
        }
        self.problems.push(SemanticProblem::UnresolvedIdentifier {
            name: name.to_string(),
            span: src_span(expr.span),
        });
    }

    /// Resolve an identifier, unqualified or chained.
    ///
    /// Unqualified order: scope chain, then enclosing type's fields
    /// (static-only inside a static method), then short type names, then
    /// packages. Qualified: narrow package/partial prefixes by
    /// concatenation, then search the receiver type's fields including
    /// inherited ones.
    pub(crate) fn resolve_ident(
        &mut self,
        ident: &IdentExpr,
        scope: &Scope<'_>,
        ctx: &BodyCtx<'_>,
    ) -> IdentResolution {
        let name_str = self.interner.resolve(ident.name).to_string();

        let Some(receiver) = &ident.receiver else {
            // 1. Scope chain, first match wins.
            if let Some(var) = scope.lookup(ident.name) {
                let var = var.clone();
                let ty = var.ty.clone();
                return IdentResolution::Resolved {
                    target: ResolvedTarget::Variable(var),
                    ty,
                };
            }
            // 2. Fields of the enclosing type.
            if let Some(field_id) = self.enclosing_field(ident.name, ctx) {
                let ty = self.db.entities.get_field(field_id).ty.clone();
                return IdentResolution::Resolved {
                    target: ResolvedTarget::Field(field_id),
                    ty,
                };
            }
            // 3. A short type name. 4. A package. 5. A partial prefix.
            return self.resolve_name_in_file(&name_str, ctx);
        };

        // Qualified: resolve the receiver link first. An inner identifier
        // is resolved directly so its unresolved state stays undiagnosed —
        // the outermost link reports for the whole chain.
        let (receiver_ty, prefix) = match &receiver.kind {
            ExprKind::Ident(inner) => match self.resolve_ident(inner, scope, ctx) {
                IdentResolution::Resolved { target, ty } => {
                    let prefix = match &target {
                        ResolvedTarget::Package(name) => Some(name.clone()),
                        _ => None,
                    };
                    self.expr_data.set_target(receiver.id, target);
                    self.expr_data.set_type(receiver.id, ty.clone());
                    (ty, prefix)
                }
                IdentResolution::Partial(partial) => {
                    self.expr_data
                        .set_target(receiver.id, ResolvedTarget::Unresolved);
                    self.expr_data.set_type(receiver.id, Type::Unknown);
                    (Type::Unknown, Some(partial))
                }
            },
            _ => (self.type_of_expr(receiver, scope, ctx), None),
        };

        // A package or partial prefix narrows by concatenation.
        let narrowed =
            prefix.map(|prefix| self.resolve_qualified(&format!("{prefix}.{name_str}")));

        // A class-typed receiver resolves fields, including inherited
        // ones; a field match beats the narrowed name.
        if let Type::Class(class_id) = receiver_ty
            && let Some(field_id) = self.db.entities.field_in_hierarchy(class_id, ident.name)
        {
            let ty = self.db.entities.get_field(field_id).ty.clone();
            return IdentResolution::Resolved {
                target: ResolvedTarget::Field(field_id),
                ty,
            };
        }

        narrowed.unwrap_or(IdentResolution::Resolved {
            target: ResolvedTarget::Unresolved,
            ty: Type::Unknown,
        })
    }

    /// Steps 3–5 for a bare name: type via the import-aware candidate
    /// chain, then package existence, then a partial prefix.
    fn resolve_name_in_file(&mut self, name: &str, ctx: &BodyCtx<'_>) -> IdentResolution {
        let resolved = {
            let resolver = self.db.resolver_for(ctx.file);
            resolver.resolve_type_str(name, &self.db.entities)
        };
        if let Some(type_id) = resolved {
            return IdentResolution::Resolved {
                target: ResolvedTarget::Type(type_id),
                ty: Type::Class(type_id),
            };
        }
        if self.db.names.package_exists(name) {
            return IdentResolution::Resolved {
                target: ResolvedTarget::Package(name.to_string()),
                ty: Type::Unknown,
            };
        }
        IdentResolution::Partial(name.to_string())
    }

    /// Resolve an already-dotted name to a type or package.
    fn resolve_qualified(&self, qualified: &str) -> IdentResolution {
        if let Some(type_id) = self.db.type_by_fq(qualified) {
            return IdentResolution::Resolved {
                target: ResolvedTarget::Type(type_id),
                ty: Type::Class(type_id),
            };
        }
        if self.db.names.package_exists(qualified) {
            return IdentResolution::Resolved {
                target: ResolvedTarget::Package(qualified.to_string()),
                ty: Type::Unknown,
            };
        }
        IdentResolution::Partial(qualified.to_string())
    }

    /// A field declared directly on the enclosing type, restricted to
    /// static fields inside a static method.
    fn enclosing_field(
        &self,
        name: kscr_frontend::Symbol,
        ctx: &BodyCtx<'_>,
    ) -> Option<kscr_identity::FieldId> {
        self.db
            .entities
            .get_type(ctx.enclosing)
            .fields
            .iter()
            .copied()
            .find(|&id| {
                let field = self.db.entities.get_field(id);
                field.name == name && (!ctx.in_static || field.is_static())
            })
    }

    /// Typing for the pipe operator's right-hand side: walk through
    /// parenthesised wrappers and chained pipes to find the call that
    /// receives the piped expressions as implicit leading arguments.
    fn type_of_pipe_rhs<'e>(
        &mut self,
        expr: &'e Expr,
        leading: Vec<&'e Expr>,
        scope: &Scope<'_>,
        ctx: &BodyCtx<'_>,
    ) -> Type {
        let ty = match &expr.kind {
            ExprKind::Paren(inner) => self.type_of_pipe_rhs(inner, leading, scope, ctx),
            ExprKind::Call(call) => self.resolve_call(expr, call, &leading, scope, ctx),
            ExprKind::Binary(binary) if binary.op == BinaryOp::Pipe => {
                self.type_of_expr(&binary.left, scope, ctx);
                let mut extended = leading;
                extended.push(&binary.left);
                self.type_of_pipe_rhs(&binary.right, extended, scope, ctx)
            }
            // Not a call: nothing to feed, type it as-is.
            _ => return self.type_of_expr(expr, scope, ctx),
        };
        self.expr_data.set_type(expr.id, ty.clone());
        ty
    }

    /// Binary expression typing: string concatenation wins for `+`,
    /// arithmetic promotes numerically, comparisons are boolean.
    fn binary_type(&mut self, op: BinaryOp, left: &Type, right: &Type) -> Type {
        if op.is_boolean() {
            return Type::BOOLEAN;
        }
        if op == BinaryOp::Add {
            let string = self.string_class_type();
            if !string.is_unknown() && (*left == string || *right == string) {
                return string;
            }
        }
        if op.is_arithmetic() {
            return promote(left, right, &self.db);
        }
        Type::Unknown
    }

    /// `java.lang.String` as a class type, when the compilation scope
    /// declares it.
    fn string_class_type(&self) -> Type {
        match self.db.string_type() {
            Some(id) => Type::Class(id),
            None => Type::Unknown,
        }
    }
}
