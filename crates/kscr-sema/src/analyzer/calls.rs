// src/analyzer/calls.rs
//
// Overload resolution. Candidates are ranked by reach score: 0 for an
// all-assignable exact-arity match, 1 when any pair needed a widening or
// boxing conversion, 2 for a varargs match, 3 for a varargs match that
// needed conversion. Lowest reach wins; ties resolve to the candidate
// with the most specific parameter types, falling back to the earliest
// candidate in declaration order (subclass before superclass) when the
// tied candidates are incomparable.

use super::{Analyzer, BodyCtx};
use crate::compatibility::{assignable, convertible};
use crate::compilation_db::CompilationDb;
use crate::entity_defs::MethodDef;
use crate::problems::{SemanticProblem, src_span};
use crate::resolution::ResolvedTarget;
use crate::scope::Scope;
use crate::type_display::display_types;
use crate::types::Type;
use kscr_frontend::{CallExpr, Expr, ExprKind};
use kscr_identity::MethodId;
use smallvec::SmallVec;

type ArgTypes = SmallVec<[Type; 4]>;

impl<'a> Analyzer<'a> {
    /// Resolve a call to its best-matching overload and return the call's
    /// type. `leading` holds piped-in arguments collected by the pipe
    /// walk; they precede the syntactic argument list.
    pub(crate) fn resolve_call(
        &mut self,
        expr: &Expr,
        call: &CallExpr,
        leading: &[&Expr],
        scope: &Scope<'_>,
        ctx: &BodyCtx<'_>,
    ) -> Type {
        // Type the receiver (if any) and every argument first.
        let receiver_ty = call
            .receiver
            .as_ref()
            .map(|receiver| self.type_of_expr(receiver, scope, ctx));

        let mut arg_types: ArgTypes = ArgTypes::new();
        for arg in leading.iter().copied().chain(call.args.iter()) {
            let ty = match self.expr_data.type_of(arg.id) {
                Some(ty) => ty.clone(),
                None => self.type_of_expr(arg, scope, ctx),
            };
            arg_types.push(ty);
        }

        let name = call.name;
        let candidates: Vec<MethodId> = match (&call.receiver, receiver_ty) {
            (Some(receiver), Some(receiver_ty)) => {
                // A receiver that names a type makes this a class-qualified
                // call: only static methods apply. An instance receiver
                // gets only instance methods.
                let receiver_is_type = matches!(
                    (&receiver.kind, self.expr_data.target_of(receiver.id)),
                    (ExprKind::Ident(_), Some(ResolvedTarget::Type(_)))
                );
                let Some(class_id) = receiver_ty.as_class() else {
                    // Receiver type unknown: stay silent, propagate Unknown.
                    self.expr_data.set_target(expr.id, ResolvedTarget::Unresolved);
                    return Type::Unknown;
                };
                self.db
                    .entities
                    .methods_in_hierarchy(class_id)
                    .into_iter()
                    .filter(|&id| {
                        let m = self.db.entities.get_method(id);
                        m.name == name && m.is_static() == receiver_is_type
                    })
                    .collect()
            }
            _ => {
                // Standalone call: methods declared directly on the
                // enclosing type, static-only inside a static method.
                self.db
                    .entities
                    .methods_on(ctx.enclosing)
                    .iter()
                    .copied()
                    .filter(|&id| {
                        let m = self.db.entities.get_method(id);
                        m.name == name && (!ctx.in_static || m.is_static())
                    })
                    .collect()
            }
        };

        let mut best: Option<(MethodId, u32)> = None;
        for id in candidates {
            let method = self.db.entities.get_method(id);
            if let Some(reach) = match_candidate(method, &arg_types, &self.db) {
                best = Some(match best {
                    None => (id, reach),
                    Some((_, b)) if reach < b => (id, reach),
                    // On equal reach, a strictly more specific signature
                    // displaces the incumbent; otherwise first wins.
                    Some((incumbent, b))
                        if reach == b
                            && more_specific(
                                self.db.entities.get_method(id),
                                self.db.entities.get_method(incumbent),
                                &self.db,
                            ) =>
                    {
                        (id, reach)
                    }
                    Some(keep) => keep,
                });
            }
        }

        match best {
            Some((id, reach)) => {
                tracing::trace!(method = id.index(), reach, "call resolved");
                self.expr_data.set_target(expr.id, ResolvedTarget::Method(id));
                self.db.entities.get_method(id).return_type.clone()
            }
            None => {
                self.expr_data.set_target(expr.id, ResolvedTarget::Unresolved);
                // Diagnose only when the argument types are solid; unknown
                // arguments already produced their own problem upstream.
                if arg_types.iter().all(|t| !t.is_unknown()) {
                    let name = self.interner.resolve(name).to_string();
                    let args = display_types(&arg_types, &self.db);
                    self.problems.push(SemanticProblem::NoMatchingOverload {
                        name,
                        args,
                        span: src_span(expr.span),
                    });
                }
                Type::Unknown
            }
        }
    }
}

/// Whether `a`'s parameter list is strictly more specific than `b`'s:
/// every parameter of `a` is assignable to `b`'s counterpart, and at
/// least one is not assignable back.
fn more_specific(a: &MethodDef, b: &MethodDef, db: &CompilationDb) -> bool {
    if a.params.len() != b.params.len() {
        return false;
    }
    let forward = a
        .params
        .iter()
        .zip(&b.params)
        .all(|(pa, pb)| assignable(&pa.ty, &pb.ty, db));
    let backward = b
        .params
        .iter()
        .zip(&a.params)
        .all(|(pb, pa)| assignable(&pb.ty, &pa.ty, db));
    forward && !backward
}

/// Rank one candidate against the argument types, trying the varargs pass
/// and the exact-arity pass and keeping the better score. None means the
/// candidate is rejected by both passes.
fn match_candidate(method: &MethodDef, args: &[Type], db: &CompilationDb) -> Option<u32> {
    let params = &method.params;
    let mut best: Option<u32> = None;

    if method.is_varargs() && args.len() + 1 >= params.len() {
        'varargs: {
            // The trailing parameter must be an array; its component is
            // what every trailing argument matches against.
            let Some(Type::Array(component)) = params.last().map(|p| &p.ty) else {
                break 'varargs;
            };
            let mut reach = 2;
            for (i, arg) in args.iter().enumerate() {
                let checking: &Type = if i + 1 < params.len() {
                    &params[i].ty
                } else {
                    component
                };
                if assignable(arg, checking, db) {
                    continue;
                }
                if convertible(arg, checking, db) {
                    reach = 3;
                    continue;
                }
                break 'varargs;
            }
            best = Some(reach);
        }
    }

    if params.len() == args.len() {
        'exact: {
            let mut reach = 0;
            for (arg, param) in args.iter().zip(params.iter()) {
                if assignable(arg, &param.ty, db) {
                    continue;
                }
                if convertible(arg, &param.ty, db) {
                    reach = 1;
                    continue;
                }
                break 'exact;
            }
            best = Some(best.map_or(reach, |b| b.min(reach)));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_defs::{ModifierSet, ParamDef, TypeDefKind};
    use kscr_frontend::Symbol;
    use kscr_identity::TypeDefId;

    fn method(params: Vec<ParamDef>, varargs_last: bool) -> MethodDef {
        let mut params = params;
        if varargs_last
            && let Some(last) = params.last_mut()
        {
            last.varargs = true;
            last.ty = Type::array(last.ty.clone());
        }
        MethodDef {
            id: MethodId::new(0),
            name: Symbol(0),
            return_type: Type::VOID,
            params,
            modifiers: ModifierSet::default(),
            owner: TypeDefId::new(0),
        }
    }

    fn param(ty: Type) -> ParamDef {
        ParamDef {
            name: Symbol(0),
            ty,
            varargs: false,
        }
    }

    #[test]
    fn exact_assignable_match_scores_zero() {
        let db = CompilationDb::new();
        let m = method(vec![param(Type::INT)], false);
        assert_eq!(match_candidate(&m, &[Type::INT], &db), Some(0));
    }

    #[test]
    fn widening_match_scores_one() {
        let db = CompilationDb::new();
        let m = method(vec![param(Type::LONG)], false);
        assert_eq!(match_candidate(&m, &[Type::INT], &db), Some(1));
        assert_eq!(match_candidate(&m, &[Type::DOUBLE], &db), None);
    }

    #[test]
    fn varargs_scores_worse_than_exact() {
        let db = CompilationDb::new();
        // f(int, int...)
        let varargs = method(vec![param(Type::INT), param(Type::INT)], true);
        // One fixed argument, empty varargs tail.
        assert_eq!(match_candidate(&varargs, &[Type::INT], &db), Some(2));
        // Trailing arguments match the component type.
        assert_eq!(
            match_candidate(&varargs, &[Type::INT, Type::INT, Type::INT], &db),
            Some(2)
        );
        // A converted trailing argument bumps the score.
        assert_eq!(
            match_candidate(&varargs, &[Type::INT, Type::CHAR], &db),
            Some(3)
        );
        // An exact-arity candidate scores better than any varargs match.
        let exact = method(vec![param(Type::INT)], false);
        assert!(match_candidate(&exact, &[Type::INT], &db) < match_candidate(&varargs, &[Type::INT], &db));
    }

    #[test]
    fn passing_an_array_to_varargs_uses_the_exact_pass() {
        let db = CompilationDb::new();
        // f(int...)
        let m = method(vec![param(Type::INT)], true);
        assert_eq!(match_candidate(&m, &[Type::array(Type::INT)], &db), Some(0));
        assert_eq!(match_candidate(&m, &[Type::INT], &db), Some(2));
        assert_eq!(match_candidate(&m, &[], &db), Some(2));
    }

    #[test]
    fn arity_mismatch_rejects() {
        let db = CompilationDb::new();
        let m = method(vec![param(Type::INT), param(Type::INT)], false);
        assert_eq!(match_candidate(&m, &[Type::INT], &db), None);
        assert_eq!(
            match_candidate(&m, &[Type::INT, Type::INT, Type::INT], &db),
            None
        );
    }

    #[test]
    fn unknown_arguments_reject_candidates() {
        let db = CompilationDb::new();
        let m = method(vec![param(Type::INT)], false);
        assert_eq!(match_candidate(&m, &[Type::Unknown], &db), None);
    }

    #[test]
    fn class_hierarchy_arguments_rank_by_specificity() {
        let mut db = CompilationDb::new();
        let pkg = db.names.package_id("t");
        let object_pkg = db.names.package_id("java.lang");
        let object_name = db.names.intern(object_pkg, &["Object"]);
        let object = db.entities.register_type(
            object_name,
            TypeDefKind::Class,
            ModifierSet::default(),
            object_pkg,
        );
        let string_name = db.names.intern(pkg, &["Text"]);
        let text = db.entities.register_type(
            string_name,
            TypeDefKind::Class,
            ModifierSet::default(),
            pkg,
        );
        db.entities.set_superclass(text, object);

        // f(Object) is a hierarchy match with the same reach as f(Text);
        // selection breaks the tie toward the more specific signature.
        let takes_object = method(vec![param(Type::Class(object))], false);
        let takes_text = method(vec![param(Type::Class(text))], false);
        assert_eq!(match_candidate(&takes_object, &[Type::Class(text)], &db), Some(0));
        assert_eq!(match_candidate(&takes_text, &[Type::Class(text)], &db), Some(0));
        // The reverse direction is rejected.
        assert_eq!(match_candidate(&takes_text, &[Type::Class(object)], &db), None);
    }
}
