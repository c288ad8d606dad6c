// src/compatibility.rs
//
// Static type compatibility predicates. These decide whether one type can
// stand in for another; they model no value conversion or overflow
// semantics.

use crate::compilation_db::CompilationDb;
use crate::types::Type;
use crate::well_known;
use kscr_frontend::PrimitiveKind;
use kscr_identity::TypeDefId;

/// Whether a value of type `value` is directly assignable to `target`.
///
/// Primitives require an identical kind; arrays require recursively
/// assignable components; class targets require `value`'s declaration to
/// equal or transitively extend/implement the target's. Everything
/// non-primitive is assignable to the universal root class.
pub fn assignable(value: &Type, target: &Type, db: &CompilationDb) -> bool {
    match target {
        Type::Primitive(target_kind) => {
            matches!(value, Type::Primitive(kind) if kind == target_kind)
        }
        Type::Array(target_component) => {
            matches!(value, Type::Array(component) if assignable(component, target_component, db))
        }
        Type::Class(target_id) => class_target_accepts(value, *target_id, db),
        Type::Unknown => false,
    }
}

/// Whether `value` is assignable or implicitly convertible to `target`.
///
/// Adds the primitive widening lattice and boxed-wrapper unboxing on top
/// of [`assignable`]; arrays still convert only via component
/// assignability, and class targets fall back to the hierarchy walk.
pub fn convertible(value: &Type, target: &Type, db: &CompilationDb) -> bool {
    match target {
        Type::Primitive(target_kind) => match value {
            Type::Primitive(kind) => primitive_convertible(*kind, *target_kind),
            Type::Class(id) => {
                let Some(boxed) = well_known::boxed_fq_name(*target_kind) else {
                    return false;
                };
                let def = db.entities.get_type(*id);
                db.names.resolve_fq(boxed) == Some(def.name_id)
            }
            _ => false,
        },
        Type::Array(target_component) => {
            matches!(value, Type::Array(component) if assignable(component, target_component, db))
        }
        Type::Class(target_id) => class_target_accepts(value, *target_id, db),
        Type::Unknown => false,
    }
}

/// Binary numeric promotion: the type an arithmetic expression over the
/// two operands takes. Picks the operand the other converts into,
/// preferring the left on ties; two sub-int operands promote to int.
pub fn promote(left: &Type, right: &Type, db: &CompilationDb) -> Type {
    if left == right {
        return left.clone();
    }
    if convertible(right, left, db) {
        return left.clone();
    }
    if convertible(left, right, db) {
        return right.clone();
    }
    if left.is_numeric() && right.is_numeric() {
        return Type::INT;
    }
    Type::Unknown
}

fn class_target_accepts(value: &Type, target: TypeDefId, db: &CompilationDb) -> bool {
    if db.object_type() == Some(target) {
        // Everything but primitives (and unknowns) goes to the root class.
        return matches!(value, Type::Class(_) | Type::Array(_));
    }
    match value {
        Type::Class(value_id) => db.entities.extends_or_implements(*value_id, target),
        _ => false,
    }
}

/// The per-target widening chains. Each kind converts to itself; char and
/// short widen into int and beyond, not into each other.
fn primitive_convertible(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    if from == to {
        return true;
    }
    match to {
        Short | Char => from == Byte,
        Int => matches!(from, Byte | Short | Char),
        Long => matches!(from, Byte | Short | Char | Int),
        Float => matches!(from, Byte | Short | Char | Int | Long),
        Double => matches!(from, Byte | Short | Char | Int | Long | Float),
        Boolean | Byte | Void => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_defs::{ModifierSet, TypeDefKind};

    fn empty_db() -> CompilationDb {
        CompilationDb::new()
    }

    fn register(db: &mut CompilationDb, package: &str, name: &str, kind: TypeDefKind) -> TypeDefId {
        let pkg = db.names.package_id(package);
        let name_id = db.names.intern(pkg, &[name]);
        db.entities
            .register_type(name_id, kind, ModifierSet::default(), pkg)
    }

    #[test]
    fn primitive_assignability_is_identity() {
        let db = empty_db();
        assert!(assignable(&Type::INT, &Type::INT, &db));
        assert!(!assignable(&Type::INT, &Type::LONG, &db));
        assert!(!assignable(&Type::LONG, &Type::INT, &db));
    }

    #[test]
    fn widening_chain_is_one_directional() {
        let db = empty_db();
        use PrimitiveKind::*;
        let chain = [Byte, Short, Int, Long, Float, Double];
        for (i, &low) in chain.iter().enumerate() {
            for &high in &chain[i..] {
                assert!(
                    convertible(&Type::Primitive(low), &Type::Primitive(high), &db),
                    "{low:?} should convert to {high:?}"
                );
                if low != high {
                    assert!(
                        !convertible(&Type::Primitive(high), &Type::Primitive(low), &db),
                        "{high:?} should not convert to {low:?}"
                    );
                }
            }
        }
        // char widens into int and beyond, never into short (or back).
        assert!(convertible(&Type::CHAR, &Type::INT, &db));
        assert!(convertible(&Type::CHAR, &Type::DOUBLE, &db));
        assert!(!convertible(&Type::CHAR, &Type::Primitive(Short), &db));
        assert!(!convertible(&Type::Primitive(Short), &Type::CHAR, &db));
        assert!(convertible(&Type::BOOLEAN, &Type::BOOLEAN, &db));
        assert!(!convertible(&Type::INT, &Type::BOOLEAN, &db));
    }

    #[test]
    fn class_hierarchy_assignability() {
        let mut db = empty_db();
        let base = register(&mut db, "t", "Base", TypeDefKind::Class);
        let mid = register(&mut db, "t", "Mid", TypeDefKind::Class);
        let leaf = register(&mut db, "t", "Leaf", TypeDefKind::Class);
        let other = register(&mut db, "t", "Other", TypeDefKind::Class);
        db.entities.set_superclass(mid, base);
        db.entities.set_superclass(leaf, mid);

        for id in [base, mid, leaf, other] {
            assert!(assignable(&Type::Class(id), &Type::Class(id), &db));
        }
        assert!(assignable(&Type::Class(leaf), &Type::Class(base), &db));
        assert!(!assignable(&Type::Class(base), &Type::Class(leaf), &db));
        assert!(!assignable(&Type::Class(leaf), &Type::Class(other), &db));
    }

    #[test]
    fn everything_nonprimitive_assigns_to_object() {
        let mut db = empty_db();
        let object = register(&mut db, "java.lang", "Object", TypeDefKind::Class);
        let other = register(&mut db, "t", "Other", TypeDefKind::Class);

        let object_ty = Type::Class(object);
        assert!(assignable(&Type::Class(other), &object_ty, &db));
        assert!(assignable(&Type::array(Type::INT), &object_ty, &db));
        assert!(!assignable(&Type::INT, &object_ty, &db));
        assert!(!assignable(&Type::VOID, &object_ty, &db));
    }

    #[test]
    fn arrays_require_component_assignability() {
        let mut db = empty_db();
        let base = register(&mut db, "t", "Base", TypeDefKind::Class);
        let sub = register(&mut db, "t", "Sub", TypeDefKind::Class);
        db.entities.set_superclass(sub, base);

        let sub_arr = Type::array(Type::Class(sub));
        let base_arr = Type::array(Type::Class(base));
        assert!(assignable(&sub_arr, &base_arr, &db));
        assert!(!assignable(&base_arr, &sub_arr, &db));

        // No widening through array components: int[] is not long[].
        let int_arr = Type::array(Type::INT);
        let long_arr = Type::array(Type::LONG);
        assert!(!assignable(&int_arr, &long_arr, &db));
        assert!(!convertible(&int_arr, &long_arr, &db));
        assert!(convertible(&sub_arr, &base_arr, &db));
    }

    #[test]
    fn boxed_wrapper_converts_to_its_primitive() {
        let mut db = empty_db();
        let integer = register(&mut db, "java.lang", "Integer", TypeDefKind::Class);
        let other = register(&mut db, "t", "Other", TypeDefKind::Class);

        assert!(convertible(&Type::Class(integer), &Type::INT, &db));
        assert!(!convertible(&Type::Class(integer), &Type::LONG, &db));
        assert!(!convertible(&Type::Class(other), &Type::INT, &db));
        assert!(!assignable(&Type::Class(integer), &Type::INT, &db));
    }

    #[test]
    fn unknown_is_compatible_with_nothing() {
        let db = empty_db();
        assert!(!assignable(&Type::Unknown, &Type::INT, &db));
        assert!(!assignable(&Type::INT, &Type::Unknown, &db));
        assert!(!convertible(&Type::Unknown, &Type::INT, &db));
        assert!(!convertible(&Type::INT, &Type::Unknown, &db));
    }

    #[test]
    fn promotion_picks_the_wider_operand() {
        let db = empty_db();
        assert_eq!(promote(&Type::INT, &Type::LONG, &db), Type::LONG);
        assert_eq!(promote(&Type::LONG, &Type::INT, &db), Type::LONG);
        assert_eq!(promote(&Type::INT, &Type::DOUBLE, &db), Type::DOUBLE);
        assert_eq!(promote(&Type::INT, &Type::INT, &db), Type::INT);
        // Two sub-int kinds with no direct conversion promote to int.
        assert_eq!(promote(&Type::CHAR, &Type::Primitive(PrimitiveKind::Short), &db), Type::INT);
        assert_eq!(promote(&Type::INT, &Type::BOOLEAN, &db), Type::Unknown);
    }
}
