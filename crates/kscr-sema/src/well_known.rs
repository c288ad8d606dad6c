// src/well_known.rs
//
// Names the resolution layer treats specially. KScr targets the JVM, so
// the universal root and the boxed primitive wrappers are the java.lang
// classes.

use kscr_frontend::PrimitiveKind;

/// The universal root class: every non-primitive value is assignable to it.
pub const OBJECT: &str = "java.lang.Object";

/// String concatenation typing (`+` with a string operand).
pub const STRING: &str = "java.lang.String";

/// The boxed wrapper class for a primitive kind, used by the unboxing
/// conversion check. Void has no wrapper that participates in conversion.
pub fn boxed_fq_name(kind: PrimitiveKind) -> Option<&'static str> {
    Some(match kind {
        PrimitiveKind::Boolean => "java.lang.Boolean",
        PrimitiveKind::Byte => "java.lang.Byte",
        PrimitiveKind::Short => "java.lang.Short",
        PrimitiveKind::Char => "java.lang.Character",
        PrimitiveKind::Int => "java.lang.Integer",
        PrimitiveKind::Long => "java.lang.Long",
        PrimitiveKind::Float => "java.lang.Float",
        PrimitiveKind::Double => "java.lang.Double",
        PrimitiveKind::Void => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_value_kind_has_a_wrapper() {
        assert_eq!(boxed_fq_name(PrimitiveKind::Int), Some("java.lang.Integer"));
        assert_eq!(boxed_fq_name(PrimitiveKind::Char), Some("java.lang.Character"));
        assert_eq!(boxed_fq_name(PrimitiveKind::Void), None);
    }
}
