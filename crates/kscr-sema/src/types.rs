// src/types.rs

use kscr_frontend::PrimitiveKind;
use kscr_identity::TypeDefId;

/// Resolved types in the type system.
///
/// Structural value semantics throughout: two array types with equal
/// components are the same type, no interning or identity involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveKind),
    /// Reference to a declared class-like type
    Class(TypeDefId),
    /// Array with a component type
    Array(Box<Type>),
    /// Could not be computed; propagates without cascading diagnostics
    Unknown,
}

impl Type {
    pub const INT: Type = Type::Primitive(PrimitiveKind::Int);
    pub const LONG: Type = Type::Primitive(PrimitiveKind::Long);
    pub const BOOLEAN: Type = Type::Primitive(PrimitiveKind::Boolean);
    pub const CHAR: Type = Type::Primitive(PrimitiveKind::Char);
    pub const FLOAT: Type = Type::Primitive(PrimitiveKind::Float);
    pub const DOUBLE: Type = Type::Primitive(PrimitiveKind::Double);
    pub const VOID: Type = Type::Primitive(PrimitiveKind::Void);

    pub fn array(component: Type) -> Type {
        Type::Array(Box::new(component))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub fn as_class(&self) -> Option<TypeDefId> {
        match self {
            Type::Class(id) => Some(*id),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&Type> {
        match self {
            Type::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Numeric primitives participate in arithmetic promotion.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Type::Primitive(
                PrimitiveKind::Byte
                    | PrimitiveKind::Short
                    | PrimitiveKind::Char
                    | PrimitiveKind::Int
                    | PrimitiveKind::Long
                    | PrimitiveKind::Float
                    | PrimitiveKind::Double
            )
        )
    }
}
