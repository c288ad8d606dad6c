// src/type_display.rs
//
// Human-readable rendering of semantic types, used by diagnostics.

use crate::compilation_db::CompilationDb;
use crate::types::Type;

/// Render a type the way it reads in source: primitive keywords, dotted
/// class names, `[]` suffixes for arrays.
pub fn display_type(ty: &Type, db: &CompilationDb) -> String {
    match ty {
        Type::Primitive(kind) => kind.name().to_string(),
        Type::Class(id) => db.names.display(db.entities.get_type(*id).name_id),
        Type::Array(component) => format!("{}[]", display_type(component, db)),
        Type::Unknown => "<unknown>".to_string(),
    }
}

/// Render an argument type list for overload diagnostics.
pub fn display_types(types: &[Type], db: &CompilationDb) -> String {
    types
        .iter()
        .map(|t| display_type(t, db))
        .collect::<Vec<_>>()
        .join(", ")
}
