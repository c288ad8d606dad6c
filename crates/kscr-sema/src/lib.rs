//! KScr semantic resolution.
//!
//! Given parsed source trees, this crate determines what every
//! identifier, method call, and type reference refers to, and computes
//! the static type of every expression: a declaration index over all
//! compilation units, lexical scope chains, import-aware short-name
//! resolution, and three-tier overload resolution (exact, widening,
//! varargs).
//!
//! The entry point is [`analyze_files`]; everything it returns is
//! immutable, and a source edit is handled by analyzing again and
//! swapping the whole [`Analysis`].

pub mod analyzer;
pub mod compatibility;
pub mod compilation_db;
pub mod entity_defs;
pub mod entity_registry;
pub mod expression_data;
pub mod problems;
pub mod resolution;
pub mod resolve;
pub mod scope;
pub mod type_display;
pub mod types;
pub mod well_known;

pub use analyzer::{Analysis, Analyzer, analyze_files};
pub use compatibility::{assignable, convertible, promote};
pub use compilation_db::CompilationDb;
pub use entity_defs::{FieldDef, MethodDef, ModifierSet, ParamDef, TypeDef, TypeDefKind};
pub use entity_registry::EntityRegistry;
pub use expression_data::ExpressionData;
pub use problems::SemanticProblem;
pub use resolution::ResolvedTarget;
pub use resolve::{ResolverEntityExt, resolve_type_ref};
pub use scope::{Scope, Variable};
pub use type_display::display_type;
pub use types::Type;
