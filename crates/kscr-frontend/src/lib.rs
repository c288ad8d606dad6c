//! KScr frontend surface: the AST consumed by semantic analysis.
//!
//! There is no parser here. The external parser (ANTLR-generated in the
//! reference toolchain) produces this tree; [`AstBuilder`] is the handle it
//! uses to allocate node ids. Tests build trees through the same API.

pub mod ast;
pub mod builder;
pub mod intern;
pub mod span;

pub use ast::*;
pub use builder::AstBuilder;
pub use intern::Interner;
pub use span::Span;
