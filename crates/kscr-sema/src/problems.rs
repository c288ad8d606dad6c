// src/problems.rs
//! Semantic resolution problems (E3xxx).
//!
//! All of these are soft: analysis continues past every one, and the
//! offending node's type propagates as Unknown instead of aborting the
//! surrounding expression tree.

use kscr_frontend::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Convert an AST span to a miette source span.
pub(crate) fn src_span(span: Span) -> SourceSpan {
    (span.start, span.len()).into()
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum SemanticProblem {
    #[error("cannot resolve symbol '{name}'")]
    #[diagnostic(code(E3001))]
    UnresolvedIdentifier {
        name: String,
        #[label("not a variable, field, type, or package")]
        span: SourceSpan,
    },

    #[error("cannot resolve type '{name}'")]
    #[diagnostic(code(E3002))]
    UnresolvedTypeRef {
        name: String,
        #[help]
        add_import: Option<String>,
        #[label("unknown type")]
        span: SourceSpan,
    },

    #[error("{message}")]
    #[diagnostic(code(E3003))]
    InvalidSupertypeKind {
        message: String,
        #[help]
        swap_keyword: Option<String>,
        #[label("wrong kind of supertype")]
        span: SourceSpan,
    },

    #[error("cannot {verb} final type '{name}'")]
    #[diagnostic(code(E3004))]
    ExtendsFinalType {
        verb: &'static str,
        name: String,
        #[label("declared final")]
        span: SourceSpan,
    },

    #[error("no applicable overload of '{name}' for arguments ({args})")]
    #[diagnostic(code(E3005))]
    NoMatchingOverload {
        name: String,
        args: String,
        #[label("no candidate matches")]
        span: SourceSpan,
    },

    #[error("'this' cannot be referenced from a static method")]
    #[diagnostic(code(E3006))]
    ThisInStaticMethod {
        #[label("static context")]
        span: SourceSpan,
    },

    /// Reserved for a future strict mode; the current resolver breaks
    /// reach-score ties deterministically instead of reporting them.
    #[error("ambiguous call to '{name}'")]
    #[diagnostic(code(E3007))]
    AmbiguousOverload {
        name: String,
        #[label("more than one best candidate")]
        span: SourceSpan,
    },
}

impl SemanticProblem {
    /// Stable diagnostic code, for assertions and grouping.
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::UnresolvedIdentifier { .. } => "E3001",
            Self::UnresolvedTypeRef { .. } => "E3002",
            Self::InvalidSupertypeKind { .. } => "E3003",
            Self::ExtendsFinalType { .. } => "E3004",
            Self::NoMatchingOverload { .. } => "E3005",
            Self::ThisInStaticMethod { .. } => "E3006",
            Self::AmbiguousOverload { .. } => "E3007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render() {
        let p = SemanticProblem::UnresolvedIdentifier {
            name: "foo".into(),
            span: src_span(Span::new(3, 6, 1, 4)),
        };
        assert_eq!(p.to_string(), "cannot resolve symbol 'foo'");
        assert_eq!(p.code_str(), "E3001");

        let p = SemanticProblem::InvalidSupertypeKind {
            message: "expected an interface, not a class".into(),
            swap_keyword: Some("use 'extends' instead of 'implements'".into()),
            span: src_span(Span::default()),
        };
        assert_eq!(p.to_string(), "expected an interface, not a class");
    }
}
