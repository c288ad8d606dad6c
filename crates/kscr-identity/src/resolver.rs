// Import-aware resolver for short type names.
//
// Produces fully-qualified candidate names for an identifier seen in one
// source file and resolves them against the NameTable.
//
// Candidate order (first match wins):
// 1. The literal text, taken as an already-qualified name
// 2. Each explicit single-type import whose last segment is the identifier
// 3. Each wildcard import's package
// 4. The implicit root package (java.lang)
// 5. The file's own package
//
// Explicit imports beat same-package visibility; a type in the default
// package is not referable from inside a named package.
//
// Note: entity resolution (NameId -> TypeDefId) is layered on top in sema
// via the entity registry, not here.

use crate::{NameId, NameTable, ROOT_PACKAGE};
use kscr_frontend::ImportDecl;

pub struct Resolver<'a> {
    table: &'a NameTable,
    package: &'a str,
    imports: &'a [ImportDecl],
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a NameTable, package: &'a str, imports: &'a [ImportDecl]) -> Self {
        Self {
            table,
            package,
            imports,
        }
    }

    /// Get the NameTable this resolver uses.
    pub fn table(&self) -> &NameTable {
        self.table
    }

    /// The file's own package ("" for the default package).
    pub fn package(&self) -> &str {
        self.package
    }

    pub fn imports(&self) -> &[ImportDecl] {
        self.imports
    }

    /// Fully-qualified candidate names for `id`, in resolution order.
    pub fn candidates(&self, id: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(self.imports.len() + 3);
        candidates.push(id.to_string());
        for import in self.imports {
            if import.is_static {
                continue;
            }
            if !import.wildcard && import.short_name() == id {
                candidates.push(import.path.clone());
            }
        }
        for import in self.imports {
            if !import.is_static && import.wildcard {
                candidates.push(format!("{}.{id}", import.path));
            }
        }
        candidates.push(format!("{ROOT_PACKAGE}.{id}"));
        if !self.package.is_empty() {
            candidates.push(format!("{}.{id}", self.package));
        }
        candidates
    }

    /// Resolve an identifier through the candidate chain.
    /// Returns None if no candidate names a known type.
    pub fn resolve_str(&self, id: &str) -> Option<NameId> {
        for candidate in self.candidates(id) {
            if let Some(name_id) = self.table.resolve_fq(&candidate)
                && self.referable(name_id)
            {
                tracing::trace!(id, %candidate, "short name resolved");
                return Some(name_id);
            }
        }
        tracing::trace!(id, "short name unresolved");
        None
    }

    /// Default-package types are only visible from the default package.
    fn referable(&self, name_id: NameId) -> bool {
        self.package.is_empty()
            || self.table.package_of(name_id) != self.table.default_package()
    }
}
