// src/compilation_db.rs
//
// Container for the per-pass semantic state: the name table and the
// entity registry. Built once, then read-only; rebuilding after an edit
// produces a fresh db that readers swap in atomically (wrap in Arc when
// shared across threads), so no reader ever sees a partial index.

use crate::entity_registry::EntityRegistry;
use crate::well_known;
use kscr_frontend::SourceFile;
use kscr_identity::{NameTable, Resolver, TypeDefId};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct CompilationDb {
    pub names: NameTable,
    pub entities: EntityRegistry,
}

impl CompilationDb {
    pub fn new() -> Self {
        Self {
            names: NameTable::new(),
            entities: EntityRegistry::new(),
        }
    }

    /// A short-name resolver scoped to one file's package and imports.
    pub fn resolver_for<'a>(&'a self, file: &'a SourceFile) -> Resolver<'a> {
        Resolver::new(&self.names, file.package_name(), &file.imports)
    }

    /// Look up a declared type by its dotted fully-qualified name.
    pub fn type_by_fq(&self, fq: &str) -> Option<TypeDefId> {
        self.names
            .resolve_fq(fq)
            .and_then(|name_id| self.entities.type_by_name(name_id))
    }

    /// The universal root class, when the compilation scope declares it.
    pub fn object_type(&self) -> Option<TypeDefId> {
        self.type_by_fq(well_known::OBJECT)
    }

    /// The string class, when the compilation scope declares it.
    pub fn string_type(&self) -> Option<TypeDefId> {
        self.type_by_fq(well_known::STRING)
    }

    /// Every type visible at `file` for completion/variant listing: all
    /// declared types, plus root-package types, plus wildcard-imported
    /// packages, plus single-type import targets. Deduplicated, stable
    /// declaration order.
    pub fn visible_types(&self, file: &SourceFile) -> Vec<TypeDefId> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let mut add = |id: TypeDefId| {
            if seen.insert(id) {
                out.push(id);
            }
        };

        for def in self.entities.types() {
            add(def.id);
        }
        if let Some(root) = self.names.lookup_package(kscr_identity::ROOT_PACKAGE) {
            for def in self.entities.types().filter(|d| d.package == root) {
                add(def.id);
            }
        }
        for import in &file.imports {
            if import.is_static {
                continue;
            }
            if import.wildcard {
                if let Some(pkg) = self.names.lookup_package(&import.path) {
                    for def in self.entities.types().filter(|d| d.package == pkg) {
                        add(def.id);
                    }
                }
            } else if let Some(id) = self.type_by_fq(&import.path) {
                add(id);
            }
        }
        out
    }
}
