// src/lib.rs
//
// Shared identity for packages and fully-qualified type names.
// Packages play the module role: every declared type's identity is its
// package plus the segment path of enclosing type names.

use rustc_hash::FxHashMap;

mod entities;
mod resolver;

pub use entities::{FieldId, MethodId, TypeDefId};
pub use resolver::Resolver;

/// The implicit root package, always in short-name scope.
pub const ROOT_PACKAGE: &str = "java.lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackageId(u32);

impl PackageId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameId(u32);

impl NameId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// A fully-qualified type name: package plus nested-type segment path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    package: PackageId,
    segments: Vec<String>,
}

impl QualifiedName {
    pub fn package(&self) -> PackageId {
        self.package
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The simple (short) name: the last segment.
    pub fn short_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NameKey {
    package: PackageId,
    segments: Vec<String>,
}

/// Registry of packages and fully-qualified names.
///
/// Names are interned once during a declaration pass and immutable
/// afterwards; a display-string index makes candidate strings from
/// short-name resolution an O(1) lookup.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    packages: Vec<String>,
    package_lookup: FxHashMap<String, PackageId>,
    names: Vec<QualifiedName>,
    lookup: FxHashMap<NameKey, NameId>,
    display_lookup: FxHashMap<String, NameId>,
}

impl NameTable {
    pub fn new() -> Self {
        let mut table = Self::default();
        table.package_id("");
        table.package_id(ROOT_PACKAGE);
        table
    }

    /// The default (unnamed) package.
    pub fn default_package(&self) -> PackageId {
        PackageId(0)
    }

    /// Get or register a package by its dotted name.
    pub fn package_id(&mut self, name: &str) -> PackageId {
        if let Some(&id) = self.package_lookup.get(name) {
            return id;
        }
        let id = PackageId(self.packages.len() as u32);
        self.packages.push(name.to_string());
        self.package_lookup.insert(name.to_string(), id);
        id
    }

    pub fn lookup_package(&self, name: &str) -> Option<PackageId> {
        self.package_lookup.get(name).copied()
    }

    pub fn package_name(&self, id: PackageId) -> &str {
        &self.packages[id.0 as usize]
    }

    /// Whether `name` denotes a known package or a prefix of one
    /// (`java` is a package name because `java.lang` is registered).
    pub fn package_exists(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.packages
            .iter()
            .any(|p| p == name || (p.len() > name.len() && p.starts_with(name) && p.as_bytes()[name.len()] == b'.'))
    }

    /// Intern a fully-qualified name. Returns the existing id when the
    /// same package + segments were interned before.
    pub fn intern(&mut self, package: PackageId, segments: &[&str]) -> NameId {
        let key = NameKey {
            package,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        };
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let id = NameId(self.names.len() as u32);
        let qualified = QualifiedName {
            package,
            segments: key.segments.clone(),
        };
        let display = self.render(&qualified);
        self.display_lookup.insert(display, id);
        self.names.push(qualified);
        self.lookup.insert(key, id);
        id
    }

    /// Look up an interned name without interning.
    pub fn name_id(&self, package: PackageId, segments: &[&str]) -> Option<NameId> {
        let key = NameKey {
            package,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        };
        self.lookup.get(&key).copied()
    }

    /// Resolve a dotted fully-qualified string to an interned name.
    pub fn resolve_fq(&self, fq: &str) -> Option<NameId> {
        self.display_lookup.get(fq).copied()
    }

    pub fn qualified(&self, id: NameId) -> &QualifiedName {
        &self.names[id.0 as usize]
    }

    pub fn package_of(&self, id: NameId) -> PackageId {
        self.qualified(id).package
    }

    pub fn short_name(&self, id: NameId) -> &str {
        self.qualified(id).short_name()
    }

    /// Display a name as its dotted fully-qualified string.
    pub fn display(&self, id: NameId) -> String {
        self.render(self.qualified(id))
    }

    fn render(&self, qualified: &QualifiedName) -> String {
        let package = self.package_name(qualified.package);
        if package.is_empty() {
            qualified.segments.join(".")
        } else {
            let mut out = String::with_capacity(package.len() + 16);
            out.push_str(package);
            for segment in &qualified.segments {
                out.push('.');
                out.push_str(segment);
            }
            out
        }
    }
}
