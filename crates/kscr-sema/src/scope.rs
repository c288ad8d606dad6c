// src/scope.rs
//
// Lexical scope chain. A scope owns the variables it introduces, ordered
// by declaration, and holds only a borrowed reference to its enclosing
// scope. Lookup is first-match-wins, most-local first.

use crate::types::Type;
use kscr_frontend::Symbol;

/// A variable visible in some scope: a method parameter, local declaration,
/// or a synthetic (foreach iteration variable, caught exception).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: Symbol,
    pub ty: Type,
    pub is_final: bool,
    /// Method-body locals/parameters/synthetics, as opposed to class
    /// members; selects the inference fallback rules.
    pub local: bool,
}

impl Variable {
    pub fn local(name: Symbol, ty: Type) -> Self {
        Self {
            name,
            ty,
            is_final: false,
            local: true,
        }
    }
}

/// One lexical scope: block, method body, for-loop header, foreach header,
/// or catch clause. Created during a single top-down walk and immutable
/// once its construct has been fully visited.
#[derive(Debug, Default)]
pub struct Scope<'a> {
    vars: Vec<Variable>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    /// The outermost scope (a method body starts here, holding parameters).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(parent: &'a Scope<'a>) -> Self {
        Self {
            vars: Vec::new(),
            parent: Some(parent),
        }
    }

    pub fn define(&mut self, var: Variable) {
        self.vars.push(var);
    }

    /// Every variable visible at this scope, most-local first: own
    /// declarations in declaration order, then the enclosing chain.
    pub fn available(&self) -> Available<'_> {
        Available {
            scope: Some(self),
            index: 0,
        }
    }

    /// First visible variable with the given name.
    pub fn lookup(&self, name: Symbol) -> Option<&Variable> {
        self.available().find(|v| v.name == name)
    }
}

/// Iterator over the visible variables of a scope chain.
pub struct Available<'s> {
    scope: Option<&'s Scope<'s>>,
    index: usize,
}

impl<'s> Iterator for Available<'s> {
    type Item = &'s Variable;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let scope = self.scope?;
            if let Some(var) = scope.vars.get(self.index) {
                self.index += 1;
                return Some(var);
            }
            self.scope = scope.parent;
            self.index = 0;
        }
    }
}
