// src/expression_data.rs

use crate::resolution::ResolvedTarget;
use crate::types::Type;
use kscr_frontend::NodeId;
use rustc_hash::FxHashMap;

/// Per-node analysis results: the static type of every expression and the
/// resolved target of every identifier/call node.
///
/// Resolution is deterministic — running the same file against an
/// unchanged db reproduces this map exactly.
#[derive(Debug, Clone, Default)]
pub struct ExpressionData {
    types: FxHashMap<NodeId, Type>,
    targets: FxHashMap<NodeId, ResolvedTarget>,
}

impl ExpressionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, node: NodeId, ty: Type) {
        self.types.insert(node, ty);
    }

    /// The static type of an expression, None when the node was never
    /// analyzed (Unknown when it was analyzed but could not be typed).
    #[must_use]
    pub fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.types.get(&node)
    }

    pub fn set_target(&mut self, node: NodeId, target: ResolvedTarget) {
        self.targets.insert(node, target);
    }

    #[must_use]
    pub fn target_of(&self, node: NodeId) -> Option<&ResolvedTarget> {
        self.targets.get(&node)
    }

    pub fn typed_len(&self) -> usize {
        self.types.len()
    }

    /// Merge another file's results into this map. Node ids are unique
    /// across an analysis, so entries never collide.
    pub fn absorb(&mut self, other: ExpressionData) {
        self.types.extend(other.types);
        self.targets.extend(other.targets);
    }
}
