//! Per-tree `id -> node` scope used to resolve `reference` nodes.
//!
//! The walker shares one `seen` set across the whole traversal, so a
//! reference may point into a sibling branch rather than an ancestor. The
//! only reliable way to resolve it is a map over the entire tree.

use crate::type_info::{TypeInfoId, TypeInfoKind, TypeInfoRef};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct TypeInfoMap {
    nodes: FxHashMap<TypeInfoId, TypeInfoRef>,
}

impl TypeInfoMap {
    /// Index every concrete node reachable from `root`.
    ///
    /// `reference` and `max_depth` nodes are never indexed: they share an id
    /// with the node they stand in for but carry none of its payload. When
    /// two concrete nodes share an id the first one in pre-order wins, which
    /// matches the walker's encounter order.
    pub fn build(root: &TypeInfoRef) -> Self {
        let mut nodes = FxHashMap::default();
        let mut stack = vec![root.clone()];

        while let Some(node) = stack.pop() {
            if !matches!(
                node.kind,
                TypeInfoKind::Reference { .. } | TypeInfoKind::MaxDepth
            ) {
                nodes.entry(node.id).or_insert_with(|| node.clone());
            }

            let mut children = Vec::new();
            node.for_each_child(|child| children.push(child.clone()));
            // Reverse so the leftmost child is visited first.
            stack.extend(children.into_iter().rev());
        }

        TypeInfoMap { nodes }
    }

    pub fn get(&self, id: TypeInfoId) -> Option<&TypeInfoRef> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: TypeInfoId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/type_info_map_tests.rs"]
mod tests;
