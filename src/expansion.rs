use std::collections::HashMap;

use crate::{NodeId, Tree};

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeState {
    expanded: bool,
    children: Vec<NodeId>,
}

/// Visible-subtree state, kept apart from the immutable [`Tree`].
///
/// Holds an entry for every node with children. A collapsed node keeps its
/// children listed as hidden, so expanding it again restores the exact same
/// subtree, including the expansion of deeper nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    root: NodeId,
    states: HashMap<NodeId, NodeState>,
}

impl Expansion {
    /// Applies the collapse-on-load rule: nodes at depth `collapse_depth` and
    /// deeper start collapsed, so only the first `collapse_depth + 1` levels
    /// are visible.
    pub fn new(tree: &Tree, collapse_depth: usize) -> Self {
        let states = tree
            .iter()
            .filter(|(id, _)| tree.has_children(*id))
            .map(|(id, node)| {
                let state = NodeState {
                    expanded: node.depth() < collapse_depth,
                    children: tree.children(id),
                };
                (id, state)
            })
            .collect();

        Self {
            root: tree.root(),
            states,
        }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.states.get(&id).is_some_and(|s| s.expanded)
    }

    /// Children that take part in the layout. Empty for leaves and collapsed nodes.
    pub fn visible_children(&self, id: NodeId) -> &[NodeId] {
        match self.states.get(&id) {
            Some(s) if s.expanded => &s.children,
            _ => &[],
        }
    }

    /// Children retained in memory while the node is collapsed.
    pub fn hidden_children(&self, id: NodeId) -> &[NodeId] {
        match self.states.get(&id) {
            Some(s) if !s.expanded => &s.children,
            _ => &[],
        }
    }

    /// Flips the expansion flag of `id`. Nodes without children are left
    /// untouched and `false` is returned.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        match self.states.get_mut(&id) {
            Some(s) => {
                s.expanded = !s.expanded;
                true
            }
            None => false,
        }
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        match self.states.get_mut(&id) {
            Some(s) => {
                s.expanded = expanded;
                true
            }
            None => false,
        }
    }

    pub fn is_visible(&self, tree: &Tree, id: NodeId) -> bool {
        tree.contains(id) && tree.ancestors(id).iter().all(|a| self.is_expanded(*a))
    }

    /// Visible nodes in pre-order, root first.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let mut res = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            res.push(id);
            stack.extend(self.visible_children(id).iter().rev().copied());
        }
        res
    }
}
