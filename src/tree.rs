use egui::Color32;
use petgraph::{
    stable_graph::{NodeIndex, StableGraph},
    Direction::{Incoming, Outgoing},
};

use crate::{details::NodeDetails, Error, Result, RoadmapNode};

/// Stable identity of a node within one constructed [`Tree`].
///
/// Ids are assigned in pre-order while the tree is built, so the root is
/// always `NodeId::new(0)` and siblings carry increasing ids in source order.
pub type NodeId = NodeIndex;

/// Node of the constructed tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    depth: usize,
    details: NodeDetails,
}

impl TreeNode {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn color(&self) -> Color32 {
        self.details.color
    }

    pub fn details(&self) -> &NodeDetails {
        &self.details
    }
}

/// Immutable tree built once per dataset.
///
/// Nodes live in a [`StableGraph`] with parent -> child edges; the node index
/// doubles as the stable id used to key transitions.
#[derive(Debug, Clone)]
pub struct Tree {
    g: StableGraph<TreeNode, ()>,
}

impl Tree {
    /// Builds the tree from the source data in a single pre-order traversal.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyName`] for a blank name, [`Error::InvalidColor`] for a
    /// color `egui::Color32::from_hex` rejects.
    pub fn new(root: &RoadmapNode) -> Result<Self> {
        let mut g: StableGraph<TreeNode, ()> =
            StableGraph::with_capacity(root.count(), root.count().saturating_sub(1));

        // (source node, parent id, depth, child positions from the root)
        let mut stack: Vec<(&RoadmapNode, Option<NodeId>, usize, Vec<usize>)> =
            vec![(root, None, 0, Vec::new())];

        while let Some((src, parent, depth, path)) = stack.pop() {
            if src.name.trim().is_empty() {
                return Err(Error::EmptyName { path });
            }
            let color = Color32::from_hex(src.color.trim()).map_err(|_| Error::InvalidColor {
                name: src.name.clone(),
                value: src.color.clone(),
            })?;

            let idx = g.add_node(TreeNode {
                depth,
                details: NodeDetails::from_source(src, color),
            });
            if let Some(parent) = parent {
                g.add_edge(parent, idx, ());
            }

            for (pos, child) in src.children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(pos);
                stack.push((child, Some(idx), depth + 1, child_path));
            }
        }

        Ok(Self { g })
    }

    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn len(&self) -> usize {
        self.g.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.g.node_count() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.g.contains_node(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.g.node_weight(id)
    }

    pub fn details(&self, id: NodeId) -> Option<&NodeDetails> {
        self.node(id).map(TreeNode::details)
    }

    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.node(id).map(TreeNode::depth)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.g.neighbors_directed(id, Incoming).next()
    }

    /// Children in source order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut res: Vec<NodeId> = self.g.neighbors_directed(id, Outgoing).collect();
        // pre-order ids grow along the sibling order
        res.sort_unstable();
        res
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.g.neighbors_directed(id, Outgoing).next().is_some()
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut res = Vec::new();
        let mut curr = self.parent(id);
        while let Some(p) = curr {
            res.push(p);
            curr = self.parent(p);
        }
        res
    }

    /// All nodes in pre-order, which is also id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        (0..self.g.node_count()).filter_map(move |i| {
            let id = NodeId::new(i);
            self.g.node_weight(id).map(|n| (id, n))
        })
    }

    /// Finds the first node in pre-order carrying `name`.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|(_, n)| n.name() == name).map(|(id, _)| id)
    }
}
