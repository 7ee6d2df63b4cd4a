use std::collections::HashMap;

use egui::{Pos2, Rect};

use super::{Orientation, Spacing};
use crate::{settings::SettingsLayout, Expansion, NodeId, Tree};

/// Node of the visible subtree with its computed coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
    /// Coordinate along the sibling axis, before orientation mapping.
    pub breadth: f32,
    /// Canvas position.
    pub pos: Pos2,
}

/// Result of one layout pass over the visible subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    orientation: Orientation,
    nodes: Vec<PositionedNode>,
    index: HashMap<NodeId, usize>,
    bounds: Rect,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self::new(Orientation::default(), Vec::new())
    }
}

impl TreeLayout {
    /// `nodes` must be in pre-order, root first.
    pub fn new(orientation: Orientation, nodes: Vec<PositionedNode>) -> Self {
        let index = nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        let bounds = if nodes.is_empty() {
            Rect::NOTHING
        } else {
            Rect::from_points(&nodes.iter().map(|n| n.pos).collect::<Vec<_>>())
        };

        Self {
            orientation,
            nodes,
            index,
            bounds,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.index.get(&id).map(|i| &self.nodes[*i])
    }

    pub fn pos(&self, id: NodeId) -> Option<Pos2> {
        self.node(id).map(|n| n.pos)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Visible (parent, child) pairs in pre-order of the child.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .iter()
            .filter_map(|n| n.parent.map(|parent| (parent, n.id)))
    }

    /// Bounding box of all node centers.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Positions the visible part of a tree.
pub trait Layout {
    fn compute(
        &self,
        tree: &Tree,
        expansion: &Expansion,
        orientation: Orientation,
        spacing: Spacing,
    ) -> TreeLayout;
}

/// Convenience entry which derives spacing from the layout settings.
pub fn compute_layout<L: Layout>(
    layout: &L,
    tree: &Tree,
    expansion: &Expansion,
    orientation: Orientation,
    settings: &SettingsLayout,
) -> TreeLayout {
    layout.compute(tree, expansion, orientation, settings.spacing(orientation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: usize, parent: Option<usize>, pos: Pos2) -> PositionedNode {
        PositionedNode {
            id: NodeId::new(id),
            parent: parent.map(NodeId::new),
            depth: usize::from(parent.is_some()),
            breadth: pos.x,
            pos,
        }
    }

    #[test]
    fn default_is_empty() {
        let layout = TreeLayout::default();
        assert!(layout.is_empty());
        assert_eq!(layout.bounds(), Rect::NOTHING);
        assert_eq!(layout.edges().count(), 0);
        assert_eq!(layout, TreeLayout::new(Orientation::Vertical, Vec::new()));
    }

    #[test]
    fn bounds_and_edges() {
        let layout = TreeLayout::new(
            Orientation::Vertical,
            vec![
                node(0, None, Pos2::new(0., 0.)),
                node(1, Some(0), Pos2::new(-40., 180.)),
                node(2, Some(0), Pos2::new(40., 180.)),
            ],
        );
        assert_eq!(
            layout.bounds(),
            Rect::from_min_max(Pos2::new(-40., 0.), Pos2::new(40., 180.))
        );
        let edges: Vec<_> = layout.edges().collect();
        assert_eq!(
            edges,
            vec![
                (NodeId::new(0), NodeId::new(1)),
                (NodeId::new(0), NodeId::new(2))
            ]
        );
        assert_eq!(layout.pos(NodeId::new(2)), Some(Pos2::new(40., 180.)));
        assert!(!layout.contains(NodeId::new(3)));
    }
}
