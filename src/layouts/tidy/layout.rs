use serde::{Deserialize, Serialize};

use crate::{
    layouts::{Layout, Orientation, PositionedNode, Spacing, TreeLayout},
    settings::SettingsLayout,
    Expansion, NodeId, Tree,
};

/// Tidy tree layout (Reingold-Tilford, in the linear-time form of Buchheim,
/// Jünger and Leipert).
///
/// Only the visible subtree takes part: children of collapsed nodes do not
/// reserve any room. Parents are centered over their children, subtrees are
/// packed as tightly as the separations allow and levels are evenly spaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tidy {
    /// Gap between siblings in breadth units.
    pub sibling_separation: f32,
    /// Gap between neighbours with different parents in breadth units.
    pub cousin_separation: f32,
}

impl Default for Tidy {
    fn default() -> Self {
        Self {
            sibling_separation: 1.,
            cousin_separation: 2.,
        }
    }
}

impl From<&SettingsLayout> for Tidy {
    fn from(s: &SettingsLayout) -> Self {
        Self {
            sibling_separation: s.sibling_separation,
            cousin_separation: s.cousin_separation,
        }
    }
}

impl Layout for Tidy {
    fn compute(
        &self,
        tree: &Tree,
        expansion: &Expansion,
        orientation: Orientation,
        spacing: Spacing,
    ) -> TreeLayout {
        let mut walker = Walker::new(tree, expansion, *self);
        walker.run();

        let nodes = walker.nodes[1..]
            .iter()
            .map(|w| {
                let breadth = w.x * spacing.breadth;
                let depth = w.depth as f32 * spacing.depth;
                PositionedNode {
                    id: w.id,
                    parent: w
                        .parent
                        .filter(|p| *p != VIRTUAL)
                        .map(|p| walker.nodes[p].id),
                    depth: w.depth,
                    breadth,
                    pos: orientation.to_canvas(breadth, depth),
                }
            })
            .collect();

        TreeLayout::new(orientation, nodes)
    }
}

/// Slot of the synthetic parent placed above the root.
const VIRTUAL: usize = 0;

#[derive(Debug, Clone)]
struct WalkNode {
    id: NodeId,
    depth: usize,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Position among siblings.
    number: usize,
    /// Default ancestor for the subtree separation of this node's children.
    default_ancestor: Option<usize>,
    ancestor: usize,
    prelim: f32,
    modifier: f32,
    change: f32,
    shift: f32,
    thread: Option<usize>,
    x: f32,
}

impl WalkNode {
    fn new(id: NodeId, depth: usize, parent: Option<usize>, number: usize, slot: usize) -> Self {
        Self {
            id,
            depth,
            parent,
            children: Vec::new(),
            number,
            default_ancestor: None,
            ancestor: slot,
            prelim: 0.,
            modifier: 0.,
            change: 0.,
            shift: 0.,
            thread: None,
            x: 0.,
        }
    }
}

/// Working arena. Slot 0 is the virtual parent of the root, slots 1.. hold
/// the visible nodes in pre-order.
struct Walker {
    nodes: Vec<WalkNode>,
    params: Tidy,
}

impl Walker {
    fn new(tree: &Tree, expansion: &Expansion, params: Tidy) -> Self {
        let root = tree.root();
        let mut nodes = vec![WalkNode::new(root, 0, None, 0, VIRTUAL)];

        // (id, parent slot, sibling number, depth), popped in pre-order
        let mut stack = vec![(root, VIRTUAL, 0, 0)];
        while let Some((id, parent, number, depth)) = stack.pop() {
            let slot = nodes.len();
            nodes.push(WalkNode::new(id, depth, Some(parent), number, slot));
            nodes[parent].children.push(slot);
            stack.extend(
                expansion
                    .visible_children(id)
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(number, child)| (*child, slot, number, depth + 1)),
            );
        }

        Self { nodes, params }
    }

    /// Slots in post-order with siblings visited left to right.
    fn post_order(&self) -> Vec<usize> {
        let mut res = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(1usize, false)];
        while let Some((slot, visited)) = stack.pop() {
            if visited {
                res.push(slot);
                continue;
            }
            stack.push((slot, true));
            stack.extend(self.nodes[slot].children.iter().rev().map(|c| (*c, false)));
        }
        res
    }

    fn run(&mut self) {
        for slot in self.post_order() {
            self.first_walk(slot);
        }
        self.nodes[VIRTUAL].modifier = -self.nodes[1].prelim;
        // slots are in pre-order, so parents are placed before their children
        for slot in 1..self.nodes.len() {
            self.second_walk(slot);
        }
    }

    fn separation(&self, a: usize, b: usize) -> f32 {
        if self.nodes[a].parent == self.nodes[b].parent {
            self.params.sibling_separation
        } else {
            self.params.cousin_separation
        }
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.nodes[v]
            .children
            .first()
            .copied()
            .or(self.nodes[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.nodes[v]
            .children
            .last()
            .copied()
            .or(self.nodes[v].thread)
    }

    fn left_sibling(&self, v: usize) -> Option<usize> {
        let node = &self.nodes[v];
        let parent = node.parent?;
        if node.number == 0 {
            return None;
        }
        self.nodes[parent].children.get(node.number - 1).copied()
    }

    fn first_walk(&mut self, v: usize) {
        let Some(parent) = self.nodes[v].parent else {
            return;
        };
        let w = self.left_sibling(v);

        if let (Some(&first), Some(&last)) =
            (self.nodes[v].children.first(), self.nodes[v].children.last())
        {
            self.execute_shifts(v);
            let midpoint = f32::midpoint(self.nodes[first].prelim, self.nodes[last].prelim);
            if let Some(w) = w {
                self.nodes[v].prelim = self.nodes[w].prelim + self.separation(v, w);
                self.nodes[v].modifier = self.nodes[v].prelim - midpoint;
            } else {
                self.nodes[v].prelim = midpoint;
            }
        } else if let Some(w) = w {
            self.nodes[v].prelim = self.nodes[w].prelim + self.separation(v, w);
        }

        let default_ancestor = self.nodes[parent]
            .default_ancestor
            .unwrap_or(self.nodes[parent].children[0]);
        let ancestor = self.apportion(v, w, default_ancestor);
        self.nodes[parent].default_ancestor = Some(ancestor);
    }

    fn second_walk(&mut self, v: usize) {
        let Some(parent) = self.nodes[v].parent else {
            return;
        };
        let parent_mod = self.nodes[parent].modifier;
        self.nodes[v].x = self.nodes[v].prelim + parent_mod;
        self.nodes[v].modifier += parent_mod;
    }

    /// Pushes the subtree of `v` away from its left siblings' subtrees until
    /// contours no longer overlap, spreading the shift over the siblings in
    /// between.
    fn apportion(&mut self, v: usize, w: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = w else {
            return ancestor;
        };
        let Some(parent) = self.nodes[v].parent else {
            return ancestor;
        };

        let mut vop = v;
        let mut vom = self.nodes[parent].children[0];
        let mut sip = self.nodes[v].modifier;
        let mut sop = self.nodes[v].modifier;
        let mut sim = self.nodes[w].modifier;
        let mut som = self.nodes[vom].modifier;

        let mut vim = self.next_right(w);
        let mut vip = self.next_left(v);

        while let (Some(im), Some(ip)) = (vim, vip) {
            let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
                break;
            };
            vom = om;
            vop = op;
            self.nodes[vop].ancestor = v;

            let shift = self.nodes[im].prelim + sim - self.nodes[ip].prelim - sip
                + self.separation(im, ip);
            if shift > 0. {
                let a = self.next_ancestor(im, v, ancestor);
                self.move_subtree(a, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.nodes[im].modifier;
            sip += self.nodes[ip].modifier;
            som += self.nodes[vom].modifier;
            sop += self.nodes[vop].modifier;

            vim = self.next_right(im);
            vip = self.next_left(ip);
        }

        if let Some(im) = vim {
            if self.next_right(vop).is_none() {
                self.nodes[vop].thread = Some(im);
                self.nodes[vop].modifier += sim - sop;
            }
        }
        if let Some(ip) = vip {
            if self.next_left(vom).is_none() {
                self.nodes[vom].thread = Some(ip);
                self.nodes[vom].modifier += sip - som;
                ancestor = v;
            }
        }

        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let a = self.nodes[vim].ancestor;
        if self.nodes[a].parent == self.nodes[v].parent {
            a
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f32) {
        let subtrees = self.nodes[wp].number as f32 - self.nodes[wm].number as f32;
        let change = if subtrees > 0. { shift / subtrees } else { 0. };
        self.nodes[wp].change -= change;
        self.nodes[wp].shift += shift;
        self.nodes[wm].change += change;
        self.nodes[wp].prelim += shift;
        self.nodes[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.;
        let mut change = 0.;
        let children = self.nodes[v].children.clone();
        for w in children.into_iter().rev() {
            let node = &mut self.nodes[w];
            node.prelim += shift;
            node.modifier += shift;
            change += node.change;
            shift += node.shift + change;
        }
    }
}
