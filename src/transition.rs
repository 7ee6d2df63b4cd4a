use std::collections::HashMap;

use egui::{lerp, Pos2};
use serde::{Deserialize, Serialize};

use crate::{layouts::TreeLayout, NodeId};

/// How an element takes part in the running transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Became visible, grows out of the toggle source.
    Entering,
    /// Visible before and after, moves to its new position.
    Persisting,
    /// No longer visible, shrinks into the toggle source and is removed.
    Exiting,
}

#[derive(Debug, Clone, PartialEq)]
struct NodeTrack {
    id: NodeId,
    phase: Phase,
    from: Pos2,
    to: Pos2,
    from_radius: f32,
    to_radius: f32,
    from_alpha: f32,
    to_alpha: f32,
}

/// Connector keyed by its child, endpoints are `[parent, child]`.
#[derive(Debug, Clone, PartialEq)]
struct EdgeTrack {
    parent: NodeId,
    child: NodeId,
    phase: Phase,
    from: [Pos2; 2],
    to: [Pos2; 2],
}

/// Interpolated node state at some instant.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSample {
    pub id: NodeId,
    pub phase: Phase,
    /// Canvas position.
    pub pos: Pos2,
    /// Marker radius relative to the styled radius, in `[0, 1]`.
    pub radius: f32,
    /// Label opacity in `[0, 1]`.
    pub label_alpha: f32,
}

/// Interpolated connector endpoints at some instant.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSample {
    pub parent: NodeId,
    pub child: NodeId,
    pub phase: Phase,
    pub from: Pos2,
    pub to: Pos2,
}

/// Cubic in-out easing on `[0, 1]`.
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0., 1.);
    if t < 0.5 {
        4. * t * t * t
    } else {
        let u = -2. * t + 2.;
        1. - u * u * u / 2.
    }
}

/// Declarative transition between two layouts.
///
/// Holds, per element, where it starts and where it ends together with a
/// start time and a duration. Nothing is stepped: every query samples the
/// state at the given instant, so a frame can be rendered for any time.
#[derive(Debug, Clone, Default)]
pub struct Transition {
    nodes: Vec<NodeTrack>,
    edges: Vec<EdgeTrack>,
    start: f64,
    duration: f64,
}

impl Transition {
    /// Shows `layout` directly at its final positions.
    pub fn settled(layout: &TreeLayout, now: f64) -> Self {
        let nodes = layout
            .nodes()
            .iter()
            .map(|n| NodeTrack {
                id: n.id,
                phase: Phase::Persisting,
                from: n.pos,
                to: n.pos,
                from_radius: 1.,
                to_radius: 1.,
                from_alpha: 1.,
                to_alpha: 1.,
            })
            .collect();

        let edges = layout
            .edges()
            .filter_map(|(parent, child)| {
                let ends = [layout.pos(parent)?, layout.pos(child)?];
                Some(EdgeTrack {
                    parent,
                    child,
                    phase: Phase::Persisting,
                    from: ends,
                    to: ends,
                })
            })
            .collect();

        Self {
            nodes,
            edges,
            start: now,
            duration: 0.,
        }
    }

    /// Starts a transition from whatever is displayed at `now` to `layout`.
    ///
    /// Elements are matched by id against everything currently rendered,
    /// including elements still on their way out. Entering elements start at
    /// the displayed position of `source`, exiting ones end there.
    pub fn retarget(&self, layout: &TreeLayout, source: NodeId, now: f64, duration: f64) -> Self {
        let shown = self.nodes(now);
        let anchor = shown
            .iter()
            .find(|s| s.id == source)
            .map(|s| s.pos)
            .or_else(|| layout.pos(source))
            .unwrap_or(Pos2::ZERO);

        let nodes = node_tracks(layout, shown, anchor);
        let edges = edge_tracks(layout, self.edges(now), anchor);

        log::trace!(
            "transition retargeted: {} nodes, {} exiting, {duration}s",
            nodes.len(),
            nodes.iter().filter(|n| n.phase == Phase::Exiting).count()
        );

        Self {
            nodes,
            edges,
            start: now,
            duration,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0. {
            return 1.;
        }
        let t = ((now - self.start) / self.duration).clamp(0., 1.);
        ease_cubic_in_out(t as f32)
    }

    pub fn is_running(&self, now: f64) -> bool {
        self.duration > 0. && now < self.start + self.duration
    }

    /// Node states at `now`. Exiting nodes are omitted once finished.
    pub fn nodes(&self, now: f64) -> Vec<NodeSample> {
        let t = self.progress(now);
        let done = !self.is_running(now);
        self.nodes
            .iter()
            .filter(|n| !(done && n.phase == Phase::Exiting))
            .map(|n| NodeSample {
                id: n.id,
                phase: n.phase,
                pos: n.from.lerp(n.to, t),
                radius: lerp(n.from_radius..=n.to_radius, t),
                label_alpha: lerp(n.from_alpha..=n.to_alpha, t),
            })
            .collect()
    }

    /// Connector states at `now`. Exiting connectors are omitted once finished.
    pub fn edges(&self, now: f64) -> Vec<EdgeSample> {
        let t = self.progress(now);
        let done = !self.is_running(now);
        self.edges
            .iter()
            .filter(|e| !(done && e.phase == Phase::Exiting))
            .map(|e| EdgeSample {
                parent: e.parent,
                child: e.child,
                phase: e.phase,
                from: e.from[0].lerp(e.to[0], t),
                to: e.from[1].lerp(e.to[1], t),
            })
            .collect()
    }

    /// Drops finished exits and settles every other element at its target.
    /// Does nothing while the transition is running.
    pub fn prune(&mut self, now: f64) {
        if self.is_running(now) {
            return;
        }
        self.nodes.retain(|n| n.phase != Phase::Exiting);
        self.edges.retain(|e| e.phase != Phase::Exiting);
        for n in &mut self.nodes {
            n.phase = Phase::Persisting;
            n.from = n.to;
            n.from_radius = n.to_radius;
            n.from_alpha = n.to_alpha;
        }
        for e in &mut self.edges {
            e.phase = Phase::Persisting;
            e.from = e.to;
        }
        self.duration = 0.;
    }
}

/// Diffs displayed node samples against the target layout.
fn node_tracks(layout: &TreeLayout, shown: Vec<NodeSample>, anchor: Pos2) -> Vec<NodeTrack> {
    let mut shown: HashMap<NodeId, NodeSample> = shown.into_iter().map(|s| (s.id, s)).collect();
    let mut tracks = Vec::with_capacity(layout.len() + shown.len());

    for n in layout.nodes() {
        let track = match shown.remove(&n.id) {
            Some(s) => NodeTrack {
                id: n.id,
                phase: Phase::Persisting,
                from: s.pos,
                to: n.pos,
                from_radius: s.radius,
                to_radius: 1.,
                from_alpha: s.label_alpha,
                to_alpha: 1.,
            },
            None => NodeTrack {
                id: n.id,
                phase: Phase::Entering,
                from: anchor,
                to: n.pos,
                from_radius: 0.,
                to_radius: 1.,
                from_alpha: 0.,
                to_alpha: 1.,
            },
        };
        tracks.push(track);
    }

    // whatever is left is no longer part of the layout
    let mut exiting: Vec<_> = shown.into_values().collect();
    exiting.sort_by_key(|s| s.id);
    tracks.extend(exiting.into_iter().map(|s| NodeTrack {
        id: s.id,
        phase: Phase::Exiting,
        from: s.pos,
        to: anchor,
        from_radius: s.radius,
        to_radius: 0.,
        from_alpha: s.label_alpha,
        to_alpha: 0.,
    }));
    tracks
}

/// Diffs displayed connectors, keyed by child, against the target layout.
fn edge_tracks(layout: &TreeLayout, shown: Vec<EdgeSample>, anchor: Pos2) -> Vec<EdgeTrack> {
    let mut shown: HashMap<NodeId, EdgeSample> = shown.into_iter().map(|s| (s.child, s)).collect();
    let mut tracks = Vec::with_capacity(layout.len());

    for (parent, child) in layout.edges() {
        let (Some(p), Some(c)) = (layout.pos(parent), layout.pos(child)) else {
            continue;
        };
        let (phase, from) = match shown.remove(&child) {
            Some(s) => (Phase::Persisting, [s.from, s.to]),
            None => (Phase::Entering, [anchor, anchor]),
        };
        tracks.push(EdgeTrack {
            parent,
            child,
            phase,
            from,
            to: [p, c],
        });
    }

    let mut exiting: Vec<_> = shown.into_values().collect();
    exiting.sort_by_key(|s| s.child);
    tracks.extend(exiting.into_iter().map(|s| EdgeTrack {
        parent: s.parent,
        child: s.child,
        phase: Phase::Exiting,
        from: [s.from, s.to],
        to: [anchor, anchor],
    }));
    tracks
}
