// Line-of-sight from a viewpoint, accounting for opaque occluders: a
// two-phase recursive expansion (find obscuring nodes, then compute each
// visited node's surviving visible fraction) over tangential NodeArcs.

use crate::geometry::{angle_between, normalize_angle};
use crate::graph::Graph;
use crate::node_arc::NodeArc;
use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::hash::Hash;

const ONE_DEGREE: f64 = PI / 180.0;

/// The result of a visibility search: which visited nodes are visible, and
/// every visited node's computed arc (for diagnostics or rendering).
#[derive(Clone, Debug, Default)]
pub struct VisibilityResult<N> {
    visible: HashSet<N>,
    arcs: HashMap<N, NodeArc>,
}

impl<N: Copy + Eq + Hash> VisibilityResult<N> {
    pub fn is_visible(&self, n: N) -> bool {
        self.visible.contains(&n)
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.visible.iter().copied()
    }

    /// Every node visited during the search, mapped to its computed arc —
    /// including nodes that turned out not to be visible.
    pub fn node_arcs(&self) -> &HashMap<N, NodeArc> {
        &self.arcs
    }
}

/// Line-of-sight / visibility engine.
pub struct VisibilityEngine {
    threshold: f64,
}

impl VisibilityEngine {
    /// `threshold` must lie in `[0, 1]` — violating this is a precondition
    /// violation and panics. An exact `0.0` is clamped to the smallest
    /// positive `f64`, so that "zero threshold" means "any visible sliver
    /// counts" rather than admitting fully-obscured nodes.
    pub fn with_threshold(threshold: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&threshold),
            "threshold must be in [0, 1], got {threshold}"
        );
        let threshold = if threshold == 0.0 { f64::MIN_POSITIVE } else { threshold };
        Self { threshold }
    }

    /// Search for nodes visible from `source`. `max_distance` of `0.0`
    /// means unlimited; a node whose arc distance exceeds it is dropped from
    /// the result (not recorded, never tracked as an obscurer) but the
    /// search still recurses through it, since arc distance is a
    /// straight-line measurement from source and isn't monotone along the
    /// DFS. An unrecognised `source` yields an empty result.
    pub fn search<G, P>(&self, graph: &G, source: G::Node, is_opaque: P, max_distance: f64) -> VisibilityResult<G::Node>
    where
        G: Graph,
        P: Fn(G::Node) -> bool,
    {
        assert!(max_distance >= 0.0, "max_distance must be non-negative, got {max_distance}");

        if !graph.contains(source) {
            return VisibilityResult::default();
        }

        let mut arcs: HashMap<G::Node, NodeArc> = HashMap::new();
        let mut visited: HashSet<G::Node> = HashSet::new();
        visited.insert(source);
        let mut obscurer_front: Vec<G::Node> = Vec::new();
        let mut opaque_order: Vec<G::Node> = Vec::new();

        Self::find_obscuring_nodes(
            graph,
            source,
            source,
            &is_opaque,
            max_distance,
            &mut visited,
            &mut arcs,
            &mut obscurer_front,
            &mut opaque_order,
        );

        let visible = Self::find_visible_nodes(&mut arcs, &opaque_order, self.threshold);
        VisibilityResult { visible, arcs }
    }

    fn create_node_arc<G: Graph>(graph: &G, source: G::Node, target: G::Node) -> NodeArc {
        let source_point = graph.world_location(source);
        let target_point = graph.world_location(target);
        let alpha = angle_between(source_point, target_point);

        match graph.world_region(target) {
            Some(region) if !region.is_empty() => {
                let mut min_beta = 0.0_f64;
                let mut max_beta = 0.0_f64;
                let mut min_distance = f64::INFINITY;
                for vertex in &region {
                    let vertex_angle = angle_between(source_point, *vertex);
                    let beta = normalize_angle(vertex_angle - alpha);
                    min_beta = min_beta.min(beta);
                    max_beta = max_beta.max(beta);
                    min_distance = min_distance.min(source_point.distance(*vertex));
                }
                NodeArc::new(alpha + min_beta, max_beta - min_beta, min_distance)
            }
            _ => {
                let distance = source_point.distance(target_point);
                NodeArc::new(alpha - ONE_DEGREE / 2.0, ONE_DEGREE, distance)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn find_obscuring_nodes<G, P>(
        graph: &G,
        source: G::Node,
        current: G::Node,
        is_opaque: &P,
        max_distance: f64,
        visited: &mut HashSet<G::Node>,
        arcs: &mut HashMap<G::Node, NodeArc>,
        obscurer_front: &mut Vec<G::Node>,
        opaque_order: &mut Vec<G::Node>,
    ) where
        G: Graph,
        P: Fn(G::Node) -> bool,
    {
        for neighbour in graph.neighbours(current) {
            if visited.contains(&neighbour) {
                continue;
            }
            visited.insert(neighbour);

            let arc = Self::create_node_arc(graph, source, neighbour);
            // A node beyond max_distance is dropped from the result (not
            // recorded, never an obscurer), but the DFS still walks through
            // it: arc.distance is a straight-line distance from source, not
            // a graph distance, so it isn't monotone along the traversal —
            // closer nodes may only be reachable via a farther intermediate
            // one.
            if max_distance <= 0.0 || arc.distance <= max_distance {
                arcs.insert(neighbour, arc);

                if is_opaque(neighbour) {
                    opaque_order.push(neighbour);
                    let mut obscured_by_existing = false;
                    let mut covered_indices = Vec::new();
                    for (i, &obscurer_node) in obscurer_front.iter().enumerate() {
                        let obscurer_arc = arcs[&obscurer_node];
                        match arc.is_obscured(&obscurer_arc) {
                            -1 => obscured_by_existing = true,
                            1 => covered_indices.push(i),
                            _ => {}
                        }
                    }
                    for &i in covered_indices.iter().rev() {
                        let covered_node = obscurer_front.remove(i);
                        if let Some(a) = arcs.get_mut(&covered_node) {
                            a.visible_fraction = 0.0;
                        }
                    }
                    if obscured_by_existing {
                        if let Some(a) = arcs.get_mut(&neighbour) {
                            a.visible_fraction = 0.0;
                        }
                    } else {
                        obscurer_front.push(neighbour);
                    }
                }
            }

            Self::find_obscuring_nodes(
                graph,
                source,
                neighbour,
                is_opaque,
                max_distance,
                visited,
                arcs,
                obscurer_front,
                opaque_order,
            );
        }
    }

    /// Computes, and writes back into `arcs`, every visited node's
    /// surviving `visible_fraction` after clipping against closer
    /// obscurers — not just the handful Phase 1 already zeroed out — since
    /// `arcs` is the diagnostic/rendering output named in §4.8's Output and
    /// §6's external interfaces, not scratch state local to this function.
    fn find_visible_nodes<N: Copy + Eq + Hash>(
        arcs: &mut HashMap<N, NodeArc>,
        opaque_order: &[N],
        threshold: f64,
    ) -> HashSet<N> {
        let mut visible = HashSet::new();
        let nodes: Vec<N> = arcs.keys().copied().collect();

        for node in nodes {
            let arc = arcs[&node];
            if arc.visible_fraction == 0.0 {
                continue;
            }

            let mut obscurers: Vec<NodeArc> = opaque_order
                .iter()
                .filter(|&&o| o != node)
                .map(|&o| arcs[&o])
                .filter(|obscurer_arc| obscurer_arc.distance <= arc.distance)
                .collect();
            obscurers.sort_by(|a, b| a.distance.total_cmp(&b.distance));

            let mut working = arc;
            let mut fraction = 1.0;
            for obscurer_arc in &obscurers {
                working.obscure(obscurer_arc);
                fraction = if working.sweep <= 0.0 { 0.0 } else { working.sweep / arc.sweep };
                if fraction < threshold {
                    break;
                }
            }

            arcs.get_mut(&node).expect("node was just read from this map").visible_fraction = fraction;
            if fraction >= threshold {
                visible.insert(node);
            }
        }

        visible
    }
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::with_threshold(1.0 / 3.0)
    }
}
