// The abstract graph façade every engine in this crate is parameterised
// over.
//
// A `Graph` is a set of nodes, each occupying a point (and optionally a
// polygonal region) in the 2D world, connected by a neighbour relation of
// bounded fan-out (`connectivity`). The façade is the sole authority on node
// validity: an engine never constructs a `Node` value itself, it only ever
// receives one from a caller or from `Graph::neighbours`/`Graph::nodes`.
//
// Implementations may be a regular polygon grid (hex or square — see
// `grid.rs` for a minimal worked example), an irregular planar subdivision
// (Delaunay triangulation, Voronoi diagram), or anything else satisfying the
// invariants below.
//
// **Purity.** Engines call these methods any number of times per query and
// assume no observable side effects — implementations backed by mutable
// caches must make that caching invisible to callers.

use crate::geometry::{Region, WorldPoint};
use std::hash::Hash;

/// The abstract 2D graph façade every engine in this crate is parameterised
/// over.
///
/// # Invariants
/// - `neighbours(n).len() <= connectivity()`; `connectivity() >= 1`.
/// - `distance(a, b) == 0.0` iff `a == b`; positive for distinct valid
///   nodes; symmetric; respects the triangle inequality.
/// - `distance` never exceeds `Agent::step_cost` for neighbouring nodes —
///   this is what makes `distance` an admissible A* heuristic.
pub trait Graph {
    /// The opaque node handle. Two handles denoting the same node must
    /// compare equal and hash equal.
    type Node: Copy + Eq + Hash;

    /// Maximum neighbour count of any node in this graph.
    fn connectivity(&self) -> usize;

    /// Total number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// All nodes in the graph, in implementation-defined order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// Whether `n` is a structurally valid node handle for this graph.
    fn contains(&self, n: Self::Node) -> bool;

    /// The graph distance between two nodes. Used both as a tiebreak input
    /// and, critically, as the A* heuristic — callers rely on it being
    /// admissible (never exceeding the true step cost between neighbours).
    fn distance(&self, a: Self::Node, b: Self::Node) -> f64;

    /// Up to `connectivity()` neighbours of `n`.
    fn neighbours(&self, n: Self::Node) -> Vec<Self::Node>;

    /// The world-space location of a node's centre.
    fn world_location(&self, n: Self::Node) -> WorldPoint;

    /// The polygonal region a node occupies, if the graph tracks regions.
    /// `None` means the visibility engine should fall back to a point
    /// surrogate for this node.
    fn world_region(&self, n: Self::Node) -> Option<Region>;

    /// The node whose world location is closest to `p`, or `None` if the
    /// graph has no nodes. Not used by the four algorithms themselves —
    /// provided for callers (e.g. to snap a click or an agent's position
    /// onto the graph).
    fn nearest_node(&self, p: WorldPoint) -> Option<Self::Node>;
}
