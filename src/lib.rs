// pathing_core — 2D graph algorithms over an abstract polygonal graph.
//
// Given any graph whose nodes occupy points (and optionally polygonal
// regions) in a 2D world, this crate answers four spatial queries for a
// mobile agent traversing it:
//
// - Shortest-path search between two nodes (A*).
// - Reachability enumeration within a movement budget (cost-bounded
//   coverage).
// - Flood fill across nodes matching a predicate.
// - Line-of-sight / visibility from a viewpoint, accounting for opaque
//   occluders.
//
// All four are parameterised over the `Graph` and `Agent` traits, so the
// same algorithms serve a hex grid, a square grid, or an irregular planar
// subdivision (Delaunay triangulation, Voronoi diagram) without
// modification.
//
// Module overview:
// - `geometry.rs`:    World points, polygonal regions, angle arithmetic.
// - `graph.rs`:       The `Graph` trait every engine is parameterised over.
// - `agent.rs`:       The `Agent` trait: per-traversal predicates and costs.
// - `path_node.rs`:   The A* search-tree record and its owning arena.
// - `astar.rs`:       A* engine.
// - `coverage.rs`:    Cost-bounded reachability enumeration.
// - `flood_fill.rs`:  Predicate-driven contiguous fill.
// - `node_arc.rs`:    Angular arc descriptor and arc-vs-arc occlusion.
// - `visibility.rs`:  Line-of-sight engine built on `node_arc`.
// - `grid.rs`:        A concrete `SquareGrid` `Graph`, used by this crate's
//                      own tests and exported as a worked example.
//
// **No shared mutable state.** Every engine here is a plain value type that
// owns its own scratch buffers; nothing is global, nothing is `unsafe`.
// Concurrent queries need separate engine instances — see each engine's own
// docs for its statefulness.

pub mod agent;
pub mod astar;
pub mod coverage;
pub mod flood_fill;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod node_arc;
pub mod path_node;
pub mod visibility;

pub use agent::Agent;
pub use astar::{AStarEngine, AStarOptions, AStarResult};
pub use coverage::{CoverageEngine, CoverageResult};
pub use flood_fill::FloodFillEngine;
pub use geometry::{Region, WorldPoint};
pub use graph::Graph;
pub use grid::SquareGrid;
pub use node_arc::NodeArc;
pub use path_node::PathNodeView;
pub use visibility::{VisibilityEngine, VisibilityResult};
