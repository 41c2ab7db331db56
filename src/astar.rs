// Best-path search, its parent-update propagation, and truncated-range
// retrieval.
//
// The open set is a `BinaryHeap` keyed by `f` (reversed into a min-heap),
// with an optional secondary key of squared world distance to the target
// and a final tiebreak on insertion sequence — the same three-level
// tiebreak idiom `pathfinding.rs`'s `OpenEntry` uses for its own `f_score`
// plus node-id tiebreak, generalised to the sequence counter `event.rs`
// uses for deterministic same-tick ordering. Stale heap entries (pushed
// before a node's `g` improved) are discarded lazily on pop by checking the
// closed set, exactly as `pathfinding.rs::astar` does with `closed[ci]`.
//
// **Deliberate asymmetry, not a bug:** when an already-*closed* node is
// reached via a cheaper route, its `g`/`parent` are corrected and the
// improvement is propagated to its existing search-tree children, but the
// node itself is not reopened for neighbour re-expansion.

use crate::agent::Agent;
use crate::graph::Graph;
use crate::path_node::{PathArena, PathNodeView};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::hash::Hash;

/// Tunable parameters for an [`AStarEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AStarOptions {
    /// `0.0` means unrestricted search. Otherwise must be `>= 1.0`: the
    /// search radius is `relative_limit * distance(source, target)`, an
    /// ellipse with source and target as foci.
    pub relative_limit: f64,
    /// Break equal-`f` ties by preferring the child closer to the target in
    /// world-space squared distance.
    pub use_world_distance: bool,
}

impl Default for AStarOptions {
    fn default() -> Self {
        Self {
            relative_limit: 0.0,
            use_world_distance: false,
        }
    }
}

/// The outcome of a successful [`AStarEngine::search`]: a non-empty ordered
/// path from source to the accepted end node plus the full per-node detail
/// needed for truncated-range retrieval.
#[derive(Clone, Debug)]
pub struct AStarResult<N> {
    path: Vec<PathNodeView<N>>,
    total_cost: f64,
}

impl<N: Copy + Eq> AStarResult<N> {
    /// The path from source to the accepted end node, inclusive.
    pub fn nodes(&self) -> Vec<N> {
        self.path.iter().map(|v| v.node).collect()
    }

    /// Total cost of the returned path (sum of step costs).
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// The accepted end node — not necessarily the literal target, since
    /// `Agent::is_near_target` may accept a node merely close to it.
    pub fn best_node(&self) -> N {
        self.path.last().expect("AStarResult path is never empty").node
    }

    /// Full per-node detail of the accepted end node.
    pub fn best_path_node(&self) -> PathNodeView<N> {
        *self.path.last().expect("AStarResult path is never empty")
    }

    /// Walk backwards from the accepted end node toward the source, along
    /// the path just found, and return the last node satisfying both:
    /// - `node.g <= max_cost` (or, if `agent.relaxed_range()`,
    ///   `parent.g < max_cost`), and
    /// - `agent.can_occupy(node)`.
    ///
    /// Returns the source node's path-node view if none qualifies.
    /// `max_cost` must be positive — this is a precondition, not a data
    /// condition, and violating it panics.
    pub fn get_last_path_node<A: Agent<N>>(&self, agent: &A, max_cost: f64) -> PathNodeView<N> {
        assert!(max_cost > 0.0, "max_cost must be positive, got {max_cost}");
        let relaxed = agent.relaxed_range();
        for i in (0..self.path.len()).rev() {
            let entry = self.path[i];
            let budget_ok = if relaxed {
                i == 0 || self.path[i - 1].g < max_cost
            } else {
                entry.g <= max_cost
            };
            if budget_ok && agent.can_occupy(entry.node) {
                return entry;
            }
        }
        self.path[0]
    }

    /// Like [`Self::get_last_path_node`] but returns only the node handle.
    pub fn get_last_node<A: Agent<N>>(&self, agent: &A, max_cost: f64) -> N {
        self.get_last_path_node(agent, max_cost).node
    }
}

/// An entry in the A* open set.
struct OpenEntry {
    idx: usize,
    f: f64,
    world_dist_sq: f64,
    use_world_distance: bool,
    sequence: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f.total_cmp(&other.f) == Ordering::Equal
            && self.world_dist_sq.total_cmp(&other.world_dist_sq) == Ordering::Equal
            && self.sequence == other.sequence
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed throughout: `BinaryHeap` is a max-heap, and we want the
        // smallest `f` (then smallest world distance, then earliest
        // insertion sequence) to be popped first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| {
                if self.use_world_distance {
                    other.world_dist_sq.total_cmp(&self.world_dist_sq)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A* engine. Stateful: each `search` reuses and then clears the engine's
/// internal arena, so concurrent queries need separate instances.
pub struct AStarEngine<N> {
    arena: PathArena<N>,
    options: AStarOptions,
}

impl<N: Copy + Eq + Hash> AStarEngine<N> {
    pub fn new() -> Self {
        Self::with_options(AStarOptions::default())
    }

    pub fn with_options(options: AStarOptions) -> Self {
        assert!(
            options.relative_limit == 0.0 || options.relative_limit >= 1.0,
            "relative_limit must be 0 or >= 1, got {}",
            options.relative_limit
        );
        Self {
            arena: PathArena::new(),
            options,
        }
    }

    /// Search for a path from `source` to `target`. Returns `None` if
    /// either endpoint is not a valid node in `graph` (structural
    /// invalidity) or if the open set empties without finding an acceptable
    /// end node (legitimate no-result).
    pub fn search<G, A>(&mut self, graph: &G, agent: &A, source: N, target: N) -> Option<AStarResult<N>>
    where
        G: Graph<Node = N>,
        A: Agent<N>,
    {
        self.arena.clear();

        if !graph.contains(source) || !graph.contains(target) {
            return None;
        }

        let limited = self.options.relative_limit > 0.0;
        let absolute_limit = if limited {
            self.options.relative_limit * graph.distance(source, target)
        } else {
            0.0
        };
        let use_world_distance = self.options.use_world_distance;

        let mut sequence: u64 = 0;
        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut closed: HashSet<usize> = HashSet::new();

        let h0 = graph.distance(source, target);
        let source_idx = self.arena.insert(source, 0.0, h0, None);
        Self::push_open(
            &mut open,
            &self.arena,
            source_idx,
            graph,
            target,
            use_world_distance,
            &mut sequence,
        );

        let result_idx = loop {
            let entry = match open.pop() {
                Some(e) => e,
                None => {
                    self.arena.clear();
                    return None;
                }
            };
            if closed.contains(&entry.idx) {
                continue;
            }
            closed.insert(entry.idx);

            let (best_node, best_g, best_h) = {
                let pn = self.arena.get(entry.idx);
                (pn.node, pn.g, pn.h)
            };

            if agent.is_near_target(best_node, target, best_h)
                && (best_node == source || agent.can_occupy(best_node))
            {
                break entry.idx;
            }

            for neighbour in graph.neighbours(best_node) {
                if !agent.can_make_step(best_node, neighbour) {
                    continue;
                }
                let tentative_g = best_g + agent.step_cost(best_node, neighbour);

                if let Some(existing_idx) = self.arena.index_of(neighbour) {
                    let existing_g = self.arena.get(existing_idx).g;
                    if tentative_g < existing_g {
                        self.arena.reparent(existing_idx, entry.idx, tentative_g);
                        if closed.contains(&existing_idx) {
                            Self::propagate_cost_reduction(&mut self.arena, existing_idx, agent);
                        } else {
                            Self::push_open(
                                &mut open,
                                &self.arena,
                                existing_idx,
                                graph,
                                target,
                                use_world_distance,
                                &mut sequence,
                            );
                        }
                    }
                } else {
                    if limited {
                        let via = graph.distance(source, neighbour) + graph.distance(neighbour, target);
                        if via > absolute_limit {
                            continue;
                        }
                    }
                    let h = graph.distance(neighbour, target);
                    let new_idx = self.arena.insert(neighbour, tentative_g, h, Some(entry.idx));
                    Self::push_open(
                        &mut open,
                        &self.arena,
                        new_idx,
                        graph,
                        target,
                        use_world_distance,
                        &mut sequence,
                    );
                }
            }
        };

        let mut chain = Vec::new();
        let mut cursor = Some(result_idx);
        while let Some(i) = cursor {
            chain.push(self.arena.view(i));
            cursor = self.arena.get(i).parent;
        }
        chain.reverse();
        let total_cost = chain.last().map(|v| v.g).unwrap_or(0.0);

        self.arena.clear();
        Some(AStarResult {
            path: chain,
            total_cost,
        })
    }

    fn push_open<G: Graph<Node = N>>(
        open: &mut BinaryHeap<OpenEntry>,
        arena: &PathArena<N>,
        idx: usize,
        graph: &G,
        target: N,
        use_world_distance: bool,
        sequence: &mut u64,
    ) {
        let pn = arena.get(idx);
        let world_dist_sq = if use_world_distance {
            graph
                .world_location(pn.node)
                .distance_squared(graph.world_location(target))
        } else {
            0.0
        };
        *sequence += 1;
        open.push(OpenEntry {
            idx,
            f: pn.f(),
            world_dist_sq,
            use_world_distance,
            sequence: *sequence,
        });
    }

    /// Cascade an improved `g` down through a node's existing search-tree
    /// children (LIFO work stack).
    fn propagate_cost_reduction<A: Agent<N>>(arena: &mut PathArena<N>, seed: usize, agent: &A) {
        let mut stack = vec![seed];
        while let Some(parent_idx) = stack.pop() {
            let parent_node = arena.get(parent_idx).node;
            let parent_g = arena.get(parent_idx).g;
            let children = arena.get(parent_idx).children.clone();
            for child_idx in children {
                let child_node = arena.get(child_idx).node;
                let new_g = parent_g + agent.step_cost(parent_node, child_node);
                if new_g < arena.get(child_idx).g {
                    arena.get_mut(child_idx).g = new_g;
                    stack.push(child_idx);
                }
            }
        }
    }
}

impl<N: Copy + Eq + Hash> Default for AStarEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SquareGrid;

    struct UniformAgent;
    impl Agent<(i32, i32)> for UniformAgent {
        fn relaxed_range(&self) -> bool {
            false
        }
        fn can_make_step(&self, _a: (i32, i32), _b: (i32, i32)) -> bool {
            true
        }
        fn can_occupy(&self, _n: (i32, i32)) -> bool {
            true
        }
        fn step_cost(&self, _a: (i32, i32), _b: (i32, i32)) -> f64 {
            1.0
        }
    }

    #[test]
    fn search_source_equals_target() {
        let grid = SquareGrid::new(3, 3);
        let mut engine = AStarEngine::new();
        let result = engine
            .search(&grid, &UniformAgent, (1, 1), (1, 1))
            .expect("trivial path should succeed");
        assert_eq!(result.nodes(), vec![(1, 1)]);
        assert_eq!(result.total_cost(), 0.0);
    }

    #[test]
    fn search_simple_chain() {
        let grid = SquareGrid::new(5, 1);
        let mut engine = AStarEngine::new();
        let result = engine
            .search(&grid, &UniformAgent, (0, 0), (4, 0))
            .expect("chain should be reachable");
        assert_eq!(result.nodes(), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(result.total_cost(), 4.0);
    }

    #[test]
    fn search_invalid_endpoint_is_clean_failure() {
        let grid = SquareGrid::new(3, 3);
        let mut engine = AStarEngine::new();
        let result = engine.search(&grid, &UniformAgent, (1, 1), (50, 50));
        assert!(result.is_none());
    }

    #[test]
    #[should_panic(expected = "relative_limit")]
    fn relative_limit_between_zero_and_one_panics() {
        let _ = AStarEngine::<(i32, i32)>::with_options(AStarOptions {
            relative_limit: 0.5,
            use_world_distance: false,
        });
    }

    #[test]
    fn get_last_node_without_relaxed_range_stops_at_budget() {
        let grid = SquareGrid::new(5, 1);
        let mut engine = AStarEngine::new();
        let result = engine.search(&grid, &UniformAgent, (0, 0), (4, 0)).unwrap();
        // Budget of 2 should stop exactly at (2, 0): g=2 <= 2.
        let last = result.get_last_node(&UniformAgent, 2.0);
        assert_eq!(last, (2, 0));
    }

    #[test]
    fn get_last_node_relaxed_range_overshoots_by_one_step() {
        struct RelaxedAgent;
        impl Agent<(i32, i32)> for RelaxedAgent {
            fn relaxed_range(&self) -> bool {
                true
            }
            fn can_make_step(&self, _a: (i32, i32), _b: (i32, i32)) -> bool {
                true
            }
            fn can_occupy(&self, _n: (i32, i32)) -> bool {
                true
            }
            fn step_cost(&self, _a: (i32, i32), _b: (i32, i32)) -> f64 {
                1.0
            }
        }

        let grid = SquareGrid::new(5, 1);
        let mut engine = AStarEngine::new();
        let result = engine.search(&grid, &RelaxedAgent, (0, 0), (4, 0)).unwrap();
        // Budget 2.5: predecessor (2,0) has g=2 < 2.5, so (3,0) (g=3) still
        // qualifies as the final overshooting step.
        let last = result.get_last_node(&RelaxedAgent, 2.5);
        assert_eq!(last, (3, 0));
    }
}
