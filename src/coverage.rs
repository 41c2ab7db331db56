// Cost-bounded reachability enumeration: every node an agent can reach from
// a source without exceeding a movement budget, each tagged with the
// minimum cost that proved it reachable.
//
// Expansion is iterative (an explicit work stack) rather than the
// recursive formulation a description of this algorithm tends to use —
// same visitation order, no risk of blowing the call stack on a large
// open area, matching the iterative-over-recursive preference
// `pathfinding.rs` shows throughout.

use crate::agent::Agent;
use crate::graph::Graph;
use std::collections::HashMap;
use std::hash::Hash;

/// A completed coverage query: every node reached, and the minimum cost
/// that proved it reachable.
#[derive(Clone, Debug, Default)]
pub struct CoverageResult<N> {
    costs: HashMap<N, f64>,
}

impl<N: Copy + Eq + Hash> CoverageResult<N> {
    /// All reachable nodes, in implementation-defined order.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.costs.keys().copied()
    }

    pub fn contains(&self, n: N) -> bool {
        self.costs.contains_key(&n)
    }

    /// The minimum cost that proved `n` reachable, if it was reached.
    pub fn cost_of(&self, n: N) -> Option<f64> {
        self.costs.get(&n).copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Enumerates nodes reachable within a cost budget.
pub struct CoverageEngine<N> {
    path_costs: HashMap<N, f64>,
}

impl<N: Copy + Eq + Hash> CoverageEngine<N> {
    pub fn new() -> Self {
        Self {
            path_costs: HashMap::new(),
        }
    }

    /// Explore outward from `source` up to `max_cost`. `max_cost` must be
    /// positive — a precondition, not a data condition, and violating it
    /// panics. An unrecognised `source` yields an empty result.
    pub fn explore<G, A>(&mut self, graph: &G, agent: &A, source: N, max_cost: f64) -> CoverageResult<N>
    where
        G: Graph<Node = N>,
        A: Agent<N>,
    {
        assert!(max_cost > 0.0, "max_cost must be positive, got {max_cost}");

        self.path_costs.clear();
        if !graph.contains(source) {
            return CoverageResult::default();
        }

        // Sentinel: source has been "visited" at a cost no real step can
        // beat, so it's never re-added and never overwritten.
        self.path_costs.insert(source, -1.0);

        let relaxed = agent.relaxed_range();
        let mut stack = vec![(source, 0.0_f64)];
        let mut result = HashMap::new();

        while let Some((node, cumulative_cost)) = stack.pop() {
            for neighbour in graph.neighbours(node) {
                if let Some(&existing) = self.path_costs.get(&neighbour) {
                    if existing <= cumulative_cost {
                        continue;
                    }
                }
                if !agent.can_make_step(node, neighbour) {
                    continue;
                }
                let step = agent.step_cost(node, neighbour);
                debug_assert!(step > 0.0, "Agent::step_cost must be positive");

                let tentative_cost = cumulative_cost + step;
                if !relaxed && tentative_cost > max_cost {
                    continue;
                }
                if let Some(&existing) = self.path_costs.get(&neighbour) {
                    if existing <= tentative_cost {
                        continue;
                    }
                }

                if !self.path_costs.contains_key(&neighbour) && agent.can_occupy(neighbour) {
                    result.insert(neighbour, tentative_cost);
                }
                self.path_costs.insert(neighbour, tentative_cost);

                if tentative_cost < max_cost {
                    stack.push((neighbour, tentative_cost));
                }
            }
        }

        CoverageResult { costs: result }
    }
}

impl<N: Copy + Eq + Hash> Default for CoverageEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SquareGrid;

    struct UniformAgent {
        relaxed: bool,
    }
    impl Agent<(i32, i32)> for UniformAgent {
        fn relaxed_range(&self) -> bool {
            self.relaxed
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
    fn budget_two_reaches_manhattan_ring() {
        let grid = SquareGrid::new(5, 5);
        let mut engine = CoverageEngine::new();
        let result = engine.explore(&grid, &UniformAgent { relaxed: false }, (2, 2), 2.0);

        let expected: Vec<(i32, i32)> = vec![
            (1, 2),
            (3, 2),
            (2, 1),
            (2, 3),
            (0, 2),
            (4, 2),
            (2, 0),
            (2, 4),
            (1, 1),
            (1, 3),
            (3, 1),
            (3, 3),
        ];
        assert_eq!(result.len(), expected.len());
        for n in expected {
            assert!(result.contains(n), "expected {n:?} in coverage result");
        }
        assert!(!result.contains((2, 2)));
    }

    #[test]
    fn tiny_budget_without_relaxed_range_is_empty() {
        let grid = SquareGrid::new(5, 5);
        let mut engine = CoverageEngine::new();
        let result = engine.explore(&grid, &UniformAgent { relaxed: false }, (2, 2), 0.5);
        assert!(result.is_empty());
    }

    #[test]
    fn tiny_budget_with_relaxed_range_admits_immediate_neighbours() {
        let grid = SquareGrid::new(5, 5);
        let mut engine = CoverageEngine::new();
        let result = engine.explore(&grid, &UniformAgent { relaxed: true }, (2, 2), 0.5);
        assert_eq!(result.len(), 4);
        assert!(result.contains((1, 2)));
        assert!(result.contains((3, 2)));
        assert!(result.contains((2, 1)));
        assert!(result.contains((2, 3)));
    }

    #[test]
    #[should_panic(expected = "max_cost")]
    fn non_positive_max_cost_panics() {
        let grid = SquareGrid::new(3, 3);
        let mut engine = CoverageEngine::new();
        let _ = engine.explore(&grid, &UniformAgent { relaxed: false }, (1, 1), 0.0);
    }

    #[test]
    fn unrecognised_source_is_empty() {
        let grid = SquareGrid::new(3, 3);
        let mut engine = CoverageEngine::new();
        let result = engine.explore(&grid, &UniformAgent { relaxed: false }, (50, 50), 2.0);
        assert!(result.is_empty());
    }
}
