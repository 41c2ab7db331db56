// Contiguous predicate-matching traversal: every node reachable from a
// source through an unbroken chain of neighbours that satisfy a caller
// predicate.

use crate::graph::Graph;
use std::collections::HashSet;
use std::hash::Hash;

/// Flood fill from a source node across nodes satisfying `matches`.
pub struct FloodFillEngine;

impl FloodFillEngine {
    pub fn new() -> Self {
        Self
    }

    /// All nodes reachable from `source` through a connected chain of
    /// `matches`-satisfying neighbours, excluding `source` itself.
    /// `source` is never itself tested against `matches` — it's only ever
    /// the traversal's starting point.
    ///
    /// An unrecognised `source` yields an empty result.
    pub fn fill<G, P>(&self, graph: &G, source: G::Node, matches: P) -> HashSet<G::Node>
    where
        G: Graph,
        G::Node: Hash,
        P: Fn(G::Node) -> bool,
    {
        let mut result = HashSet::new();
        if !graph.contains(source) {
            return result;
        }

        let mut visited: HashSet<G::Node> = HashSet::new();
        visited.insert(source);
        let mut stack = vec![source];

        while let Some(node) = stack.pop() {
            for neighbour in graph.neighbours(node) {
                if visited.contains(&neighbour) {
                    continue;
                }
                visited.insert(neighbour);
                if matches(neighbour) {
                    result.insert(neighbour);
                    stack.push(neighbour);
                }
            }
        }

        result
    }
}

impl Default for FloodFillEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SquareGrid;

    #[test]
    fn fills_connected_region_matching_predicate() {
        let grid = SquareGrid::new(5, 5);
        let engine = FloodFillEngine::new();
        // Everything matches: the whole grid (minus source) is reachable.
        let result = engine.fill(&grid, (2, 2), |_n| true);
        assert_eq!(result.len(), 24);
        assert!(!result.contains(&(2, 2)));
    }

    #[test]
    fn checkerboard_parity_is_disconnected_on_four_connected_grid() {
        let grid = SquareGrid::new(5, 5);
        let engine = FloodFillEngine::new();
        let result = engine.fill(&grid, (0, 0), |n| (n.0 + n.1) % 2 == 0);
        // Every 4-neighbour of an even-parity cell is odd-parity, so the
        // fill can never step onto another matching cell.
        assert!(result.is_empty());
    }

    #[test]
    fn stops_at_non_matching_boundary() {
        let grid = SquareGrid::new(5, 1);
        let engine = FloodFillEngine::new();
        // Only cells with x <= 2 match; fill from (0, 0) should reach
        // (1, 0) and (2, 0) but not (3, 0) or (4, 0).
        let result = engine.fill(&grid, (0, 0), |n| n.0 <= 2);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&(1, 0)));
        assert!(result.contains(&(2, 0)));
        assert!(!result.contains(&(3, 0)));
    }

    #[test]
    fn unrecognised_source_is_empty() {
        let grid = SquareGrid::new(3, 3);
        let engine = FloodFillEngine::new();
        let result = engine.fill(&grid, (50, 50), |_n| true);
        assert!(result.is_empty());
    }
}
