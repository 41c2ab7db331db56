// A minimal concrete `Graph`: a 4-connected unit-step square grid with each
// cell's world region a 1x1 square centred on integer coordinates. Used by
// this crate's own tests and doctests, and exported as a worked example of
// implementing the `Graph` trait — the grid `world.rs`'s dense flat-indexed
// voxel storage is adapted from here, minus the third dimension and voxel
// typing, since this crate has no notion of voxel contents.

use crate::geometry::{Region, WorldPoint};
use crate::graph::Graph;

/// A bounded, 4-connected square grid. Node handles are `(x, y)` cell
/// coordinates with `0 <= x < width` and `0 <= y < height`.
#[derive(Clone, Copy, Debug)]
pub struct SquareGrid {
    width: i32,
    height: i32,
}

impl SquareGrid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Graph for SquareGrid {
    type Node = (i32, i32);

    fn connectivity(&self) -> usize {
        4
    }

    fn node_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    fn nodes(&self) -> Vec<Self::Node> {
        let mut all = Vec::with_capacity(self.node_count());
        for y in 0..self.height {
            for x in 0..self.width {
                all.push((x, y));
            }
        }
        all
    }

    fn contains(&self, n: Self::Node) -> bool {
        n.0 >= 0 && n.0 < self.width && n.1 >= 0 && n.1 < self.height
    }

    fn distance(&self, a: Self::Node, b: Self::Node) -> f64 {
        // Chebyshev: admissible against a 4-connected unit step cost, since
        // it never exceeds the Manhattan distance those steps accumulate.
        ((a.0 - b.0).abs().max((a.1 - b.1).abs())) as f64
    }

    fn neighbours(&self, n: Self::Node) -> Vec<Self::Node> {
        let (x, y) = n;
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .into_iter()
            .filter(|&c| self.contains(c))
            .collect()
    }

    fn world_location(&self, n: Self::Node) -> WorldPoint {
        WorldPoint::new(n.0 as f64, n.1 as f64)
    }

    fn world_region(&self, n: Self::Node) -> Option<Region> {
        let (x, y) = (n.0 as f64, n.1 as f64);
        Some(vec![
            WorldPoint::new(x - 0.5, y - 0.5),
            WorldPoint::new(x + 0.5, y - 0.5),
            WorldPoint::new(x + 0.5, y + 0.5),
            WorldPoint::new(x - 0.5, y + 0.5),
        ])
    }

    fn nearest_node(&self, p: WorldPoint) -> Option<Self::Node> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        let x = (p.x.round() as i32).clamp(0, self.width - 1);
        let y = (p.y.round() as i32).clamp(0, self.height - 1);
        Some((x, y))
    }
}
