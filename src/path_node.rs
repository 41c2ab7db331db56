// The A* search-tree record and the arena that owns it.
//
// A `PathNode` holds the node handle, `g`/`h`, a parent link, and a list of
// children shared by index rather than owned. The open set is a
// `BinaryHeap` rather than an intrusive linked list, so there is no `next`
// field here.
//
// Storage is a flat `Vec<PathNode<N>>` indexed by `usize`, the same choice
// `nav.rs`'s `NavGraph` makes for its nodes/edges: parent and child links are
// non-owning indices into this arena rather than `Rc`/`Weak` pointers, so the
// whole search tree is freed in one step when the arena is dropped at query
// end.

use std::collections::HashMap;
use std::hash::Hash;

/// One visited node in an A* search.
pub(crate) struct PathNode<N> {
    pub node: N,
    pub g: f64,
    pub h: f64,
    pub parent: Option<usize>,
    /// Every neighbour that has been linked from this node (parent-update
    /// propagation walks this list when a cheaper route is found). Indices
    /// into the owning arena.
    pub children: Vec<usize>,
}

impl<N> PathNode<N> {
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// A read-only view of a `PathNode`, the only form in which callers outside
/// this crate ever see one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathNodeView<N> {
    pub node: N,
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub parent: Option<N>,
}

/// Owns every `PathNode` created during a single query. Dropped (or cleared)
/// wholesale at query end.
pub(crate) struct PathArena<N> {
    nodes: Vec<PathNode<N>>,
    index: HashMap<N, usize>,
}

impl<N: Copy + Eq + Hash> PathArena<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a brand-new path node, returning its arena index.
    pub fn insert(&mut self, node: N, g: f64, h: f64, parent: Option<usize>) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(PathNode {
            node,
            g,
            h,
            parent,
            children: Vec::new(),
        });
        self.index.insert(node, idx);
        if let Some(parent_idx) = parent {
            self.nodes[parent_idx].children.push(idx);
        }
        idx
    }

    /// The arena index already assigned to `node`, if any.
    pub fn index_of(&self, node: N) -> Option<usize> {
        self.index.get(&node).copied()
    }

    pub fn get(&self, idx: usize) -> &PathNode<N> {
        &self.nodes[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut PathNode<N> {
        &mut self.nodes[idx]
    }

    /// Re-parent `idx` onto `new_parent`, updating both nodes' child lists.
    pub fn reparent(&mut self, idx: usize, new_parent: usize, new_g: f64) {
        if let Some(old_parent) = self.nodes[idx].parent {
            self.nodes[old_parent].children.retain(|&c| c != idx);
        }
        self.nodes[idx].parent = Some(new_parent);
        self.nodes[idx].g = new_g;
        self.nodes[new_parent].children.push(idx);
    }

    pub fn view(&self, idx: usize) -> PathNodeView<N> {
        let pn = &self.nodes[idx];
        PathNodeView {
            node: pn.node,
            g: pn.g,
            h: pn.h,
            f: pn.f(),
            parent: pn.parent.map(|p| self.nodes[p].node),
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_tracks_parent_child_links() {
        let mut arena: PathArena<u32> = PathArena::new();
        let root = arena.insert(0, 0.0, 5.0, None);
        let child = arena.insert(1, 2.0, 3.0, Some(root));
        assert_eq!(arena.get(root).children, vec![child]);
        assert_eq!(arena.get(child).parent, Some(root));
        assert_eq!(arena.get(child).f(), 5.0);
    }

    #[test]
    fn reparent_moves_child_list_entry() {
        let mut arena: PathArena<u32> = PathArena::new();
        let a = arena.insert(0, 0.0, 0.0, None);
        let b = arena.insert(1, 0.0, 0.0, None);
        let c = arena.insert(2, 5.0, 0.0, Some(a));
        assert_eq!(arena.get(a).children, vec![c]);

        arena.reparent(c, b, 1.0);
        assert!(arena.get(a).children.is_empty());
        assert_eq!(arena.get(b).children, vec![c]);
        assert_eq!(arena.get(c).g, 1.0);
    }

    #[test]
    fn index_of_finds_inserted_node() {
        let mut arena: PathArena<u32> = PathArena::new();
        let idx = arena.insert(42, 0.0, 0.0, None);
        assert_eq!(arena.index_of(42), Some(idx));
        assert_eq!(arena.index_of(99), None);
    }

    #[test]
    fn clear_resets_arena() {
        let mut arena: PathArena<u32> = PathArena::new();
        arena.insert(0, 0.0, 0.0, None);
        arena.clear();
        assert_eq!(arena.index_of(0), None);
    }
}
