use gridwalk_core::{Point, Range};

/// Parent sentinel for nodes reached by no predecessor.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-cell traversal record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) opened: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            parent: NO_PARENT,
            generation: 0,
            opened: false,
            closed: false,
        }
    }
}

/// Node records for one grid, lazily invalidated per search.
///
/// A record stamped with an older generation reads as cleared, so starting
/// a search costs a counter bump instead of a sweep over every cell.
#[derive(Debug, Default)]
pub(crate) struct NodeTable {
    nodes: Vec<Node>,
    generation: u32,
}

impl NodeTable {
    /// Start a new search over `len` nodes.
    pub(crate) fn begin(&mut self, len: usize) {
        if self.nodes.len() < len {
            self.nodes.resize(len, Node::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Counter wrapped: stale stamps could alias the new generation.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
    }

    /// The record for `idx` as seen by the current search.
    pub(crate) fn get(&self, idx: usize) -> Node {
        let n = self.nodes[idx];
        if n.generation == self.generation {
            n
        } else {
            Node::default()
        }
    }

    /// Mutable access to the record for `idx`, clearing it first if stale.
    pub(crate) fn get_mut(&mut self, idx: usize) -> &mut Node {
        let generation = self.generation;
        let n = &mut self.nodes[idx];
        if n.generation != generation {
            *n = Node {
                generation,
                ..Node::default()
            };
        }
        n
    }

    /// Walk parent links from `goal` back to the root and return the
    /// positions in start-to-goal order.
    pub(crate) fn backtrace(&self, goal: usize, rng: Range) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            path.push(rng.point_at(ci));
            ci = self.get(ci).parent;
        }
        path.reverse();
        path
    }
}
