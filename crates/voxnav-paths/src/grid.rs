//! Sparse 3D grid of navigation nodes.

use std::collections::HashMap;

use voxnav_core::{Node, Point3};

use crate::traits::{Pather, WeightedPather};

/// Default spacing between lattice positions.
pub const DEFAULT_STEP: i32 = 4;

/// A sparse mapping from lattice positions to [`Node`]s.
///
/// At most one node lives at each position; adding a node at an occupied
/// position replaces the old one. Lookups are exact: no snapping to the
/// grid step is performed.
#[derive(Debug, Clone)]
pub struct NavGrid<P = ()> {
    nodes: HashMap<Point3, Node<P>>,
    step: i32,
}

impl<P> Default for NavGrid<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> NavGrid<P> {
    /// Create an empty grid with [`DEFAULT_STEP`].
    pub fn new() -> Self {
        Self::with_step(DEFAULT_STEP)
    }

    /// Create an empty grid whose neighbors are `step` units apart.
    /// Steps below 1 are raised to 1.
    pub fn with_step(step: i32) -> Self {
        Self {
            nodes: HashMap::new(),
            step: step.max(1),
        }
    }

    /// Spacing between neighboring positions.
    #[inline]
    pub fn step(&self) -> i32 {
        self.step
    }

    /// Insert `node` at its position, returning the node it replaced.
    pub fn add_node(&mut self, node: Node<P>) -> Option<Node<P>> {
        self.nodes.insert(node.position(), node)
    }

    /// Remove and return the node at `p`.
    pub fn remove(&mut self, p: Point3) -> Option<Node<P>> {
        self.nodes.remove(&p)
    }

    /// The node at exactly `p`, if any.
    #[inline]
    pub fn node(&self, p: Point3) -> Option<&Node<P>> {
        self.nodes.get(&p)
    }

    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        self.nodes.contains_key(&p)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes sorted by position.
    pub fn iter(&self) -> impl Iterator<Item = &Node<P>> {
        let mut nodes: Vec<&Node<P>> = self.nodes.values().collect();
        nodes.sort_by_key(|n| n.position());
        nodes.into_iter()
    }

    /// Smallest box `(min, max)` containing every node, both corners
    /// inclusive. `None` for an empty grid.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut keys = self.nodes.keys().copied();
        let first = keys.next()?;
        Some(keys.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// The twelve candidate neighbor offsets.
    ///
    /// Each lateral direction `(Δx, Δz)` of `(0, S)`, `(S, 0)`, `(−S, 0)`,
    /// `(0, −S)` is combined with `Δy` of `−S`, `0`, `S`, in that order.
    /// Diagonal and same-column moves are not neighbors.
    pub fn neighbor_offsets(&self) -> [Point3; 12] {
        let s = self.step;
        let lateral = [(0, s), (s, 0), (-s, 0), (0, -s)];
        let mut out = [Point3::ZERO; 12];
        let mut i = 0;
        for (dx, dz) in lateral {
            for dy in [-s, 0, s] {
                out[i] = Point3::new(dx, dy, dz);
                i += 1;
            }
        }
        out
    }

    /// Append the positions of occupied neighbors of `p` into `buf`, in
    /// [`neighbor_offsets`](Self::neighbor_offsets) order.
    /// Offsets that would leave the `i32` range are skipped.
    pub fn neighbors_into(&self, p: Point3, buf: &mut Vec<Point3>) {
        for d in self.neighbor_offsets() {
            let Some(n) = p.checked_add(d) else {
                continue;
            };
            if self.nodes.contains_key(&n) {
                buf.push(n);
            }
        }
    }

    /// Occupied neighbors of `node`, in
    /// [`neighbor_offsets`](Self::neighbor_offsets) order.
    pub fn neighbors(&self, node: &Node<P>) -> Vec<&Node<P>> {
        self.neighbor_offsets()
            .into_iter()
            .filter_map(|d| node.position().checked_add(d))
            .filter_map(|n| self.nodes.get(&n))
            .collect()
    }
}

impl<P> Pather for NavGrid<P> {
    fn neighbors(&self, p: Point3, buf: &mut Vec<Point3>) {
        self.neighbors_into(p, buf);
    }
}

impl<P> WeightedPather for NavGrid<P> {
    fn entry_cost(&self, p: Point3) -> f64 {
        // Neighbor enumeration only yields occupied positions.
        self.nodes.get(&p).map_or(f64::INFINITY, Node::cost)
    }
}

impl<P> Extend<Node<P>> for NavGrid<P> {
    fn extend<I: IntoIterator<Item = Node<P>>>(&mut self, iter: I) {
        for node in iter {
            self.add_node(node);
        }
    }
}

impl<P> FromIterator<Node<P>> for NavGrid<P> {
    fn from_iter<I: IntoIterator<Item = Node<P>>>(iter: I) -> Self {
        let mut grid = Self::new();
        grid.extend(iter);
        grid
    }
}
