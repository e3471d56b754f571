use voxnav_core::{Node, Point3};

use crate::NavGrid;
use crate::cancel::CancelToken;
use crate::config::SearchConfig;
use crate::dijkstra::best_first;
use crate::distance::horizontal_manhattan;
use crate::traits::WeightedPather;
use crate::traversal::WeightedTraversal;

/// Compute a least-cost route from `origin` to `goal` using A*.
///
/// Frontier priority is the accumulated cost plus
/// `horizontal_manhattan(p, goal) * config.heuristic_weight`. The estimate
/// ignores vertical displacement. Optimality holds only while the estimate
/// is admissible, see [`SearchConfig::heuristic_weight`].
pub fn astar<G: WeightedPather>(
    pather: &G,
    origin: Point3,
    goal: Point3,
    config: &SearchConfig,
    cancel: Option<&CancelToken>,
) -> WeightedTraversal {
    let weight = config.heuristic_weight;
    best_first(pather, origin, goal, config, cancel, "astar", |p| {
        horizontal_manhattan(p, goal) as f64 * weight
    })
}

impl<P> NavGrid<P> {
    /// A* search between two nodes of this grid with the default
    /// [`SearchConfig`].
    pub fn astar_search(&self, origin: &Node<P>, goal: &Node<P>) -> WeightedTraversal {
        self.astar_search_with(origin, goal, &SearchConfig::default(), None)
    }

    /// A* search with an explicit config and optional cancellation.
    pub fn astar_search_with(
        &self,
        origin: &Node<P>,
        goal: &Node<P>,
        config: &SearchConfig,
        cancel: Option<&CancelToken>,
    ) -> WeightedTraversal {
        astar(self, origin.position(), goal.position(), config, cancel)
    }
}
