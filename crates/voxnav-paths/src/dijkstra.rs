use log::{debug, trace};
use voxnav_core::{Node, Point3};

use crate::NavGrid;
use crate::cancel::CancelToken;
use crate::config::{Relaxation, SearchConfig};
use crate::queue::PriorityQueue;
use crate::traits::WeightedPather;
use crate::traversal::{CostMap, PredecessorMap, SearchStats, WeightedTraversal};

/// Compute least-cost routes from `origin` with Dijkstra's algorithm,
/// stopping once `goal` is popped.
///
/// Entering a position costs its [`entry_cost`](WeightedPather::entry_cost);
/// the origin itself is free.
pub fn dijkstra<G: WeightedPather>(
    pather: &G,
    origin: Point3,
    goal: Point3,
    config: &SearchConfig,
    cancel: Option<&CancelToken>,
) -> WeightedTraversal {
    best_first(pather, origin, goal, config, cancel, "dijkstra", |_| 0.0)
}

/// Priority-driven search shared by Dijkstra and A*.
///
/// Frontier entries carry the cost at which they were pushed. There is no
/// decrease-key: a cheaper route pushes a fresh entry, and entries whose
/// cost is above the recorded one are skipped when popped.
pub(crate) fn best_first<G, H>(
    pather: &G,
    origin: Point3,
    goal: Point3,
    config: &SearchConfig,
    cancel: Option<&CancelToken>,
    label: &str,
    estimate: H,
) -> WeightedTraversal
where
    G: WeightedPather,
    H: Fn(Point3) -> f64,
{
    let mut came_from = PredecessorMap::seeded(origin);
    let mut cost_so_far = CostMap::new();
    cost_so_far.set(origin, 0.0);
    let mut stats = SearchStats::default();

    let mut open: PriorityQueue<(Point3, f64), f64> = PriorityQueue::min_first();
    open.push((origin, 0.0), estimate(origin));
    stats.pushes += 1;

    let mut nbuf = Vec::with_capacity(12);

    while let Some(((current, pushed_cost), _)) = open.pop() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            debug!("{label} {origin} -> {goal}: cancelled after {} pops", stats.pops);
            stats.cancelled = true;
            break;
        }

        let Some(current_cost) = cost_so_far.get(current) else {
            continue;
        };
        // Skip stale entries.
        if pushed_cost > current_cost {
            continue;
        }
        stats.pops += 1;

        if current == goal {
            stats.reached_goal = true;
            break;
        }

        nbuf.clear();
        pather.neighbors(current, &mut nbuf);
        trace!(
            "{label} expand {current} at {current_cost}: {} neighbors",
            nbuf.len()
        );

        for &np in nbuf.iter() {
            let new_cost = current_cost + pather.entry_cost(np);
            let relax = match config.relaxation {
                Relaxation::Canonical => cost_so_far.get(np).is_none_or(|old| new_cost < old),
                Relaxation::Legacy => !cost_so_far.contains(np) || new_cost < current_cost,
            };
            if !relax {
                continue;
            }
            cost_so_far.set(np, new_cost);
            came_from.set(np, Some(current));
            open.push((np, new_cost), new_cost + estimate(np));
            stats.pushes += 1;
        }
    }

    debug!(
        "{label} {origin} -> {goal}: reached={} cost={:?} pops={} pushes={} visited={}",
        stats.reached_goal,
        cost_so_far.get(goal),
        stats.pops,
        stats.pushes,
        came_from.len()
    );
    WeightedTraversal {
        came_from,
        cost_so_far,
        stats,
    }
}

impl<P> NavGrid<P> {
    /// Dijkstra search between two nodes of this grid with the default
    /// [`SearchConfig`].
    pub fn dijkstra_search(&self, origin: &Node<P>, goal: &Node<P>) -> WeightedTraversal {
        self.dijkstra_search_with(origin, goal, &SearchConfig::default(), None)
    }

    /// Dijkstra search with an explicit config and optional cancellation.
    pub fn dijkstra_search_with(
        &self,
        origin: &Node<P>,
        goal: &Node<P>,
        config: &SearchConfig,
        cancel: Option<&CancelToken>,
    ) -> WeightedTraversal {
        dijkstra(self, origin.position(), goal.position(), config, cancel)
    }
}
