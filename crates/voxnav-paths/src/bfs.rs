use std::collections::VecDeque;

use log::{debug, trace};
use voxnav_core::{Node, Point3};

use crate::NavGrid;
use crate::cancel::CancelToken;
use crate::traits::Pather;
use crate::traversal::{PredecessorMap, SearchStats, Traversal};

/// Breadth-first search from `origin` until `goal` is dequeued or the
/// frontier runs dry.
///
/// Every edge counts as one hop, so the recorded route to any visited
/// position has the fewest hops. When `goal` is unreachable the returned map
/// simply has no entry for it.
pub fn breadth_first<G: Pather>(
    pather: &G,
    origin: Point3,
    goal: Point3,
    cancel: Option<&CancelToken>,
) -> Traversal {
    let mut came_from = PredecessorMap::seeded(origin);
    let mut stats = SearchStats::default();

    let mut frontier: VecDeque<Point3> = VecDeque::new();
    frontier.push_back(origin);
    stats.pushes += 1;

    let mut nbuf = Vec::with_capacity(12);

    while let Some(current) = frontier.pop_front() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            debug!("bfs {origin} -> {goal}: cancelled after {} pops", stats.pops);
            stats.cancelled = true;
            break;
        }
        stats.pops += 1;

        if current == goal {
            stats.reached_goal = true;
            break;
        }

        nbuf.clear();
        pather.neighbors(current, &mut nbuf);
        trace!("bfs expand {current}: {} neighbors", nbuf.len());

        for &np in nbuf.iter() {
            if came_from.discover(np, current) {
                frontier.push_back(np);
                stats.pushes += 1;
            }
        }
    }

    debug!(
        "bfs {origin} -> {goal}: reached={} pops={} visited={}",
        stats.reached_goal,
        stats.pops,
        came_from.len()
    );
    Traversal { came_from, stats }
}

impl<P> NavGrid<P> {
    /// Breadth-first search between two nodes of this grid.
    pub fn breadth_first_search(&self, origin: &Node<P>, goal: &Node<P>) -> Traversal {
        breadth_first(self, origin.position(), goal.position(), None)
    }

    /// [`breadth_first_search`](Self::breadth_first_search) with a
    /// cancellation token.
    pub fn breadth_first_search_with(
        &self,
        origin: &Node<P>,
        goal: &Node<P>,
        cancel: &CancelToken,
    ) -> Traversal {
        breadth_first(self, origin.position(), goal.position(), Some(cancel))
    }
}
