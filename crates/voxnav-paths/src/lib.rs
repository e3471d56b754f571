//! Graph search over sparse 3D navigation grids.
//!
//! A [`NavGrid`] holds weighted [`Node`](voxnav_core::Node)s keyed by their
//! lattice position. Neighbors are the four lateral directions at the grid
//! step, each combined with a step down, level, or a step up. On top of that
//! this crate provides:
//!
//! - **BFS** fewest-hops search ([`NavGrid::breadth_first_search`])
//! - **Dijkstra** least-cost search ([`NavGrid::dijkstra_search`])
//! - **A\*** heuristic least-cost search ([`NavGrid::astar_search`])
//! - **Path reconstruction** from predecessor maps ([`reconstruct_path`])
//! - A text [`Overlay`] of per-node directions for debugging
//!
//! Searches borrow the grid immutably and return owned
//! [`PredecessorMap`]/[`CostMap`] values, so one grid can serve any number
//! of queries.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra, A* |

mod astar;
mod bfs;
mod cancel;
mod config;
mod dijkstra;
mod distance;
mod grid;
mod overlay;
mod path;
mod queue;
mod traits;
mod traversal;

pub use astar::astar;
pub use bfs::breadth_first;
pub use cancel::CancelToken;
pub use config::{Relaxation, SearchConfig};
pub use dijkstra::dijkstra;
pub use distance::horizontal_manhattan;
pub use grid::{DEFAULT_STEP, NavGrid};
pub use overlay::{Direction, Overlay, direction_field};
pub use path::{PathError, reconstruct_path, steps};
pub use queue::{MaxFirst, MinFirst, Order, PriorityQueue};
pub use traits::{Pather, WeightedPather};
pub use traversal::{CostMap, PredecessorMap, SearchStats, Traversal, WeightedTraversal};
