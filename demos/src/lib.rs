//! Shared model for the voxnav demos.
//!
//! Generates rolling terrain, scans it into a navigation grid, runs each
//! search between the two ends of the paved road and renders the result as
//! text layers.

use std::fmt;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;
use voxnav_core::Point3;
use voxnav_paths::{
    NavGrid, Overlay, PathError, PredecessorMap, SearchConfig, SearchStats, WeightedPather,
    astar, breadth_first, dijkstra,
};
use voxnav_terrain::{Material, ScanConfig, VolumeError, VoxelRef, VoxelVolume, scan_grid};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "VOXNAV_LOG";

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Filter built from a [`LOG_ENV`] value, `info` when unset or invalid.
pub fn log_filter(value: Option<&str>) -> EnvFilter {
    value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install a stderr subscriber filtered by [`LOG_ENV`]. Records from the
/// `log` facade are forwarded to it.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .try_init()
}

// ---------------------------------------------------------------------------
// Demo
// ---------------------------------------------------------------------------

/// Terrain and search settings for a demo run.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub seed: u64,
    /// Volume size in cells.
    pub size: Point3,
    /// World position of the volume's center.
    pub center: Point3,
    pub step: i32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            size: Point3::new(24, 10, 15),
            center: Point3::ZERO,
            step: voxnav_paths::DEFAULT_STEP,
        }
    }
}

#[derive(Debug)]
pub enum DemoError {
    Volume(VolumeError),
    /// The generated terrain has no paved node to start from.
    NoRoad,
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Volume(e) => write!(f, "demo: {e}"),
            Self::NoRoad => write!(f, "demo: terrain has no road"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Volume(e) => Some(e),
            Self::NoRoad => None,
        }
    }
}

impl From<VolumeError> for DemoError {
    fn from(e: VolumeError) -> Self {
        Self::Volume(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    BreadthFirst,
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Self; 3] = [Self::BreadthFirst, Self::Dijkstra, Self::AStar];

    pub fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
        }
    }
}

/// Result of one search.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub algorithm: Algorithm,
    pub stats: SearchStats,
    pub came_from: PredecessorMap,
    /// Route from origin to goal, both included.
    pub route: Option<Vec<Point3>>,
    /// Summed entry cost along the route.
    pub cost: Option<f64>,
}

/// A scanned terrain with a road start and end picked out.
pub struct Demo {
    grid: NavGrid<VoxelRef>,
    origin: Point3,
    goal: Point3,
    search: SearchConfig,
}

impl Demo {
    pub fn generate(config: &DemoConfig) -> Result<Self, DemoError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let volume = VoxelVolume::rolling_hills(config.size, &mut rng)?;
        let scan = ScanConfig::centered(config.center, config.size * config.step, config.step);
        let grid = scan_grid(&volume, &scan)?;

        // Grid iteration is sorted, so the road runs from low x to high x.
        let mut road = grid
            .iter()
            .filter(|n| n.payload().material == Material::Pavement)
            .map(|n| n.position());
        let origin = road.next().ok_or(DemoError::NoRoad)?;
        let goal = road.last().unwrap_or(origin);
        info!(
            "demo: seed {} grid {} nodes, road {origin} -> {goal}",
            config.seed,
            grid.len()
        );

        Ok(Self {
            grid,
            origin,
            goal,
            search: SearchConfig::unit_steps(config.step),
        })
    }

    pub fn grid(&self) -> &NavGrid<VoxelRef> {
        &self.grid
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn goal(&self) -> Point3 {
        self.goal
    }

    pub fn run(&self, algorithm: Algorithm) -> Result<Outcome, PathError> {
        let (came_from, stats) = match algorithm {
            Algorithm::BreadthFirst => {
                let t = breadth_first(&self.grid, self.origin, self.goal, None);
                (t.came_from, t.stats)
            }
            Algorithm::Dijkstra => {
                let t = dijkstra(&self.grid, self.origin, self.goal, &self.search, None);
                (t.came_from, t.stats)
            }
            Algorithm::AStar => {
                let t = astar(&self.grid, self.origin, self.goal, &self.search, None);
                (t.came_from, t.stats)
            }
        };
        let route = came_from.path_to(self.origin, self.goal)?;
        let cost = route.as_ref().map(|r| {
            r.iter()
                .skip(1)
                .map(|&p| self.grid.entry_cost(p))
                .sum::<f64>()
        });
        if route.is_none() {
            warn!("{}: goal {} unreachable", algorithm.name(), self.goal);
        }
        Ok(Outcome {
            algorithm,
            stats,
            came_from,
            route,
            cost,
        })
    }

    /// Render every layer the route passes through, or the origin's layer
    /// when there is no route.
    pub fn render(&self, outcome: &Outcome) -> Vec<(i32, Vec<String>)> {
        let route = outcome.route.as_deref().unwrap_or(&[]);
        let overlay = Overlay::new(&self.grid, &outcome.came_from).with_route(route);
        overlay
            .layers()
            .into_iter()
            .filter(|&y| {
                if route.is_empty() {
                    y == self.origin.y
                } else {
                    route.iter().any(|p| p.y == y)
                }
            })
            .map(|y| (y, overlay.render_layer(y)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        use tracing_subscriber::filter::LevelFilter;
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("voxnav_paths=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn road_ends_lie_on_the_grid() {
        let demo = Demo::generate(&DemoConfig::default()).unwrap();
        assert!(demo.grid().contains(demo.origin()));
        assert!(demo.grid().contains(demo.goal()));
        assert!(demo.origin().x < demo.goal().x);
        assert_eq!(demo.grid().entry_cost(demo.origin()), 1.0);
    }

    #[test]
    fn searches_agree() {
        let demo = Demo::generate(&DemoConfig::default()).unwrap();
        let bfs = demo.run(Algorithm::BreadthFirst).unwrap();
        let dij = demo.run(Algorithm::Dijkstra).unwrap();
        let ast = demo.run(Algorithm::AStar).unwrap();

        assert_eq!(bfs.stats.reached_goal, dij.stats.reached_goal);
        assert_eq!(dij.stats.reached_goal, ast.stats.reached_goal);
        assert!(ast.stats.pops <= dij.stats.pops);

        if let (Some(b), Some(d)) = (&bfs.route, &dij.route) {
            assert!(b.len() <= d.len());
            assert_eq!(dij.cost, ast.cost);
            assert!(dij.cost <= bfs.cost);
            assert_eq!(d.first(), Some(&demo.origin()));
            assert_eq!(d.last(), Some(&demo.goal()));
        }

        let layers = demo.render(&ast);
        assert!(!layers.is_empty());
        let marks_origin = layers
            .iter()
            .any(|(_, rows)| rows.iter().any(|r| r.contains('O')));
        assert_eq!(marks_origin, ast.route.is_some());
    }

    #[test]
    fn bad_size_is_reported() {
        let cfg = DemoConfig {
            size: Point3::new(0, 4, 4),
            ..DemoConfig::default()
        };
        let err = Demo::generate(&cfg).err().unwrap();
        assert!(matches!(err, DemoError::Volume(VolumeError::InvalidSize(_))));
        assert!(err.to_string().starts_with("demo: volume:"));
    }
}
