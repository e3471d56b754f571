//! Surface scanning: turn a voxel volume into navigation nodes.
//!
//! A cell is walkable when it is solid and the cell directly above it is
//! empty. Each walkable cell becomes one [`Node`] placed on a world-space
//! lattice of spacing [`ScanConfig::step`].

use log::{debug, info};
use voxnav_core::{Node, Point3};
use voxnav_paths::NavGrid;

use crate::volume::{Material, VolumeError, VoxelVolume};

/// Opaque payload linking a node back to the voxel it was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelRef {
    pub cell: Point3,
    pub material: Material,
}

/// Placement and pricing of scanned nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanConfig {
    /// World position of cell (0, 0, 0).
    pub region_start: Point3,
    /// World distance between neighboring cells.
    pub step: i32,
    /// Cost of entering a [`Material::Pavement`] node.
    pub paved_cost: f64,
    /// Cost of entering any other node.
    pub default_cost: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            region_start: Point3::ZERO,
            step: voxnav_paths::DEFAULT_STEP,
            paved_cost: 1.0,
            default_cost: 20.0,
        }
    }
}

impl ScanConfig {
    /// Config for a region of world size `extent` centered on `center`.
    pub fn centered(center: Point3, extent: Point3, step: i32) -> Self {
        let half = Point3::new(extent.x / 2, extent.y / 2, extent.z / 2);
        Self {
            region_start: center - half,
            step,
            ..Self::default()
        }
    }

    /// Check that step and costs are positive and finite.
    pub fn validate(&self) -> Result<(), VolumeError> {
        if self.step <= 0 {
            return Err(VolumeError::InvalidConfig(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        for (name, cost) in [
            ("paved_cost", self.paved_cost),
            ("default_cost", self.default_cost),
        ] {
            if !(cost.is_finite() && cost > 0.0) {
                return Err(VolumeError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {cost}"
                )));
            }
        }
        Ok(())
    }

    /// World position of `cell`.
    pub fn world_position(&self, cell: Point3) -> Point3 {
        self.region_start + cell * self.step
    }

    fn cost_of(&self, material: Material) -> f64 {
        match material {
            Material::Pavement => self.paved_cost,
            _ => self.default_cost,
        }
    }
}

/// Emit a node for every walkable cell of `volume`.
///
/// Cells are visited x-major, then z, then y. The top layer never yields
/// nodes since nothing is known about the cells above it.
pub fn scan_surface(
    volume: &VoxelVolume,
    config: &ScanConfig,
) -> Result<Vec<Node<VoxelRef>>, VolumeError> {
    config.validate()?;
    let size = volume.size();
    let mut nodes = Vec::new();

    for x in 0..size.x {
        for z in 0..size.z {
            for y in 0..size.y - 1 {
                let cell = Point3::new(x, y, z);
                let (Some(here), Some(above)) = (volume.at(cell), volume.at(cell.shift(0, 1, 0)))
                else {
                    continue;
                };
                if above.is_solid() || !here.is_solid() {
                    continue;
                }
                nodes.push(Node::new(
                    config.world_position(cell),
                    config.cost_of(here.material),
                    VoxelRef {
                        cell,
                        material: here.material,
                    },
                ));
            }
        }
    }

    let paved = nodes
        .iter()
        .filter(|n| n.payload().material == Material::Pavement)
        .count();
    debug!(
        "scan: {} solid cells, {} surface nodes ({paved} paved)",
        volume.solid_count(),
        nodes.len()
    );
    Ok(nodes)
}

/// Scan `volume` straight into a [`NavGrid`] whose step matches the scan.
pub fn scan_grid(
    volume: &VoxelVolume,
    config: &ScanConfig,
) -> Result<NavGrid<VoxelRef>, VolumeError> {
    let nodes = scan_surface(volume, config)?;
    let mut grid = NavGrid::with_step(config.step);
    grid.extend(nodes);
    info!("scan: grid holds {} nodes", grid.len());
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::Voxel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use voxnav_paths::{SearchConfig, breadth_first, dijkstra, reconstruct_path};

    fn p(x: i32, y: i32, z: i32) -> Point3 {
        Point3::new(x, y, z)
    }

    /// 3 × 4 × 1 cells: a grass column of height 2 at x = 0, a paved
    /// column of height 1 at x = 1, and a partial-occupancy column at x = 2
    /// capped by a solid overhang.
    fn sample() -> VoxelVolume {
        let mut v = VoxelVolume::new(p(3, 4, 1)).unwrap();
        v.set(p(0, 0, 0), Voxel::solid(Material::Rock));
        v.set(p(0, 1, 0), Voxel::solid(Material::Grass));
        v.set(p(1, 0, 0), Voxel::solid(Material::Pavement));
        v.set(
            p(2, 0, 0),
            Voxel {
                material: Material::Sand,
                occupancy: 0.25,
            },
        );
        v.set(p(2, 1, 0), Voxel::solid(Material::Rock));
        v.set(p(2, 3, 0), Voxel::solid(Material::Rock));
        v
    }

    #[test]
    fn finds_surfaces() {
        let nodes = scan_surface(&sample(), &ScanConfig::default()).unwrap();
        let cells: Vec<Point3> = nodes.iter().map(|n| n.payload().cell).collect();
        // (2, 3, 0) is in the top layer and is skipped.
        assert_eq!(cells, vec![p(0, 1, 0), p(1, 0, 0), p(2, 1, 0)]);
    }

    #[test]
    fn positions_and_costs() {
        let cfg = ScanConfig {
            region_start: p(-64, -64, -64),
            ..ScanConfig::default()
        };
        let nodes = scan_surface(&sample(), &cfg).unwrap();
        assert_eq!(nodes[0].position(), p(-64, -60, -64));
        assert_eq!(nodes[0].cost(), 20.0);
        assert_eq!(nodes[1].position(), p(-60, -64, -64));
        assert_eq!(nodes[1].cost(), 1.0);
        assert_eq!(nodes[1].payload().material, Material::Pavement);
    }

    #[test]
    fn centered_region() {
        let cfg = ScanConfig::centered(Point3::ZERO, p(128, 128, 128), 4);
        assert_eq!(cfg.region_start, p(-64, -64, -64));
        assert_eq!(cfg.world_position(p(26, 15, 14)), p(40, -4, -8));
    }

    #[test]
    fn rejects_bad_config() {
        let cfg = ScanConfig {
            step: 0,
            ..ScanConfig::default()
        };
        assert!(matches!(
            scan_surface(&sample(), &cfg),
            Err(VolumeError::InvalidConfig(_))
        ));
        let cfg = ScanConfig {
            paved_cost: -1.0,
            ..ScanConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("paved_cost"));
    }

    #[test]
    fn scanned_grid_is_searchable_along_the_road() {
        let size = p(16, 8, 9);
        let mut rng = StdRng::seed_from_u64(42);
        let vol = VoxelVolume::rolling_hills(size, &mut rng).unwrap();
        let grid = scan_grid(&vol, &ScanConfig::default()).unwrap();
        assert_eq!(grid.step(), 4);
        // One surface node per column.
        assert_eq!(grid.len(), (size.x * size.z) as usize);

        let road: Vec<_> = grid
            .iter()
            .filter(|n| n.payload().material == Material::Pavement)
            .collect();
        assert_eq!(road.len(), size.x as usize);
        assert!(road.iter().all(|n| n.cost() == 1.0));

        // Explore the whole component around the road start.
        let origin = road[0].position();
        let nowhere = p(-1000, -1000, -1000);
        let bfs = breadth_first(&grid, origin, nowhere, None);
        let dij = dijkstra(&grid, origin, nowhere, &SearchConfig::default(), None);
        assert!(!dij.stats.reached_goal);
        assert_eq!(dij.came_from.len(), bfs.came_from.len());
        for (pos, cost) in dij.cost_so_far.iter() {
            let hops = reconstruct_path(&bfs.came_from, origin, pos)
                .unwrap()
                .unwrap()
                .len() as f64;
            assert!(cost >= hops && cost <= 20.0 * hops);
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn scan_config_round_trip() {
        let cfg = ScanConfig {
            paved_cost: 0.5,
            ..ScanConfig::centered(Point3::ZERO, Point3::new(128, 128, 128), 4)
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ScanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn voxel_ref_round_trip() {
        let r = VoxelRef {
            cell: Point3::new(26, 15, 14),
            material: Material::Grass,
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: VoxelRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
