//! Dense voxel volumes.
//!
//! A [`VoxelVolume`] stores a [`Material`] and an occupancy fraction for
//! every cell of a box of `size.x × size.y × size.z` cells. Cell coordinates
//! start at zero; `y` is up.

use std::fmt;

use rand::Rng;
use voxnav_core::Point3;

/// Surface material of a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    #[default]
    Air,
    Grass,
    Ground,
    Rock,
    Sand,
    Pavement,
}

/// One cell of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Voxel {
    pub material: Material,
    /// Fraction of the cell that is solid, in `[0, 1]`.
    pub occupancy: f32,
}

impl Voxel {
    pub const AIR: Self = Self {
        material: Material::Air,
        occupancy: 0.0,
    };

    /// A fully occupied cell.
    pub const fn solid(material: Material) -> Self {
        Self {
            material,
            occupancy: 1.0,
        }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.occupancy > 0.0
    }
}

/// Errors raised while building volumes or scanning them.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeError {
    /// A dimension is zero or negative.
    InvalidSize(Point3),
    /// Material or occupancy data does not hold one entry per cell.
    SizeMismatch { expected: usize, got: usize },
    /// A scan setting is out of range.
    InvalidConfig(String),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(size) => write!(f, "volume: invalid size {size}"),
            Self::SizeMismatch { expected, got } => {
                write!(f, "volume: expected {expected} cells, got {got}")
            }
            Self::InvalidConfig(msg) => write!(f, "volume: invalid scan config: {msg}"),
        }
    }
}

impl std::error::Error for VolumeError {}

/// A dense box of voxels.
#[derive(Debug, Clone)]
pub struct VoxelVolume {
    size: Point3,
    cells: Vec<Voxel>,
}

impl VoxelVolume {
    /// Create a volume filled with air.
    pub fn new(size: Point3) -> Result<Self, VolumeError> {
        let len = cell_count(size)?;
        Ok(Self {
            size,
            cells: vec![Voxel::AIR; len],
        })
    }

    /// Build a volume from parallel material and occupancy arrays, both
    /// indexed `x`-fastest, then `y`, then `z`.
    pub fn from_parts(
        size: Point3,
        materials: Vec<Material>,
        occupancy: Vec<f32>,
    ) -> Result<Self, VolumeError> {
        let len = cell_count(size)?;
        for got in [materials.len(), occupancy.len()] {
            if got != len {
                return Err(VolumeError::SizeMismatch { expected: len, got });
            }
        }
        let cells = materials
            .into_iter()
            .zip(occupancy)
            .map(|(material, occupancy)| Voxel {
                material,
                occupancy,
            })
            .collect();
        Ok(Self { size, cells })
    }

    /// Number of cells along each axis.
    pub fn size(&self) -> Point3 {
        self.size
    }

    /// Whether `cell` lies inside the volume.
    pub fn contains(&self, cell: Point3) -> bool {
        (0..self.size.x).contains(&cell.x)
            && (0..self.size.y).contains(&cell.y)
            && (0..self.size.z).contains(&cell.z)
    }

    fn index(&self, cell: Point3) -> usize {
        ((cell.z * self.size.y + cell.y) * self.size.x + cell.x) as usize
    }

    /// The voxel at `cell`, or `None` if out of bounds.
    pub fn at(&self, cell: Point3) -> Option<Voxel> {
        if !self.contains(cell) {
            return None;
        }
        Some(self.cells[self.index(cell)])
    }

    /// Set the voxel at `cell`. Does nothing if out of bounds.
    pub fn set(&mut self, cell: Point3, voxel: Voxel) {
        if !self.contains(cell) {
            return;
        }
        let idx = self.index(cell);
        self.cells[idx] = voxel;
    }

    /// Count the solid cells.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|v| v.is_solid()).count()
    }

    /// Generate rolling terrain: solid columns of slowly varying height,
    /// grass on top of ground on top of rock, with a paved road running
    /// along x through the middle z row.
    ///
    /// The top layer is always left empty so every column has a surface.
    pub fn rolling_hills(size: Point3, rng: &mut impl Rng) -> Result<Self, VolumeError> {
        let mut vol = Self::new(size)?;
        let max_h = (size.y - 2).max(0);
        let road_z = size.z / 2;
        let mut heights = vec![0i32; (size.x * size.z) as usize];
        let col = |x: i32, z: i32| (z * size.x + x) as usize;

        for z in 0..size.z {
            for x in 0..size.x {
                let h = match (x, z) {
                    (0, 0) => rng.random_range(0..=max_h),
                    (_, 0) => heights[col(x - 1, z)] + rng.random_range(-1..=1),
                    (0, _) => heights[col(x, z - 1)] + rng.random_range(-1..=1),
                    _ => {
                        let avg = (heights[col(x - 1, z)] + heights[col(x, z - 1)]) / 2;
                        avg + rng.random_range(-1..=1)
                    }
                };
                let h = h.clamp(0, max_h);
                heights[col(x, z)] = h;

                for y in 0..=h.min(size.y - 1) {
                    let material = if y == h {
                        if z == road_z {
                            Material::Pavement
                        } else {
                            Material::Grass
                        }
                    } else if y + 2 >= h {
                        Material::Ground
                    } else {
                        Material::Rock
                    };
                    vol.set(Point3::new(x, y, z), Voxel::solid(material));
                }
            }
        }
        Ok(vol)
    }
}

fn cell_count(size: Point3) -> Result<usize, VolumeError> {
    if size.x <= 0 || size.y <= 0 || size.z <= 0 {
        return Err(VolumeError::InvalidSize(size));
    }
    Ok(size.x as usize * size.y as usize * size.z as usize)
}
