//! Voxel terrain utilities for voxnav: occupancy volumes, procedural
//! generation, and surface scanning into navigation nodes.

pub mod scan;
pub mod volume;

pub use scan::{ScanConfig, VoxelRef, scan_grid, scan_surface};
pub use volume::{Material, Voxel, VolumeError, VoxelVolume};
