//! **voxnav-core** — core types for sparse voxel navigation.
//!
//! This crate provides the value types shared across the *voxnav*
//! workspace: the integer lattice point [`Point3`] and the weighted
//! navigation [`Node`].

pub mod geom;
pub mod node;

pub use geom::Point3;
pub use node::Node;
