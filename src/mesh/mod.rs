//! Surface extraction boundary
//!
//! A [`MeshBuilder`] turns a chunk's density field into a triangle mesh and a
//! [`MeshSink`] owns whatever renders or collides with it. The chunk only
//! forwards one to the other.

pub mod data;
pub mod palette;
pub mod sink;
pub mod surface_nets;

pub use data::{MeshData, MeshVertex};
pub use palette::MaterialPalette;
pub use sink::{MeshBuffer, MeshSink, SharedMeshBuffer};
pub use surface_nets::SurfaceNetsBuilder;

use crate::voxel::field::VoxelField;

/// Builds a surface mesh from a density field.
///
/// `resolution` is the number of cells per side, one less than the number of
/// samples. Implementations must return attribute arrays in lock-step and
/// triangle indices grouped in triples.
pub trait MeshBuilder: Send + Sync {
    fn build(&self, field: &VoxelField, resolution: usize) -> MeshData;
}
