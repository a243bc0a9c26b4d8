//! Voxsculpt - sparse chunked voxel terrain with seamless cross-chunk sculpting

pub mod core;
pub mod math;
pub mod voxel;
pub mod mesh;
pub mod generation;
