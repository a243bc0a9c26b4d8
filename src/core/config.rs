//! World configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::Error;
use super::types::Result;

/// Which neighbor combinations the symmetrical sculpt visits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborCoverage {
    /// Every combination of overflowing directions: up to 6 faces, 12 edges, 8 corners.
    #[default]
    Full,
    /// Faces, plus the XY and YZ edge pairs. No XZ edges, no corners.
    Legacy,
}

/// Configuration for a voxel world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of a chunk in world units
    pub chunk_world_size: f32,
    /// Edge length of a single voxel in world units
    pub voxel_world_size: f32,
    /// Samples per chunk side. Meshing resolution is `chunk_size - 1` cells.
    pub chunk_size: usize,
    /// Neighbor combinations considered by cross-chunk strokes
    pub neighbor_coverage: NeighborCoverage,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_world_size: 6400.0,
            voxel_world_size: 100.0,
            chunk_size: 65,
            neighbor_coverage: NeighborCoverage::Full,
        }
    }
}

impl WorldConfig {
    /// Chunk edge length in voxel units (`chunk_world_size / voxel_world_size`).
    pub fn chunk_voxel_size(&self) -> f32 {
        self.chunk_world_size / self.voxel_world_size
    }

    /// Whether one chunk's sample lattice spans exactly one chunk, so the
    /// last sample of a chunk coincides with the first of its neighbor.
    pub fn is_seamless(&self) -> bool {
        (self.chunk_size as f32 - 1.0) == self.chunk_voxel_size()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file (sync)
    pub fn load_sync(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Reject sizes that cannot describe a chunk lattice. A lattice that does
    /// not line up with the chunk grid is accepted with a warning.
    pub fn validate(&self) -> Result<()> {
        if !(self.chunk_world_size > 0.0) || !self.chunk_world_size.is_finite() {
            return Err(Error::Configuration(format!(
                "chunk_world_size must be positive, got {}",
                self.chunk_world_size
            )));
        }
        if !(self.voxel_world_size > 0.0) || !self.voxel_world_size.is_finite() {
            return Err(Error::Configuration(format!(
                "voxel_world_size must be positive, got {}",
                self.voxel_world_size
            )));
        }
        if self.chunk_size < 2 {
            return Err(Error::Configuration(format!(
                "chunk_size must be at least 2 samples, got {}",
                self.chunk_size
            )));
        }
        if !self.is_seamless() {
            log::warn!(
                "chunk_size {} does not match {} voxels per chunk; neighboring chunks will not line up",
                self.chunk_size,
                self.chunk_voxel_size()
            );
        }
        Ok(())
    }
}
