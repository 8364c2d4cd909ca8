//! Roadmap specification types.
//!
//! A roadmap is a precomputed graph of valid robot configurations (vertices)
//! and feasible transitions (edges). This crate never constructs roadmaps;
//! it only identifies them, hands their files to the engine's loader, and
//! consumes the loaded graph.

use crate::error::{MargaError, Result};
use crate::geometry::Pose;
use serde::Deserialize;
use std::path::PathBuf;

/// Joint-space configuration: one value per joint, fixed length per roadmap.
pub type JointConfig = Vec<f32>;

/// Integer grid coordinate of one occupied voxel cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Voxel {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl Voxel {
    pub fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }
}

/// On-disk files describing one roadmap. The formats are opaque to this
/// crate and consumed only through the engine's loader.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RoadmapFiles {
    /// Connectivity description (graph structure)
    pub connectivity: PathBuf,
    /// Occupancy description (per-edge swept volumes, consumed by hardware)
    pub occupancy: PathBuf,
}

/// The bounded 3-D box over which occupancy is computed, anchored to a
/// reference frame.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VolumeRegion {
    /// Name of the reference frame the center pose is expressed in
    pub base_frame: String,
    /// Pose of the volume center relative to the base frame
    pub center_pose: Pose,
    /// Box side lengths (x, y, z) in meters
    pub dimensions: [f32; 3],
    /// Edge length of one cubic voxel cell in meters
    pub voxel_size: f32,
}

impl VolumeRegion {
    /// Check the volume invariants: positive dimensions, positive voxel size
    /// no larger than any dimension.
    pub fn validate(&self) -> Result<()> {
        if self.voxel_size <= 0.0 {
            return Err(MargaError::Config(format!(
                "voxel_size must be positive, got {}",
                self.voxel_size
            )));
        }
        for (axis, &dim) in ["x", "y", "z"].iter().zip(&self.dimensions) {
            if dim <= 0.0 {
                return Err(MargaError::Config(format!(
                    "volume dimension {} must be positive, got {}",
                    axis, dim
                )));
            }
            if self.voxel_size > dim {
                return Err(MargaError::Config(format!(
                    "voxel_size {} exceeds volume dimension {} ({})",
                    self.voxel_size, axis, dim
                )));
            }
        }
        Ok(())
    }
}

/// Identity and geometry of one roadmap. Created once per distinct roadmap,
/// never mutated after creation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RoadmapSpecification {
    /// Unique roadmap identifier
    pub roadmap_id: String,
    /// File locations
    pub files: RoadmapFiles,
    /// Volume of interest for occupancy
    pub volume: VolumeRegion,
}

impl RoadmapSpecification {
    pub fn validate(&self) -> Result<()> {
        if self.roadmap_id.is_empty() {
            return Err(MargaError::Config("roadmap_id must not be empty".into()));
        }
        self.volume.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(dimensions: [f32; 3], voxel_size: f32) -> VolumeRegion {
        VolumeRegion {
            base_frame: "base_link".to_string(),
            center_pose: Pose::default(),
            dimensions,
            voxel_size,
        }
    }

    #[test]
    fn test_valid_volume() {
        assert!(volume([1.0, 2.0, 0.5], 0.05).validate().is_ok());
    }

    #[test]
    fn test_zero_voxel_size_rejected() {
        assert!(matches!(
            volume([1.0, 1.0, 1.0], 0.0).validate(),
            Err(MargaError::Config(_))
        ));
    }

    #[test]
    fn test_voxel_larger_than_dimension_rejected() {
        assert!(volume([1.0, 0.04, 1.0], 0.05).validate().is_err());
    }

    #[test]
    fn test_negative_dimension_rejected() {
        assert!(volume([1.0, -1.0, 1.0], 0.05).validate().is_err());
    }

    #[test]
    fn test_spec_from_toml() {
        let spec: RoadmapSpecification = toml::from_str(
            r#"
            roadmap_id = "shelf_pick"

            [files]
            connectivity = "roadmaps/shelf_pick.graph"
            occupancy = "roadmaps/shelf_pick.og"

            [volume]
            base_frame = "base_link"
            center_pose = { xyz = [0.8, 0.0, 0.4] }
            dimensions = [1.2, 1.0, 0.8]
            voxel_size = 0.02
            "#,
        )
        .unwrap();
        assert_eq!(spec.roadmap_id, "shelf_pick");
        assert!(spec.validate().is_ok());
    }
}
