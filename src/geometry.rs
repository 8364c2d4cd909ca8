//! Frame transform utilities for world -> volume mapping.
//!
//! Leaf module: no internal state. All poses are rigid transforms
//! (`nalgebra::Isometry3<f32>`), all lengths in meters.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::Deserialize;

/// A 6-DOF pose as position + roll/pitch/yaw, for configs and roadmap files.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct Pose {
    /// Position (x, y, z) in meters
    pub xyz: [f32; 3],
    /// Orientation as roll/pitch/yaw in radians
    #[serde(default)]
    pub rpy: [f32; 3],
}

impl Pose {
    pub fn new(xyz: [f32; 3], rpy: [f32; 3]) -> Self {
        Self { xyz, rpy }
    }

    /// Convert to a rigid transform.
    pub fn to_isometry(self) -> Isometry3<f32> {
        Isometry3::from_parts(
            Translation3::new(self.xyz[0], self.xyz[1], self.xyz[2]),
            UnitQuaternion::from_euler_angles(self.rpy[0], self.rpy[1], self.rpy[2]),
        )
    }
}

/// Compose the world -> volume-center transform from the world -> base-frame
/// transform and the volume's center pose (expressed in the base frame).
pub fn world_to_volume(
    world_to_base: &Isometry3<f32>,
    base_to_center: &Isometry3<f32>,
) -> Isometry3<f32> {
    world_to_base * base_to_center
}

/// Per-axis voxel counts for a volume: `floor(dimension / voxel_size)`.
///
/// Truncation, not rounding: a volume that is not an integer multiple of the
/// voxel size loses the fractional slice at the far edge of each axis.
pub fn grid_extents(dimensions: [f32; 3], voxel_size: f32) -> [usize; 3] {
    [
        (dimensions[0] / voxel_size) as usize,
        (dimensions[1] / voxel_size) as usize,
        (dimensions[2] / voxel_size) as usize,
    ]
}

/// Center of grid cell (x, y, z) in the volume's local frame.
///
/// The volume-center pose anchors the middle of the box, so cell (0, 0, 0)
/// sits at `-dim/2 + voxel/2` on each axis.
pub fn cell_center(dimensions: [f32; 3], voxel_size: f32, cell: [usize; 3]) -> Vector3<f32> {
    Vector3::new(
        -dimensions[0] / 2.0 + (cell[0] as f32 + 0.5) * voxel_size,
        -dimensions[1] / 2.0 + (cell[1] as f32 + 0.5) * voxel_size,
        -dimensions[2] / 2.0 + (cell[2] as f32 + 0.5) * voxel_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_extents_truncates() {
        // 1.05m at 0.1m voxels: the 5cm slice at the far edge is dropped
        assert_eq!(grid_extents([1.05, 2.0, 0.95], 0.1), [10, 20, 9]);
    }

    #[test]
    fn test_cell_center_symmetry() {
        let dims = [1.0, 1.0, 1.0];
        let first = cell_center(dims, 0.1, [0, 0, 0]);
        let last = cell_center(dims, 0.1, [9, 9, 9]);
        assert!((first.x + last.x).abs() < 1e-6);
        assert!((first.x - (-0.45)).abs() < 1e-6);
    }

    #[test]
    fn test_world_to_volume_composition() {
        let world_to_base = Pose::new([1.0, 0.0, 0.0], [0.0, 0.0, 0.0]).to_isometry();
        let center = Pose::new([0.0, 2.0, 0.5], [0.0, 0.0, 0.0]).to_isometry();
        let w2v = world_to_volume(&world_to_base, &center);
        let origin = w2v * nalgebra::Point3::origin();
        assert!((origin.x - 1.0).abs() < 1e-6);
        assert!((origin.y - 2.0).abs() < 1e-6);
        assert!((origin.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pose_rpy_yaw() {
        let pose = Pose::new([0.0, 0.0, 0.0], [0.0, 0.0, std::f32::consts::FRAC_PI_2]);
        let p = pose.to_isometry() * nalgebra::Point3::new(1.0, 0.0, 0.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }
}
