//! Scene voxel sweep.
//!
//! Walks every grid cell of the volume of interest in raster order and asks
//! the scene oracle whether a unit test-cube placed at that cell collides
//! with the static environment. The full sweep costs one collision query
//! per cell; that cost is part of the contract — any future shortcut
//! (local bounding boxes, octrees) must produce identical voxel output for
//! the same scene and volume.

use crate::error::{MargaError, Result};
use crate::geometry;
use crate::roadmap::{Voxel, VolumeRegion};
use nalgebra::{Isometry3, Translation3};

/// Collision oracle over an authoritative scene snapshot.
///
/// Implementations must tolerate the test box being moved and requeried
/// many times per sweep without per-query reinitialization cost dominating.
pub trait SceneOracle {
    /// Rigid transform from the world frame to a named frame, or None if
    /// the frame is unknown to the scene.
    fn frame_transform(&self, frame: &str) -> Option<Isometry3<f32>>;

    /// Whether a cube of edge length `edge` centered at `pose` (world
    /// frame) collides with the environment.
    fn box_in_collision(&self, pose: &Isometry3<f32>, edge: f32) -> bool;
}

/// Sweep the volume and collect occupied cells.
///
/// Iteration is raster order with x outermost and z innermost, and cell
/// counts truncate (`floor(dimension / voxel_size)`), so a fractional far
/// edge of the volume is never examined. Each query's result is dropped
/// after the cell is recorded; no state carries between cells.
pub fn sweep(volume: &VolumeRegion, oracle: &dyn SceneOracle) -> Result<Vec<Voxel>> {
    volume.validate()?;

    let world_to_base = oracle.frame_transform(&volume.base_frame).ok_or_else(|| {
        MargaError::Config(format!("unknown volume base frame '{}'", volume.base_frame))
    })?;
    let world_to_volume =
        geometry::world_to_volume(&world_to_base, &volume.center_pose.to_isometry());

    let [nx, ny, nz] = geometry::grid_extents(volume.dimensions, volume.voxel_size);
    let mut voxels = Vec::new();
    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                let offset =
                    geometry::cell_center(volume.dimensions, volume.voxel_size, [x, y, z]);
                let pose = world_to_volume * Translation3::from(offset);
                if oracle.box_in_collision(&pose, volume.voxel_size) {
                    voxels.push(Voxel::new(x as u16, y as u16, z as u16));
                }
            }
        }
    }
    Ok(voxels)
}
