//! Point cloud snapshot type shared between the sensor feed and solves.

use std::time::Instant;

/// A world-frame point cloud snapshot.
///
/// Externally owned and read-only after capture; shared via `Arc`. The
/// capture instant drives the occupancy handler's freshness window.
#[derive(Clone, Debug)]
pub struct PointCloud {
    /// Points as (x, y, z) in meters
    pub points: Vec<[f32; 3]>,
    /// Capture time
    pub stamp: Instant,
}

impl PointCloud {
    /// Create a cloud stamped with the current time.
    pub fn new(points: Vec<[f32; 3]>) -> Self {
        Self {
            points,
            stamp: Instant::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
