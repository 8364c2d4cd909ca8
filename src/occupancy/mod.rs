//! Occupancy voxelization engine.
//!
//! Two independent production paths, both yielding [`OccupancyData`]:
//!
//! - [`sensor`]: hand out the latest live sensor cloud, waiting for a fresh
//!   one when the cached cloud is stale.
//! - [`scene`]: sweep the volume of interest with unit-cube collision
//!   queries against an authoritative scene and collect occupied cells.

pub mod scene;
pub mod sensor;

pub use scene::SceneOracle;

use crate::cloud::PointCloud;
use crate::config::SensorConfig;
use crate::error::Result;
use crate::roadmap::{Voxel, VolumeRegion};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread;

/// Occupancy input for one solve call. Created fresh per call and discarded
/// after use.
#[derive(Clone, Debug)]
pub enum OccupancyData {
    /// Raw sensor cloud, shared and read-only; stale after the freshness
    /// window. The collision service voxelizes it on its side.
    PointCloud(Arc<PointCloud>),
    /// Explicit occupied voxel coordinates. Duplicates are harmless.
    Voxels(Vec<Voxel>),
}

/// Produces occupancy data from either a live sensor feed or a scene oracle.
pub struct OccupancyHandler {
    cache: sensor::CloudCache,
    sensor_config: SensorConfig,
}

impl OccupancyHandler {
    pub fn new(sensor_config: SensorConfig) -> Self {
        Self {
            cache: sensor::CloudCache::new(),
            sensor_config,
        }
    }

    /// Latest sensor cloud, tagged as point-cloud occupancy.
    ///
    /// Returns the cached cloud when it is younger than the freshness
    /// window; otherwise blocks until exactly one new cloud is published
    /// via [`publish_cloud`](Self::publish_cloud), bounded by the configured
    /// wait timeout ([`MargaError::SensorTimeout`](crate::MargaError) on
    /// expiry).
    pub fn from_sensor(&self) -> Result<OccupancyData> {
        let cloud = self.cache.acquire(
            self.sensor_config.freshness(),
            self.sensor_config.wait_timeout(),
        )?;
        Ok(OccupancyData::PointCloud(cloud))
    }

    /// Voxelize an authoritative scene snapshot over the roadmap's volume.
    pub fn from_scene(
        &self,
        volume: &VolumeRegion,
        oracle: &dyn SceneOracle,
    ) -> Result<OccupancyData> {
        scene::sweep(volume, oracle).map(OccupancyData::Voxels)
    }

    /// Offer one sensor cloud to the cache.
    ///
    /// Returns true when a waiter consumed it. Clouds arriving while no
    /// request is waiting are dropped; the subscription is transient.
    pub fn publish_cloud(&self, cloud: PointCloud) -> bool {
        self.cache.publish(cloud)
    }

    /// Forward clouds from a channel into the cache on a background thread
    /// until the sending side disconnects.
    pub fn feed_from(self: Arc<Self>, rx: Receiver<PointCloud>) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            for cloud in rx.iter() {
                self.publish_cloud(cloud);
            }
        })
    }
}
