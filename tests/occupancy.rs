//! Occupancy handler integration tests: sensor feed plumbing and the
//! scene sweep through the handler facade.

use crossbeam_channel::bounded;
use marga_plan::geometry::Pose;
use marga_plan::occupancy::{OccupancyData, OccupancyHandler, SceneOracle};
use marga_plan::{MargaError, PointCloud, SensorConfig, VolumeRegion};
use nalgebra::Isometry3;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn handler(freshness_ms: u64, wait_timeout_ms: u64) -> Arc<OccupancyHandler> {
    Arc::new(OccupancyHandler::new(SensorConfig {
        freshness_ms,
        wait_timeout_ms,
    }))
}

#[test]
fn test_sensor_feed_delivers_one_cloud() {
    let handler = handler(100, 5000);
    let (tx, rx) = bounded(8);
    let feed = Arc::clone(&handler).feed_from(rx);

    // Producer keeps publishing until the request-side waiter picks one up
    let producer = thread::spawn(move || {
        for _ in 0..200 {
            if tx.send(PointCloud::new(vec![[0.5, 0.0, 0.2]])).is_err() {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
    });

    match handler.from_sensor().unwrap() {
        OccupancyData::PointCloud(cloud) => {
            assert_eq!(cloud.points, vec![[0.5, 0.0, 0.2]]);
        }
        other => panic!("expected point cloud, got {:?}", other),
    }

    // The feed thread exits once the producer drops the channel
    producer.join().unwrap();
    feed.join().unwrap();
}

#[test]
fn test_sensor_wait_times_out_without_feed() {
    let handler = handler(100, 30);
    let result = handler.from_sensor();
    assert!(matches!(result, Err(MargaError::SensorTimeout)));
}

/// Everything within 0.2m of the world origin is occupied.
struct SphereOracle;

impl SceneOracle for SphereOracle {
    fn frame_transform(&self, frame: &str) -> Option<Isometry3<f32>> {
        (frame == "world").then(Isometry3::identity)
    }

    fn box_in_collision(&self, pose: &Isometry3<f32>, _edge: f32) -> bool {
        let p = pose * nalgebra::Point3::origin();
        p.coords.norm() <= 0.2
    }
}

#[test]
fn test_scene_sweep_through_handler() {
    let handler = handler(100, 100);
    let volume = VolumeRegion {
        base_frame: "world".to_string(),
        center_pose: Pose::default(),
        dimensions: [1.0, 1.0, 1.0],
        voxel_size: 0.1,
    };

    match handler.from_scene(&volume, &SphereOracle).unwrap() {
        OccupancyData::Voxels(voxels) => {
            assert!(!voxels.is_empty());
            // The sphere fits well inside the 10x10x10 grid
            assert!(voxels.len() < 1000);
            // All occupied cells cluster around the grid center
            for v in &voxels {
                assert!((3..=6).contains(&v.x), "unexpected cell {:?}", v);
                assert!((3..=6).contains(&v.y), "unexpected cell {:?}", v);
                assert!((3..=6).contains(&v.z), "unexpected cell {:?}", v);
            }
        }
        other => panic!("expected voxels, got {:?}", other),
    }
}
