//! # MargaPlan: Roadmap Motion-Planning Broker
//!
//! MargaPlan brokers motion-planning requests against a roadmap-based path
//! search engine that can hold one roadmap and process one request at a
//! time. It owns three concerns:
//!
//! - **Roadmap/session management**: deciding which roadmap must be
//!   resident, caching roadmap identities and hardware-assigned indices,
//!   and serializing concurrent solve requests ([`PlanningSession`],
//!   [`registry::RoadmapRegistry`]).
//! - **Occupancy voxelization**: turning a live point cloud or an
//!   authoritative scene snapshot into a fixed-resolution boolean
//!   occupancy grid ([`occupancy::OccupancyHandler`]).
//! - **Goal resolution**: lowering Cartesian, joint-space, and explicit
//!   vertex-id goals into a search-compatible form ([`goal`]).
//!
//! The engine itself is external, reached through the [`engine::PathPlanner`]
//! and [`engine::CollisionBoard`] capability traits. A deterministic
//! in-process planner ([`engine::SimPlanner`]) and a no-hardware board
//! ([`engine::DetachedBoard`]) ship with the crate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga_plan::{PlanningSession, RapidPlanGoal, RoadmapSpecification};
//! use marga_plan::engine::{DetachedBoard, SimPlanner};
//! use marga_plan::occupancy::OccupancyData;
//!
//! let session = PlanningSession::new(
//!     Box::new(SimPlanner::new()),
//!     Box::new(DetachedBoard::new()),
//! );
//!
//! let spec: RoadmapSpecification =
//!     toml::from_str(&std::fs::read_to_string("roadmaps/shelf_pick.toml").unwrap()).unwrap();
//! let path = session.solve(
//!     &spec,
//!     &vec![0.0, 0.0, 0.0],
//!     &RapidPlanGoal::StateIds(vec![42]),
//!     &OccupancyData::Voxels(Vec::new()),
//! );
//! ```
//!
//! ## Concurrency model
//!
//! Callers may invoke [`PlanningSession::solve`] from any number of
//! threads; the session enforces global mutual exclusion around the
//! roadmap-load / collision-check / search triplet. The sensor cloud cache
//! is guarded independently so the feed side never contends with solves.

pub mod cloud;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod goal;
pub mod occupancy;
pub mod registry;
pub mod roadmap;
pub mod session;

// Re-export main types at crate root
pub use cloud::PointCloud;
pub use config::{MargaConfig, SensorConfig};
pub use error::{MargaError, Result};
pub use goal::{RapidPlanGoal, ResolvedGoal};
pub use occupancy::{OccupancyData, OccupancyHandler, SceneOracle};
pub use roadmap::{JointConfig, RoadmapFiles, RoadmapSpecification, VolumeRegion, Voxel};
pub use session::{PathResult, PlanningSession};
