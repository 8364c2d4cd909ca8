//! Search engine and collision board capability traits.
//!
//! The physical RapidPlan-style accelerator is split along the same seam
//! the hardware exposes: a [`PathPlanner`] that holds one roadmap graph and
//! answers path queries, and a [`CollisionBoard`] that stores roadmaps
//! under numeric indices and turns occupancy data into per-edge collision
//! masks. Implementations are chosen at construction time; when no device
//! is attached, [`DetachedBoard`] stands in deterministically.

pub mod detached;
pub mod sim;

pub use detached::DetachedBoard;
pub use sim::SimPlanner;

use crate::error::Result;
use crate::goal::ResolvedGoal;
use crate::occupancy::OccupancyData;
use crate::roadmap::JointConfig;
use std::path::Path;

/// Status code the engine reports for a successful search.
pub const STATUS_OK: i32 = 0;

/// Raw outcome of one path query.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Engine status; [`STATUS_OK`] means a path was found.
    pub status: i32,
    /// Vertex ids along the path, start first. Valid only while the
    /// producing roadmap stays loaded.
    pub waypoints: Vec<usize>,
    /// Edge ids traversed, in order.
    pub edges: Vec<usize>,
}

impl SearchOutcome {
    pub fn failure(status: i32) -> Self {
        Self {
            status,
            waypoints: Vec::new(),
            edges: Vec::new(),
        }
    }
}

/// The search engine: holds at most one roadmap graph at a time.
///
/// Not reentrant and not thread-safe; the planning session funnels all
/// access through one exclusive section.
pub trait PathPlanner: Send {
    /// Load a roadmap's connectivity description, replacing any resident
    /// roadmap. Failure leaves no usable roadmap loaded.
    fn load_roadmap(&mut self, path: &Path) -> Result<()>;

    /// Vertex configurations of the resident roadmap, in vertex-id order.
    fn configs(&self) -> &[JointConfig];

    /// Edges of the resident roadmap as (vertex, vertex) pairs, in
    /// edge-id order.
    fn edges(&self) -> &[(usize, usize)];

    /// Search for a path from `start` to the resolved goal. `mask` holds
    /// one byte per edge; non-zero marks the edge blocked.
    fn find_path(&mut self, start: usize, goal: &ResolvedGoal, mask: &[u8]) -> SearchOutcome;

    /// Human-readable diagnostic for a non-success status.
    fn error_string(&self, status: i32) -> String;
}

/// The collision-check service: stores roadmap occupancy descriptions under
/// hardware indices and produces per-edge collision masks.
pub trait CollisionBoard: Send {
    /// Store a roadmap's occupancy description and return its assigned
    /// index. Index lifetime (including any capacity eviction policy) is
    /// owned by the implementation and must be documented there.
    fn write_roadmap(&mut self, path: &Path) -> Result<u16>;

    /// Check occupancy data against the roadmap stored at `index`,
    /// returning one byte per edge (non-zero = blocked). `edge_count` is
    /// the resident roadmap's edge count, for boards that size the mask
    /// themselves.
    fn check_scene(
        &mut self,
        occupancy: &OccupancyData,
        index: u16,
        edge_count: usize,
    ) -> Result<Vec<u8>>;
}
