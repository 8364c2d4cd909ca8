//! Path search session: the single serialized entry point to the engine.
//!
//! One physical search engine exists and it is neither reentrant nor
//! thread-safe, so every solve runs its whole roadmap-residency,
//! collision-mask and search sequence inside one exclusive section. Solve
//! calls from concurrent threads are totally ordered by acquisition of
//! that section; there is no fairness guarantee and no cancellation point
//! once a solve has entered it.

use crate::engine::{CollisionBoard, PathPlanner, STATUS_OK};
use crate::error::{MargaError, Result};
use crate::goal::{self, RapidPlanGoal};
use crate::occupancy::OccupancyData;
use crate::registry::RoadmapRegistry;
use crate::roadmap::{JointConfig, RoadmapSpecification};
use std::sync::Mutex;

/// A solved discrete path. Waypoint and edge ids index the roadmap's
/// config/edge arrays and are valid only while that roadmap stays loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    pub waypoints: Vec<usize>,
    pub edges: Vec<usize>,
}

struct SessionInner {
    planner: Box<dyn PathPlanner>,
    board: Box<dyn CollisionBoard>,
    registry: RoadmapRegistry,
}

/// Owns the search engine and the collision board behind one mutex.
pub struct PlanningSession {
    inner: Mutex<SessionInner>,
}

impl PlanningSession {
    pub fn new(planner: Box<dyn PathPlanner>, board: Box<dyn CollisionBoard>) -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                planner,
                board,
                registry: RoadmapRegistry::new(),
            }),
        }
    }

    /// Solve one planning request.
    ///
    /// Ensures the spec's roadmap is resident, converts `occupancy` into a
    /// per-edge collision mask, resolves the start configuration and the
    /// goal onto roadmap vertices, and runs the search. Start and goal are
    /// re-derived fresh on every call; nothing persists between calls
    /// beyond the registry's caches. Failures abort immediately, are never
    /// retried, and leave all cached state valid.
    pub fn solve(
        &self,
        spec: &RoadmapSpecification,
        start_config: &JointConfig,
        goal: &RapidPlanGoal,
        occupancy: &OccupancyData,
    ) -> Result<PathResult> {
        let mut inner = self.lock();
        inner.solve(spec, start_config, goal, occupancy)
    }

    /// Solve and map the waypoints through the roadmap's configuration
    /// array into a joint-space path.
    pub fn solve_path(
        &self,
        spec: &RoadmapSpecification,
        start_config: &JointConfig,
        goal: &RapidPlanGoal,
        occupancy: &OccupancyData,
    ) -> Result<Vec<JointConfig>> {
        let mut inner = self.lock();
        let result = inner.solve(spec, start_config, goal, occupancy)?;
        log::debug!("Solution waypoint ids: {:?}", result.waypoints);
        let configs = inner.planner.configs();
        Ok(result
            .waypoints
            .iter()
            .map(|&id| configs[id].clone())
            .collect())
    }

    /// Id of the currently resident roadmap, if any.
    pub fn loaded_roadmap(&self) -> Option<String> {
        self.lock().registry.loaded().map(str::to_string)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SessionInner {
    fn solve(
        &mut self,
        spec: &RoadmapSpecification,
        start_config: &JointConfig,
        goal: &RapidPlanGoal,
        occupancy: &OccupancyData,
    ) -> Result<PathResult> {
        let index = self
            .registry
            .ensure_loaded(spec, self.planner.as_mut(), self.board.as_mut())?;

        let edge_count = self.planner.edges().len();
        let mask = self.board.check_scene(occupancy, index, edge_count)?;

        let start_id = goal::closest_config_id(start_config, self.planner.configs())?;
        let resolved = goal::resolve(goal, self.planner.configs())?;

        let outcome = self.planner.find_path(start_id, &resolved, &mask);
        if outcome.status != STATUS_OK {
            let message = self.planner.error_string(outcome.status);
            log::error!(
                "Search failed on roadmap '{}' ({}): {}",
                spec.roadmap_id,
                outcome.status,
                message
            );
            return Err(MargaError::Search {
                code: outcome.status,
                message,
            });
        }

        log::info!(
            "Found solution path with {} waypoints on roadmap '{}'",
            outcome.waypoints.len(),
            spec.roadmap_id
        );
        Ok(PathResult {
            waypoints: outcome.waypoints,
            edges: outcome.edges,
        })
    }
}
