//! Deterministic in-process path planner.
//!
//! Stands in for the external search engine during development and tests.
//! Roadmaps are TOML files listing vertex configurations, edges, and
//! optionally per-vertex tool poses:
//!
//! ```toml
//! [[vertices]]
//! config = [0.0, 0.0]
//! tool_pose = { xyz = [0.4, 0.0, 0.3] }
//!
//! [[vertices]]
//! config = [1.0, 0.5]
//!
//! [[edges]]
//! a = 0
//! b = 1
//! ```
//!
//! Search is Dijkstra over unmasked edges with L1 joint-distance costs.
//! Transform goals select candidate vertices whose tool pose lies within
//! the per-axis tolerance and rank reachable candidates by the weighted
//! per-axis metric.

use super::{PathPlanner, SearchOutcome, STATUS_OK};
use crate::error::{MargaError, Result};
use crate::geometry::Pose;
use crate::goal::{config_distance, ResolvedGoal};
use crate::roadmap::JointConfig;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::path::Path;

/// No collision-free path connects the start to any goal vertex.
pub const STATUS_NO_PATH: i32 = 1;
/// The start vertex id is not a roadmap vertex.
pub const STATUS_INVALID_START: i32 = 2;
/// The goal resolves to no valid roadmap vertex.
pub const STATUS_INVALID_GOAL: i32 = 3;
/// A Transform goal was queried against a roadmap without tool poses.
pub const STATUS_NO_TOOL_POSES: i32 = 4;

#[derive(Debug, Deserialize)]
struct VertexFile {
    config: JointConfig,
    tool_pose: Option<Pose>,
}

#[derive(Debug, Deserialize)]
struct EdgeFile {
    a: usize,
    b: usize,
}

#[derive(Debug, Deserialize)]
struct RoadmapFile {
    vertices: Vec<VertexFile>,
    #[serde(default)]
    edges: Vec<EdgeFile>,
}

/// Queue entry for Dijkstra; min-heap on cost via reversed ordering.
#[derive(Debug)]
struct QueueNode {
    vertex: usize,
    cost: f32,
}

impl PartialEq for QueueNode {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex
    }
}

impl Eq for QueueNode {}

impl Ord for QueueNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower cost = higher priority)
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for QueueNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// In-process [`PathPlanner`] over TOML roadmap files.
#[derive(Debug, Default)]
pub struct SimPlanner {
    configs: Vec<JointConfig>,
    edges: Vec<(usize, usize)>,
    tool_poses: Vec<Option<Pose>>,
}

impl SimPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-axis pose deltas (x, y, z, roll, pitch, yaw), angles wrapped to
    /// [-pi, pi].
    fn pose_deltas(a: &Pose, b: &Pose) -> [f32; 6] {
        let mut d = [0.0; 6];
        for i in 0..3 {
            d[i] = a.xyz[i] - b.xyz[i];
            d[i + 3] = wrap_angle(a.rpy[i] - b.rpy[i]);
        }
        d
    }

    /// Goal vertex candidates for a resolved goal, or an error status.
    fn goal_candidates(&self, goal: &ResolvedGoal) -> std::result::Result<Vec<usize>, i32> {
        match goal {
            ResolvedGoal::StateIds(ids) => {
                let valid: Vec<usize> = ids
                    .iter()
                    .copied()
                    .filter(|&id| id < self.configs.len())
                    .collect();
                if valid.is_empty() {
                    Err(STATUS_INVALID_GOAL)
                } else {
                    Ok(valid)
                }
            }
            ResolvedGoal::ToolPose {
                pose, tolerance, ..
            } => {
                if self.tool_poses.iter().all(Option::is_none) {
                    return Err(STATUS_NO_TOOL_POSES);
                }
                let candidates: Vec<usize> = self
                    .tool_poses
                    .iter()
                    .enumerate()
                    .filter_map(|(id, tp)| tp.as_ref().map(|tp| (id, tp)))
                    .filter(|&(_, tp)| {
                        Self::pose_deltas(pose, tp)
                            .iter()
                            .zip(tolerance)
                            .all(|(d, tol)| d.abs() <= *tol)
                    })
                    .map(|(id, _)| id)
                    .collect();
                if candidates.is_empty() {
                    Err(STATUS_INVALID_GOAL)
                } else {
                    Ok(candidates)
                }
            }
        }
    }

    /// Pick the best reached candidate: Transform goals use the weighted
    /// per-axis metric, state-id goals the accumulated path cost. Ties go
    /// to the lowest vertex id.
    fn best_candidate(
        &self,
        candidates: &[usize],
        goal: &ResolvedGoal,
        dist: &[f32],
    ) -> Option<usize> {
        let reached = candidates.iter().copied().filter(|&c| dist[c].is_finite());
        match goal {
            ResolvedGoal::ToolPose { pose, weights, .. } => reached.min_by(|&a, &b| {
                let score = |id: usize| match &self.tool_poses[id] {
                    Some(tp) => Self::pose_deltas(pose, tp)
                        .iter()
                        .zip(weights)
                        .map(|(d, w)| w * d.abs())
                        .sum::<f32>(),
                    None => f32::INFINITY,
                };
                score(a)
                    .partial_cmp(&score(b))
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            }),
            ResolvedGoal::StateIds(_) => reached.min_by(|&a, &b| {
                dist[a]
                    .partial_cmp(&dist[b])
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            }),
        }
    }
}

impl PathPlanner for SimPlanner {
    fn load_roadmap(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MargaError::Load(format!("cannot read roadmap file {}: {}", path.display(), e))
        })?;
        let file: RoadmapFile = toml::from_str(&content)
            .map_err(|e| MargaError::Load(format!("malformed roadmap file: {}", e)))?;

        let n = file.vertices.len();
        for edge in &file.edges {
            if edge.a >= n || edge.b >= n {
                return Err(MargaError::Load(format!(
                    "edge ({}, {}) references a vertex outside 0..{}",
                    edge.a, edge.b, n
                )));
            }
        }

        // Replace the resident roadmap only after the file checked out
        self.configs = file.vertices.iter().map(|v| v.config.clone()).collect();
        self.tool_poses = file.vertices.iter().map(|v| v.tool_pose).collect();
        self.edges = file.edges.iter().map(|e| (e.a, e.b)).collect();
        log::info!(
            "Sim planner loaded roadmap {}: {} vertices, {} edges",
            path.display(),
            self.configs.len(),
            self.edges.len()
        );
        Ok(())
    }

    fn configs(&self) -> &[JointConfig] {
        &self.configs
    }

    fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    fn find_path(&mut self, start: usize, goal: &ResolvedGoal, mask: &[u8]) -> SearchOutcome {
        let n = self.configs.len();
        if start >= n {
            return SearchOutcome::failure(STATUS_INVALID_START);
        }
        let candidates = match self.goal_candidates(goal) {
            Ok(c) => c,
            Err(status) => return SearchOutcome::failure(status),
        };

        // Dijkstra over unmasked edges, undirected, L1 edge costs
        let mut dist = vec![f32::INFINITY; n];
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; n]; // (vertex, edge id)
        let mut heap = BinaryHeap::new();
        dist[start] = 0.0;
        heap.push(QueueNode {
            vertex: start,
            cost: 0.0,
        });

        while let Some(QueueNode { vertex, cost }) = heap.pop() {
            if cost > dist[vertex] {
                continue;
            }
            for (edge_id, &(a, b)) in self.edges.iter().enumerate() {
                if mask.get(edge_id).copied().unwrap_or(0) != 0 {
                    continue;
                }
                let next = match (a == vertex, b == vertex) {
                    (true, _) => b,
                    (_, true) => a,
                    _ => continue,
                };
                let step = config_distance(&self.configs[vertex], &self.configs[next]);
                let candidate_cost = cost + step;
                if candidate_cost < dist[next] {
                    dist[next] = candidate_cost;
                    prev[next] = Some((vertex, edge_id));
                    heap.push(QueueNode {
                        vertex: next,
                        cost: candidate_cost,
                    });
                }
            }
        }

        let Some(goal_id) = self.best_candidate(&candidates, goal, &dist) else {
            return SearchOutcome::failure(STATUS_NO_PATH);
        };

        // Walk the predecessor chain back to the start
        let mut waypoints = vec![goal_id];
        let mut edge_ids = Vec::new();
        let mut cursor = goal_id;
        while let Some((parent, edge_id)) = prev[cursor] {
            waypoints.push(parent);
            edge_ids.push(edge_id);
            cursor = parent;
        }
        waypoints.reverse();
        edge_ids.reverse();

        SearchOutcome {
            status: STATUS_OK,
            waypoints,
            edges: edge_ids,
        }
    }

    fn error_string(&self, status: i32) -> String {
        match status {
            STATUS_OK => "success".to_string(),
            STATUS_NO_PATH => "no collision-free path to any goal vertex".to_string(),
            STATUS_INVALID_START => "start vertex id is not in the roadmap".to_string(),
            STATUS_INVALID_GOAL => "goal resolves to no valid roadmap vertex".to_string(),
            STATUS_NO_TOOL_POSES => "roadmap carries no tool poses for Cartesian goals".to_string(),
            other => format!("unknown status {}", other),
        }
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % std::f32::consts::TAU;
    if a > std::f32::consts::PI {
        a -= std::f32::consts::TAU;
    } else if a < -std::f32::consts::PI {
        a += std::f32::consts::TAU;
    }
    a
}
