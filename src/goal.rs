//! Goal representation and resolution.
//!
//! Goals arrive in one of three forms. Transform goals pass straight through
//! to the search engine, which performs its own vertex selection under a
//! Cartesian metric. Joint-state goals are lowered to the nearest roadmap
//! vertex before search, so downstream logic only ever sees tool poses or
//! explicit vertex id sets.

use crate::error::{MargaError, Result};
use crate::geometry::Pose;
use crate::roadmap::JointConfig;

/// A goal for one solve request. Exactly one variant is active.
#[derive(Clone, Debug)]
pub enum RapidPlanGoal {
    /// Cartesian tool pose with per-axis tolerance and weight
    /// (x, y, z, roll, pitch, yaw).
    Transform {
        pose: Pose,
        tolerance: [f32; 6],
        weights: [f32; 6],
    },
    /// Explicit joint-space target; lowered to the nearest roadmap vertex.
    JointState(JointConfig),
    /// Explicit set of known roadmap vertex ids.
    StateIds(Vec<usize>),
}

/// Goal after resolution, consumable by any engine without knowing which
/// source variant produced it.
#[derive(Clone, Debug)]
pub enum ResolvedGoal {
    ToolPose {
        pose: Pose,
        tolerance: [f32; 6],
        weights: [f32; 6],
    },
    StateIds(Vec<usize>),
}

/// Summed absolute per-joint difference (L1 distance).
///
/// Configurations of different lengths are not comparable; the distance is
/// infinite so the vertex drops out of nearest-vertex selection.
pub fn config_distance(first: &[f32], second: &[f32]) -> f32 {
    if first.len() != second.len() {
        return f32::INFINITY;
    }
    first
        .iter()
        .zip(second)
        .map(|(a, b)| (a - b).abs())
        .sum()
}

/// Index of the closest roadmap configuration to `config`.
///
/// Ties break to the lowest index. Returns a configuration error when no
/// roadmap vertex has a matching joint count (or the list is empty), since
/// no meaningful nearest vertex exists.
pub fn closest_config_id(config: &[f32], configs: &[JointConfig]) -> Result<usize> {
    let mut result_id = None;
    let mut min_distance = f32::INFINITY;
    for (i, candidate) in configs.iter().enumerate() {
        let distance = config_distance(config, candidate);
        if distance < min_distance {
            min_distance = distance;
            result_id = Some(i);
        }
    }
    result_id.ok_or_else(|| {
        MargaError::Config(format!(
            "no roadmap vertex matches configuration length {}",
            config.len()
        ))
    })
}

/// Lower a goal into its search-compatible form.
pub fn resolve(goal: &RapidPlanGoal, configs: &[JointConfig]) -> Result<ResolvedGoal> {
    match goal {
        RapidPlanGoal::Transform {
            pose,
            tolerance,
            weights,
        } => Ok(ResolvedGoal::ToolPose {
            pose: *pose,
            tolerance: *tolerance,
            weights: *weights,
        }),
        RapidPlanGoal::JointState(target) => {
            let id = closest_config_id(target, configs)?;
            Ok(ResolvedGoal::StateIds(vec![id]))
        }
        RapidPlanGoal::StateIds(ids) => Ok(ResolvedGoal::StateIds(ids.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetry_and_identity() {
        let a = vec![0.1, -0.5, 2.0];
        let b = vec![1.0, 0.5, -1.0];
        assert_eq!(config_distance(&a, &b), config_distance(&b, &a));
        assert_eq!(config_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_length_mismatch_is_infinite() {
        assert_eq!(config_distance(&[0.0], &[0.0, 0.0]), f32::INFINITY);
    }

    #[test]
    fn test_closest_config() {
        let configs = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]];
        assert_eq!(closest_config_id(&[0.9, 0.9], &configs).unwrap(), 1);
    }

    #[test]
    fn test_closest_config_tie_breaks_low() {
        let configs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        // Both candidates are at L1 distance 1.0 from the origin
        assert_eq!(closest_config_id(&[0.0, 0.0], &configs).unwrap(), 0);
    }

    #[test]
    fn test_closest_config_all_mismatched_is_error() {
        let configs = vec![vec![0.0, 0.0, 0.0]];
        assert!(matches!(
            closest_config_id(&[0.0, 0.0], &configs),
            Err(MargaError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_joint_state_lowers_to_singleton() {
        let configs = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let goal = RapidPlanGoal::JointState(vec![1.1, 0.9]);
        match resolve(&goal, &configs).unwrap() {
            ResolvedGoal::StateIds(ids) => assert_eq!(ids, vec![1]),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_state_ids_passthrough() {
        let goal = RapidPlanGoal::StateIds(vec![3, 7]);
        match resolve(&goal, &[]).unwrap() {
            ResolvedGoal::StateIds(ids) => assert_eq!(ids, vec![3, 7]),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }
}
