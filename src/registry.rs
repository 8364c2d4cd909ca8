//! Roadmap registry: which roadmaps exist, which one is resident, and which
//! hardware index each one was assigned.
//!
//! The search engine holds a single roadmap's graph at a time, so residency
//! is a scalar. Specs are append-only (first write wins) and indices are
//! stable for the process lifetime once assigned; a board implementation
//! that evicts under capacity pressure owns that policy and must surface it
//! through its own errors.

use crate::engine::{CollisionBoard, PathPlanner};
use crate::error::Result;
use crate::roadmap::RoadmapSpecification;
use std::collections::HashMap;

/// Spec and index caches plus the currently loaded roadmap id.
///
/// Mutated only inside the planning session's exclusive section.
#[derive(Default)]
pub struct RoadmapRegistry {
    specs: HashMap<String, RoadmapSpecification>,
    indices: HashMap<String, u16>,
    loaded: Option<String>,
}

impl RoadmapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the currently resident roadmap, if any.
    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Registered specification for an id, if seen before.
    pub fn spec(&self, roadmap_id: &str) -> Option<&RoadmapSpecification> {
        self.specs.get(roadmap_id)
    }

    /// Make `spec`'s roadmap resident in the planner and indexed on the
    /// board, and return its hardware index.
    ///
    /// Loading is skipped when the roadmap is already resident, and index
    /// assignment is skipped when one is already cached, so calling this
    /// repeatedly with the same id touches the engine at most once.
    pub fn ensure_loaded(
        &mut self,
        spec: &RoadmapSpecification,
        planner: &mut dyn PathPlanner,
        board: &mut dyn CollisionBoard,
    ) -> Result<u16> {
        spec.validate()?;

        // First write wins; later differing registrations are kept out of
        // the cache but flagged, since callers resubmit specs per solve.
        let known = self
            .specs
            .entry(spec.roadmap_id.clone())
            .or_insert_with(|| spec.clone());
        if *known != *spec {
            log::warn!(
                "Roadmap '{}' re-registered with a different specification; keeping the first",
                spec.roadmap_id
            );
        }
        let files = known.files.clone();

        if self.loaded.as_deref() != Some(spec.roadmap_id.as_str()) {
            log::info!(
                "Loading roadmap '{}' from {}",
                spec.roadmap_id,
                files.connectivity.display()
            );
            planner.load_roadmap(&files.connectivity)?;
            self.loaded = Some(spec.roadmap_id.clone());
        }

        if let Some(&index) = self.indices.get(&spec.roadmap_id) {
            return Ok(index);
        }
        let index = board.write_roadmap(&files.occupancy)?;
        log::info!(
            "Roadmap '{}' assigned hardware index {}",
            spec.roadmap_id,
            index
        );
        self.indices.insert(spec.roadmap_id.clone(), index);
        Ok(index)
    }
}
