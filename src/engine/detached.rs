//! Stand-in collision board for running without attached hardware.

use super::CollisionBoard;
use crate::error::Result;
use crate::occupancy::OccupancyData;
use std::path::Path;

/// Deterministic no-hardware board: indices are handed out sequentially
/// starting at 0 and never evicted; every scene check reports all edges
/// clear. Useful for bring-up and for planning in empty space.
#[derive(Debug, Default)]
pub struct DetachedBoard {
    next_index: u16,
}

impl DetachedBoard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollisionBoard for DetachedBoard {
    fn write_roadmap(&mut self, path: &Path) -> Result<u16> {
        let index = self.next_index;
        self.next_index += 1;
        log::debug!(
            "Detached board assigned index {} to roadmap file {}",
            index,
            path.display()
        );
        Ok(index)
    }

    fn check_scene(
        &mut self,
        _occupancy: &OccupancyData,
        _index: u16,
        edge_count: usize,
    ) -> Result<Vec<u8>> {
        Ok(vec![0; edge_count])
    }
}
