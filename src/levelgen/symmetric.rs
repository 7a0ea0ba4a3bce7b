//! Symmetric level builder
//!
//! Stamps random ordinary shapes, each paired with its left/right mirror,
//! until the grid holds at least the target number of bricks.
//!
//! Offsets live in a half-width design space: x is drawn in
//! `[0, 8 - width / 2)`, y in `[0, 15 - height)`, and the mirror copy lands at
//! `14 - x - width + 1`. Stamps beyond the grid edge are clipped.

use glam::IVec2;

use crate::error::{ConfigError, GenerationError};

use super::grid::Grid;
use super::rng::RandomStream;
use super::shapes::{DESIGN_HALF_WIDTH, DESIGN_HEIGHT, ShapeCatalog};

/// Column the mirror copy is reflected around (design units)
pub const MIRROR_AXIS: i32 = 14;

/// Stamp pairs allowed before giving up on a target
pub const MAX_STAMP_PAIRS: usize = 10_000;

/// Cells of a `rows x cols` grid that any stamp can reach
pub fn reachable_capacity(rows: usize, cols: usize) -> usize {
    let reach_rows = DESIGN_HEIGHT - 1;
    let reach_cols = MIRROR_AXIS as usize + 1;
    rows.min(reach_rows) * cols.min(reach_cols)
}

/// Hit points from `[min, max]` where every value below `max` has weight 3
/// and `max` has weight 1
pub fn weighted_hit_points(rng: &mut RandomStream, min: i32, max: i32) -> i32 {
    if max <= min {
        return max.max(min);
    }
    // 3 * (max - min) overflows i32 for large ceilings
    let low_slots = 3 * (max as i64 - min as i64);
    let roll = rng.range_i64(0, low_slots + 1);
    if roll < low_slots {
        min + (roll / 3) as i32
    } else {
        max
    }
}

/// One stamped pair, recorded for inspection and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampPair {
    pub shape: String,
    pub offset: IVec2,
    pub mirror_offset: IVec2,
    pub hp: i32,
}

/// Builds mirrored levels from an ordinary catalog
#[derive(Debug, Clone, Copy)]
pub struct SymmetricBuilder<'a> {
    rows: usize,
    cols: usize,
    catalog: &'a ShapeCatalog,
}

impl<'a> SymmetricBuilder<'a> {
    pub fn new(rows: usize, cols: usize, catalog: &'a ShapeCatalog) -> Self {
        Self {
            rows,
            cols,
            catalog,
        }
    }

    /// Reachable capacity of this builder's grid
    pub fn capacity(&self) -> usize {
        reachable_capacity(self.rows, self.cols)
    }

    /// Build a level with at least `target` bricks. Overshoot is expected.
    pub fn build(
        &self,
        hp_min: i32,
        hp_max: i32,
        target: usize,
        rng: &mut RandomStream,
    ) -> Result<Grid, GenerationError> {
        self.build_inner(hp_min, hp_max, target, rng, None)
    }

    /// Like [`build`](Self::build), also returning every stamp pair in order
    pub fn build_traced(
        &self,
        hp_min: i32,
        hp_max: i32,
        target: usize,
        rng: &mut RandomStream,
    ) -> Result<(Grid, Vec<StampPair>), GenerationError> {
        let mut trace = Vec::new();
        let grid = self.build_inner(hp_min, hp_max, target, rng, Some(&mut trace))?;
        Ok((grid, trace))
    }

    fn build_inner(
        &self,
        hp_min: i32,
        hp_max: i32,
        target: usize,
        rng: &mut RandomStream,
        mut trace: Option<&mut Vec<StampPair>>,
    ) -> Result<Grid, GenerationError> {
        let capacity = self.capacity();
        if target > capacity {
            return Err(ConfigError::TargetExceedsCapacity { target, capacity }.into());
        }

        let mut grid = Grid::new(self.rows, self.cols);
        let mut stamps = 0;

        while grid.block_count() < target {
            if stamps >= MAX_STAMP_PAIRS {
                return Err(GenerationError::NonConvergence {
                    stamps,
                    reached: grid.block_count(),
                    target,
                });
            }

            let shape = self.catalog.random_shape(rng);
            let width = shape.width() as i32;
            let height = shape.height() as i32;

            let x = rng.range(0, DESIGN_HALF_WIDTH as i32 - width / 2);
            let y = rng.range(0, DESIGN_HEIGHT as i32 - height);
            let hp = weighted_hit_points(rng, hp_min, hp_max);

            let offset = IVec2::new(x, y);
            let mirror_offset = IVec2::new(MIRROR_AXIS - x - width + 1, y);
            grid.stamp(shape, offset, hp);
            grid.stamp(shape, mirror_offset, hp);

            if let Some(trace) = trace.as_deref_mut() {
                trace.push(StampPair {
                    shape: shape.name().to_string(),
                    offset,
                    mirror_offset,
                    hp,
                });
            }
            stamps += 1;
        }

        Ok(grid)
    }
}
