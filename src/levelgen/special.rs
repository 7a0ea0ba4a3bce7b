//! Special (pictorial) level selection and construction
//!
//! The selector decides up front which level indices show a picture and
//! which picture each one gets. Pictures are never reused within a campaign.

use glam::IVec2;

use crate::error::ConfigError;

use super::grid::Grid;
use super::rng::RandomStream;
use super::shapes::ShapeCatalog;

/// Level indices flagged special, with their queued pictures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialSelection {
    /// Selected indices, in draw order, no duplicates
    indexes: Vec<usize>,
    /// Picture names, consumed in order as special levels are built
    shapes: Vec<String>,
}

impl SpecialSelection {
    /// Selection with no special levels
    pub fn none() -> Self {
        Self::default()
    }

    /// Choose special levels for a campaign of `total_levels`.
    ///
    /// With `requested == None` the count is drawn from
    /// `[min(1, total - 1), total / 3)`. The upper bound `total / 3` is
    /// excluded, so fifteen levels yield 1 to 4 specials, never 5. When the
    /// range is empty the lower bound is used. The count is then capped at
    /// both the catalog size and the candidate index pool. An explicit request
    /// beyond either is an error.
    pub fn select(
        total_levels: usize,
        catalog: &ShapeCatalog,
        requested: Option<usize>,
        rng: &mut RandomStream,
    ) -> Result<Self, ConfigError> {
        // Candidate indices are [0, pool)
        let pool = 2usize.max(total_levels.saturating_sub(2));
        let available = catalog.len().min(pool);

        let count = match requested {
            Some(n) if n > available => {
                return Err(ConfigError::TooManySpecialLevels {
                    requested: n,
                    available,
                });
            }
            Some(n) => n,
            None => {
                let lo = 1usize.min(total_levels.saturating_sub(1)) as i32;
                let hi = (total_levels / 3) as i32;
                let drawn = rng.range(lo, hi).max(0) as usize;
                if drawn > available {
                    log::warn!(
                        "Capping special levels at {} (drew {}, {} pictures available)",
                        available,
                        drawn,
                        catalog.len()
                    );
                }
                drawn.min(available)
            }
        };

        let mut indexes = Vec::with_capacity(count);
        while indexes.len() < count {
            let index = rng.range(0, pool as i32) as usize;
            if !indexes.contains(&index) {
                indexes.push(index);
            }
        }

        let mut shapes: Vec<String> = Vec::with_capacity(count);
        while shapes.len() < count {
            let name = match catalog.by_index(rng.index(catalog.len())) {
                Some(shape) => shape.name(),
                None => break,
            };
            if !shapes.iter().any(|s| s == name) {
                shapes.push(name.to_string());
            }
        }

        Ok(Self { indexes, shapes })
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Whether `index` was selected as special
    pub fn contains(&self, index: usize) -> bool {
        self.indexes.contains(&index)
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Queued picture at a cursor position
    pub fn shape_at(&self, cursor: usize) -> Option<&str> {
        self.shapes.get(cursor).map(String::as_str)
    }

    pub fn shape_names(&self) -> &[String] {
        &self.shapes
    }
}

/// Center a picture on an empty grid with a single hit-point value.
///
/// Offsets are computed against the crossed dimensions, `(rows - width) / 2`
/// for x and `(cols - height) / 2` for y, truncating toward zero. The hit
/// points are drawn from `[hp_min, hp_max)`; `hp_min == hp_max` yields `hp_min`.
pub fn build_special_level(
    rows: usize,
    cols: usize,
    catalog: &ShapeCatalog,
    shape_name: &str,
    hp_min: i32,
    hp_max: i32,
    rng: &mut RandomStream,
) -> Result<Grid, ConfigError> {
    let shape = catalog.require(shape_name)?;
    let mut grid = Grid::new(rows, cols);

    let offset = IVec2::new(
        (rows as i32 - shape.width() as i32) / 2,
        (cols as i32 - shape.height() as i32) / 2,
    );
    let hp = rng.range(hp_min, hp_max);

    grid.stamp(shape, offset, hp);
    Ok(grid)
}
