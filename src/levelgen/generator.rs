//! Campaign orchestrator
//!
//! Drives levels `0..total_levels`:
//! 1. hit-point bounds and density target from the difficulty curve
//! 2. special picture or symmetric composite
//! 3. life pattern (per configured scope)
//! 4. duplicate guard, regenerating the same index on a match
//!
//! The generator owns the only random stream. Construction selects the
//! special levels; the campaign itself is built on first request.

use crate::error::{ConfigError, GenerationError};
use crate::settings::CampaignSettings;

use super::campaign::{Campaign, LevelKind, LevelMeta};
use super::duplicate::find_duplicate;
use super::grid::Grid;
use super::life_pattern::apply_life_pattern;
use super::rng::RandomStream;
use super::shapes::ShapeCatalog;
use super::special::{SpecialSelection, build_special_level};
use super::symmetric::SymmetricBuilder;

/// Share of the reachable capacity a density target may ask for
pub const MAX_FILL_RATIO: f32 = 0.9;

/// Generation attempts per level before the duplicate guard gives up
pub const MAX_REGENERATION_ATTEMPTS: usize = 64;

/// Base brick count of the first level
pub const BASE_TARGET_BLOCKS: usize = 20;
/// Bricks added across the difficulty ramp
pub const TARGET_BLOCKS_RAMP: f32 = 150.0;

/// Hit-point bounds `(min, max)` for a level.
///
/// Min ramps from 1 toward `max_hp / 2`, max from 1 toward `max_hp`, both
/// rounded half-to-even and floored at 1. Min never exceeds max, and the last
/// level's max is exactly `max_hp`.
pub fn hit_point_bounds(index: usize, total_levels: usize, max_hp: i32) -> (i32, i32) {
    let i = index as f64;
    let steps = (total_levels as f64 - 1.0).max(1.0);
    let max_hp_f = max_hp as f64;

    let min = 1.0 + (i - 1.0) * ((max_hp_f * 0.5) - 1.0) / steps;
    let max = 1.0 + (i - 1.0) * (max_hp_f - 1.0) / steps;

    let mut hp_min = (min.round_ties_even() as i32).max(1);
    let mut hp_max = (max.round_ties_even() as i32).max(1);
    hp_min = hp_min.min(hp_max);

    if index + 1 == total_levels {
        hp_max = max_hp;
    }
    (hp_min, hp_max)
}

/// Density target for a level: `20 + floor(i / (total - 3) * 150)`.
/// Callers validate `total_levels > 3`.
pub fn target_blocks(index: usize, total_levels: usize) -> usize {
    let denom = total_levels.saturating_sub(3).max(1) as f32;
    BASE_TARGET_BLOCKS + ((index as f32 / denom) * TARGET_BLOCKS_RAMP).floor() as usize
}

/// Builds and caches one campaign
#[derive(Debug)]
pub struct LevelGenerator {
    settings: CampaignSettings,
    shapes: ShapeCatalog,
    specials: ShapeCatalog,
    rng: RandomStream,
    selection: SpecialSelection,
    campaign: Option<Campaign>,
}

impl LevelGenerator {
    /// Create a generator with the built-in catalogs
    pub fn new(settings: CampaignSettings) -> Result<Self, GenerationError> {
        let shapes = ShapeCatalog::builtin_ordinary()?;
        let specials = ShapeCatalog::builtin_special()?;
        Self::with_catalogs(settings, shapes, specials)
    }

    /// Create a generator with caller-provided catalogs
    pub fn with_catalogs(
        settings: CampaignSettings,
        shapes: ShapeCatalog,
        specials: ShapeCatalog,
    ) -> Result<Self, GenerationError> {
        settings.validate()?;
        if shapes.is_empty() {
            return Err(ConfigError::EmptyCatalog.into());
        }

        let mut rng = RandomStream::from_seed(settings.seed);
        log::info!(
            "Level generator seed: {} ({})",
            rng.effective_seed(),
            if settings.is_seeded() { "configured" } else { "random" }
        );

        let selection = SpecialSelection::select(
            settings.total_levels,
            &specials,
            settings.special_levels,
            &mut rng,
        )?;
        log::info!(
            "Special levels: {:?} -> {:?}",
            selection.indexes(),
            selection.shape_names()
        );

        Ok(Self {
            settings,
            shapes,
            specials,
            rng,
            selection,
            campaign: None,
        })
    }

    pub fn settings(&self) -> &CampaignSettings {
        &self.settings
    }

    pub fn effective_seed(&self) -> u64 {
        self.rng.effective_seed()
    }

    pub fn special_selection(&self) -> &SpecialSelection {
        &self.selection
    }

    /// The shared stream, for collaborators that draw after generation
    /// (palette choice, color resolution)
    pub fn rng_mut(&mut self) -> &mut RandomStream {
        &mut self.rng
    }

    /// Campaign if it has already been built
    pub fn campaign(&self) -> Option<&Campaign> {
        self.campaign.as_ref()
    }

    /// Build the campaign on first call, return the cached one afterwards
    pub fn generate(&mut self) -> Result<&Campaign, GenerationError> {
        let campaign = match self.campaign.take() {
            Some(campaign) => campaign,
            None => self.build_campaign()?,
        };
        Ok(self.campaign.insert(campaign))
    }

    /// All grids in level order, building them if needed
    pub fn all_levels(&mut self) -> Result<&[Grid], GenerationError> {
        Ok(self.generate()?.grids())
    }

    /// One grid, building the campaign if needed
    pub fn level(&mut self, index: usize) -> Result<&Grid, GenerationError> {
        self.generate()?.level(index)
    }

    /// Build (if needed) and hand over the campaign
    pub fn into_campaign(mut self) -> Result<Campaign, GenerationError> {
        match self.campaign.take() {
            Some(campaign) => Ok(campaign),
            None => self.build_campaign(),
        }
    }

    fn build_campaign(&mut self) -> Result<Campaign, GenerationError> {
        let rows = self.settings.rows;
        let cols = self.settings.cols;
        let total = self.settings.total_levels;
        let max_hp = self.settings.max_hit_points_i32();
        let scope = self.settings.life_pattern_scope;

        let builder = SymmetricBuilder::new(rows, cols, &self.shapes);
        let fill_cap = (builder.capacity() as f32 * MAX_FILL_RATIO) as usize;
        let mut clamp_logged = false;

        let mut grids: Vec<Grid> = Vec::with_capacity(total);
        let mut meta: Vec<LevelMeta> = Vec::with_capacity(total);
        let mut cursor = 0;

        for index in 0..total {
            let (hp_min, hp_max) = hit_point_bounds(index, total, max_hp);

            let mut target = target_blocks(index, total);
            if target > fill_cap {
                if !clamp_logged {
                    log::warn!(
                        "Level {} asks for {} blocks; clamping targets to {} ({}x{} grid)",
                        index,
                        target,
                        fill_cap,
                        rows,
                        cols
                    );
                    clamp_logged = true;
                }
                target = fill_cap;
            }

            let special = if self.selection.contains(index) {
                self.selection.shape_at(cursor)
            } else {
                None
            };

            let mut attempts = 0;
            let (grid, life_pattern) = loop {
                if attempts >= MAX_REGENERATION_ATTEMPTS {
                    return Err(GenerationError::DuplicateExhausted { index, attempts });
                }
                attempts += 1;

                let mut grid = match special {
                    Some(name) => build_special_level(
                        rows,
                        cols,
                        &self.specials,
                        name,
                        hp_min,
                        hp_max,
                        &mut self.rng,
                    )?,
                    None => builder.build(hp_min, hp_max, target, &mut self.rng)?,
                };

                let life_pattern = if scope.applies_to(special.is_some()) {
                    apply_life_pattern(&mut grid, hp_min, hp_max, &mut self.rng)
                } else {
                    None
                };

                match find_duplicate(&grid, &grids) {
                    Some(earlier) => {
                        log::debug!(
                            "Level {} attempt {} duplicates level {}, regenerating",
                            index,
                            attempts,
                            earlier
                        );
                    }
                    None => break (grid, life_pattern),
                }
            };

            let kind = match special {
                Some(name) => {
                    cursor += 1;
                    LevelKind::Special {
                        shape: name.to_string(),
                    }
                }
                None => LevelKind::Symmetric,
            };

            log::debug!(
                "Level {}: {:?}, {} blocks, hp {}..={}, pattern {}",
                index,
                kind,
                grid.block_count(),
                hp_min,
                hp_max,
                life_pattern.map(|p| p.as_str()).unwrap_or("none")
            );

            meta.push(LevelMeta {
                index,
                kind,
                hp_min,
                hp_max,
                target_blocks: target,
                block_count: grid.block_count(),
                life_pattern,
                attempts,
            });
            grids.push(grid);
        }

        log::info!(
            "Generated {} levels ({} special) with seed {}",
            grids.len(),
            cursor,
            self.rng.effective_seed()
        );
        Ok(Campaign::new(self.rng.effective_seed(), grids, meta))
    }
}
