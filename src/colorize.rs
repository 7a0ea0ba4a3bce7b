//! Brick color resolution
//!
//! Maps each grid cell to a palette slot. The last palette color is reserved
//! for indestructible bricks; every other color is a destructible "band".
//! Resolvers draw their parameters from the campaign's shared stream once, at
//! construction, so resolving the same cell twice gives the same answer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::levelgen::{Grid, RandomStream, SymmetryHint};

/// Smallest usable palette: one destructible color plus the indestructible one
pub const MIN_PALETTE_LEN: usize = 2;

/// Coloring layouts for destructible bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorPattern {
    HorizontalStripes,
    VerticalStripes,
    Checkerboard,
    ConcentricSquares,
    ConcentricCircles,
    Diagonal45,
    Diagonal135,
    RadialSectors,
    /// Band follows the brick's hit points
    LifeBands,
    /// Quadrant plus hit points
    SymmetryAware,
    /// Distance from the nearest edge plus hit points
    EdgeFalloff,
    /// Seeded sine wave across rows plus hit points
    RowWave,
    /// Stable per-cell grain plus hit points
    SeededShuffle,
}

impl ColorPattern {
    pub const ALL: [ColorPattern; 13] = [
        ColorPattern::HorizontalStripes,
        ColorPattern::VerticalStripes,
        ColorPattern::Checkerboard,
        ColorPattern::ConcentricSquares,
        ColorPattern::ConcentricCircles,
        ColorPattern::Diagonal45,
        ColorPattern::Diagonal135,
        ColorPattern::RadialSectors,
        ColorPattern::LifeBands,
        ColorPattern::SymmetryAware,
        ColorPattern::EdgeFalloff,
        ColorPattern::RowWave,
        ColorPattern::SeededShuffle,
    ];

    /// Selection weight under a symmetry hint (base weight 1.0)
    pub fn weight(&self, hint: SymmetryHint) -> f32 {
        match (hint, self) {
            (SymmetryHint::Quad, ColorPattern::SymmetryAware) => 3.0,
            (SymmetryHint::Quad, ColorPattern::EdgeFalloff) => 1.6,
            (SymmetryHint::Horizontal | SymmetryHint::Vertical, ColorPattern::RowWave) => 2.2,
            (SymmetryHint::Horizontal | SymmetryHint::Vertical, ColorPattern::SymmetryAware) => {
                1.4
            }
            (SymmetryHint::None, ColorPattern::SeededShuffle) => 2.4,
            _ => 1.0,
        }
    }

    /// Weighted pick for a level with the given hint
    pub fn pick(hint: SymmetryHint, rng: &mut RandomStream) -> Self {
        let total: f32 = Self::ALL.iter().map(|p| p.weight(hint)).sum();
        let mut roll = rng.unit_f32() * total;
        for pattern in Self::ALL {
            roll -= pattern.weight(hint);
            if roll <= 0.0 {
                return pattern;
            }
        }
        ColorPattern::SeededShuffle
    }
}

/// What to draw for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Empty,
    /// Last palette color
    Indestructible,
    /// Index into the destructible colors (`0..palette_len - 1`)
    Band(usize),
}

/// Choose a palette for the next level from the shared stream. `None` when
/// there are no palettes; the stream is not advanced then.
pub fn pick_palette(rng: &mut RandomStream, palette_count: usize) -> Option<usize> {
    if palette_count == 0 {
        return None;
    }
    Some(rng.index(palette_count))
}

/// FNV-style cell hash, stable across runs for a given seed
pub fn hash32(row: i32, col: i32, seed: u32) -> u32 {
    let mut h: u32 = 0x811C_9DC5;
    h = (h ^ row.wrapping_mul(73_856_093) as u32).wrapping_mul(16_777_619);
    h = (h ^ col.wrapping_mul(19_349_663) as u32).wrapping_mul(16_777_619);
    h = (h ^ seed).wrapping_mul(16_777_619);
    h & 0x7fff_ffff
}

#[derive(Debug, Clone)]
enum Mode {
    Pattern {
        pattern: ColorPattern,
        stripe_width: i32,
        sector_count: i32,
        invert_falloff: bool,
        seed: u32,
    },
    /// Fixed band per hit-point value
    Special(BTreeMap<i32, usize>),
}

/// Resolves grid cells to palette bands for one level
#[derive(Debug, Clone)]
pub struct BandResolver<'a> {
    grid: &'a Grid,
    bands: usize,
    mode: Mode,
}

impl<'a> BandResolver<'a> {
    /// Resolver for an ordinary level. Draws the pattern and its parameters
    /// from `rng`; `effective_seed` keys the seeded patterns.
    pub fn new(
        grid: &'a Grid,
        hint: SymmetryHint,
        palette_len: usize,
        effective_seed: u64,
        rng: &mut RandomStream,
    ) -> Result<Self, ConfigError> {
        let bands = destructible_bands(palette_len)?;

        let stripe_width = rng.range(1, 4);
        let sector_count = rng.range(4, 9);
        let pattern = ColorPattern::pick(hint, rng);
        let invert_falloff = pattern == ColorPattern::EdgeFalloff && rng.unit_f32() < 0.5;

        log::debug!(
            "Color pattern {:?} (hint {:?}, stripe {}, sectors {})",
            pattern,
            hint,
            stripe_width,
            sector_count
        );

        Ok(Self {
            grid,
            bands,
            mode: Mode::Pattern {
                pattern,
                stripe_width,
                sector_count,
                invert_falloff,
                seed: effective_seed as u32,
            },
        })
    }

    /// Resolver for a pictorial level: hit points 1 and 2 share the first
    /// band, every other value gets the next band in ascending order.
    pub fn special(grid: &'a Grid, palette_len: usize) -> Result<Self, ConfigError> {
        let bands = destructible_bands(palette_len)?;

        let mut values: Vec<i32> = grid.cells().iter().copied().filter(|&v| v > 0).collect();
        values.sort_unstable();
        values.dedup();

        let mut table = BTreeMap::new();
        let mut next = 0;
        if values.iter().any(|&v| v <= 2) {
            table.insert(1, 0);
            table.insert(2, 0);
            next = 1;
        }
        for v in values.into_iter().filter(|&v| v > 2) {
            table.insert(v, next);
            next += 1;
        }

        Ok(Self {
            grid,
            bands,
            mode: Mode::Special(table),
        })
    }

    /// Pattern in use, `None` for pictorial levels
    pub fn pattern(&self) -> Option<ColorPattern> {
        match &self.mode {
            Mode::Pattern { pattern, .. } => Some(*pattern),
            Mode::Special(_) => None,
        }
    }

    /// Color for one cell. Out-of-range cells are empty.
    pub fn resolve(&self, row: usize, col: usize) -> BrickColor {
        let cell = match self.grid.get(row, col) {
            Some(v) => v,
            None => return BrickColor::Empty,
        };
        if cell == 0 {
            return BrickColor::Empty;
        }
        if cell < 0 {
            return BrickColor::Indestructible;
        }

        let band = match &self.mode {
            Mode::Special(table) => table.get(&cell).map_or(cell as i64 - 1, |&b| b as i64),
            Mode::Pattern { .. } => self.pattern_band(row as i32, col as i32, cell),
        };
        BrickColor::Band(band.rem_euclid(self.bands as i64) as usize)
    }

    /// Colors for every cell, row-major
    pub fn resolve_grid(&self) -> Vec<BrickColor> {
        let mut out = Vec::with_capacity(self.grid.cells().len());
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                out.push(self.resolve(row, col));
            }
        }
        out
    }

    fn pattern_band(&self, r: i32, c: i32, cell: i32) -> i64 {
        let Mode::Pattern {
            pattern,
            stripe_width,
            sector_count,
            invert_falloff,
            seed,
        } = &self.mode
        else {
            return 0;
        };

        let rows = self.grid.rows() as i32;
        let cols = self.grid.cols() as i32;
        let cx = (cols - 1) as f32 * 0.5;
        let cy = (rows - 1) as f32 * 0.5;
        let life = (cell - 1).max(0) as i64;
        // Leave one band spare so waves never flatten to a single color
        let wave_bands = (self.bands as i64 - 1).max(1);

        match pattern {
            ColorPattern::HorizontalStripes => (r / stripe_width) as i64,
            ColorPattern::VerticalStripes => (c / stripe_width) as i64,
            ColorPattern::Checkerboard => (r + c) as i64,
            ColorPattern::ConcentricSquares => {
                let dx = (c - cx.round_ties_even() as i32).abs();
                let dy = (r - cy.round_ties_even() as i32).abs();
                dx.max(dy) as i64
            }
            ColorPattern::ConcentricCircles => {
                let dist = glam::Vec2::new(c as f32 - cx, r as f32 - cy).length();
                let ring = (rows.max(cols) as f32 / 10.0).max(1.0);
                (dist / ring).floor() as i64
            }
            ColorPattern::Diagonal45 => ((r + c) / stripe_width) as i64,
            ColorPattern::Diagonal135 => ((r - c) / stripe_width) as i64,
            ColorPattern::RadialSectors => {
                let angle = (r as f32 - cy).atan2(c as f32 - cx);
                let norm = (angle + std::f32::consts::PI) / std::f32::consts::TAU;
                (norm * *sector_count as f32).floor() as i64
            }
            ColorPattern::LifeBands => life,
            ColorPattern::SymmetryAware => {
                let quad = (if r < rows / 2 { 0 } else { 2 }) + (if c < cols / 2 { 0 } else { 1 });
                quad + life
            }
            ColorPattern::EdgeFalloff => {
                let edge = r.min(rows - 1 - r).min(c.min(cols - 1 - c));
                let max_edge = (rows.min(cols) / 2).max(1);
                let mut t = (1.0 - edge as f32 / max_edge as f32).clamp(0.0, 1.0);
                if *invert_falloff {
                    t = 1.0 - t;
                }
                life + (t * wave_bands as f32).floor() as i64
            }
            ColorPattern::RowWave => {
                let base_freq = std::f32::consts::TAU / rows.max(4) as f32;
                let jitter = (hash32(0, 0, *seed) % 100) as f32 / 400.0;
                let phase = (hash32(1, 2, *seed) % 628) as f32 / 100.0;
                let s = (r as f32 * base_freq * (1.0 + jitter) + phase).sin();
                let t = (s + 1.0) * 0.5;
                life + (t * wave_bands as f32).floor() as i64
            }
            ColorPattern::SeededShuffle => {
                let bands = self.bands as i64;
                life % bands + (hash32(r, c, *seed) as i64 % bands)
            }
        }
    }
}

fn destructible_bands(palette_len: usize) -> Result<usize, ConfigError> {
    if palette_len < MIN_PALETTE_LEN {
        return Err(ConfigError::PaletteTooSmall(palette_len));
    }
    Ok(palette_len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        Grid::from_rows(vec![
            vec![1, 2, 0, 3],
            vec![-1, 4, 4, 0],
            vec![2, 0, 5, 1],
        ])
        .unwrap()
    }

    #[test]
    fn test_palette_too_small() {
        let grid = sample_grid();
        let mut rng = RandomStream::seeded(1);
        assert_eq!(
            BandResolver::new(&grid, SymmetryHint::None, 1, 1, &mut rng).unwrap_err(),
            ConfigError::PaletteTooSmall(1)
        );
        assert_eq!(
            BandResolver::special(&grid, 0).unwrap_err(),
            ConfigError::PaletteTooSmall(0)
        );
    }

    #[test]
    fn test_empty_and_indestructible_cells() {
        let grid = sample_grid();
        for seed in 1..40 {
            let mut rng = RandomStream::seeded(seed);
            let resolver = BandResolver::new(&grid, SymmetryHint::Horizontal, 5, seed, &mut rng).unwrap();
            assert_eq!(resolver.resolve(0, 2), BrickColor::Empty);
            assert_eq!(resolver.resolve(1, 0), BrickColor::Indestructible);
            assert_eq!(resolver.resolve(9, 9), BrickColor::Empty);
            for color in resolver.resolve_grid() {
                if let BrickColor::Band(b) = color {
                    assert!(b < 4);
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_stable() {
        let grid = sample_grid();
        let mut rng = RandomStream::seeded(12);
        let resolver = BandResolver::new(&grid, SymmetryHint::Quad, 6, 12, &mut rng).unwrap();
        assert_eq!(resolver.resolve_grid(), resolver.resolve_grid());

        let mut again = RandomStream::seeded(12);
        let twin = BandResolver::new(&grid, SymmetryHint::Quad, 6, 12, &mut again).unwrap();
        assert_eq!(resolver.pattern(), twin.pattern());
        assert_eq!(resolver.resolve_grid(), twin.resolve_grid());
    }

    #[test]
    fn test_special_bands() {
        let grid = sample_grid();
        let resolver = BandResolver::special(&grid, 8).unwrap();
        assert_eq!(resolver.pattern(), None);
        // 1 and 2 share band 0, then 3, 4, 5 in order
        assert_eq!(resolver.resolve(0, 0), BrickColor::Band(0));
        assert_eq!(resolver.resolve(0, 1), BrickColor::Band(0));
        assert_eq!(resolver.resolve(0, 3), BrickColor::Band(1));
        assert_eq!(resolver.resolve(1, 1), BrickColor::Band(2));
        assert_eq!(resolver.resolve(2, 2), BrickColor::Band(3));
        assert_eq!(resolver.resolve(1, 0), BrickColor::Indestructible);
    }

    #[test]
    fn test_special_bands_wrap_small_palette() {
        let grid = sample_grid();
        let resolver = BandResolver::special(&grid, 3).unwrap();
        // Four classes over two bands
        assert_eq!(resolver.resolve(2, 2), BrickColor::Band(1));
        assert_eq!(resolver.resolve(1, 1), BrickColor::Band(0));
    }

    #[test]
    fn test_special_without_low_values() {
        let grid = Grid::from_rows(vec![vec![7, 0, 9]]).unwrap();
        let resolver = BandResolver::special(&grid, 8).unwrap();
        assert_eq!(resolver.resolve(0, 0), BrickColor::Band(0));
        assert_eq!(resolver.resolve(0, 2), BrickColor::Band(1));
    }

    #[test]
    fn test_hint_weights() {
        assert_eq!(ColorPattern::SymmetryAware.weight(SymmetryHint::Quad), 3.0);
        assert_eq!(ColorPattern::RowWave.weight(SymmetryHint::Vertical), 2.2);
        assert_eq!(ColorPattern::SeededShuffle.weight(SymmetryHint::None), 2.4);
        assert_eq!(ColorPattern::SeededShuffle.weight(SymmetryHint::Quad), 1.0);
    }

    #[test]
    fn test_pick_favors_weighted_pattern() {
        let mut rng = RandomStream::seeded(5);
        let shuffles = (0..2000)
            .filter(|_| ColorPattern::pick(SymmetryHint::None, &mut rng) == ColorPattern::SeededShuffle)
            .count();
        // 2.4 / 14.4 of picks, about 333
        assert!(shuffles > 220 && shuffles < 450, "got {shuffles}");
    }

    #[test]
    fn test_hash_is_stable_and_positive() {
        assert_eq!(hash32(3, 4, 99), hash32(3, 4, 99));
        assert_ne!(hash32(3, 4, 99), hash32(4, 3, 99));
        assert!(hash32(-5, 7, u32::MAX) <= 0x7fff_ffff);
    }

    #[test]
    fn test_pick_palette_in_range() {
        let mut rng = RandomStream::seeded(2);
        for _ in 0..100 {
            assert!(pick_palette(&mut rng, 6).is_some_and(|i| i < 6));
        }
        assert_eq!(pick_palette(&mut rng, 1), Some(0));
        assert_eq!(pick_palette(&mut rng, 0), None);
    }
}
