//! Brick Campaign - procedural level campaigns for brick-breaker games
//!
//! Core modules:
//! - `levelgen`: Deterministic level generation (shapes, builders, orchestrator)
//! - `colorize`: Palette band resolution for generated bricks
//! - `settings`: Campaign configuration
//! - `error`: Error types

pub mod colorize;
pub mod error;
pub mod levelgen;
pub mod settings;

pub use colorize::{BandResolver, BrickColor, ColorPattern, pick_palette};
pub use error::{ConfigError, GenerationError, ParseError, SettingsError};
pub use levelgen::{Campaign, Grid, LevelGenerator, LevelMeta, RandomStream, SymmetryHint};
pub use settings::{CampaignSettings, LifePatternScope};

/// Campaign defaults
pub mod consts {
    /// Grid rows
    pub const DEFAULT_ROWS: usize = 18;
    /// Grid columns
    pub const DEFAULT_COLS: usize = 12;
    /// Hit points of the toughest brick in the last level
    pub const DEFAULT_MAX_HIT_POINTS: u32 = 10;
    /// Levels per campaign
    pub const DEFAULT_TOTAL_LEVELS: usize = 15;
}
