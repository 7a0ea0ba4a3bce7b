//! Campaign settings
//!
//! Persisted as JSON. Missing fields fall back to defaults, so a config file
//! only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{ConfigError, SettingsError};

/// Which levels receive a life pattern after layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LifePatternScope {
    #[default]
    AllLevels,
    /// Pictorial levels keep their single hit-point value
    SymmetricOnly,
}

impl LifePatternScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifePatternScope::AllLevels => "AllLevels",
            LifePatternScope::SymmetricOnly => "SymmetricOnly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" | "alllevels" | "all_levels" => Some(LifePatternScope::AllLevels),
            "symmetric" | "symmetriconly" | "symmetric_only" => {
                Some(LifePatternScope::SymmetricOnly)
            }
            _ => None,
        }
    }

    /// Whether a level of the given kind gets a pattern
    pub fn applies_to(&self, special: bool) -> bool {
        match self {
            LifePatternScope::AllLevels => true,
            LifePatternScope::SymmetricOnly => !special,
        }
    }
}

/// Everything that shapes a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignSettings {
    // === Grid ===
    pub rows: usize,
    pub cols: usize,

    // === Difficulty ===
    /// Hit points of the toughest brick in the last level
    pub max_hit_points: u32,
    pub total_levels: usize,

    // === Randomness ===
    /// `None` or `Some(0)` draws a fresh seed
    pub seed: Option<u64>,

    // === Post-processing ===
    pub life_pattern_scope: LifePatternScope,
    /// Exact number of pictorial levels; `None` draws the count
    pub special_levels: Option<usize>,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            rows: consts::DEFAULT_ROWS,
            cols: consts::DEFAULT_COLS,
            max_hit_points: consts::DEFAULT_MAX_HIT_POINTS,
            total_levels: consts::DEFAULT_TOTAL_LEVELS,
            seed: None,
            life_pattern_scope: LifePatternScope::AllLevels,
            special_levels: None,
        }
    }
}

impl CampaignSettings {
    /// Default settings with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Whether the campaign is reproducible from these settings alone
    pub fn is_seeded(&self) -> bool {
        matches!(self.seed, Some(s) if s != 0)
    }

    /// Max hit points as a cell value, saturating at `i32::MAX`
    pub fn max_hit_points_i32(&self) -> i32 {
        i32::try_from(self.max_hit_points).unwrap_or(i32::MAX)
    }

    /// Check every setting that would make generation impossible
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.max_hit_points == 0 {
            return Err(ConfigError::NoHitPoints);
        }
        if self.total_levels <= 3 {
            return Err(ConfigError::TooFewLevels(self.total_levels));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
