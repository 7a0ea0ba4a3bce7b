//! Error types for campaign generation
//!
//! Configuration problems are fatal and surface before any level is built.
//! Generation errors cover the bounded loops (stamping, regeneration) and
//! out-of-range lookups.

use thiserror::Error;

/// A fatal misconfiguration. Campaign construction aborts on the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("max hit points must be at least 1")]
    NoHitPoints,

    #[error("campaign needs more than 3 levels (got {0})")]
    TooFewLevels(usize),

    #[error("shape catalog is empty")]
    EmptyCatalog,

    #[error("duplicate shape name `{0}` in catalog")]
    DuplicateShape(String),

    #[error("shape `{name}` is malformed: {reason}")]
    MalformedShape { name: String, reason: &'static str },

    #[error("unknown special shape `{0}`")]
    UnknownSpecialShape(String),

    #[error("requested {requested} special levels but at most {available} are possible")]
    TooManySpecialLevels { requested: usize, available: usize },

    #[error("target of {target} blocks exceeds reachable grid capacity of {capacity}")]
    TargetExceedsCapacity { target: usize, capacity: usize },

    #[error("palette needs at least 2 colors (got {0})")]
    PaletteTooSmall(usize),
}

/// Errors raised while building or querying a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("symmetric builder placed {stamps} stamp pairs but only reached {reached}/{target} blocks")]
    NonConvergence {
        stamps: usize,
        reached: usize,
        target: usize,
    },

    #[error("level {index} was a duplicate on all {attempts} attempts")]
    DuplicateExhausted { index: usize, attempts: usize },

    #[error("level index {index} out of range (campaign has {len} levels)")]
    LevelOutOfRange { index: usize, len: usize },
}

/// Failure to read the plain-text campaign format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// Failure to load or save a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
