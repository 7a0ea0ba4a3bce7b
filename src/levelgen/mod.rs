//! Level generation
//!
//! Every stage takes the campaign's single [`RandomStream`] by `&mut`, so
//! the same seed always yields the same campaign.

pub mod campaign;
pub mod duplicate;
pub mod generator;
pub mod grid;
pub mod life_pattern;
pub mod rng;
pub mod shapes;
pub mod special;
pub mod symmetric;

pub use campaign::{Campaign, LevelKind, LevelMeta, SymmetryHint};
pub use duplicate::find_duplicate;
pub use generator::{LevelGenerator, hit_point_bounds, target_blocks};
pub use grid::{EMPTY, Grid, INDESTRUCTIBLE};
pub use life_pattern::{LifePattern, apply_life_pattern, apply_pattern};
pub use rng::{RandomStream, StreamSeed};
pub use shapes::{CatalogKind, Shape, ShapeCatalog};
pub use special::{SpecialSelection, build_special_level};
pub use symmetric::{StampPair, SymmetricBuilder, reachable_capacity};
