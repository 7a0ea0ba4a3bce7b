//! Shape catalogs: named binary stencils used as stamping primitives
//!
//! Two catalogs exist:
//! - ordinary shapes, small and composited many times per level
//! - special shapes, pictures that fill most of a level on their own
//!
//! Declared order is part of the determinism contract: a random pick is a
//! uniform index into the catalog, so reordering entries changes campaigns.

use crate::error::ConfigError;

use super::rng::RandomStream;

/// Stamping window of the symmetric builder, in half-width design units.
/// Ordinary shapes must fit inside it.
pub const DESIGN_HALF_WIDTH: usize = 8;
pub const DESIGN_HEIGHT: usize = 15;

/// An immutable named stencil. Rows may differ in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: String,
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Parse a stencil from text rows. Only `'1'` fills a cell.
    pub fn parse(name: &str, rows: &[&str]) -> Result<Self, ConfigError> {
        let malformed = |reason| ConfigError::MalformedShape {
            name: name.to_string(),
            reason,
        };

        if rows.is_empty() {
            return Err(malformed("no rows"));
        }
        if rows[0].is_empty() {
            return Err(malformed("first row is empty"));
        }

        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '1').collect())
            .collect();

        if !rows.iter().flatten().any(|&filled| filled) {
            return Err(malformed("no filled cells"));
        }

        Ok(Self {
            name: name.to_string(),
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of the first row
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether (x, y) is filled. Out-of-range coordinates are empty.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Filled cells as (x, y) pairs, row by row
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(x, _)| (x, y))
        })
    }

    /// Number of filled cells
    pub fn fill_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&f| f).count()
    }

    /// Whether the stencil fits the symmetric builder's stamping window
    pub fn fits_design_space(&self) -> bool {
        self.width() / 2 < DESIGN_HALF_WIDTH && self.height() < DESIGN_HEIGHT
    }
}

/// Which role a catalog plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Ordinary,
    Special,
}

/// Ordered, name-unique collection of shapes
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    kind: CatalogKind,
    shapes: Vec<Shape>,
}

impl ShapeCatalog {
    /// Build a catalog, validating names and (for ordinary catalogs) sizes.
    /// An empty ordinary catalog is a configuration error; an empty special
    /// catalog just means no pictorial levels.
    pub fn new(kind: CatalogKind, shapes: Vec<Shape>) -> Result<Self, ConfigError> {
        if kind == CatalogKind::Ordinary && shapes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        for (i, shape) in shapes.iter().enumerate() {
            if shapes[..i].iter().any(|s| s.name == shape.name) {
                return Err(ConfigError::DuplicateShape(shape.name.clone()));
            }
            if kind == CatalogKind::Ordinary && !shape.fits_design_space() {
                return Err(ConfigError::MalformedShape {
                    name: shape.name.clone(),
                    reason: "too large for the stamping window",
                });
            }
        }

        Ok(Self { kind, shapes })
    }

    /// Build a catalog from `(name, rows)` text definitions
    pub fn from_definitions(
        kind: CatalogKind,
        defs: &[(&str, &[&str])],
    ) -> Result<Self, ConfigError> {
        let shapes = defs
            .iter()
            .map(|(name, rows)| Shape::parse(name, rows))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kind, shapes)
    }

    /// The built-in ordinary catalog
    pub fn builtin_ordinary() -> Result<Self, ConfigError> {
        Self::from_definitions(CatalogKind::Ordinary, ORDINARY_SHAPES)
    }

    /// The built-in pictorial catalog
    pub fn builtin_special() -> Result<Self, ConfigError> {
        Self::from_definitions(CatalogKind::Special, SPECIAL_SHAPES)
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shape at a catalog position
    pub fn by_index(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Shape by name
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.name == name)
    }

    /// Shape by name, failing with a configuration error when missing
    pub fn require(&self, name: &str) -> Result<&Shape, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownSpecialShape(name.to_string()))
    }

    /// Names in declared order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.name.as_str())
    }

    /// Uniform pick by catalog position (one draw)
    pub fn random_shape(&self, rng: &mut RandomStream) -> &Shape {
        &self.shapes[rng.index(self.shapes.len())]
    }
}

// ============================================================================
// BUILT-IN STENCILS
// ============================================================================

pub type ShapeDef = (&'static str, &'static [&'static str]);

pub const ORDINARY_SHAPES: &[ShapeDef] = &[
    ("square", &["111", "111", "111"]),
    ("rectangle", &["11111", "11111", "11111"]),
    ("wide_block", &["1111111", "1111111"]),
    ("tall_block", &["11", "11", "11", "11", "11"]),
    ("cross", &["00100", "11111", "00100"]),
    ("diamond", &["00100", "01110", "11111", "01110", "00100"]),
    ("triangle", &["00100", "01110", "11111"]),
    ("right_triangle_left", &["1", "11", "111"]),
    ("right_triangle_right", &["001", "011", "111"]),
    ("star", &["00100", "11111", "01110", "11111", "00100"]),
    (
        "heart",
        &["01100110", "11111111", "11111111", "01111110", "00111100", "00011000"],
    ),
    (
        "space_invader",
        &[
            "00111100", "01111110", "11011011", "11111111", "10111101", "00100100", "01000010",
        ],
    ),
    (
        "alternating_stairs",
        &["100000", "110000", "101000", "101100", "101010", "101011"],
    ),
    (
        "spiral",
        &[
            "1111111", "0000001", "1111101", "1000101", "1011101", "1010001", "1111111",
        ],
    ),
    (
        "zigzag",
        &[
            "1000001", "0100010", "0010100", "0001000", "0010100", "0100010", "1000001",
        ],
    ),
    ("hollow_pyramid", &["0001000", "0011100", "0100010", "1000001"]),
    (
        "circle",
        &["0011100", "0100010", "1000001", "1000001", "0100010", "0011100"],
    ),
    ("arrow", &["0001000", "0001000", "1111111", "0001000", "0001000"]),
    (
        "x_core",
        &[
            "1000001", "0100010", "0010100", "0001000", "0010100", "0100010", "1000001",
        ],
    ),
    (
        "maze",
        &[
            "1111111", "1000001", "1011101", "1010101", "1011101", "1000001", "1111111",
        ],
    ),
    (
        "waves",
        &["0000000", "0011000", "0100100", "1000010", "0100100", "0011000"],
    ),
    ("hexagon", &["0011100", "0100010", "1000001", "0100010", "0011100"]),
    ("letter_t", &["1111111", "0001000", "0001000", "0001000"]),
    (
        "dotted_circle",
        &["0010100", "0100010", "1000001", "0100010", "0010100"],
    ),
    (
        "shield",
        &["0011100", "0111110", "1111111", "1111111", "0111110", "0011100"],
    ),
    ("bridge", &["1100011", "1100011", "0000000", "1100011", "1100011"]),
    ("cloud", &["0111110", "1111111", "1111111", "0111110"]),
    (
        "hatched_diamond",
        &["0001000", "0010100", "0101010", "0010100", "0001000"],
    ),
    ("double_arrow", &["00100", "01110", "11111", "01110", "00100"]),
    ("mushroom", &["0011100", "0111110", "1111111", "0001000", "0001000"]),
    ("wheel", &["01110", "11011", "11011", "01110"]),
    ("puzzle", &["110011", "110011", "000000", "001100", "001100"]),
];

pub const SPECIAL_SHAPES: &[ShapeDef] = &[
    (
        "stepped_diamond",
        &[
            "010000000000000",
            "001000000000000",
            "010100000000000",
            "001010000000000",
            "010101000000000",
            "002020200000000",
            "020202020000000",
            "002020202000000",
            "030303030300000",
            "033333333330000",
            "000000000000000",
            "000000000000000",
            "000000000000000",
            "000000000000000",
            "000000000000000",
        ],
    ),
    (
        "crescent_moon",
        &[
            "000001111000000",
            "000111111100000",
            "001111111110000",
            "011111111000000",
            "111111110000000",
            "111111100000000",
            "111111000000000",
            "111110000000000",
            "111111000000000",
            "011111100000000",
            "011111110000000",
            "001111111000000",
            "000111111100000",
            "000011111110000",
            "000001111100000",
        ],
    ),
    (
        "hammer_and_sickle",
        &[
            "000000111000000",
            "000000011100000",
            "000000001110000",
            "000000000111000",
            "111100000011100",
            "011110000001110",
            "001111000000000",
            "000111100000000",
            "000011110000000",
            "000001111000000",
            "000000111100000",
            "000000011110000",
            "000000001111000",
            "000000000111100",
            "000000000011110",
        ],
    ),
    (
        "smiley",
        &[
            "000011111110000",
            "000100000001000",
            "001000000000100",
            "010000000000010",
            "100010000100001",
            "100000000000001",
            "100000000000001",
            "100100000001001",
            "100011111110001",
            "010000000000010",
            "001000000000100",
            "000100000001000",
            "000011111110000",
            "000000000000000",
            "000000000000000",
        ],
    ),
    (
        "spaceship",
        &[
            "000000001000000",
            "000000011100000",
            "000000111110000",
            "000001111111000",
            "000011111111100",
            "000111111111110",
            "001111111111111",
            "011111111111111",
            "111111111111111",
            "011111111111110",
            "001111111111100",
            "000111111111000",
            "000011111110000",
            "000001111100000",
            "000000111000000",
        ],
    ),
    (
        "christmas_tree",
        &[
            "000000100000000",
            "000000100000000",
            "000001110000000",
            "000001110000000",
            "000011111000000",
            "000011111000000",
            "000111111100000",
            "000111111100000",
            "001111111110000",
            "001111111110000",
            "011111111111000",
            "011111111111000",
            "111111111111100",
            "000001110000000",
            "000001110000000",
        ],
    ),
    (
        "skull",
        &[
            "000111111111000",
            "001100000001100",
            "011000000000110",
            "011000000000110",
            "110011111100111",
            "110110011011011",
            "110000000000011",
            "110000000000011",
            "110011111100011",
            "011001111001110",
            "011000000001110",
            "001100000011100",
            "000111111111000",
            "000000000000000",
            "000000000000000",
        ],
    ),
    (
        "musical_notes",
        &[
            "000000000000000",
            "000000000000000",
            "000000000000000",
            "000000000000000",
            "000011000110000",
            "000011001111000",
            "000011011000000",
            "000011110000000",
            "000011100000000",
            "000011000000000",
            "000011000000000",
            "000011000000000",
            "000000000000000",
            "000000000000000",
            "000000000000000",
        ],
    ),
    (
        "crown",
        &[
            "001111111111100",
            "010000000000010",
            "100000000000001",
            "100101111010001",
            "100101111010001",
            "100101111010001",
            "100101111010001",
            "100101111010001",
            "100101111010001",
            "100000000000001",
            "100000000000001",
            "100000000000001",
            "011111111111110",
            "000000000000000",
            "000000000000000",
        ],
    ),
    (
        "dragon",
        &[
            "000000000111100",
            "000000011000010",
            "000001100000010",
            "000110000000010",
            "001000000000100",
            "010000000001000",
            "100000000110000",
            "100000111000000",
            "110001000000000",
            "011010000000000",
            "001100000000000",
            "000111111000000",
            "000000001100000",
            "000000000110000",
            "000000000011000",
        ],
    ),
    (
        "heart",
        &["01100110", "11111111", "11111111", "01111110", "00111100", "00011000"],
    ),
    (
        "space_invader",
        &[
            "00111100", "01111110", "11011011", "11111111", "10111101", "00100100", "01000010",
        ],
    ),
];
