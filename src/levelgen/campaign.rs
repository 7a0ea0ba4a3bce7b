//! The generated campaign and its per-level metadata
//!
//! A campaign is built once and is read-only afterwards. Brick spawning and
//! color resolution read grids and hints from here.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, ParseError};

use super::grid::Grid;
use super::life_pattern::LifePattern;

/// Line that terminates each grid in the text format
pub const GRID_DELIMITER: &str = "--";

/// How a level's layout was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelKind {
    /// Mirrored composite of ordinary shapes
    Symmetric,
    /// A single centered picture
    Special { shape: String },
}

/// Layout symmetry, used to bias brick coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SymmetryHint {
    #[default]
    None,
    Horizontal,
    Vertical,
    Quad,
}

/// Everything known about how one level was generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMeta {
    pub index: usize,
    pub kind: LevelKind,
    pub hp_min: i32,
    pub hp_max: i32,
    /// Density target handed to the symmetric builder
    pub target_blocks: usize,
    pub block_count: usize,
    /// Pattern applied after layout, if any
    pub life_pattern: Option<LifePattern>,
    /// Generation attempts including duplicate rejections
    pub attempts: usize,
}

impl LevelMeta {
    pub fn is_special(&self) -> bool {
        matches!(self.kind, LevelKind::Special { .. })
    }

    pub fn symmetry_hint(&self) -> SymmetryHint {
        match self.kind {
            LevelKind::Symmetric => SymmetryHint::Horizontal,
            LevelKind::Special { .. } => SymmetryHint::None,
        }
    }
}

/// Ordered, immutable sequence of generated levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    effective_seed: u64,
    grids: Vec<Grid>,
    meta: Vec<LevelMeta>,
}

impl Campaign {
    pub(crate) fn new(effective_seed: u64, grids: Vec<Grid>, meta: Vec<LevelMeta>) -> Self {
        debug_assert_eq!(grids.len(), meta.len());
        Self {
            effective_seed,
            grids,
            meta,
        }
    }

    /// Seed that reproduces this campaign
    pub fn effective_seed(&self) -> u64 {
        self.effective_seed
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// All grids in level order
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Grid for one level
    pub fn level(&self, index: usize) -> Result<&Grid, GenerationError> {
        self.grids
            .get(index)
            .ok_or(GenerationError::LevelOutOfRange {
                index,
                len: self.grids.len(),
            })
    }

    /// Metadata for one level
    pub fn meta(&self, index: usize) -> Option<&LevelMeta> {
        self.meta.get(index)
    }

    /// Metadata for every level
    pub fn levels_meta(&self) -> &[LevelMeta] {
        &self.meta
    }

    /// Whether `index` is a pictorial level. Out of range is `false`.
    pub fn is_special(&self, index: usize) -> bool {
        self.meta(index).is_some_and(LevelMeta::is_special)
    }

    /// Coloring hint for `index`. Out of range is `SymmetryHint::None`.
    pub fn symmetry_hint(&self, index: usize) -> SymmetryHint {
        self.meta(index)
            .map(LevelMeta::symmetry_hint)
            .unwrap_or_default()
    }

    /// Plain-text dump: comma-separated rows, each grid followed by `--`
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for grid in &self.grids {
            for row in grid.iter_rows() {
                let line = row
                    .iter()
                    .map(i32::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                let _ = writeln!(out, "{line}");
            }
            let _ = writeln!(out, "{GRID_DELIMITER}");
        }
        out
    }

    /// Write [`to_text`](Self::to_text) to a file
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path.as_ref(), self.to_text())?;
        log::info!(
            "Exported {} levels to {}",
            self.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Read grids back from the text format. Every grid must share the
    /// first grid's dimensions. A trailing grid without a delimiter is kept.
    pub fn parse_grids(text: &str) -> Result<Vec<Grid>, ParseError> {
        let mut grids: Vec<Grid> = Vec::new();
        let mut rows: Vec<Vec<i32>> = Vec::new();

        let mut finish = |rows: &mut Vec<Vec<i32>>, line: usize| -> Result<(), ParseError> {
            if rows.is_empty() {
                return Err(ParseError::new(line, "delimiter without any rows"));
            }
            let grid = Grid::from_rows(std::mem::take(rows))
                .ok_or_else(|| ParseError::new(line, "rows differ in length"))?;
            if let Some(first) = grids.first() {
                if !first.same_shape(&grid) {
                    return Err(ParseError::new(
                        line,
                        format!(
                            "grid is {}x{}, expected {}x{}",
                            grid.rows(),
                            grid.cols(),
                            first.rows(),
                            first.cols()
                        ),
                    ));
                }
            }
            grids.push(grid);
            Ok(())
        };

        let mut last_line = 0;
        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            last_line = line_no;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == GRID_DELIMITER {
                finish(&mut rows, line_no)?;
                continue;
            }
            let row = line
                .split(',')
                .map(|cell| cell.trim().parse::<i32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ParseError::new(line_no, format!("bad cell: {e}")))?;
            rows.push(row);
        }

        if !rows.is_empty() {
            finish(&mut rows, last_line)?;
        }
        Ok(grids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Campaign {
        let a = Grid::from_rows(vec![vec![1, 0], vec![-1, 2]]).unwrap();
        let b = Grid::from_rows(vec![vec![0, 3], vec![3, 0]]).unwrap();
        let meta = |index, kind| LevelMeta {
            index,
            kind,
            hp_min: 1,
            hp_max: 3,
            target_blocks: 2,
            block_count: 3,
            life_pattern: None,
            attempts: 1,
        };
        Campaign::new(
            42,
            vec![a, b],
            vec![
                meta(0, LevelKind::Symmetric),
                meta(
                    1,
                    LevelKind::Special {
                        shape: "heart".into(),
                    },
                ),
            ],
        )
    }

    #[test]
    fn test_level_out_of_range() {
        let campaign = sample();
        assert!(campaign.level(1).is_ok());
        assert_eq!(
            campaign.level(2).unwrap_err(),
            GenerationError::LevelOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn test_hints() {
        let campaign = sample();
        assert!(!campaign.is_special(0));
        assert!(campaign.is_special(1));
        assert!(!campaign.is_special(9));
        assert_eq!(campaign.symmetry_hint(0), SymmetryHint::Horizontal);
        assert_eq!(campaign.symmetry_hint(1), SymmetryHint::None);
        assert_eq!(campaign.symmetry_hint(9), SymmetryHint::None);
    }

    #[test]
    fn test_text_format() {
        let text = sample().to_text();
        assert_eq!(text, "1,0\n-1,2\n--\n0,3\n3,0\n--\n");
    }

    #[test]
    fn test_parse_reads_exported_text() {
        let campaign = sample();
        let grids = Campaign::parse_grids(&campaign.to_text()).unwrap();
        assert_eq!(grids, campaign.grids());
    }

    #[test]
    fn test_parse_tolerates_missing_final_delimiter() {
        let grids = Campaign::parse_grids("1,2\n3,4\n").unwrap();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].get(1, 0), Some(3));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let err = Campaign::parse_grids("1,x\n--\n").unwrap_err();
        assert_eq!(err.line, 1);

        let err = Campaign::parse_grids("1,2\n3\n--\n").unwrap_err();
        assert_eq!(err.line, 3);

        let err = Campaign::parse_grids("1,2\n--\n1,2,3\n--\n").unwrap_err();
        assert_eq!(err.line, 4);

        let err = Campaign::parse_grids("--\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_export_writes_file() {
        let path = std::env::temp_dir().join(format!("campaign-export-{}.txt", std::process::id()));
        let campaign = sample();
        campaign.export(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(written, campaign.to_text());
    }
}
