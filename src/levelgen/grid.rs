//! Brick layout grid
//!
//! A level is a fixed `rows x cols` array of integers:
//! - `0`: empty
//! - `-1`: indestructible brick
//! - `n > 0`: destructible brick with `n` hit points

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::shapes::Shape;

/// Cell value for an empty slot
pub const EMPTY: i32 = 0;
/// Cell value for a brick that can never be destroyed
pub const INDESTRUCTIBLE: i32 = -1;

/// Row-major level layout. Equality is cell-for-cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    /// Build a grid from explicit rows. Returns `None` if rows are ragged.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Option<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let n_rows = rows.len();
        Some(Self {
            rows: n_rows,
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Same dimensions as `other`
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Cell value at (row, col), `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        self.offset(row, col).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Out-of-bounds writes are ignored and return false.
    pub fn set(&mut self, row: usize, col: usize, value: i32) -> bool {
        match self.offset(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Raw row-major cells
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        // chunks(0) panics
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Number of non-empty cells
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }

    /// Stamp a stencil with its top-left corner at `offset` (x = column, y = row).
    /// Filled stencil cells that land inside the grid are overwritten with
    /// `value`; everything else is left alone.
    pub fn stamp(&mut self, shape: &Shape, offset: IVec2, value: i32) {
        for (x, y) in shape.filled_cells() {
            let pos = offset + IVec2::new(x as i32, y as i32);
            if pos.x < 0 || pos.y < 0 {
                continue;
            }
            self.set(pos.y as usize, pos.x as usize, value);
        }
    }
}
