//! Grid coordinates and rectangular ranges.
//!
//! A `CellRange` is always stored normalized (start <= end on both axes),
//! no matter which two opposite corners it was built from.

use serde::{Deserialize, Serialize};

/// A row/column position inside one section grid (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Inclusive rectangle of grid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl CellRange {
    /// Build a range from two opposite corners, in any order.
    pub fn from_corners(a: CellPos, b: CellPos) -> Self {
        Self {
            start_row: a.row.min(b.row),
            start_col: a.col.min(b.col),
            end_row: a.row.max(b.row),
            end_col: a.col.max(b.col),
        }
    }

    /// Single-position range.
    pub fn single(pos: CellPos) -> Self {
        Self::from_corners(pos, pos)
    }

    /// Range covering a span anchored at `anchor`. Spans of 0 are treated as 1.
    pub fn spanning(anchor: CellPos, rowspan: usize, colspan: usize) -> Self {
        Self {
            start_row: anchor.row,
            start_col: anchor.col,
            end_row: anchor.row + rowspan.max(1) - 1,
            end_col: anchor.col + colspan.max(1) - 1,
        }
    }

    pub fn top_left(&self) -> CellPos {
        CellPos::new(self.start_row, self.start_col)
    }

    pub fn height(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    pub fn width(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    pub fn is_single(&self) -> bool {
        self.height() == 1 && self.width() == 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    pub fn intersects(&self, other: &CellRange) -> bool {
        self.start_row <= other.end_row
            && other.start_row <= self.end_row
            && self.start_col <= other.end_col
            && other.start_col <= self.end_col
    }

    /// Smallest range containing both.
    pub fn union(&self, other: &CellRange) -> CellRange {
        CellRange {
            start_row: self.start_row.min(other.start_row),
            start_col: self.start_col.min(other.start_col),
            end_row: self.end_row.max(other.end_row),
            end_col: self.end_col.max(other.end_col),
        }
    }

    /// Clamp into a `rows` x `cols` grid. Returns None when the range lies
    /// entirely outside the grid.
    pub fn clamp_to(&self, rows: usize, cols: usize) -> Option<CellRange> {
        if rows == 0 || cols == 0 || self.start_row >= rows || self.start_col >= cols {
            return None;
        }
        Some(CellRange {
            start_row: self.start_row,
            start_col: self.start_col,
            end_row: self.end_row.min(rows - 1),
            end_col: self.end_col.min(cols - 1),
        })
    }

    /// Positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = CellPos> + '_ {
        (self.start_row..=self.end_row)
            .flat_map(move |r| (self.start_col..=self.end_col).map(move |c| CellPos::new(r, c)))
    }
}
