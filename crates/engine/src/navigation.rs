//! Keyboard movement between cells of one section
//!
//! Contains:
//! - Tab / Shift+Tab: next / previous column, wrapping across rows
//! - Enter: straight down one row
//!
//! Both append an empty row when moving past the last row, and never land
//! on a covered position.

use docgrid_core::CellPos;

use crate::section::Section;

impl Section {
    /// Target of Tab (`backward = false`) or Shift+Tab from `from`.
    /// Returns None when there is nowhere to go (Shift+Tab on the first
    /// cell, `from` outside the grid, or no real cell in the walking
    /// direction).
    pub fn tab_target(&mut self, from: CellPos, backward: bool) -> Option<CellPos> {
        // Off-grid focus moves nowhere and leaves the grid alone.
        self.slot(from.row, from.col)?;
        let cols = self.col_count() as isize;
        let step: isize = if backward { -1 } else { 1 };

        let mut row = from.row as isize;
        let mut col = from.col as isize + step;
        wrap(&mut row, &mut col, cols);
        if row < 0 {
            return None;
        }
        if row as usize >= self.row_count() {
            self.add_row_at(self.row_count());
        }

        // Skip covered positions in the same direction, bounded by the
        // number of positions in the grid.
        let max_attempts = self.row_count() * self.col_count();
        let mut attempts = 0;
        while attempts < max_attempts {
            match self.slot(row as usize, col as usize) {
                Some(Some(_)) => return Some(CellPos::new(row as usize, col as usize)),
                Some(None) => {}
                None => return None,
            }
            col += step;
            wrap(&mut row, &mut col, cols);
            if row < 0 || row as usize >= self.row_count() {
                return None;
            }
            attempts += 1;
        }
        None
    }

    /// Target of Enter from `from`: the next row down in the same column.
    /// Landing on a covered position moves to the cell that covers it, or
    /// below that cell's span when the span starts at `from` itself.
    pub fn enter_target(&mut self, from: CellPos) -> Option<CellPos> {
        self.slot(from.row, from.col)?;
        let mut next = from.row + 1;
        loop {
            if next >= self.row_count() {
                self.add_row_at(self.row_count());
                return Some(CellPos::new(self.row_count() - 1, from.col));
            }
            match self.slot(next, from.col)? {
                Some(_) => return Some(CellPos::new(next, from.col)),
                None => {
                    let anchor = self.anchor_of(next, from.col)?;
                    if anchor != from {
                        return Some(anchor);
                    }
                    let rowspan = self.cell(anchor.row, anchor.col).map(|c| c.rowspan).unwrap_or(1);
                    next = anchor.row + rowspan;
                }
            }
        }
    }
}

fn wrap(row: &mut isize, col: &mut isize, cols: isize) {
    if *col >= cols {
        *row += 1;
        *col = 0;
    }
    if *col < 0 {
        *row -= 1;
        *col = cols - 1;
    }
}
