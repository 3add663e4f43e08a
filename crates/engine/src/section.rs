use docgrid_core::{CellPos, CellRange};

use super::cell::{Cell, ColorProperty, Slot};
use super::summary::SummaryRow;
use super::template::SectionTemplate;

/// One titled grid of the editor.
///
/// Invariants (checked by `check_invariants`):
/// - at least one row and one column
/// - every row holds exactly `col_count` slots
/// - every merged rectangle lies inside the grid, its anchor is the only
///   `Some` inside it, and every `None` is covered by exactly one anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    col_count: usize,
    cells: Vec<Vec<Slot>>,
    summary_row: Option<SummaryRow>,
}

impl Default for Section {
    fn default() -> Self {
        Self::from_template(&SectionTemplate::default())
    }
}

impl Section {
    /// Header row from the template plus one numbered data row.
    pub fn from_template(template: &SectionTemplate) -> Self {
        let col_count = template.col_count();
        let mut header: Vec<Slot> = template.headers.iter().map(|h| Some(Cell::new(h.clone()))).collect();
        header.resize(col_count, Some(Cell::empty()));

        let mut first: Vec<Slot> = vec![Some(Cell::empty()); col_count];
        if template.number_first_row {
            first[0] = Some(Cell::new("1"));
        }

        Self {
            title: String::new(),
            col_count,
            cells: vec![header, first],
            summary_row: None,
        }
    }

    /// One row of three empty cells. Used when loaded input is unusable.
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            col_count: 3,
            cells: vec![vec![Some(Cell::empty()); 3]],
            summary_row: None,
        }
    }

    /// Build from raw parts and repair whatever breaks the invariants.
    /// Returns the section and the number of repairs applied.
    pub fn from_parts(
        title: String,
        col_count: usize,
        cells: Vec<Vec<Slot>>,
        summary_row: Option<SummaryRow>,
    ) -> (Self, usize) {
        let mut section = Self {
            title,
            col_count: col_count.max(1),
            cells,
            summary_row,
        };
        let fixes = section.repair();
        (section, fixes)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> &[Vec<Slot>] {
        &self.cells
    }

    /// The slot at a position, or None when out of range.
    pub fn slot(&self, row: usize, col: usize) -> Option<&Slot> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// The real cell at a position. None when out of range or covered.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.slot(row, col).and_then(|s| s.as_ref())
    }

    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        matches!(self.slot(row, col), Some(None))
    }

    pub fn summary_row(&self) -> Option<&SummaryRow> {
        self.summary_row.as_ref()
    }

    /// Display values of one row; covered positions read as "".
    pub fn row_values(&self, row: usize) -> Vec<String> {
        self.cells
            .get(row)
            .map(|r| {
                r.iter()
                    .map(|s| s.as_ref().map(|c| c.value.clone()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every merged rectangle, in row-major order of the anchors.
    pub fn merged_ranges(&self) -> Vec<CellRange> {
        let mut out = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, slot) in row.iter().enumerate() {
                if let Some(cell) = slot {
                    if cell.is_merged() {
                        out.push(CellRange::spanning(CellPos::new(r, c), cell.rowspan, cell.colspan));
                    }
                }
            }
        }
        out
    }

    /// Position of the real cell that owns `(row, col)`: itself, or the
    /// anchor whose span covers it.
    pub fn anchor_of(&self, row: usize, col: usize) -> Option<CellPos> {
        match self.slot(row, col)? {
            Some(_) => Some(CellPos::new(row, col)),
            None => self
                .merged_ranges()
                .into_iter()
                .find(|m| m.contains(row, col))
                .map(|m| m.top_left()),
        }
    }

    fn cell_mut(&mut self, pos: CellPos) -> Option<&mut Cell> {
        self.cells
            .get_mut(pos.row)
            .and_then(|r| r.get_mut(pos.col))
            .and_then(|s| s.as_mut())
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn set_cell_value(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match self.cell_mut(CellPos::new(row, col)) {
            Some(cell) => {
                cell.value = value.into();
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Insert an empty row before `row` (`row >= row_count` appends).
    /// Inside a vertically merged rectangle the span grows and the new
    /// positions under it are covered.
    pub fn add_row_at(&mut self, row: usize) {
        let row = row.min(self.cells.len());
        let straddling: Vec<CellRange> = self
            .merged_ranges()
            .into_iter()
            .filter(|m| m.start_row < row && m.end_row >= row)
            .collect();

        let new_row: Vec<Slot> = (0..self.col_count)
            .map(|c| {
                if straddling.iter().any(|m| m.start_col <= c && c <= m.end_col) {
                    None
                } else {
                    Some(Cell::empty())
                }
            })
            .collect();

        for m in &straddling {
            if let Some(anchor) = self.cell_mut(m.top_left()) {
                anchor.rowspan += 1;
            }
        }
        self.cells.insert(row, new_row);
    }

    /// Remove a row. No-op on the last remaining row or an out-of-range index.
    pub fn remove_row_at(&mut self, row: usize) -> bool {
        if self.cells.len() <= 1 || row >= self.cells.len() {
            return false;
        }

        for m in self.merged_ranges() {
            if m.height() < 2 || row < m.start_row || row > m.end_row {
                continue;
            }
            if m.start_row == row {
                // Anchor moves down into the next line of its rectangle
                if let Some(mut anchor) = self.cells[row][m.start_col].take() {
                    anchor.rowspan -= 1;
                    self.cells[row + 1][m.start_col] = Some(anchor);
                }
            } else if let Some(anchor) = self.cell_mut(m.top_left()) {
                anchor.rowspan -= 1;
            }
        }

        self.cells.remove(row);
        true
    }

    /// Swap a row with its neighbour `direction` rows away. No-op when the
    /// target is out of bounds or either row is part of a vertical merge.
    pub fn move_row(&mut self, row: usize, direction: isize) -> bool {
        if direction == 0 || row >= self.cells.len() {
            return false;
        }
        let target = match row.checked_add_signed(direction) {
            Some(t) if t < self.cells.len() => t,
            _ => return false,
        };

        let blocked = self.merged_ranges().iter().any(|m| {
            m.height() > 1
                && ((m.start_row..=m.end_row).contains(&row) || (m.start_row..=m.end_row).contains(&target))
        });
        if blocked {
            return false;
        }

        self.cells.swap(row, target);
        true
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Insert an empty column before `col` (`col >= col_count` appends).
    pub fn add_column_at(&mut self, col: usize) {
        let col = col.min(self.col_count);
        let straddling: Vec<CellRange> = self
            .merged_ranges()
            .into_iter()
            .filter(|m| m.start_col < col && m.end_col >= col)
            .collect();

        for (r, row) in self.cells.iter_mut().enumerate() {
            let covered = straddling.iter().any(|m| m.start_row <= r && r <= m.end_row);
            let at = col.min(row.len());
            row.insert(at, if covered { None } else { Some(Cell::empty()) });
        }
        for m in &straddling {
            if let Some(anchor) = self.cell_mut(m.top_left()) {
                anchor.colspan += 1;
            }
        }

        self.col_count += 1;
        if let Some(summary) = self.summary_row.as_mut() {
            summary.insert_column(col);
        }
    }

    /// Remove a column. No-op on the last remaining column or an
    /// out-of-range index.
    pub fn remove_column_at(&mut self, col: usize) -> bool {
        if self.col_count <= 1 || col >= self.col_count {
            return false;
        }

        for m in self.merged_ranges() {
            if m.width() < 2 || col < m.start_col || col > m.end_col {
                continue;
            }
            if m.start_col == col {
                let row = &mut self.cells[m.start_row];
                if let Some(mut anchor) = row[col].take() {
                    anchor.colspan -= 1;
                    row[col + 1] = Some(anchor);
                }
            } else if let Some(anchor) = self.cell_mut(m.top_left()) {
                anchor.colspan -= 1;
            }
        }

        for row in self.cells.iter_mut() {
            if col < row.len() {
                row.remove(col);
            }
        }

        let old_col_count = self.col_count;
        self.col_count -= 1;
        if let Some(summary) = self.summary_row.as_mut() {
            summary.remove_column(col, old_col_count);
        }
        true
    }

    // =========================================================================
    // Merge / Unmerge / Color
    // =========================================================================

    /// Grow `range` until no merged rectangle crosses its border.
    pub fn expand_to_merges(&self, mut range: CellRange) -> CellRange {
        let merges = self.merged_ranges();
        loop {
            let grown = merges
                .iter()
                .filter(|m| m.intersects(&range))
                .fold(range, |acc, m| acc.union(m));
            if grown == range {
                return range;
            }
            range = grown;
        }
    }

    /// Range after clamping to the grid and growing over crossing merges.
    pub fn effective_range(&self, range: CellRange) -> Option<CellRange> {
        range
            .clamp_to(self.cells.len(), self.col_count)
            .map(|r| self.expand_to_merges(r))
    }

    /// Merge a rectangle into its top-left cell. Non-empty texts are joined
    /// with a space in row-major order. Returns false when the effective
    /// range is a single position.
    pub fn merge(&mut self, range: CellRange) -> bool {
        let range = match self.effective_range(range) {
            Some(r) if !r.is_single() => r,
            _ => return false,
        };

        let text = range
            .positions()
            .filter_map(|p| self.cell(p.row, p.col))
            .filter(|c| !c.value.is_empty())
            .map(|c| c.value.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let top = range.top_left();
        let mut anchor = self.cells[top.row][top.col].take().unwrap_or_default();
        anchor.value = text;
        anchor.colspan = range.width();
        anchor.rowspan = range.height();

        for p in range.positions() {
            self.cells[p.row][p.col] = None;
        }
        self.cells[top.row][top.col] = Some(anchor);
        true
    }

    /// Split every merged rectangle that has its anchor or a covered
    /// position inside `range`. The anchor keeps its text and colors; the
    /// other positions become empty cells. Returns false when nothing split.
    pub fn unmerge(&mut self, range: CellRange) -> bool {
        let range = match range.clamp_to(self.cells.len(), self.col_count) {
            Some(r) => r,
            None => return false,
        };
        let targets: Vec<CellRange> = self
            .merged_ranges()
            .into_iter()
            .filter(|m| m.intersects(&range))
            .collect();

        for m in &targets {
            let top = m.top_left();
            let anchor = self.cells[top.row][top.col].take();
            for p in m.positions() {
                self.cells[p.row][p.col] = Some(Cell::empty());
            }
            if let Some(mut anchor) = anchor {
                anchor.colspan = 1;
                anchor.rowspan = 1;
                self.cells[top.row][top.col] = Some(anchor);
            }
        }
        !targets.is_empty()
    }

    /// True if any position of `range` is covered or is a merged anchor.
    pub fn has_merged_in(&self, range: CellRange) -> bool {
        match range.clamp_to(self.cells.len(), self.col_count) {
            Some(r) => r.positions().any(|p| match self.slot(p.row, p.col) {
                Some(Some(cell)) => cell.is_merged(),
                Some(None) => true,
                None => false,
            }),
            None => false,
        }
    }

    /// Write a color onto every real cell of `range`. An empty value clears
    /// the override.
    pub fn apply_color(&mut self, range: CellRange, property: ColorProperty, value: &str) -> bool {
        let range = match range.clamp_to(self.cells.len(), self.col_count) {
            Some(r) => r,
            None => return false,
        };
        let mut touched = false;
        for p in range.positions() {
            if let Some(cell) = self.cell_mut(p) {
                cell.set_color(property, value);
                touched = true;
            }
        }
        touched
    }

    // =========================================================================
    // Summary Row
    // =========================================================================

    /// Remove the summary row if present, otherwise add a fresh one.
    /// Returns whether a summary row is present afterwards.
    pub fn toggle_summary_row(&mut self, label: &str, label_span: usize) -> bool {
        if self.summary_row.take().is_some() {
            return false;
        }
        self.summary_row = Some(SummaryRow::new(label, self.col_count, label_span));
        true
    }

    pub fn set_summary_label(&mut self, label: impl Into<String>) -> bool {
        match self.summary_row.as_mut() {
            Some(s) => {
                s.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn set_summary_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        self.summary_row
            .as_mut()
            .map(|s| s.set_value(index, value))
            .unwrap_or(false)
    }

    pub fn set_summary_label_colspan(&mut self, span: usize) -> bool {
        let col_count = self.col_count;
        match self.summary_row.as_mut() {
            Some(s) => {
                s.set_label_colspan(span, col_count);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Bring arbitrary loaded data into a valid shape. Returns the number of
    /// individual fixes.
    pub fn repair(&mut self) -> usize {
        let mut fixes = 0;
        self.col_count = self.col_count.max(1);
        let cols = self.col_count;

        if self.cells.is_empty() {
            self.cells.push(vec![Some(Cell::empty()); cols]);
            fixes += 1;
        }
        for row in self.cells.iter_mut() {
            if row.len() != cols {
                row.resize(cols, Some(Cell::empty()));
                fixes += 1;
            }
        }

        let rows = self.cells.len();
        let mut covered = vec![vec![false; cols]; rows];
        for r in 0..rows {
            for c in 0..cols {
                let slot = &mut self.cells[r][c];
                if covered[r][c] {
                    if slot.take().is_some() {
                        fixes += 1;
                    }
                    continue;
                }
                match slot {
                    Some(cell) => {
                        // Spans stop at the grid edge and at positions
                        // already claimed by an earlier cell.
                        let mut colspan = cell.colspan.clamp(1, cols - c);
                        if let Some(w) = (1..colspan).find(|w| covered[r][c + w]) {
                            colspan = w;
                        }
                        let mut rowspan = cell.rowspan.clamp(1, rows - r);
                        if let Some(h) = (1..rowspan)
                            .find(|h| covered[r + h][c..c + colspan].iter().any(|f| *f))
                        {
                            rowspan = h;
                        }
                        if rowspan != cell.rowspan || colspan != cell.colspan {
                            cell.rowspan = rowspan;
                            cell.colspan = colspan;
                            fixes += 1;
                        }
                        for cr in covered.iter_mut().skip(r).take(rowspan) {
                            for flag in cr.iter_mut().skip(c).take(colspan) {
                                *flag = true;
                            }
                        }
                    }
                    None => {
                        // Covered by nothing
                        *slot = Some(Cell::empty());
                        fixes += 1;
                    }
                }
            }
        }

        if let Some(summary) = self.summary_row.as_mut() {
            if !summary.is_consistent(cols) {
                summary.repair(cols);
                fixes += 1;
            }
        }
        fixes
    }

    pub fn check_invariants(&self) -> Result<(), String> {
        if self.col_count == 0 {
            return Err("col_count is 0".into());
        }
        if self.cells.is_empty() {
            return Err("section has no rows".into());
        }
        for (r, row) in self.cells.iter().enumerate() {
            if row.len() != self.col_count {
                return Err(format!("row {} has {} slots, expected {}", r, row.len(), self.col_count));
            }
        }

        let rows = self.cells.len();
        let mut owner: Vec<Vec<Option<CellPos>>> = vec![vec![None; self.col_count]; rows];
        for (r, row) in self.cells.iter().enumerate() {
            for (c, slot) in row.iter().enumerate() {
                let Some(cell) = slot else { continue };
                if cell.rowspan == 0 || cell.colspan == 0 {
                    return Err(format!("cell ({}, {}) has a zero span", r, c));
                }
                if r + cell.rowspan > rows || c + cell.colspan > self.col_count {
                    return Err(format!("span of ({}, {}) leaves the grid", r, c));
                }
                let range = CellRange::spanning(CellPos::new(r, c), cell.rowspan, cell.colspan);
                for p in range.positions() {
                    if let Some(prev) = owner[p.row][p.col] {
                        return Err(format!(
                            "({}, {}) owned by both ({}, {}) and ({}, {})",
                            p.row, p.col, prev.row, prev.col, r, c
                        ));
                    }
                    owner[p.row][p.col] = Some(CellPos::new(r, c));
                    if p != CellPos::new(r, c) && self.cells[p.row][p.col].is_some() {
                        return Err(format!("({}, {}) is inside a span but holds a cell", p.row, p.col));
                    }
                }
            }
        }
        for (r, row) in owner.iter().enumerate() {
            for (c, o) in row.iter().enumerate() {
                if o.is_none() {
                    return Err(format!("({}, {}) is covered by no cell", r, c));
                }
            }
        }

        if let Some(summary) = &self.summary_row {
            if !summary.is_consistent(self.col_count) {
                return Err("summary row does not fit col_count".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> Section {
        let cells = (0..rows)
            .map(|r| (0..cols).map(|c| Some(Cell::new(format!("{}{}", r, c)))).collect())
            .collect();
        Section::from_parts(String::new(), cols, cells, None).0
    }

    fn range(r1: usize, c1: usize, r2: usize, c2: usize) -> CellRange {
        CellRange::from_corners(CellPos::new(r1, c1), CellPos::new(r2, c2))
    }

    #[test]
    fn test_template_section() {
        let s = Section::default();
        assert_eq!(s.col_count(), 3);
        assert_eq!(s.row_count(), 2);
        assert_eq!(s.row_values(1), vec!["1", "", ""]);
        assert!(s.summary_row().is_none());
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_add_and_remove_rows() {
        let mut s = grid(2, 3);
        s.add_row_at(1);
        assert_eq!(s.row_count(), 3);
        assert_eq!(s.row_values(1), vec!["", "", ""]);
        s.add_row_at(99);
        assert_eq!(s.row_count(), 4);

        assert!(s.remove_row_at(0));
        assert_eq!(s.row_values(0), vec!["", "", ""]);
        assert!(!s.remove_row_at(10));
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_last_row_and_column_survive() {
        let mut s = grid(1, 1);
        assert!(!s.remove_row_at(0));
        assert!(!s.remove_column_at(0));
        assert_eq!((s.row_count(), s.col_count()), (1, 1));
    }

    #[test]
    fn test_move_row_bounds() {
        let mut s = grid(3, 2);
        assert!(!s.move_row(0, -1));
        assert!(!s.move_row(2, 1));
        assert!(s.move_row(0, 1));
        assert_eq!(s.row_values(0), vec!["10", "11"]);
        assert_eq!(s.row_values(1), vec!["00", "01"]);
    }

    #[test]
    fn test_move_row_blocked_by_vertical_merge() {
        let mut s = grid(3, 2);
        assert!(s.merge(range(0, 0, 1, 0)));
        assert!(!s.move_row(1, 1));
        assert!(!s.move_row(2, -1));
    }

    #[test]
    fn test_merge_joins_text_and_covers() {
        let mut s = grid(3, 3);
        s.set_cell_value(0, 1, "");
        assert!(s.merge(range(1, 1, 0, 0)));

        let anchor = s.cell(0, 0).unwrap();
        assert_eq!(anchor.value, "00 10 11");
        assert_eq!((anchor.rowspan, anchor.colspan), (2, 2));
        assert!(s.is_covered(0, 1));
        assert!(s.is_covered(1, 0));
        assert!(s.is_covered(1, 1));
        assert_eq!(s.anchor_of(1, 1), Some(CellPos::new(0, 0)));
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_merge_single_position_is_noop() {
        let mut s = grid(2, 2);
        assert!(!s.merge(range(1, 1, 1, 1)));
        assert!(!s.merge(range(5, 5, 6, 6)));
        assert!(!s.has_merged_in(range(0, 0, 1, 1)));
    }

    #[test]
    fn test_merge_grows_over_crossing_merge() {
        let mut s = grid(3, 3);
        s.merge(range(0, 1, 1, 2));
        // Overlaps only the lower-left corner of the existing block.
        assert!(s.merge(range(1, 0, 2, 1)));
        let anchor = s.cell(0, 0).unwrap();
        assert_eq!((anchor.rowspan, anchor.colspan), (3, 3));
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_unmerge_restores_cells() {
        let mut s = grid(3, 3);
        s.merge(range(0, 0, 1, 1));
        assert!(s.has_merged_in(range(1, 1, 1, 1)));
        // Range touching only a covered position still splits the block.
        assert!(s.unmerge(range(1, 1, 1, 1)));
        assert_eq!(s.cell(0, 0).unwrap().value, "00 01 10 11");
        assert_eq!(s.row_values(1), vec!["", "", "12"]);
        assert!(!s.has_merged_in(range(0, 0, 2, 2)));
        assert!(!s.unmerge(range(0, 0, 2, 2)));
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_colors_skip_covered_positions() {
        let mut s = grid(2, 2);
        s.merge(range(0, 0, 0, 1));
        assert!(s.apply_color(range(0, 0, 1, 1), ColorProperty::Background, "#FEF9C3"));
        assert_eq!(s.cell(0, 0).unwrap().bg.as_deref(), Some("#FEF9C3"));
        assert_eq!(s.cell(1, 1).unwrap().bg.as_deref(), Some("#FEF9C3"));
        assert!(s.apply_color(range(0, 0, 1, 1), ColorProperty::Background, ""));
        assert_eq!(s.cell(1, 1).unwrap().bg, None);
    }

    #[test]
    fn test_add_column_inside_horizontal_merge_grows_span() {
        let mut s = grid(2, 3);
        s.merge(range(0, 0, 0, 1));
        s.add_column_at(1);
        assert_eq!(s.col_count(), 4);
        assert_eq!(s.cell(0, 0).unwrap().colspan, 3);
        assert!(s.is_covered(0, 1));
        assert_eq!(s.row_values(1), vec!["10", "", "11", "12"]);
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_anchor_column_moves_anchor() {
        let mut s = grid(2, 3);
        s.merge(range(0, 0, 1, 1));
        assert!(s.remove_column_at(0));
        let anchor = s.cell(0, 0).unwrap();
        assert_eq!(anchor.value, "00 01 10 11");
        assert_eq!((anchor.rowspan, anchor.colspan), (2, 1));
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_row_edits_inside_vertical_merge() {
        let mut s = grid(3, 2);
        s.merge(range(0, 0, 1, 0));
        s.add_row_at(1);
        assert_eq!(s.cell(0, 0).unwrap().rowspan, 3);
        assert!(s.is_covered(1, 0));
        assert!(s.cell(1, 1).is_some());
        s.check_invariants().unwrap();

        assert!(s.remove_row_at(0));
        assert_eq!(s.cell(0, 0).unwrap().rowspan, 2);
        assert_eq!(s.cell(0, 0).unwrap().value, "00 10");
        s.check_invariants().unwrap();
    }

    #[test]
    fn test_summary_toggle_and_columns() {
        let mut s = grid(2, 5);
        assert!(s.toggle_summary_row("Total", 3));
        assert!(s.set_summary_value(1, "99"));
        s.add_column_at(0);
        assert_eq!(s.summary_row().unwrap().label_colspan, 4);
        s.add_column_at(6);
        assert_eq!(s.summary_row().unwrap().values, vec!["", "99", ""]);
        assert!(s.remove_column_at(5));
        assert_eq!(s.summary_row().unwrap().values, vec!["", ""]);
        s.check_invariants().unwrap();

        assert!(!s.toggle_summary_row("Total", 3));
        assert!(!s.set_summary_label("x"));
    }

    #[test]
    fn test_repair_fixes_loaded_data() {
        let cells = vec![
            vec![Some(Cell { colspan: 9, ..Cell::new("a") }), Some(Cell::new("b"))],
            vec![None],
        ];
        let (s, fixes) = Section::from_parts("t".into(), 2, cells, None);
        assert!(fixes > 0);
        s.check_invariants().unwrap();
        assert_eq!(s.cell(0, 0).unwrap().colspan, 2);
        assert!(s.is_covered(0, 1));
        assert_eq!(s.row_values(1), vec!["", ""]);
    }

    #[test]
    fn test_repair_trims_overlapping_spans() {
        let cells = vec![
            vec![Some(Cell::new("a")), Some(Cell { rowspan: 2, ..Cell::new("b") })],
            vec![Some(Cell { colspan: 2, ..Cell::new("c") }), None],
        ];
        let (s, fixes) = Section::from_parts(String::new(), 2, cells, None);
        assert!(fixes > 0);
        s.check_invariants().unwrap();
        assert_eq!(s.cell(1, 0).unwrap().colspan, 1);
        assert!(s.is_covered(1, 1));
    }
}
