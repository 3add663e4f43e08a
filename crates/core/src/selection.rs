//! Rectangular selection driven by pointer drag.
//!
//! Contains:
//! - `Selection`: a section index plus two corners
//! - `SelectionState`: the drag state machine (down / enter / up)

use serde::{Deserialize, Serialize};

use crate::range::{CellPos, CellRange};

/// A transient range selection inside one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub section: usize,
    pub start: CellPos,
    pub end: CellPos,
}

impl Selection {
    /// Collapsed selection on one position.
    pub fn at(section: usize, pos: CellPos) -> Self {
        Self { section, start: pos, end: pos }
    }

    pub fn new(section: usize, start: CellPos, end: CellPos) -> Self {
        Self { section, start, end }
    }

    /// Normalized rectangle over both corners.
    pub fn range(&self) -> CellRange {
        CellRange::from_corners(self.start, self.end)
    }

    pub fn contains(&self, section: usize, row: usize, col: usize) -> bool {
        self.section == section && self.range().contains(row, col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Drag-selection state. A drag starts on pointer-down over a cell, follows
/// pointer-enter while the button is held, and ends on any pointer-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selection: Option<Selection>,
    dragging: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn range(&self) -> Option<(usize, CellRange)> {
        self.selection.map(|s| (s.section, s.range()))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns false when the press was ignored (secondary button).
    pub fn pointer_down(&mut self, section: usize, pos: CellPos, button: PointerButton) -> bool {
        if button == PointerButton::Secondary {
            return false;
        }
        // A new drag always replaces the previous selection, including one
        // that lived in another section.
        self.selection = Some(Selection::at(section, pos));
        self.dragging = true;
        true
    }

    /// Extends the drag. Entering a cell of another section is ignored.
    pub fn pointer_enter(&mut self, section: usize, pos: CellPos) -> bool {
        if !self.dragging {
            return false;
        }
        match self.selection.as_mut() {
            Some(sel) if sel.section == section => {
                sel.end = pos;
                true
            }
            _ => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Replace the selection without starting a drag (context menu, scripts).
    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
        self.dragging = false;
    }

    pub fn clear(&mut self) {
        self.selection = None;
        self.dragging = false;
    }

    pub fn contains(&self, section: usize, row: usize, col: usize) -> bool {
        self.selection
            .map(|s| s.contains(section, row, col))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_extends_within_section() {
        let mut state = SelectionState::new();
        assert!(state.pointer_down(0, CellPos::new(2, 2), PointerButton::Primary));
        assert!(state.pointer_enter(0, CellPos::new(0, 1)));
        state.pointer_up();

        let (section, range) = state.range().unwrap();
        assert_eq!(section, 0);
        assert_eq!(range.top_left(), CellPos::new(0, 1));
        assert_eq!((range.height(), range.width()), (3, 2));

        // Released: entering further cells no longer changes the range.
        assert!(!state.pointer_enter(0, CellPos::new(5, 5)));
        assert_eq!(state.range().unwrap().1, range);
    }

    #[test]
    fn test_enter_other_section_is_ignored() {
        let mut state = SelectionState::new();
        state.pointer_down(1, CellPos::new(0, 0), PointerButton::Primary);
        assert!(!state.pointer_enter(0, CellPos::new(1, 1)));
        assert_eq!(state.current().unwrap().end, CellPos::new(0, 0));
    }

    #[test]
    fn test_new_drag_in_other_section_discards_previous() {
        let mut state = SelectionState::new();
        state.pointer_down(0, CellPos::new(0, 0), PointerButton::Primary);
        state.pointer_enter(0, CellPos::new(2, 2));
        state.pointer_up();
        state.pointer_down(1, CellPos::new(1, 0), PointerButton::Primary);
        assert!(!state.contains(0, 1, 1));
        assert!(state.contains(1, 1, 0));
    }

    #[test]
    fn test_secondary_button_does_not_drag() {
        let mut state = SelectionState::new();
        assert!(!state.pointer_down(0, CellPos::new(0, 0), PointerButton::Secondary));
        assert!(state.current().is_none());
        assert!(!state.is_dragging());
    }
}
