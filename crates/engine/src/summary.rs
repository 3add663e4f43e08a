//! Trailing totals row of a section.
//!
//! Rendered as one label cell spanning `label_colspan` columns followed by
//! one value cell per remaining column, so `values.len()` always equals
//! `col_count - label_colspan`.

use serde::{Deserialize, Serialize};

/// Default width of the label cell on a fresh summary row.
pub const DEFAULT_LABEL_SPAN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub label: String,
    pub label_colspan: usize,
    pub values: Vec<String>,
}

impl SummaryRow {
    /// Fresh summary row for a grid of `col_count` columns.
    pub fn new(label: impl Into<String>, col_count: usize, label_span: usize) -> Self {
        let label_colspan = label_span.max(1).min(col_count.max(1));
        Self {
            label: label.into(),
            label_colspan,
            values: vec![String::new(); col_count.saturating_sub(label_colspan)],
        }
    }

    /// Adjust for a column inserted at `col`. A column inside the label
    /// span widens the label; otherwise a value slot is added.
    pub fn insert_column(&mut self, col: usize) {
        if col < self.label_colspan {
            self.label_colspan += 1;
        } else {
            let at = (col - self.label_colspan).min(self.values.len());
            self.values.insert(at, String::new());
        }
    }

    /// Adjust for column `col` removed from a grid that had `old_col_count`
    /// columns. The boundary column `col == label_colspan` belongs to the
    /// values region.
    pub fn remove_column(&mut self, col: usize, old_col_count: usize) {
        if col < self.label_colspan {
            self.label_colspan = self.label_colspan.saturating_sub(1).max(1);
            let count = old_col_count
                .saturating_sub(1)
                .saturating_sub(self.label_colspan);
            self.resize_values(count);
        } else {
            let vi = col - self.label_colspan;
            if vi < self.values.len() {
                self.values.remove(vi);
            }
        }
    }

    /// Change the label width, clamped into `1..=max(1, col_count - 1)`.
    /// Existing values are kept by position.
    pub fn set_label_colspan(&mut self, span: usize, col_count: usize) {
        let max = col_count.saturating_sub(1).max(1);
        self.label_colspan = span.clamp(1, max);
        self.resize_values(col_count.saturating_sub(self.label_colspan));
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Bring a loaded row back into shape for `col_count` columns.
    pub fn repair(&mut self, col_count: usize) {
        self.label_colspan = self.label_colspan.clamp(1, col_count.max(1));
        self.resize_values(col_count.saturating_sub(self.label_colspan));
    }

    pub fn is_consistent(&self, col_count: usize) -> bool {
        self.label_colspan >= 1
            && self.label_colspan <= col_count
            && self.values.len() == col_count - self.label_colspan
    }

    fn resize_values(&mut self, count: usize) {
        self.values.resize(count, String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_label_to_col_count() {
        let row = SummaryRow::new("Total", 2, DEFAULT_LABEL_SPAN);
        assert_eq!(row.label_colspan, 2);
        assert!(row.values.is_empty());

        let row = SummaryRow::new("Total", 5, DEFAULT_LABEL_SPAN);
        assert_eq!(row.label_colspan, 3);
        assert_eq!(row.values.len(), 2);
    }

    #[test]
    fn test_insert_column_in_label_grows_label() {
        let mut row = SummaryRow::new("Total", 5, 3);
        row.insert_column(1);
        assert_eq!(row.label_colspan, 4);
        assert_eq!(row.values.len(), 2);
        assert!(row.is_consistent(6));
    }

    #[test]
    fn test_insert_column_in_values_adds_value() {
        let mut row = SummaryRow::new("Total", 5, 3);
        row.values = vec!["10".into(), "20".into()];
        row.insert_column(4);
        assert_eq!(row.values, vec!["10", "", "20"]);
        assert!(row.is_consistent(6));

        // Past the end appends.
        row.insert_column(9);
        assert_eq!(row.values.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_remove_column_in_label_shrinks_label() {
        let mut row = SummaryRow::new("Total", 5, 3);
        row.values = vec!["a".into(), "b".into()];
        row.remove_column(0, 5);
        assert_eq!(row.label_colspan, 2);
        assert_eq!(row.values, vec!["a", "b"]);
        assert!(row.is_consistent(4));
    }

    #[test]
    fn test_remove_column_on_boundary_removes_value() {
        let mut row = SummaryRow::new("Total", 5, 3);
        row.values = vec!["a".into(), "b".into()];
        row.remove_column(3, 5);
        assert_eq!(row.label_colspan, 3);
        assert_eq!(row.values, vec!["b"]);
    }

    #[test]
    fn test_label_floor_of_one_drops_trailing_value() {
        let mut row = SummaryRow::new("Total", 3, 1);
        row.values = vec!["a".into(), "b".into()];
        row.remove_column(0, 3);
        assert_eq!(row.label_colspan, 1);
        assert_eq!(row.values, vec!["a"]);
        assert!(row.is_consistent(2));
    }

    #[test]
    fn test_set_label_colspan_clamps() {
        let mut row = SummaryRow::new("Total", 4, 3);
        row.set_label_colspan(10, 4);
        assert_eq!(row.label_colspan, 3);
        row.set_label_colspan(0, 4);
        assert_eq!(row.label_colspan, 1);
        assert_eq!(row.values.len(), 3);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let row = SummaryRow::new("Total", 4, 3);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["labelColspan"], 3);
    }
}
