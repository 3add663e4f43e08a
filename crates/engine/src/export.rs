//! The saved shape of a section.
//!
//! `cells` and `summaryRow` carry the full grid. `columns` and `rows` repeat
//! the plain text of the first row and the remaining rows for readers that
//! only understand the oldest shape.

use serde::{Deserialize, Serialize};

use super::cell::Slot;
use super::section::Section;
use super::summary::SummaryRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSection {
    pub title: String,
    pub col_count: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub cells: Vec<Vec<Slot>>,
    pub summary_row: Option<SummaryRow>,
}

impl Section {
    pub fn export(&self) -> ExportedSection {
        ExportedSection {
            title: self.title.clone(),
            col_count: self.col_count(),
            columns: self.row_values(0),
            rows: (1..self.row_count()).map(|r| self.row_values(r)).collect(),
            cells: self.rows().to_vec(),
            summary_row: self.summary_row().cloned(),
        }
    }
}

/// Export every section, in order.
pub fn export_sections(sections: &[Section]) -> Vec<ExportedSection> {
    sections.iter().map(Section::export).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::normalize_section;
    use docgrid_core::{CellPos, CellRange};
    use serde_json::json;

    #[test]
    fn test_export_shape() {
        let mut section = Section::default();
        section.title = "Costs".into();
        section.merge(CellRange::from_corners(CellPos::new(1, 1), CellPos::new(1, 2)));

        let json = serde_json::to_value(section.export()).unwrap();
        assert_eq!(json["title"], "Costs");
        assert_eq!(json["colCount"], 3);
        assert_eq!(json["columns"].as_array().unwrap().len(), 3);
        assert_eq!(json["rows"], json!([["1", "", ""]]));
        assert_eq!(json["cells"][1][1]["colspan"], 2);
        assert!(json["cells"][1][2].is_null());
        assert!(json["summaryRow"].is_null());
    }

    #[test]
    fn test_exported_section_loads_back_unchanged() {
        let mut section = Section::default();
        section.toggle_summary_row("Total", 3);
        section.merge(CellRange::from_corners(CellPos::new(0, 0), CellPos::new(1, 0)));

        let json = serde_json::to_value(section.export()).unwrap();
        assert_eq!(normalize_section(&json), section);
    }
}
