//! Defaults used when the editor creates sections from nothing.

use crate::summary::DEFAULT_LABEL_SPAN;

/// Header row of a fresh section: No. / Description / Total (kip).
pub const DEFAULT_HEADERS: [&str; 3] = ["ລຳດັບ", "ລາຍລະອຽດ", "ລວມເປັນເງິນ (ກີບ)"];

/// Label of a fresh summary row: Grand total / kip.
pub const DEFAULT_SUMMARY_LABEL: &str = "ລວມມູນຄ່າທັງໝົດ/ກີບ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTemplate {
    /// Header row text; its length is the column count of a fresh section
    pub headers: Vec<String>,
    /// Put a running number ("1") in the first column of the first data row
    pub number_first_row: bool,
    pub summary_label: String,
    pub summary_label_span: usize,
}

impl Default for SectionTemplate {
    fn default() -> Self {
        Self {
            headers: DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect(),
            number_first_row: true,
            summary_label: DEFAULT_SUMMARY_LABEL.to_string(),
            summary_label_span: DEFAULT_LABEL_SPAN,
        }
    }
}

impl SectionTemplate {
    /// Column count of a fresh section (never 0).
    pub fn col_count(&self) -> usize {
        self.headers.len().max(1)
    }
}
