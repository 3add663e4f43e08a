//! Scripted editor operations.
//!
//! An `Op` is one user action in serializable form. Batches of ops drive the
//! editor from the command line and from tests; `apply_ops` runs them in
//! order with optional all-or-nothing semantics.

use serde::{Deserialize, Serialize};

use docgrid_core::CellPos;

use crate::cell::ColorProperty;
use crate::editor::Editor;

/// One editor action. Section, row and column indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    AddSection,
    RemoveSection { section: usize },
    DuplicateSection { section: usize },
    SetTitle { section: usize, title: String },
    SetCell { section: usize, row: usize, col: usize, value: String },
    AddRow { section: usize, at: usize },
    RemoveRow { section: usize, row: usize },
    MoveRow { section: usize, row: usize, direction: isize },
    AddColumn { section: usize, at: usize },
    RemoveColumn { section: usize, col: usize },
    /// Select the rectangle between two corners.
    Select {
        section: usize,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    },
    Merge,
    Unmerge,
    Color { property: ColorProperty, value: String },
    ToggleSummary { section: usize },
    SetSummaryLabel { section: usize, label: String },
    SetSummaryValue { section: usize, index: usize, value: String },
    SetSummaryLabelColspan { section: usize, span: usize },
}

impl Op {
    /// Section this op addresses, if any.
    pub fn section(&self) -> Option<usize> {
        match self {
            Op::AddSection | Op::Merge | Op::Unmerge | Op::Color { .. } => None,
            Op::RemoveSection { section }
            | Op::DuplicateSection { section }
            | Op::SetTitle { section, .. }
            | Op::SetCell { section, .. }
            | Op::AddRow { section, .. }
            | Op::RemoveRow { section, .. }
            | Op::MoveRow { section, .. }
            | Op::AddColumn { section, .. }
            | Op::RemoveColumn { section, .. }
            | Op::Select { section, .. }
            | Op::ToggleSummary { section }
            | Op::SetSummaryLabel { section, .. }
            | Op::SetSummaryValue { section, .. }
            | Op::SetSummaryLabelColspan { section, .. } => Some(*section),
        }
    }
}

/// Why an op could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpError {
    pub code: String,
    pub message: String,
}

impl std::fmt::Display for OpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for OpError {}

/// Error from a batch, with the index of the failing op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchError {
    pub code: String,
    pub message: String,
    pub op_index: usize,
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op {}: {}: {}", self.op_index, self.code, self.message)
    }
}

impl std::error::Error for BatchError {}

/// Result of applying a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    /// Number of ops applied (0 after an atomic rollback).
    pub applied: usize,
    /// Number of applied ops that changed something.
    pub changed: usize,
    pub error: Option<BatchError>,
}

/// Apply one op. `Ok(false)` means the op was valid but changed nothing
/// (a merge with nothing selected, moving the first row up).
pub fn apply_op(editor: &mut Editor, op: &Op) -> Result<bool, OpError> {
    if !editor.is_open() {
        return Err(OpError {
            code: "editor_closed".to_string(),
            message: "the editor is not open".to_string(),
        });
    }
    if let Some(section) = op.section() {
        if section >= editor.sections().len() {
            return Err(OpError {
                code: "invalid_section".to_string(),
                message: format!(
                    "section {} not found ({} section(s))",
                    section,
                    editor.sections().len()
                ),
            });
        }
    }

    let changed = match op {
        Op::AddSection => editor.add_section(),
        Op::RemoveSection { section } => editor.remove_section(*section),
        Op::DuplicateSection { section } => editor.duplicate_section(*section),
        Op::SetTitle { section, title } => editor.set_title(*section, title.as_str()),
        Op::SetCell { section, row, col, value } => {
            editor.set_cell_value(*section, *row, *col, value.as_str())
        }
        Op::AddRow { section, at } => editor.add_row_at(*section, *at),
        Op::RemoveRow { section, row } => editor.remove_row_at(*section, *row),
        Op::MoveRow { section, row, direction } => editor.move_row(*section, *row, *direction),
        Op::AddColumn { section, at } => editor.add_column_at(*section, *at),
        Op::RemoveColumn { section, col } => editor.remove_column_at(*section, *col),
        Op::Select { section, start_row, start_col, end_row, end_col } => editor.select(
            *section,
            CellPos::new(*start_row, *start_col),
            CellPos::new(*end_row, *end_col),
        ),
        Op::Merge => editor.merge_selection(),
        Op::Unmerge => editor.unmerge_selection(),
        Op::Color { property, value } => editor.apply_color_to_selection(*property, value),
        Op::ToggleSummary { section } => {
            editor.toggle_summary_row(*section);
            true
        }
        Op::SetSummaryLabel { section, label } => editor.set_summary_label(*section, label.as_str()),
        Op::SetSummaryValue { section, index, value } => {
            editor.set_summary_value(*section, *index, value.as_str())
        }
        Op::SetSummaryLabelColspan { section, span } => {
            editor.set_summary_label_colspan(*section, *span)
        }
    };
    Ok(changed)
}

/// Apply ops in order, stopping at the first error.
///
/// - `atomic=true`: on error the sections are restored to their state
///   before the batch and `applied` is 0.
/// - `atomic=false`: ops before the failing one stay applied.
pub fn apply_ops(editor: &mut Editor, ops: &[Op], atomic: bool) -> ApplyResult {
    let snapshot = if atomic { Some(editor.sections().to_vec()) } else { None };

    let mut applied = 0;
    let mut changed = 0;
    let mut error = None;

    for (idx, op) in ops.iter().enumerate() {
        match apply_op(editor, op) {
            Ok(did_change) => {
                applied += 1;
                if did_change {
                    changed += 1;
                }
            }
            Err(e) => {
                log::warn!("op {} ({:?}) failed: {}", idx, op, e);
                error = Some(BatchError {
                    code: e.code,
                    message: e.message,
                    op_index: idx,
                });
                break;
            }
        }
    }

    if let (Some(_), Some(sections)) = (&error, snapshot) {
        editor.restore_sections(sections);
        return ApplyResult { applied: 0, changed: 0, error };
    }

    ApplyResult { applied, changed, error }
}
