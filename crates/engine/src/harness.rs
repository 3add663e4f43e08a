//! Test harness for editor operations with event tracking.
//!
//! `EditorHarness` wraps an open `Editor` and:
//! - records every emitted event
//! - applies op batches through `apply_ops`
//! - checks every section's structural invariants after each batch
//!
//! Use it to test editor behavior without a UI host.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::editor::Editor;
use crate::events::EventCollector;
use crate::ops::{apply_ops, ApplyResult, Op};
use crate::section::Section;

pub struct EditorHarness {
    editor: Editor,
    events: Rc<RefCell<EventCollector>>,
}

impl EditorHarness {
    /// A harness with the editor opened on one template section.
    pub fn new() -> Self {
        Self::with_sections(&[])
    }

    /// A harness with the editor opened on previously saved sections.
    pub fn with_sections(initial: &[Value]) -> Self {
        let events = Rc::new(RefCell::new(EventCollector::new()));
        let sink = events.clone();
        let mut editor = Editor::default();
        editor.set_event_callback(Box::new(move |e| sink.borrow_mut().push(e)));
        editor.open(initial);
        let harness = Self { editor, events };
        harness.assert_invariants();
        harness
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn section(&self, index: usize) -> &Section {
        &self.editor.sections()[index]
    }

    pub fn events(&self) -> std::cell::Ref<'_, EventCollector> {
        self.events.borrow()
    }

    /// Apply a batch and verify invariants afterwards.
    pub fn apply(&mut self, ops: &[Op], atomic: bool) -> ApplyResult {
        let result = apply_ops(&mut self.editor, ops, atomic);
        self.assert_invariants();
        result
    }

    /// Panics with the section index and violation if any section is invalid.
    pub fn assert_invariants(&self) {
        for (i, section) in self.editor.sections().iter().enumerate() {
            if let Err(e) = section.check_invariants() {
                panic!("section {} invalid: {}\n{:#?}", i, e, section);
            }
        }
    }
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::ColorProperty;
    use crate::events::EditorEvent;
    use serde_json::json;

    fn select(section: usize, r1: usize, c1: usize, r2: usize, c2: usize) -> Op {
        Op::Select { section, start_row: r1, start_col: c1, end_row: r2, end_col: c2 }
    }

    #[test]
    fn test_harness_basic_apply() {
        let mut h = EditorHarness::new();
        let result = h.apply(
            &[
                Op::SetTitle { section: 0, title: "Costs".into() },
                Op::SetCell { section: 0, row: 1, col: 1, value: "Paper".into() },
                Op::AddColumn { section: 0, at: 3 },
            ],
            true,
        );
        assert_eq!(result.applied, 3);
        assert_eq!(h.section(0).title, "Costs");
        assert_eq!(h.section(0).row_values(1), vec!["1", "Paper", "", ""]);
        assert_eq!(h.events().events(), &[EditorEvent::Opened { sections: 1 }]);
    }

    #[test]
    fn test_merge_then_unmerge_restores_grid_shape() {
        let mut h = EditorHarness::new();
        h.apply(&[Op::AddRow { section: 0, at: 2 }], true);
        let before = h.section(0).clone();

        h.apply(&[select(0, 1, 0, 2, 2), Op::Merge], true);
        assert_eq!(h.section(0).merged_ranges().len(), 1);

        h.apply(&[select(0, 1, 0, 2, 2), Op::Unmerge], true);
        let after = h.section(0);
        assert!(after.merged_ranges().is_empty());
        for r in 0..before.row_count() {
            for c in 0..before.col_count() {
                assert!(after.cell(r, c).is_some(), "({}, {}) missing", r, c);
            }
        }
        // The merged text stays on the former anchor.
        assert_eq!(after.cell(1, 0).unwrap().value, "1");
    }

    #[test]
    fn test_structure_edits_around_merges_stay_valid() {
        let mut h = EditorHarness::new();
        let result = h.apply(
            &[
                Op::AddRow { section: 0, at: 2 },
                Op::AddRow { section: 0, at: 3 },
                select(0, 1, 1, 3, 2),
                Op::Merge,
                Op::AddRow { section: 0, at: 2 },
                Op::AddColumn { section: 0, at: 2 },
                Op::RemoveRow { section: 0, row: 1 },
                Op::RemoveColumn { section: 0, col: 1 },
                Op::MoveRow { section: 0, row: 0, direction: 1 },
                Op::ToggleSummary { section: 0 },
                Op::RemoveColumn { section: 0, col: 0 },
            ],
            false,
        );
        assert!(result.error.is_none());
    }

    #[test]
    fn test_colors_survive_save_and_reload() {
        let mut h = EditorHarness::new();
        h.apply(
            &[
                select(0, 0, 0, 0, 2),
                Op::Color { property: ColorProperty::Background, value: "#0F75BC".into() },
                Op::Color { property: ColorProperty::Foreground, value: "#FFFFFF".into() },
            ],
            true,
        );
        let mut saved = Vec::new();
        h.editor_mut().save(|s| saved = s);
        let values: Vec<Value> = saved.iter().map(|s| serde_json::to_value(s).unwrap()).collect();

        let reloaded = EditorHarness::with_sections(&values);
        let cell = reloaded.section(0).cell(0, 2).unwrap();
        assert_eq!(cell.bg.as_deref(), Some("#0F75BC"));
        assert_eq!(cell.color.as_deref(), Some("#FFFFFF"));
    }

    #[test]
    fn test_legacy_input_opens_valid() {
        let h = EditorHarness::with_sections(&[
            json!({"columns": ["A"], "rows": [["1"], ["2"]]}),
            json!({"headerRow": [{"value": "H", "colspan": 5}], "cells": [[{"value": "x"}]]}),
            json!(null),
        ]);
        assert_eq!(h.editor().sections().len(), 3);
        assert_eq!(h.section(1).col_count(), 1);
    }
}
