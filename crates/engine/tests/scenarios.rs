//! End-to-end editing scenarios through the public editor API.

use docgrid_core::{CellPos, PointerButton};
use docgrid_engine::{normalize_section, Cell, CellFocus, Editor, Key, KeyInput, KeyOutcome};
use serde_json::json;

fn open_3x3() -> Editor {
    let mut editor = Editor::default();
    editor.open(&[]);
    editor.add_row_at(0, 2);
    assert_eq!(editor.sections()[0].row_count(), 3);
    editor
}

#[test]
fn merge_clears_selection() {
    let mut editor = open_3x3();
    editor.pointer_down(0, 0, 0, PointerButton::Primary);
    editor.pointer_enter(0, 1, 1);
    editor.pointer_up();
    assert!(editor.merge_selection());

    let section = &editor.sections()[0];
    let top = section.cell(0, 0).unwrap();
    assert_eq!((top.colspan, top.rowspan), (2, 2));
    for (r, c) in [(0, 1), (1, 0), (1, 1)] {
        assert!(section.is_covered(r, c));
    }
    assert!(editor.selection().is_none());
}

#[test]
fn tab_on_last_cell_appends_row_and_focuses_first_column() {
    let mut editor = open_3x3();
    let outcome = editor.handle_key(0, 2, 2, KeyInput::new(Key::Tab));
    assert_eq!(
        outcome,
        KeyOutcome::Focus(CellFocus { section: 0, pos: CellPos::new(3, 0) })
    );
    let section = &editor.sections()[0];
    assert_eq!(section.rows()[3], vec![Some(Cell::empty()); 3]);
}

#[test]
fn summary_toggle_twice_leaves_cells_unchanged() {
    let mut editor = open_3x3();
    let cells = editor.sections()[0].rows().to_vec();
    editor.toggle_summary_row(0);
    editor.toggle_summary_row(0);
    assert!(editor.sections()[0].summary_row().is_none());
    assert_eq!(editor.sections()[0].rows(), cells.as_slice());
}

#[test]
fn remove_is_noop_on_last_row_and_column() {
    let mut editor = Editor::default();
    editor.open(&[json!({"columns": ["only"], "rows": []})]);
    assert!(!editor.remove_row_at(0, 0));
    assert!(!editor.remove_column_at(0, 0));
    assert_eq!(editor.sections()[0].row_count(), 1);
    assert_eq!(editor.sections()[0].col_count(), 1);
}

#[test]
fn columns_rows_input_normalizes_to_cells() {
    let section = normalize_section(&json!({"columns": ["A", "B"], "rows": [["1", "2"]]}));
    assert_eq!(section.col_count(), 2);
    assert_eq!(
        section.rows(),
        &[
            vec![Some(Cell::new("A")), Some(Cell::new("B"))],
            vec![Some(Cell::new("1")), Some(Cell::new("2"))],
        ]
    );
}

#[test]
fn drag_never_crosses_sections() {
    let mut editor = open_3x3();
    editor.add_section();
    editor.pointer_down(0, 0, 0, PointerButton::Primary);
    editor.pointer_enter(1, 1, 1);
    editor.pointer_enter(0, 2, 2);
    editor.pointer_up();
    let (section, range) = editor.selection_range().unwrap();
    assert_eq!(section, 0);
    assert_eq!((range.height(), range.width()), (3, 3));

    editor.pointer_down(1, 0, 0, PointerButton::Primary);
    assert_eq!(editor.selection_range().unwrap().0, 1);
}

#[test]
fn secondary_button_does_not_start_a_drag() {
    let mut editor = open_3x3();
    assert!(!editor.pointer_down(0, 1, 1, PointerButton::Secondary));
    assert!(!editor.is_dragging());
    assert!(editor.selection().is_none());
}
