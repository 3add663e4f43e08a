//! The section editor: sections plus transient UI state.
//!
//! Every public method is a complete, synchronous state transition driven
//! by one input event. Out-of-range section indices are no-ops.

use docgrid_core::{CellPos, CellRange, PointerButton, Selection, SelectionState};
use serde_json::Value;

use crate::cell::ColorProperty;
use crate::events::{EditorEvent, EventCallback};
use crate::export::{export_sections, ExportedSection};
use crate::legacy::{normalize_section, normalize_sections};
use crate::section::Section;
use crate::template::SectionTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    #[default]
    Closed,
    Open,
    /// Close requested; waiting for the host to finish its animation
    Closing,
}

/// The color picker that is currently open (at most one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerKey {
    pub section: usize,
    pub property: ColorProperty,
}

/// Where a context menu was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenu {
    pub section: usize,
    pub pos: CellPos,
}

/// A focused cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFocus {
    pub section: usize,
    pub pos: CellPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Focus(CellFocus),
    PickerClosed,
    CloseRequested,
    Ignored,
}

/// Colors of the top-left cell of the selection (swatch preview).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionColors {
    pub background: Option<String>,
    pub foreground: Option<String>,
}

pub struct Editor {
    template: SectionTemplate,
    phase: EditorPhase,
    sections: Vec<Section>,
    selection: SelectionState,
    picker: Option<PickerKey>,
    context_menu: Option<ContextMenu>,
    focus: Option<CellFocus>,
    on_event: Option<EventCallback>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(SectionTemplate::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("phase", &self.phase)
            .field("sections", &self.sections.len())
            .field("selection", &self.selection)
            .field("picker", &self.picker)
            .finish()
    }
}

impl Editor {
    pub fn new(template: SectionTemplate) -> Self {
        Self {
            template,
            phase: EditorPhase::Closed,
            sections: Vec::new(),
            selection: SelectionState::new(),
            picker: None,
            context_menu: None,
            focus: None,
            on_event: None,
        }
    }

    pub fn set_event_callback(&mut self, callback: EventCallback) {
        self.on_event = Some(callback);
    }

    fn emit(&mut self, event: EditorEvent) {
        if let Some(cb) = self.on_event.as_mut() {
            cb(event);
        }
    }

    fn reset_transient(&mut self) {
        self.selection.clear();
        self.picker = None;
        self.context_menu = None;
        self.focus = None;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == EditorPhase::Open
    }

    /// Open with previously saved sections in any historical shape.
    /// No sections means one fresh section from the template.
    pub fn open(&mut self, initial: &[Value]) {
        let sections = normalize_sections(initial);
        self.open_sections(sections);
    }

    pub fn open_sections(&mut self, sections: Vec<Section>) {
        self.sections = if sections.is_empty() {
            vec![Section::from_template(&self.template)]
        } else {
            sections
        };
        self.reset_transient();
        self.phase = EditorPhase::Open;
        log::debug!("editor opened with {} section(s)", self.sections.len());
        let count = self.sections.len();
        self.emit(EditorEvent::Opened { sections: count });
    }

    /// Ask the host to close. Returns false unless the editor was open.
    pub fn request_close(&mut self) -> bool {
        if self.phase != EditorPhase::Open {
            return false;
        }
        self.phase = EditorPhase::Closing;
        self.reset_transient();
        self.emit(EditorEvent::CloseRequested);
        true
    }

    /// Discard everything. Called by the host once the close is complete.
    pub fn finish_close(&mut self) {
        if self.phase == EditorPhase::Closed {
            return;
        }
        self.phase = EditorPhase::Closed;
        self.sections.clear();
        self.reset_transient();
        self.emit(EditorEvent::Closed);
    }

    /// Export all sections to `on_save`, then request close.
    /// Returns false (and does not call `on_save`) unless the editor is open.
    pub fn save<F>(&mut self, on_save: F) -> bool
    where
        F: FnOnce(Vec<ExportedSection>),
    {
        if self.phase != EditorPhase::Open {
            return false;
        }
        let exported = export_sections(&self.sections);
        let count = exported.len();
        log::debug!("saving {} section(s)", count);
        on_save(exported);
        self.emit(EditorEvent::Saved { sections: count });
        self.request_close();
        true
    }

    // =========================================================================
    // Sections
    // =========================================================================

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Put back sections captured before a failed batch.
    pub(crate) fn restore_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.reset_transient();
    }

    fn with_section<R>(&mut self, index: usize, f: impl FnOnce(&mut Section) -> R) -> Option<R> {
        if self.phase != EditorPhase::Open {
            return None;
        }
        self.sections.get_mut(index).map(f)
    }

    pub fn add_section(&mut self) -> bool {
        if self.phase != EditorPhase::Open {
            return false;
        }
        self.sections.push(Section::from_template(&self.template));
        true
    }

    /// Remove a section unless it is the last one.
    pub fn remove_section(&mut self, index: usize) -> bool {
        if self.phase != EditorPhase::Open || self.sections.len() <= 1 || index >= self.sections.len() {
            return false;
        }
        self.sections.remove(index);
        // Indices shifted under any transient state.
        self.reset_transient();
        true
    }

    /// Insert a deep copy right after the original. The copy goes through
    /// the same load path as saved data.
    pub fn duplicate_section(&mut self, index: usize) -> bool {
        if self.phase != EditorPhase::Open {
            return false;
        }
        let copy = match self.sections.get(index) {
            Some(section) => match serde_json::to_value(section.export()) {
                Ok(value) => normalize_section(&value),
                Err(e) => {
                    log::warn!("duplicate of section {} failed to serialize: {}", index, e);
                    section.clone()
                }
            },
            None => return false,
        };
        self.sections.insert(index + 1, copy);
        self.reset_transient();
        true
    }

    pub fn set_title(&mut self, section: usize, title: impl Into<String>) -> bool {
        let title = title.into();
        self.with_section(section, |s| s.title = title).is_some()
    }

    pub fn set_cell_value(&mut self, section: usize, row: usize, col: usize, value: impl Into<String>) -> bool {
        let value = value.into();
        self.with_section(section, |s| s.set_cell_value(row, col, value))
            .unwrap_or(false)
    }

    pub fn add_row_at(&mut self, section: usize, row: usize) -> bool {
        self.with_section(section, |s| s.add_row_at(row)).is_some()
    }

    pub fn remove_row_at(&mut self, section: usize, row: usize) -> bool {
        self.with_section(section, |s| s.remove_row_at(row)).unwrap_or(false)
    }

    pub fn move_row(&mut self, section: usize, row: usize, direction: isize) -> bool {
        self.with_section(section, |s| s.move_row(row, direction)).unwrap_or(false)
    }

    pub fn add_column_at(&mut self, section: usize, col: usize) -> bool {
        self.with_section(section, |s| s.add_column_at(col)).is_some()
    }

    pub fn remove_column_at(&mut self, section: usize, col: usize) -> bool {
        self.with_section(section, |s| s.remove_column_at(col)).unwrap_or(false)
    }

    /// Returns whether the section has a summary row afterwards.
    pub fn toggle_summary_row(&mut self, section: usize) -> bool {
        let label = self.template.summary_label.clone();
        let span = self.template.summary_label_span;
        self.with_section(section, |s| s.toggle_summary_row(&label, span))
            .unwrap_or(false)
    }

    pub fn set_summary_label(&mut self, section: usize, label: impl Into<String>) -> bool {
        let label = label.into();
        self.with_section(section, |s| s.set_summary_label(label)).unwrap_or(false)
    }

    pub fn set_summary_value(&mut self, section: usize, index: usize, value: impl Into<String>) -> bool {
        let value = value.into();
        self.with_section(section, |s| s.set_summary_value(index, value))
            .unwrap_or(false)
    }

    pub fn set_summary_label_colspan(&mut self, section: usize, span: usize) -> bool {
        self.with_section(section, |s| s.set_summary_label_colspan(span))
            .unwrap_or(false)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.current()
    }

    /// Section index and normalized range of the current selection.
    pub fn selection_range(&self) -> Option<(usize, CellRange)> {
        self.selection
            .range()
            .filter(|(section, _)| *section < self.sections.len())
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    pub fn is_selected(&self, section: usize, row: usize, col: usize) -> bool {
        self.selection.contains(section, row, col)
    }

    pub fn pointer_down(&mut self, section: usize, row: usize, col: usize, button: PointerButton) -> bool {
        if self.phase != EditorPhase::Open || section >= self.sections.len() {
            return false;
        }
        let started = self.selection.pointer_down(section, CellPos::new(row, col), button);
        if started {
            self.picker = None;
            self.context_menu = None;
        }
        started
    }

    pub fn pointer_enter(&mut self, section: usize, row: usize, col: usize) -> bool {
        self.selection.pointer_enter(section, CellPos::new(row, col))
    }

    /// End of a drag, wherever the pointer was released.
    pub fn pointer_up(&mut self) {
        self.selection.pointer_up();
    }

    /// Replace the selection directly (scripted edits).
    pub fn select(&mut self, section: usize, start: CellPos, end: CellPos) -> bool {
        if self.phase != EditorPhase::Open || section >= self.sections.len() {
            return false;
        }
        self.selection.select(Selection::new(section, start, end));
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Secondary-click on a cell. Collapses the selection onto the cell
    /// unless it is already selected.
    pub fn open_context_menu(&mut self, section: usize, row: usize, col: usize) -> bool {
        if self.phase != EditorPhase::Open || section >= self.sections.len() {
            return false;
        }
        self.context_menu = Some(ContextMenu { section, pos: CellPos::new(row, col) });
        self.picker = None;
        if !self.selection.contains(section, row, col) {
            self.selection.select(Selection::at(section, CellPos::new(row, col)));
        }
        true
    }

    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.context_menu
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    // =========================================================================
    // Merge / Color
    // =========================================================================

    pub fn can_merge(&self) -> bool {
        self.selection_range()
            .map(|(_, r)| r.height() > 1 || r.width() > 1)
            .unwrap_or(false)
    }

    pub fn has_merged_in_selection(&self) -> bool {
        self.selection_range()
            .map(|(si, r)| self.sections[si].has_merged_in(r))
            .unwrap_or(false)
    }

    /// Merge the selected range. The selection is cleared afterwards.
    pub fn merge_selection(&mut self) -> bool {
        let (si, range) = match self.selection_range() {
            Some(sel) if self.phase == EditorPhase::Open => sel,
            _ => return false,
        };
        let merged = self.sections[si].merge(range);
        log::debug!("merge section {} {:?}: {}", si, range, merged);
        self.selection.clear();
        merged
    }

    /// Unmerge inside the selected range. The selection is cleared afterwards.
    pub fn unmerge_selection(&mut self) -> bool {
        let (si, range) = match self.selection_range() {
            Some(sel) if self.phase == EditorPhase::Open => sel,
            _ => return false,
        };
        let split = self.sections[si].unmerge(range);
        log::debug!("unmerge section {} {:?}: {}", si, range, split);
        self.selection.clear();
        split
    }

    /// Color every real cell of the selection. The selection stays so
    /// further colors can target the same range; the picker closes.
    pub fn apply_color_to_selection(&mut self, property: ColorProperty, value: &str) -> bool {
        let (si, range) = match self.selection_range() {
            Some(sel) if self.phase == EditorPhase::Open => sel,
            _ => return false,
        };
        self.picker = None;
        self.sections[si].apply_color(range, property, value)
    }

    pub fn selection_colors(&self) -> SelectionColors {
        let cell = self
            .selection_range()
            .and_then(|(si, r)| self.sections[si].cell(r.start_row, r.start_col));
        match cell {
            Some(cell) => SelectionColors {
                background: cell.bg.clone(),
                foreground: cell.color.clone(),
            },
            None => SelectionColors::default(),
        }
    }

    pub fn open_picker(&self) -> Option<PickerKey> {
        self.picker
    }

    /// Open a picker, or close it if it is the one already open.
    /// Returns whether that picker is open afterwards.
    pub fn toggle_picker(&mut self, section: usize, property: ColorProperty) -> bool {
        if self.phase != EditorPhase::Open || section >= self.sections.len() {
            return false;
        }
        let key = PickerKey { section, property };
        self.picker = if self.picker == Some(key) { None } else { Some(key) };
        self.picker.is_some()
    }

    pub fn close_picker(&mut self) -> bool {
        self.picker.take().is_some()
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    pub fn focus(&self) -> Option<CellFocus> {
        self.focus
    }

    /// Escape: closes an open picker first, otherwise asks to close the
    /// editor. Ignored while closing.
    pub fn escape(&mut self) -> KeyOutcome {
        if self.phase != EditorPhase::Open {
            return KeyOutcome::Ignored;
        }
        if self.close_picker() {
            KeyOutcome::PickerClosed
        } else if self.request_close() {
            KeyOutcome::CloseRequested
        } else {
            KeyOutcome::Ignored
        }
    }

    /// Key pressed while the cell at `(section, row, col)` has focus.
    pub fn handle_key(&mut self, section: usize, row: usize, col: usize, input: KeyInput) -> KeyOutcome {
        if input.key == Key::Escape {
            return self.escape();
        }
        let from = CellPos::new(row, col);
        let target = match input.key {
            Key::Tab => self.with_section(section, |s| s.tab_target(from, input.shift)),
            Key::Enter if !input.shift => self.with_section(section, |s| s.enter_target(from)),
            _ => None,
        };
        match target.flatten() {
            Some(pos) => {
                let focus = CellFocus { section, pos };
                self.focus = Some(focus);
                KeyOutcome::Focus(focus)
            }
            None => KeyOutcome::Ignored,
        }
    }
}
