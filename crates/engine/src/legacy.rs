//! Loading sections saved by older versions of the editor.
//!
//! Three historical shapes exist for the same concept:
//! - canonical: `cells` is the full grid of cell objects, header row included
//! - split header: `headerRow` plus `cells` holding only the body rows
//! - columns/rows: `columns` (header strings) plus `rows` of strings or `{value}`
//!
//! Input is classified once into a `SectionShape`, then converted to a
//! `Section`. Nothing past this module ever sees a legacy shape.

use serde_json::{Map, Value};

use super::cell::{Cell, Slot};
use super::section::Section;
use super::summary::SummaryRow;

/// Which historical shape a section object has.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionShape {
    Canonical {
        cells: Vec<Vec<Slot>>,
        col_count: Option<usize>,
    },
    SplitHeader {
        header: Vec<Slot>,
        body: Vec<Vec<Slot>>,
        col_count: Option<usize>,
    },
    ColumnsRows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Unrecognized,
}

impl SectionShape {
    /// Classify by shape markers, in priority order: an object at
    /// `cells[0][0]`, then `headerRow`, then `columns`.
    pub fn detect(obj: &Map<String, Value>) -> Self {
        let col_count = obj.get("colCount").and_then(as_count);

        if let Some(Value::Array(rows)) = obj.get("cells") {
            let first_is_object = rows
                .first()
                .and_then(|r| r.as_array())
                .and_then(|r| r.first())
                .map(|c| c.is_object())
                .unwrap_or(false);
            if first_is_object {
                return SectionShape::Canonical {
                    cells: rows.iter().map(slot_row).collect(),
                    col_count,
                };
            }
        }

        if let Some(Value::Array(header)) = obj.get("headerRow") {
            let body = match obj.get("cells") {
                Some(Value::Array(rows)) => rows.iter().map(slot_row).collect(),
                _ => Vec::new(),
            };
            return SectionShape::SplitHeader {
                header: header.iter().map(slot_from_value).collect(),
                body,
                col_count,
            };
        }

        if let Some(Value::Array(columns)) = obj.get("columns") {
            let rows = match obj.get("rows") {
                Some(Value::Array(rows)) => rows
                    .iter()
                    .map(|r| match r {
                        Value::Array(vals) => vals.iter().map(text_from_value).collect(),
                        _ => Vec::new(),
                    })
                    .collect(),
                _ => Vec::new(),
            };
            return SectionShape::ColumnsRows {
                columns: columns.iter().map(text_from_value).collect(),
                rows,
            };
        }

        SectionShape::Unrecognized
    }

    pub fn name(&self) -> &'static str {
        match self {
            SectionShape::Canonical { .. } => "canonical",
            SectionShape::SplitHeader { .. } => "split-header",
            SectionShape::ColumnsRows { .. } => "columns-rows",
            SectionShape::Unrecognized => "unrecognized",
        }
    }

    /// Grid and column count in canonical form. `None` for unrecognized input.
    fn into_grid(self) -> Option<(Vec<Vec<Slot>>, usize)> {
        match self {
            SectionShape::Canonical { cells, col_count } => {
                let width = cells.first().map(|r| r.len()).unwrap_or(0);
                let col_count = bounded_col_count(col_count, &cells).unwrap_or(width);
                Some((cells, col_count))
            }
            SectionShape::SplitHeader { header, body, col_count } => {
                let width = header.len();
                let mut cells = Vec::with_capacity(body.len() + 1);
                cells.push(header);
                cells.extend(body);
                let col_count = bounded_col_count(col_count, &cells).unwrap_or(width);
                Some((cells, col_count))
            }
            SectionShape::ColumnsRows { columns, rows } => {
                let width = columns.len();
                let mut cells = Vec::with_capacity(rows.len() + 1);
                cells.push(columns.into_iter().map(|h| Some(Cell::new(h))).collect());
                cells.extend(
                    rows.into_iter()
                        .map(|r| r.into_iter().map(|v| Some(Cell::new(v))).collect()),
                );
                Some((cells, width))
            }
            SectionShape::Unrecognized => None,
        }
    }
}

/// Normalize one section-like value into a valid `Section`.
pub fn normalize_section(value: &Value) -> Section {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            log::warn!("section is not an object, using a blank section");
            return Section::blank();
        }
    };

    let title = obj.get("title").map(text_from_value).unwrap_or_default();
    let summary_row = obj.get("summaryRow").and_then(summary_from_value);
    let shape = SectionShape::detect(obj);
    let shape_name = shape.name();

    let (cells, col_count) = match shape.into_grid() {
        Some(grid) if !grid.0.is_empty() && grid.1 > 0 => grid,
        _ => {
            log::warn!("section '{}' has no usable grid ({}), using a blank grid", title, shape_name);
            let mut section = Section::blank();
            section.title = title;
            return section;
        }
    };

    let (section, fixes) = Section::from_parts(title, col_count, cells, summary_row);
    if fixes > 0 {
        log::warn!(
            "section '{}' ({}) needed {} repair(s) on load",
            section.title,
            shape_name,
            fixes
        );
    }
    section
}

/// Normalize a list of section-like values.
pub fn normalize_sections(values: &[Value]) -> Vec<Section> {
    values.iter().map(normalize_section).collect()
}

// =============================================================================
// Value helpers
// =============================================================================

fn as_count(value: &Value) -> Option<usize> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .map(|n| n as usize)
        .filter(|n| *n > 0)
}

/// A stored `colCount` wider than every loaded row is not trusted; the
/// widest row wins.
fn bounded_col_count(declared: Option<usize>, cells: &[Vec<Slot>]) -> Option<usize> {
    let declared = declared?;
    let widest = cells.iter().map(|r| r.len()).max().unwrap_or(0);
    if declared > widest {
        log::warn!("colCount {} exceeds the widest row ({}), using {}", declared, widest, widest);
        return Some(widest);
    }
    Some(declared)
}

/// Plain text of a legacy value: strings as-is, numbers stringified,
/// `{value: ...}` objects unwrapped, anything else empty.
fn text_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(obj) => obj.get("value").map(text_from_value).unwrap_or_default(),
        _ => String::new(),
    }
}

fn color_from_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn slot_from_value(value: &Value) -> Slot {
    match value {
        Value::Null => None,
        Value::Object(obj) => Some(Cell {
            value: obj.get("value").map(text_from_value).unwrap_or_default(),
            colspan: obj.get("colspan").and_then(as_count).unwrap_or(1),
            rowspan: obj.get("rowspan").and_then(as_count).unwrap_or(1),
            bg: color_from_value(obj.get("bg")),
            color: color_from_value(obj.get("color")),
        }),
        other => Some(Cell::new(text_from_value(other))),
    }
}

fn slot_row(value: &Value) -> Vec<Slot> {
    match value {
        Value::Array(cells) => cells.iter().map(slot_from_value).collect(),
        _ => Vec::new(),
    }
}

fn summary_from_value(value: &Value) -> Option<SummaryRow> {
    let obj = value.as_object()?;
    Some(SummaryRow {
        label: obj.get("label").map(text_from_value).unwrap_or_default(),
        label_colspan: obj.get("labelColspan").and_then(as_count).unwrap_or(1),
        values: match obj.get("values") {
            Some(Value::Array(vals)) => vals.iter().map(text_from_value).collect(),
            _ => Vec::new(),
        },
    })
}
