use serde::{Deserialize, Serialize};

/// Which color of a cell a color action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorProperty {
    /// Fill color (`bg` in the exported shape)
    Background,
    /// Text color (`color` in the exported shape)
    Foreground,
}

/// One real grid position: text plus span and color overrides.
///
/// Positions covered by another cell's span are not `Cell`s at all; a row
/// holds `Option<Cell>` and covered positions are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub value: String,
    #[serde(default = "one")]
    pub colspan: usize,
    #[serde(default = "one")]
    pub rowspan: usize,
    /// None = no override (renders with the default background)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    /// None = no override (renders with the default text color)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn one() -> usize {
    1
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            colspan: 1,
            rowspan: 1,
            bg: None,
            color: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// True when this cell spans more than one position.
    pub fn is_merged(&self) -> bool {
        self.colspan > 1 || self.rowspan > 1
    }

    pub fn color_of(&self, property: ColorProperty) -> Option<&str> {
        match property {
            ColorProperty::Background => self.bg.as_deref(),
            ColorProperty::Foreground => self.color.as_deref(),
        }
    }

    /// Set a color override. An empty string clears the override.
    pub fn set_color(&mut self, property: ColorProperty, value: &str) {
        let value = if value.is_empty() { None } else { Some(value.to_string()) };
        match property {
            ColorProperty::Background => self.bg = value,
            ColorProperty::Foreground => self.color = value,
        }
    }
}

/// A grid position: a real cell, or `None` when covered by a span.
pub type Slot = Option<Cell>;
