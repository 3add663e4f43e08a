// Color picker palettes

use serde::{Deserialize, Serialize};

use crate::Color;

/// One picker entry. An empty `value` means "no override".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub label: String,
    pub value: String,
}

impl ColorSwatch {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }

    pub fn is_none(&self) -> bool {
        self.value.is_empty()
    }

    /// Parsed color, None for the "no override" entry or a malformed value.
    pub fn color(&self) -> Option<Color> {
        Color::from_hex_str(&self.value)
    }

    /// Empty or a `#RRGGBB` value.
    pub fn is_valid(&self) -> bool {
        self.is_none() || self.color().is_some()
    }
}

pub fn default_background() -> Vec<ColorSwatch> {
    vec![
        ColorSwatch::new("ບໍ່ມີສີ", ""),
        ColorSwatch::new("ຟ້າ", "#0F75BC"),
        ColorSwatch::new("ຟ້າອ່ອນ", "#DBEAFE"),
        ColorSwatch::new("ເຫຼືອງ", "#FEF9C3"),
        ColorSwatch::new("ຂຽວ", "#DCFCE7"),
        ColorSwatch::new("ແດງ", "#FEE2E2"),
        ColorSwatch::new("ເທົາ", "#F3F4F6"),
        ColorSwatch::new("ດຳ", "#1F2937"),
    ]
}

pub fn default_text() -> Vec<ColorSwatch> {
    vec![
        ColorSwatch::new("ດຳ", ""),
        ColorSwatch::new("ຂາວ", "#FFFFFF"),
        ColorSwatch::new("ຟ້າ", "#0F75BC"),
        ColorSwatch::new("ແດງ", "#DC2626"),
        ColorSwatch::new("ຂຽວ", "#16A34A"),
        ColorSwatch::new("ເທົາ", "#6B7280"),
    ]
}

/// Keep valid swatches, reporting the rest. An empty result falls back to
/// `default`.
pub fn sanitize(
    swatches: Vec<ColorSwatch>,
    default: fn() -> Vec<ColorSwatch>,
) -> (Vec<ColorSwatch>, Vec<ColorSwatch>) {
    let (valid, invalid): (Vec<_>, Vec<_>) = swatches.into_iter().partition(|s| s.is_valid());
    if valid.is_empty() {
        (default(), invalid)
    } else {
        (valid, invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palettes_are_valid() {
        assert!(default_background().iter().all(ColorSwatch::is_valid));
        assert!(default_text().iter().all(ColorSwatch::is_valid));
        assert!(default_background()[0].is_none());
        assert_eq!(default_text().len(), 6);
    }

    #[test]
    fn test_sanitize_drops_bad_values() {
        let (kept, dropped) = sanitize(
            vec![ColorSwatch::new("Blue", "#0F75BC"), ColorSwatch::new("Bad", "blue")],
            default_text,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(dropped[0].label, "Bad");

        let (kept, _) = sanitize(vec![ColorSwatch::new("Bad", "#12")], default_text);
        assert_eq!(kept, default_text());
    }
}
