// Application settings
// Loaded from ~/.config/docgrid/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use docgrid_engine::SectionTemplate;

use crate::palette::{self, ColorSwatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // New sections
    #[serde(rename = "editor.defaultHeaders")]
    pub default_headers: Vec<String>,

    #[serde(rename = "editor.numberFirstRow")]
    pub number_first_row: bool,

    // Summary row
    #[serde(rename = "summary.label")]
    pub summary_label: String,

    #[serde(rename = "summary.labelSpan")]
    pub summary_label_span: usize,

    // Color pickers
    #[serde(rename = "palette.background")]
    pub background_palette: Vec<ColorSwatch>,

    #[serde(rename = "palette.text")]
    pub text_palette: Vec<ColorSwatch>,
}

impl Default for Settings {
    fn default() -> Self {
        let template = SectionTemplate::default();
        Self {
            default_headers: template.headers,
            number_first_row: template.number_first_row,
            summary_label: template.summary_label,
            summary_label_span: template.summary_label_span,
            background_palette: palette::default_background(),
            text_palette: palette::default_text(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docgrid");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load settings from a specific file. Read or parse errors are reported
    /// on stderr and give the defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings.sanitized(),
                Err(e) => {
                    eprintln!("Error parsing settings.json: {}", e);
                    eprintln!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Parse settings text. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Replace unusable values: invalid swatches are dropped, an empty header
    /// list and a zero label span fall back to the defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.default_headers.is_empty() {
            self.default_headers = defaults.default_headers;
        }
        if self.summary_label_span == 0 {
            self.summary_label_span = defaults.summary_label_span;
        }

        let (background, dropped_bg) =
            palette::sanitize(self.background_palette, palette::default_background);
        let (text, dropped_text) = palette::sanitize(self.text_palette, palette::default_text);
        for swatch in dropped_bg.iter().chain(dropped_text.iter()) {
            eprintln!(
                "Ignoring color '{}' ({}): expected #RRGGBB",
                swatch.label, swatch.value
            );
        }
        self.background_palette = background;
        self.text_palette = text;
        self
    }

    /// Template the editor uses for sections it creates.
    pub fn section_template(&self) -> SectionTemplate {
        SectionTemplate {
            headers: self.default_headers.clone(),
            number_first_row: self.number_first_row,
            summary_label: self.summary_label.clone(),
            summary_label_span: self.summary_label_span,
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r##"{
    // Header row and first data row of a new section
    "editor.defaultHeaders": ["ລຳດັບ", "ລາຍລະອຽດ", "ລວມເປັນເງິນ (ກີບ)"],
    "editor.numberFirstRow": true,

    // Summary row created by the toggle
    "summary.label": "ລວມມູນຄ່າທັງໝົດ/ກີບ",
    "summary.labelSpan": 3,

    // Color pickers ("" = no color)
    "palette.background": [
        { "label": "ບໍ່ມີສີ", "value": "" },
        { "label": "ຟ້າ", "value": "#0F75BC" },
        { "label": "ຟ້າອ່ອນ", "value": "#DBEAFE" },
        { "label": "ເຫຼືອງ", "value": "#FEF9C3" },
        { "label": "ຂຽວ", "value": "#DCFCE7" },
        { "label": "ແດງ", "value": "#FEE2E2" },
        { "label": "ເທົາ", "value": "#F3F4F6" },
        { "label": "ດຳ", "value": "#1F2937" }
    ],
    "palette.text": [
        { "label": "ດຳ", "value": "" },
        { "label": "ຂາວ", "value": "#FFFFFF" },
        { "label": "ຟ້າ", "value": "#0F75BC" },
        { "label": "ແດງ", "value": "#DC2626" },
        { "label": "ຂຽວ", "value": "#16A34A" },
        { "label": "ເທົາ", "value": "#6B7280" }
    ]
}
"##;

        if let Err(e) = fs::write(path, default_config) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
