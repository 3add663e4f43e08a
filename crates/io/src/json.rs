// JSON section lists: load any saved shape, write the exported shape

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use docgrid_engine::{export_sections, normalize_sections, ExportedSection, Section};

use crate::error::DocError;

/// Extract the raw section values from a JSON document.
///
/// Accepted top-level shapes:
/// - an array of sections
/// - an object with a `sections` array (a document record)
/// - a single section object
/// - `null`, meaning no sections
pub fn section_values(root: Value) -> Result<Vec<Value>, DocError> {
    match root {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("sections") {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(DocError::Shape(format!(
                "`sections` must be an array, found {}",
                json_type(&other)
            ))),
            None => Ok(vec![Value::Object(obj)]),
        },
        other => Err(DocError::Shape(format!(
            "expected an array of sections, found {}",
            json_type(&other)
        ))),
    }
}

/// Parse JSON text into canonical sections.
pub fn parse_sections(text: &str) -> Result<Vec<Section>, DocError> {
    let root: Value = serde_json::from_str(text)?;
    let values = section_values(root)?;
    Ok(normalize_sections(&values))
}

/// Load canonical sections from a JSON file.
pub fn load_sections(path: &Path) -> Result<Vec<Section>, DocError> {
    let text = std::fs::read_to_string(path)?;
    let sections = parse_sections(&text)?;
    log::debug!("loaded {} section(s) from {}", sections.len(), path.display());
    Ok(sections)
}

/// Exported shape as pretty JSON.
pub fn to_json_string(sections: &[ExportedSection]) -> Result<String, DocError> {
    Ok(serde_json::to_string_pretty(sections)?)
}

/// Write sections in the exported shape.
pub fn save_sections(sections: &[Section], path: &Path) -> Result<(), DocError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &export_sections(sections))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_section_values_shapes() {
        assert_eq!(section_values(json!(null)).unwrap().len(), 0);
        assert_eq!(section_values(json!([{}, {}])).unwrap().len(), 2);
        assert_eq!(section_values(json!({"sections": [{}]})).unwrap().len(), 1);
        assert_eq!(section_values(json!({"columns": ["A"]})).unwrap().len(), 1);
        assert!(matches!(section_values(json!("x")), Err(DocError::Shape(_))));
        assert!(matches!(
            section_values(json!({"sections": 3})),
            Err(DocError::Shape(_))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(parse_sections("[{"), Err(DocError::Parse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sections.json");

        let sections = parse_sections(r#"[{"title": "T", "columns": ["A", "B"], "rows": [["1", 2]]}]"#)
            .unwrap();
        save_sections(&sections, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(raw[0]["colCount"], 2);
        assert_eq!(raw[0]["rows"], json!([["1", "2"]]));

        let loaded = load_sections(&path).unwrap();
        assert_eq!(loaded, sections);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_sections(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DocError::Io(_)));
    }
}
