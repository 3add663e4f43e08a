//! Document record the section grid is attached to.
//!
//! Ids arrive either as JSON numbers or as digit strings typed into a form;
//! both load the same way.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DocError, FieldError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Assigned by the server on first save.
    #[serde(default, deserialize_with = "id_field", skip_serializing_if = "Option::is_none")]
    pub rqdid: Option<u64>,
    #[serde(default, deserialize_with = "id_field")]
    pub doccategoryid: Option<u64>,
    #[serde(default, deserialize_with = "id_field")]
    pub req_user: Option<u64>,
    #[serde(default)]
    pub req_to: String,
    #[serde(default)]
    pub req_reason: String,
    #[serde(default, deserialize_with = "id_field")]
    pub branchid: Option<u64>,
    #[serde(default, deserialize_with = "id_field")]
    pub departmentid: Option<u64>,
    #[serde(default, deserialize_with = "id_field")]
    pub boardid: Option<u64>,
    #[serde(default, deserialize_with = "money_field")]
    pub totalmoney: u64,
    /// Saved sections, in whatever shape they were stored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Value>,
}

impl Document {
    /// Check the fields the request form requires.
    pub fn validate(&self) -> Result<(), DocError> {
        let mut errors = Vec::new();

        let ids = [
            ("doccategoryid", self.doccategoryid, "document category is required"),
            ("req_user", self.req_user, "requester is required"),
            ("branchid", self.branchid, "branch is required"),
            ("departmentid", self.departmentid, "department is required"),
            ("boardid", self.boardid, "board is required"),
        ];
        for (field, value, message) in ids {
            if value.is_none() {
                errors.push(FieldError { field, message: message.to_string() });
            }
        }
        if self.req_to.trim().is_empty() {
            errors.push(FieldError { field: "req_to", message: "recipient is required".to_string() });
        }
        if self.req_reason.trim().is_empty() {
            errors.push(FieldError {
                field: "req_reason",
                message: "reason is required".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            // Keep form order.
            let order = [
                "doccategoryid",
                "req_user",
                "req_to",
                "req_reason",
                "branchid",
                "departmentid",
                "boardid",
            ];
            errors.sort_by_key(|e| order.iter().position(|f| *f == e.field));
            Err(DocError::Validation(errors))
        }
    }
}

/// Load a document record from a JSON file.
pub fn load_document(path: &Path) -> Result<Document, DocError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Digits of a form value. Anything else is dropped, the way the form
/// filters numeric inputs while typing.
fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn number_from_value(value: Option<Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => digits(&s).parse().ok(),
        _ => None,
    }
}

fn id_field<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    // 0 is the form's "nothing chosen".
    Ok(number_from_value(value).filter(|id| *id != 0))
}

fn money_field<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(number_from_value(value).unwrap_or(0))
}
