use std::fmt;

/// A missing or malformed document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum DocError {
    /// File read / write error.
    Io(String),
    /// Not valid JSON, or JSON of the wrong type.
    Parse(String),
    /// Valid JSON that holds no section list.
    Shape(String),
    /// Document record failed validation.
    Validation(Vec<FieldError>),
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Shape(msg) => write!(f, "unexpected shape: {msg}"),
            Self::Validation(errors) => {
                write!(f, "invalid document:")?;
                for e in errors {
                    write!(f, " {} ({})", e.field, e.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DocError {}

impl From<std::io::Error> for DocError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DocError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::Io(e.to_string())
        } else {
            Self::Parse(e.to_string())
        }
    }
}
