//! Errors for the JSON entry points.
//!
//! Attribute parsing itself never fails; these only cover reading an input
//! document and writing the result.

use thiserror::Error;

/// The error type returned by the document-level API and the CLI.
#[derive(Debug, Error)]
pub enum SvgAttrError {
    /// The input was not a valid attribute document.
    #[error("Failed to parse attribute document: {source}{}", hint_line(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Resolved shapes could not be written out.
    #[error("Render error: {0}")]
    Render(String),
}

fn hint_line(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for SvgAttrError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but isn't an attribute document. Each element needs a \"tag\" and attribute values must be strings.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        SvgAttrError::Parse { source: e, hint }
    }
}
