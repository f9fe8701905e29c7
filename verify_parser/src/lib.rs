//! Parsers for field verification.
//!
//! This crate parses the two textual inputs of the verifier:
//!
//! - **Rule expressions** such as `required,min=3`, split into typed
//!   [`Clause`]s (see [`parse_rules`])
//! - **Record documents** in YAML, TOML or JSON, turned into
//!   [`verify_core::Record`]s (see [`parse_file`])
//!
//! # Example
//!
//! ```rust
//! use verify_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: Foo
//! fields:
//!   - name: A
//!     kind: sequence
//!     value: []
//!     verify: minSize=5
//! "#;
//!
//! let record = parse_yaml(yaml).expect("Failed to parse record");
//! assert_eq!(record.name, "Foo");
//! assert_eq!(record.fields[0].rules(), Some("minSize=5"));
//! ```

mod document;
mod rules;

pub use document::*;
pub use rules::*;

use std::path::Path;
use thiserror::Error;
use tracing::debug;
use verify_core::Record;

/// Errors that can occur while parsing record documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Document parsed but does not describe a valid record
    #[error("Invalid record document: {0}")]
    InvalidDocument(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported record document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a record document from a YAML string.
pub fn parse_yaml(content: &str) -> Result<Record> {
    let document: RecordDocument = serde_yaml_ng::from_str(content)?;
    document.into_record()
}

/// Parse a record document from a TOML string.
///
/// TOML has no null, so nilable fields are written by omitting `value`.
///
/// # Example
///
/// ```rust
/// use verify_parser::parse_toml;
///
/// let toml = r#"
/// name = "Foo"
///
/// [[fields]]
/// name = "C"
/// kind = "i8"
/// value = 2
/// verify = "min=3"
/// "#;
///
/// let record = parse_toml(toml).unwrap();
/// assert_eq!(record.fields.len(), 1);
/// ```
pub fn parse_toml(content: &str) -> Result<Record> {
    let document: RecordDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    document.into_record()
}

/// Parse a record document from a JSON string.
pub fn parse_json(content: &str) -> Result<Record> {
    let document: RecordDocument = serde_json::from_str(content)?;
    document.into_record()
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `DocumentFormat::Yaml`
/// * `.toml` → `DocumentFormat::Toml`
/// * `.json` → `DocumentFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "toml" => Ok(DocumentFormat::Toml),
        "json" => Ok(DocumentFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a record document from a file, detecting its format from the
/// extension.
pub fn parse_file(path: &Path) -> Result<Record> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_str(&content, format)
}

/// Parse a record document from a string in the given format.
pub fn parse_str(content: &str, format: DocumentFormat) -> Result<Record> {
    let record = match format {
        DocumentFormat::Yaml => parse_yaml(content)?,
        DocumentFormat::Toml => parse_toml(content)?,
        DocumentFormat::Json => parse_json(content)?,
    };

    debug!(
        "Parsed {:?} record document '{}' with {} fields",
        format,
        record.name,
        record.len()
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use verify_core::{IntWidth, Value};

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("record.yaml")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("record.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("record.toml")).unwrap(),
            DocumentFormat::Toml
        );
        assert_eq!(
            detect_format(Path::new("record.json")).unwrap(),
            DocumentFormat::Json
        );
        assert!(matches!(
            detect_format(Path::new("record.txt")),
            Err(ParserError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format(Path::new("record")),
            Err(ParserError::InvalidExtension)
        ));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "name": "Foo",
            "fields": [
                {"name": "E", "kind": "i64", "value": 9, "verify": "min=3,max=7"},
                {"name": "F", "kind": "reference", "elem": "bool"}
            ]
        }"#;

        let record = parse_json(json).unwrap();
        assert_eq!(record.fields[0].value, Value::Int(IntWidth::W64, 9));
        assert_eq!(record.fields[0].rules(), Some("min=3,max=7"));
        assert_eq!(record.fields[1].value, Value::Reference(None));
        assert_eq!(record.fields[1].rules(), None);
    }

    #[test]
    fn test_parse_yaml_invalid() {
        let result = parse_yaml("name: [unterminated");
        assert!(matches!(result, Err(ParserError::YamlError(_))));
    }

    #[test]
    fn test_parse_toml_invalid() {
        let result = parse_toml("name = ");
        assert!(matches!(result, Err(ParserError::TomlError(_))));
    }
}
