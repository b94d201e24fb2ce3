//! Loading submission files (YAML or JSON) into raw form values

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError as JsonSchemaError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::form::schema::FormSpec;
use crate::form::submission::RawValues;
use crate::yaml::YamlSyntaxError;

/// Anything that can go wrong reading a submission file
#[derive(Debug, Error, Diagnostic)]
pub enum SubmissionFileError {
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(basic_form::file::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Structure(#[from] StructureError),

    #[error("Form schema could not be compiled: {0}")]
    #[diagnostic(code(basic_form::file::schema))]
    Schema(String),
}

/// Submission file that parsed but does not fit the form's shape
#[derive(Debug, Error, Diagnostic)]
#[error("Submission file does not match the form: {summary}")]
#[diagnostic(code(basic_form::file::structure))]
pub struct StructureError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<Violation>,
}

impl StructureError {
    fn new(filename: &str, source: &str, violations: Vec<Violation>) -> Self {
        let count = violations.len();
        let summary = if count == 1 {
            "1 problem".to_string()
        } else {
            format!("{} problems", count)
        };
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// A single structural problem in a submission file
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct Violation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl Violation {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Read and check a submission file
pub fn load_file(path: &Path, form: &FormSpec) -> Result<RawValues, SubmissionFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| SubmissionFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    debug!(path = %path.display(), bytes = content.len(), "loading submission file");
    parse_values(&content, &filename, form)
}

/// Parse submission text and check it against the form's file schema
///
/// Fields may be missing here; required values are enforced after flags
/// have been merged in.
pub fn parse_values(
    content: &str,
    filename: &str,
    form: &FormSpec,
) -> Result<RawValues, SubmissionFileError> {
    let document: JsonValue = serde_yml::from_str(content)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, content, filename))?;

    let schema = form.file_schema();
    let validator =
        jsonschema::validator_for(&schema).map_err(|e| SubmissionFileError::Schema(e.to_string()))?;

    let violations: Vec<Violation> = validator
        .iter_errors(&document)
        .map(|e| error_to_violation(content, &e))
        .collect();
    if !violations.is_empty() {
        return Err(StructureError::new(filename, content, violations).into());
    }

    match document {
        JsonValue::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(StructureError::new(
            filename,
            content,
            vec![Violation {
                span: first_line_span(content),
                message: "Submission must be a mapping of field names to values".to_string(),
                hint: "not a mapping".to_string(),
                help: None,
            }],
        )
        .into()),
    }
}

fn error_to_violation(content: &str, error: &JsonSchemaError) -> Violation {
    let path = error.instance_path.to_string();
    let field = path.trim_start_matches('/');

    let (message, hint, help) = match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            (
                format!("Missing required field: {}", name),
                "required field missing".to_string(),
                Some(format!("Add a line `{}: ...` to the file", name)),
            )
        }
        ValidationErrorKind::Type { kind } => (
            format!("Wrong type for '{}': expected {:?}", field, kind),
            "wrong type".to_string(),
            None,
        ),
        ValidationErrorKind::Enum { options } => {
            let opts = options
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_else(|| options.to_string());
            (
                format!("Invalid value for '{}': must be one of: {}", field, opts),
                "invalid value".to_string(),
                Some(format!("Valid values: {}", opts)),
            )
        }
        ValidationErrorKind::Pattern { .. } => (
            format!("Value of '{}' is not a date", field),
            "expected YYYY-MM-DD".to_string(),
            Some("Write dates as YYYY-MM-DD, e.g. 1995-05-01".to_string()),
        ),
        ValidationErrorKind::MinLength { .. } => (
            format!("Value of '{}' must not be empty", field),
            "empty".to_string(),
            None,
        ),
        ValidationErrorKind::AdditionalProperties { unexpected } => (
            format!("Unknown field(s): {}", unexpected.join(", ")),
            "unknown field".to_string(),
            Some("Remove the field or check its spelling".to_string()),
        ),
        _ => (
            format!("Invalid submission at '{}': {}", field, error),
            "invalid".to_string(),
            None,
        ),
    };

    let span = match &error.kind {
        ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
            .first()
            .and_then(|key| find_key_span(content, key))
            .unwrap_or_else(|| first_line_span(content)),
        _ if field.is_empty() => first_line_span(content),
        _ => find_key_span(content, field).unwrap_or_else(|| first_line_span(content)),
    };

    Violation {
        span,
        message,
        hint,
        help,
    }
}

fn first_line_span(content: &str) -> SourceSpan {
    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}

/// Span of a top-level `key:` line in YAML, or a `"key":` member in JSON
fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let yaml_key = format!("{}:", key);
    let json_key = format!("\"{}\"", key);

    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&yaml_key) || trimmed.starts_with(&json_key) {
            let start = offset + (line.len() - trimmed.len());
            let len = trimmed.trim_end().len().max(1);
            return Some((start, len).into());
        }
        offset += line.len();
    }
    None
}
