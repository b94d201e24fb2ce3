//! YAML error diagnostics pointing into the offending file

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("YAML syntax error: {message}")]
#[diagnostic(code(basic_form::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build from a serde_yml error, locating it in `source`
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let offset = err
            .location()
            .map(|loc| line_col_to_offset(source, loc.line(), loc.column()))
            .unwrap_or(0);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1).min(source.len().max(1))),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Byte offset of a 1-based line/column position, clamped to the source
pub fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();

    let line_text = source[line_start.min(source.len())..]
        .split('\n')
        .next()
        .unwrap_or("");
    let column_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());

    (line_start + column_offset).min(source.len())
}

/// Suggest a fix for common mistakes in hand-written submission files
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("tab") {
        return Some("YAML requires spaces for indentation, not tabs.".to_string());
    }

    if msg_lower.contains("duplicate") {
        return Some("Each field can only appear once in a submission.".to_string());
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some(
            "Quote values that contain ':', e.g. person_name: \"Ana: the second\"".to_string(),
        );
    }

    if msg_lower.contains("expected block end") || msg_lower.contains("did not find expected key") {
        return Some("Put each field on its own line as `field: value` without indentation.".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 2, 1), 6);
        assert_eq!(line_col_to_offset(source, 3, 3), 14);
        assert_eq!(line_col_to_offset(source, 9, 1), source.len());
    }

    #[test]
    fn test_help_generation() {
        assert!(generate_help("found character that cannot start any token (tab)").is_some());
        assert!(generate_help("duplicate entry with key \"age\"").is_some());
        assert!(generate_help("some random error").is_none());
    }

    #[test]
    fn test_from_serde_error() {
        let source = "person_name: Ana\nage: [30\n";
        let err = serde_yml::from_str::<serde_yml::Value>(source).unwrap_err();
        let diag = YamlSyntaxError::from_serde_error(&err, source, "ana.yaml");
        assert!(!diag.message().is_empty());
        assert!(diag.to_string().starts_with("YAML syntax error"));
    }
}
