//! Field-level validation errors

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::form::schema::FieldName;

/// A problem with one submitted field
///
/// Every variant is attached to a single field and is meant to be shown to
/// the user next to it; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum FieldError {
    #[error("{} field is required.", .field.title())]
    #[diagnostic(code(basic_form::field::required))]
    Required { field: FieldName },

    #[error("{} must be a number, got '{value}'.", .field.title())]
    #[diagnostic(code(basic_form::field::not_a_number), help("Digit only, e.g. 42"))]
    NotANumber { field: FieldName, value: String },

    #[error("The submitted value '{value}' in the {} element is not allowed.", .field.title())]
    #[diagnostic(
        code(basic_form::field::invalid_option),
        help("Valid values: {}", .options.join(", "))
    )]
    InvalidOption {
        field: FieldName,
        value: String,
        options: &'static [&'static str],
    },

    #[error("{} must be a date in YYYY-MM-DD format, got '{value}'.", .field.title())]
    #[diagnostic(code(basic_form::field::invalid_date))]
    InvalidDate { field: FieldName, value: String },

    #[error("The age and birthdate do not match. Calculated age from the date of birth is {computed}.")]
    #[diagnostic(code(basic_form::age::mismatch))]
    AgeMismatch { computed: i64, submitted: i64 },

    #[error("The age must be between {min} and {max}.")]
    #[diagnostic(code(basic_form::age::out_of_range))]
    AgeOutOfRange { value: i64, min: i64, max: i64 },
}

impl FieldError {
    /// The field this error is attached to
    pub fn field(&self) -> FieldName {
        match self {
            FieldError::Required { field }
            | FieldError::NotANumber { field, .. }
            | FieldError::InvalidOption { field, .. }
            | FieldError::InvalidDate { field, .. } => *field,
            FieldError::AgeMismatch { .. } | FieldError::AgeOutOfRange { .. } => FieldName::Age,
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            FieldError::Required { .. } => "required",
            FieldError::NotANumber { .. } => "not_a_number",
            FieldError::InvalidOption { .. } => "invalid_option",
            FieldError::InvalidDate { .. } => "invalid_date",
            FieldError::AgeMismatch { .. } => "age_mismatch",
            FieldError::AgeOutOfRange { .. } => "age_out_of_range",
        }
    }

    /// Serializable view for JSON/YAML output
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            field: self.field(),
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Flat representation of a field error
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub field: FieldName,
    pub kind: &'static str,
    pub message: String,
}

/// All errors collected for one submission
#[derive(Debug, Error, Diagnostic)]
#[error("Form validation failed: {summary}")]
#[diagnostic(
    code(basic_form::form::invalid),
    help("Correct the listed fields and submit again")
)]
pub struct FormErrors {
    summary: String,

    #[related]
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        let count = errors.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        Self { summary, errors }
    }

    /// Errors in the order they were raised
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Errors attached to one field
    pub fn for_field(&self, field: FieldName) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field() == field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    pub fn reports(&self) -> Vec<ErrorReport> {
        self.errors.iter().map(FieldError::report).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message_uses_title() {
        let err = FieldError::Required {
            field: FieldName::PersonName,
        };
        assert_eq!(err.to_string(), "Person's Name field is required.");
        assert_eq!(err.field(), FieldName::PersonName);
    }

    #[test]
    fn test_age_errors_attach_to_age() {
        let mismatch = FieldError::AgeMismatch {
            computed: 29,
            submitted: 30,
        };
        let range = FieldError::AgeOutOfRange {
            value: 151,
            min: 0,
            max: 150,
        };
        assert_eq!(mismatch.field(), FieldName::Age);
        assert_eq!(range.field(), FieldName::Age);
        assert!(mismatch.to_string().contains("is 29"));
        assert_eq!(range.to_string(), "The age must be between 0 and 150.");
    }

    #[test]
    fn test_summary_counts() {
        let one = FormErrors::new(vec![FieldError::Required {
            field: FieldName::Age,
        }]);
        assert_eq!(one.to_string(), "Form validation failed: 1 error");

        let two = FormErrors::new(vec![
            FieldError::Required {
                field: FieldName::Age,
            },
            FieldError::Required {
                field: FieldName::Gender,
            },
        ]);
        assert_eq!(two.to_string(), "Form validation failed: 2 errors");
        assert_eq!(two.for_field(FieldName::Gender).count(), 1);
    }

    #[test]
    fn test_invalid_option_help_lists_options() {
        let err = FieldError::InvalidOption {
            field: FieldName::Gender,
            value: "female".to_string(),
            options: &["Male", "Female"],
        };
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("Valid values: Male, Female"));
        assert!(err.to_string().contains("'female' in the Gender element"));
    }

    #[test]
    fn test_report_serializes_field_name() {
        let err = FieldError::InvalidDate {
            field: FieldName::BirthDate,
            value: "yesterday".to_string(),
        };
        let json = serde_json::to_value(err.report()).unwrap();
        assert_eq!(json["field"], "birth_date");
        assert_eq!(json["kind"], "invalid_date");
    }
}
