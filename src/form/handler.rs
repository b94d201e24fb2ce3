//! The form handler - describe, validate and submit the simple form

use chrono::NaiveDate;
use tracing::debug;

use crate::form::error::FormErrors;
use crate::form::messenger::Messenger;
use crate::form::schema::{FieldSpec, FormSpec, SIMPLE_FORM};
use crate::form::submission::{RawValues, Submission, DATE_FORMAT};
use crate::form::validator;

/// Heading shown by the host before the echoed values
pub const ECHO_HEADING: &str = "You entered values are below.";

/// Read-back of a submission, one line per field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Echo {
    lines: [String; 4],
}

impl Echo {
    fn new(submission: &Submission) -> Self {
        Self {
            lines: [
                format!("Person's Name: {}.", submission.person_name),
                format!("Gender: {}.", submission.gender),
                format!("Age: {}.", submission.age),
                format!(
                    "Birth Date: {}.",
                    submission.birth_date.format(DATE_FORMAT)
                ),
            ],
        }
    }

    /// Lines in display order: name, gender, age, birthdate
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Hand every line to a message sink, one call per line
    pub fn deliver(&self, sink: &mut dyn Messenger) {
        for line in &self.lines {
            sink.add_status(line);
        }
    }
}

/// Stateless handler for one form definition
#[derive(Debug, Clone, Copy)]
pub struct FormHandler {
    spec: &'static FormSpec,
}

impl FormHandler {
    pub fn new(spec: &'static FormSpec) -> Self {
        Self { spec }
    }

    /// Unique id of the handled form
    pub fn form_id(&self) -> &'static str {
        self.spec.id
    }

    pub fn spec(&self) -> &'static FormSpec {
        self.spec
    }

    /// Field schema in display order
    pub fn describe_fields(&self) -> &'static [FieldSpec] {
        self.spec.fields
    }

    /// Cross-field checks on an already parsed submission
    pub fn validate(&self, submission: &Submission, today: NaiveDate) -> Result<(), FormErrors> {
        validator::validate(submission, today)
    }

    /// Produce the read-back of an accepted submission
    pub fn submit(&self, submission: &Submission) -> Echo {
        Echo::new(submission)
    }

    /// Run one request: parse, validate, then echo through `sink`
    ///
    /// Nothing reaches the sink unless the submission is accepted.
    pub fn process(
        &self,
        values: &RawValues,
        today: NaiveDate,
        sink: &mut dyn Messenger,
    ) -> Result<Submission, FormErrors> {
        debug!(form = self.spec.id, fields = values.len(), "processing submission");

        let submission = Submission::from_values(values)?;
        self.validate(&submission, today)?;

        debug!(form = self.spec.id, "submission accepted");
        self.submit(&submission).deliver(sink);
        Ok(submission)
    }
}

impl Default for FormHandler {
    fn default() -> Self {
        Self::new(&SIMPLE_FORM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::messenger::{MessageKind, MessageLog};
    use crate::form::schema::{FieldKind, FieldName};
    use crate::form::submission::Gender;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ana_values() -> RawValues {
        let mut values = RawValues::new();
        values.insert("person_name".into(), json!("Ana"));
        values.insert("age".into(), json!("30"));
        values.insert("gender".into(), json!("Female"));
        values.insert("birth_date".into(), json!("1995-05-01"));
        values
    }

    #[test]
    fn test_form_id() {
        assert_eq!(FormHandler::default().form_id(), "basic_form_simple_form");
    }

    #[test]
    fn test_describe_fields() {
        let handler = FormHandler::default();
        let fields = handler.describe_fields();
        assert_eq!(fields.len(), 4);
        assert!(fields.iter().all(|f| f.required));
        assert!(matches!(fields[2].kind, FieldKind::Select { .. }));
        assert_eq!(fields[3].name, FieldName::BirthDate);
    }

    #[test]
    fn test_submit_echo_lines() {
        let handler = FormHandler::default();
        let submission = Submission::new("Ana", 30, Gender::Female, date(1995, 5, 1));
        let echo = handler.submit(&submission);

        insta::assert_snapshot!(echo.lines().join("\n"), @r"
        Person's Name: Ana.
        Gender: Female.
        Age: 30.
        Birth Date: 1995-05-01.
        ");
    }

    #[test]
    fn test_process_delivers_four_messages() {
        let handler = FormHandler::default();
        let mut log = MessageLog::new();

        let submission = handler
            .process(&ana_values(), date(2025, 5, 1), &mut log)
            .unwrap();

        assert_eq!(submission.person_name, "Ana");
        assert_eq!(log.len(), 4);
        assert_eq!(
            log.texts(MessageKind::Status),
            vec![
                "Person's Name: Ana.",
                "Gender: Female.",
                "Age: 30.",
                "Birth Date: 1995-05-01.",
            ]
        );
    }

    #[test]
    fn test_process_rejects_without_echo() {
        let handler = FormHandler::default();
        let mut log = MessageLog::new();

        let err = handler
            .process(&ana_values(), date(2025, 4, 30), &mut log)
            .unwrap_err();

        assert_eq!(err.len(), 1);
        assert_eq!(err.errors()[0].kind(), "age_mismatch");
        assert!(log.is_empty());
    }

    #[test]
    fn test_process_reports_parse_errors_first() {
        let handler = FormHandler::default();
        let mut log = MessageLog::new();
        let mut values = ana_values();
        values.remove("gender");
        values.insert("age".into(), json!("200"));

        // The age checks need a parsed submission, so only the missing
        // gender is reported here.
        let err = handler
            .process(&values, date(2025, 6, 1), &mut log)
            .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.errors()[0].field(), FieldName::Gender);
        assert!(log.is_empty());
    }
}
