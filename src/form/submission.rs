//! Submitted values - the raw value map and the typed submission

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::form::error::{FieldError, FormErrors};
use crate::form::schema::{FieldName, GENDER_OPTIONS};

/// Date format accepted for the birthdate field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Values as handed over by the host, keyed by field machine name
pub type RawValues = BTreeMap<String, Value>;

/// Gender options offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Not specified")]
    NotSpecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NotSpecified => "Not specified",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Not specified" => Ok(Gender::NotSpecified),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// One filled-in form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub person_name: String,
    pub age: i64,
    pub gender: Gender,
    pub birth_date: NaiveDate,
}

impl Submission {
    pub fn new(
        person_name: impl Into<String>,
        age: i64,
        gender: Gender,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            person_name: person_name.into(),
            age,
            gender,
            birth_date,
        }
    }

    /// Parse a host value map into a typed submission
    ///
    /// Every field is checked; all problems are returned together rather
    /// than stopping at the first one. Unknown keys are ignored.
    pub fn from_values(values: &RawValues) -> Result<Self, FormErrors> {
        let mut errors = Vec::new();

        let person_name = match text_value(values, FieldName::PersonName) {
            Some(name) => Some(name),
            None => {
                errors.push(FieldError::Required {
                    field: FieldName::PersonName,
                });
                None
            }
        };

        let age = match text_value(values, FieldName::Age) {
            Some(raw) => match parse_age(&raw) {
                Some(age) => Some(age),
                None => {
                    errors.push(FieldError::NotANumber {
                        field: FieldName::Age,
                        value: raw,
                    });
                    None
                }
            },
            None => {
                errors.push(FieldError::Required {
                    field: FieldName::Age,
                });
                None
            }
        };

        let gender = match text_value(values, FieldName::Gender) {
            Some(raw) => match raw.parse::<Gender>() {
                Ok(gender) => Some(gender),
                Err(_) => {
                    errors.push(FieldError::InvalidOption {
                        field: FieldName::Gender,
                        value: raw,
                        options: GENDER_OPTIONS,
                    });
                    None
                }
            },
            None => {
                errors.push(FieldError::Required {
                    field: FieldName::Gender,
                });
                None
            }
        };

        let birth_date = match text_value(values, FieldName::BirthDate) {
            Some(raw) => match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FieldError::InvalidDate {
                        field: FieldName::BirthDate,
                        value: raw,
                    });
                    None
                }
            },
            None => {
                errors.push(FieldError::Required {
                    field: FieldName::BirthDate,
                });
                None
            }
        };

        match (person_name, age, gender, birth_date) {
            (Some(person_name), Some(age), Some(gender), Some(birth_date)) if errors.is_empty() => {
                Ok(Self {
                    person_name,
                    age,
                    gender,
                    birth_date,
                })
            }
            _ => Err(FormErrors::new(errors)),
        }
    }

    /// Inverse of `from_values`, used to pre-fill a form being shown again
    pub fn to_values(&self) -> RawValues {
        let mut values = RawValues::new();
        values.insert(
            FieldName::PersonName.as_str().to_string(),
            Value::String(self.person_name.clone()),
        );
        values.insert(FieldName::Age.as_str().to_string(), Value::from(self.age));
        values.insert(
            FieldName::Gender.as_str().to_string(),
            Value::String(self.gender.to_string()),
        );
        values.insert(
            FieldName::BirthDate.as_str().to_string(),
            Value::String(self.birth_date.format(DATE_FORMAT).to_string()),
        );
        values
    }
}

/// Read a whole number of years from text
///
/// Integers too large for `i64` saturate instead of failing, so an absurd
/// age is reported by the range check like any other. Integral decimals
/// such as `30.0` count as whole numbers.
pub fn parse_age(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Some(raw.parse::<i64>().unwrap_or(if raw.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }));
    }

    let value: f64 = raw.parse().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        // `as` saturates at the i64 bounds
        Some(value as i64)
    } else {
        None
    }
}

/// Trimmed, non-empty textual value of a field
///
/// Numbers are rendered to text so that a numeric value typed into a text
/// box is treated the same as its string form.
pub fn text_value(values: &RawValues, field: FieldName) -> Option<String> {
    let text = match values.get(field.as_str())? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> RawValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_parse_complete_values() {
        let raw = values(&[
            ("person_name", json!("  Ana ")),
            ("age", json!("30")),
            ("gender", json!("Female")),
            ("birth_date", json!("1995-05-01")),
        ]);

        let submission = Submission::from_values(&raw).unwrap();
        assert_eq!(submission.person_name, "Ana");
        assert_eq!(submission.age, 30);
        assert_eq!(submission.gender, Gender::Female);
        assert_eq!(
            submission.birth_date,
            NaiveDate::from_ymd_opt(1995, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_numeric_age_value() {
        let raw = values(&[
            ("person_name", json!("Bo")),
            ("age", json!(7)),
            ("gender", json!("Not specified")),
            ("birth_date", json!("2018-01-01")),
        ]);

        let submission = Submission::from_values(&raw).unwrap();
        assert_eq!(submission.age, 7);
        assert_eq!(submission.gender, Gender::NotSpecified);
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let err = Submission::from_values(&RawValues::new()).unwrap_err();
        assert_eq!(err.len(), 4);
        assert!(err
            .errors()
            .iter()
            .all(|e| matches!(e, FieldError::Required { .. })));
        let fields: Vec<_> = err.errors().iter().map(|e| e.field()).collect();
        assert_eq!(fields, FieldName::all());
    }

    #[test]
    fn test_blank_name_is_missing() {
        let raw = values(&[
            ("person_name", json!("   ")),
            ("age", json!("30")),
            ("gender", json!("Male")),
            ("birth_date", json!("1995-05-01")),
        ]);

        let err = Submission::from_values(&raw).unwrap_err();
        assert_eq!(
            err.errors(),
            &[FieldError::Required {
                field: FieldName::PersonName
            }]
        );
    }

    #[test]
    fn test_bad_values_collected() {
        let raw = values(&[
            ("person_name", json!("Ana")),
            ("age", json!("thirty")),
            ("gender", json!("female")),
            ("birth_date", json!("01/05/1995")),
        ]);

        let err = Submission::from_values(&raw).unwrap_err();
        let kinds: Vec<_> = err.errors().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["not_a_number", "invalid_option", "invalid_date"]);
    }

    #[test]
    fn test_fractional_age_rejected() {
        let raw = values(&[
            ("person_name", json!("Ana")),
            ("age", json!(30.5)),
            ("gender", json!("Female")),
            ("birth_date", json!("1995-05-01")),
        ]);

        let err = Submission::from_values(&raw).unwrap_err();
        assert_eq!(err.errors()[0].kind(), "not_a_number");
    }

    #[test]
    fn test_integral_decimal_age_accepted() {
        let raw = values(&[
            ("person_name", json!("Ana")),
            ("age", json!(30.0)),
            ("gender", json!("Female")),
            ("birth_date", json!("1995-05-01")),
        ]);
        assert_eq!(Submission::from_values(&raw).unwrap().age, 30);

        assert_eq!(parse_age("30.0"), Some(30));
        assert_eq!(parse_age(" 42 "), Some(42));
        assert_eq!(parse_age("-1"), Some(-1));
        assert_eq!(parse_age("30.5"), None);
        assert_eq!(parse_age("thirty"), None);
        assert_eq!(parse_age("inf"), None);
        assert_eq!(parse_age("-"), None);
    }

    #[test]
    fn test_oversized_age_saturates() {
        assert_eq!(parse_age("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_age("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_age("1e20"), Some(i64::MAX));

        let raw = values(&[
            ("person_name", json!("Ana")),
            ("age", json!("99999999999999999999")),
            ("gender", json!("Male")),
            ("birth_date", json!("1995-05-01")),
        ]);
        assert_eq!(Submission::from_values(&raw).unwrap().age, i64::MAX);

        let raw = values(&[
            ("person_name", json!("Ana")),
            ("age", json!(99999999999999999999u128 as f64)),
            ("gender", json!("Male")),
            ("birth_date", json!("1995-05-01")),
        ]);
        assert_eq!(Submission::from_values(&raw).unwrap().age, i64::MAX);
    }

    #[test]
    fn test_to_values_parses_back() {
        let submission = Submission::new(
            "Ana",
            30,
            Gender::Female,
            NaiveDate::from_ymd_opt(1995, 5, 1).unwrap(),
        );
        let parsed = Submission::from_values(&submission.to_values()).unwrap();
        assert_eq!(parsed, submission);
    }

    #[test]
    fn test_gender_serde_names() {
        let yaml = serde_yml::to_string(&Gender::NotSpecified).unwrap();
        assert!(yaml.contains("Not specified"));
        let parsed: Gender = serde_json::from_str("\"Male\"").unwrap();
        assert_eq!(parsed, Gender::Male);
    }
}
