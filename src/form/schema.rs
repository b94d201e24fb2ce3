//! Static field schema for the simple person form
//!
//! The form layout is plain configuration: a `FormSpec` listing its
//! `FieldSpec`s in display order. The same description drives the CLI
//! table, the interactive wizard and the JSON Schema used to check
//! submission files.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Lowest accepted age
pub const AGE_MIN: i64 = 0;

/// Highest accepted age
pub const AGE_MAX: i64 = 150;

/// The four fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    PersonName,
    Age,
    Gender,
    BirthDate,
}

impl FieldName {
    /// All fields in display order
    pub fn all() -> &'static [FieldName] {
        &[
            FieldName::PersonName,
            FieldName::Age,
            FieldName::Gender,
            FieldName::BirthDate,
        ]
    }

    /// Machine name used as the key in value maps and submission files
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::PersonName => "person_name",
            FieldName::Age => "age",
            FieldName::Gender => "gender",
            FieldName::BirthDate => "birth_date",
        }
    }

    /// Human-readable label
    pub fn title(&self) -> &'static str {
        self.spec().title
    }

    /// The static spec for this field
    pub fn spec(&self) -> &'static FieldSpec {
        match self {
            FieldName::PersonName => &PERSON_NAME,
            FieldName::Age => &AGE,
            FieldName::Gender => &GENDER,
            FieldName::BirthDate => &BIRTH_DATE,
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person_name" => Ok(FieldName::PersonName),
            "age" => Ok(FieldName::Age),
            "gender" => Ok(FieldName::Gender),
            "birth_date" => Ok(FieldName::BirthDate),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

/// Input widget kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text
    Text,
    /// Whole number with inclusive bounds
    Number { min: i64, max: i64 },
    /// One of a fixed list of options
    Select {
        options: &'static [&'static str],
        empty_option: &'static str,
    },
    /// Calendar date, `YYYY-MM-DD`
    Date,
}

impl FieldKind {
    /// Short type name for listings
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number { .. } => "number",
            FieldKind::Select { .. } => "select",
            FieldKind::Date => "date",
        }
    }
}

/// A single form field
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: FieldName,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// A whole form: identity, intro text and fields in display order
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormSpec {
    pub id: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    pub submit_label: &'static str,
}

/// Gender options, in the order they are offered
pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Not specified"];

const PERSON_NAME: FieldSpec = FieldSpec {
    name: FieldName::PersonName,
    title: "Person's Name",
    description: "Enter Person's name.",
    kind: FieldKind::Text,
    required: true,
};

const AGE: FieldSpec = FieldSpec {
    name: FieldName::Age,
    title: "Age",
    description: "Digit only and value between 0 and 150",
    kind: FieldKind::Number {
        min: AGE_MIN,
        max: AGE_MAX,
    },
    required: true,
};

const GENDER: FieldSpec = FieldSpec {
    name: FieldName::Gender,
    title: "Gender",
    description: "Select from Male, Female or Not specified",
    kind: FieldKind::Select {
        options: GENDER_OPTIONS,
        empty_option: "-select-",
    },
    required: true,
};

const BIRTH_DATE: FieldSpec = FieldSpec {
    name: FieldName::BirthDate,
    title: "Birthdate",
    description: "Please select the birthday from calendar",
    kind: FieldKind::Date,
    required: true,
};

/// The simple person form
pub const SIMPLE_FORM: FormSpec = FormSpec {
    id: "basic_form_simple_form",
    description: "Please input Name, Age, Gender, Birthdate and click Submit button",
    fields: &[PERSON_NAME, AGE, GENDER, BIRTH_DATE],
    submit_label: "Submit",
};

impl FormSpec {
    /// Look up a field by its machine name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name.as_str() == name)
    }

    /// Names of the required fields, in display order
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Generate a JSON Schema describing a complete submission for this form
    ///
    /// Only structure is encoded here (types, options, date shape). The age
    /// bounds stay out of the schema because they are a form-level check
    /// reported alongside the birthdate cross-check.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = self.file_schema();
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("required".to_string(), json!(self.required_fields()));
        }
        schema
    }

    /// Schema a submission file is checked against
    ///
    /// Same as `to_json_schema` minus `required`: a file may hold only some
    /// fields and leave the rest to flags. Missing values are reported per
    /// field once everything has been merged.
    pub fn file_schema(&self) -> Value {
        let mut properties = Map::new();

        for field in self.fields {
            let property = match field.kind {
                FieldKind::Text => json!({
                    "type": "string",
                    "minLength": 1,
                }),
                FieldKind::Number { .. } => json!({
                    "type": ["number", "string"],
                }),
                FieldKind::Select { options, .. } => json!({
                    "type": "string",
                    "enum": options,
                }),
                FieldKind::Date => json!({
                    "type": "string",
                    "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$",
                }),
            };

            let mut property = property;
            if let Some(obj) = property.as_object_mut() {
                obj.insert("title".to_string(), json!(field.title));
                obj.insert("description".to_string(), json!(field.description));
            }
            properties.insert(field.name.as_str().to_string(), property);
        }

        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "$id": format!("urn:basic-form:{}", self.id),
            "title": "Simple Form",
            "description": self.description,
            "type": "object",
            "properties": properties,
            "additionalProperties": false,
        })
    }
}
