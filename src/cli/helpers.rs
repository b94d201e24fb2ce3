//! Shared helper functions for CLI commands

use chrono::NaiveDate;
use console::style;
use miette::{Diagnostic, IntoDiagnostic, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cli::args::{FormInput, GlobalOpts, OutputFormat};
use crate::core::config::{parse_date, Config};
use crate::form::error::{ErrorReport, FormErrors};
use crate::form::loader;
use crate::form::schema::{FieldName, FormSpec};
use crate::form::submission::RawValues;

/// Settings every command runs with, resolved from flags, env and config
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Config,
    pub today: NaiveDate,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl RunContext {
    pub fn from_global(global: &GlobalOpts) -> Result<Self> {
        let config = Config::load(global.config.as_deref())?;

        let today = match &global.today {
            Some(value) => parse_date(value, "--today")?,
            None => config.today(),
        };

        let format = resolve_format(global.format, config.default_format.as_deref());
        debug!(%today, ?format, "resolved run context");

        Ok(Self {
            config,
            today,
            format,
            quiet: global.quiet,
        })
    }

    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }
}

/// Pick the effective output format; `Auto` never survives this
pub fn resolve_format(requested: OutputFormat, configured: Option<&str>) -> OutputFormat {
    if requested != OutputFormat::Auto {
        return requested;
    }

    match configured.map(|name| (name, OutputFormat::from_name(name))) {
        Some((_, Some(OutputFormat::Auto))) | None => OutputFormat::Text,
        Some((_, Some(format))) => format,
        Some((name, None)) => {
            warn!("unknown default_format '{}', using text", name);
            OutputFormat::Text
        }
    }
}

/// Gather raw values: the file first (if any), then flags on top
pub fn collect_values(input: &FormInput, form: &FormSpec) -> Result<RawValues> {
    let mut values = match &input.file {
        Some(path) => loader::load_file(path, form)?,
        None => RawValues::new(),
    };

    let flags = [
        (FieldName::PersonName, &input.name),
        (FieldName::Age, &input.age),
        (FieldName::Gender, &input.gender),
        (FieldName::BirthDate, &input.birthdate),
    ];
    for (field, flag) in flags {
        if let Some(value) = flag {
            values.insert(field.as_str().to_string(), Value::String(value.clone()));
        }
    }

    Ok(values)
}

/// Result of running the form once, for structured output
#[derive(Debug, Serialize)]
pub struct FormOutcome {
    pub form_id: &'static str,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl FormOutcome {
    pub fn accepted(form_id: &'static str, messages: Vec<String>) -> Self {
        Self {
            form_id,
            valid: true,
            errors: Vec::new(),
            messages,
        }
    }

    pub fn rejected(form_id: &'static str, errors: &FormErrors) -> Self {
        Self {
            form_id,
            valid: false,
            errors: errors.reports(),
            messages: Vec::new(),
        }
    }
}

/// Print a value as JSON or YAML
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(value).into_diagnostic()?);
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
        }
    }
    Ok(())
}

/// Print field errors grouped under their field titles
pub fn print_errors(errors: &FormErrors) {
    for field in FieldName::all() {
        let mut field_errors = errors.for_field(*field).peekable();
        if field_errors.peek().is_none() {
            continue;
        }
        eprintln!("{}", style(field.title()).bold());
        for error in field_errors {
            eprintln!("  {} {}", style("✗").red(), error);
            if let Some(help) = error.help() {
                eprintln!("    {}", style(help).dim());
            }
        }
    }
}

/// Error returned once a rejected form has been reported
pub fn rejected(errors: &FormErrors) -> miette::Report {
    miette::miette!(
        code = "basic_form::form::invalid",
        "Form was not accepted ({} error{})",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(OutputFormat::Json, Some("yaml")), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Auto, Some("yaml")), OutputFormat::Yaml);
        assert_eq!(resolve_format(OutputFormat::Auto, Some("YAML")), OutputFormat::Yaml);
        assert_eq!(resolve_format(OutputFormat::Auto, Some("auto")), OutputFormat::Text);
        assert_eq!(resolve_format(OutputFormat::Auto, Some("xml")), OutputFormat::Text);
        assert_eq!(resolve_format(OutputFormat::Auto, None), OutputFormat::Text);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "person_name: Ana").unwrap();
        writeln!(file, "age: 30").unwrap();
        writeln!(file, "gender: Female").unwrap();
        writeln!(file, "birth_date: 1995-05-01").unwrap();

        let input = FormInput {
            age: Some("31".to_string()),
            file: Some(file.path().to_path_buf()),
            ..FormInput::default()
        };

        let values = collect_values(&input, &crate::form::SIMPLE_FORM).unwrap();
        assert_eq!(values["person_name"], "Ana");
        assert_eq!(values["age"], "31");
    }

    #[test]
    fn test_flags_only() {
        let input = FormInput {
            name: Some("Bo".to_string()),
            ..FormInput::default()
        };
        let values = collect_values(&input, &crate::form::SIMPLE_FORM).unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = FormOutcome::accepted("basic_form_simple_form", vec!["Age: 30.".to_string()]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["valid"], true);
        assert!(json.get("errors").is_none());
        assert_eq!(json["messages"][0], "Age: 30.");
    }
}
