//! Interactive prompting for the form's fields
//!
//! Walks the static field schema and asks for each value in turn. Values
//! from an earlier attempt are offered as defaults so a rejected form can
//! be corrected without retyping everything.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;

use crate::form::schema::{FieldKind, FieldSpec, FormSpec};
use crate::form::submission::{text_value, RawValues};

/// Schema-driven prompt sequence for one form
pub struct FormWizard {
    form: &'static FormSpec,
    theme: ColorfulTheme,
}

impl FormWizard {
    pub fn new(form: &'static FormSpec) -> Self {
        Self {
            form,
            theme: ColorfulTheme::default(),
        }
    }

    /// Prompt for every field, pre-filled from `previous`
    pub fn run(&self, previous: &RawValues) -> Result<RawValues> {
        eprintln!();
        eprintln!("{} {}", style("◆").cyan(), style(self.form.description).bold());
        eprintln!("{}", style("─".repeat(50)).dim());

        let mut values = RawValues::new();
        for field in self.form.fields {
            let default = text_value(previous, field.name);
            let value = self.prompt_field(field, default)?;
            values.insert(field.name.as_str().to_string(), Value::String(value));
        }

        eprintln!();
        Ok(values)
    }

    fn prompt_field(&self, field: &FieldSpec, default: Option<String>) -> Result<String> {
        let prompt = format_prompt(field);

        match field.kind {
            FieldKind::Select {
                options,
                empty_option,
            } => {
                // The empty option stays selectable so that skipping the
                // field is reported like any other missing value.
                let mut items = vec![empty_option];
                items.extend_from_slice(options);

                let default_idx = default
                    .as_deref()
                    .and_then(|d| items.iter().position(|item| *item == d))
                    .unwrap_or(0);

                let selection = Select::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .items(&items)
                    .default(default_idx)
                    .interact()
                    .into_diagnostic()?;

                if selection == 0 {
                    Ok(String::new())
                } else {
                    Ok(items[selection].to_string())
                }
            }

            FieldKind::Text | FieldKind::Number { .. } | FieldKind::Date => {
                let mut input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .allow_empty(true);
                if let Some(default) = default {
                    input = input.default(default);
                }
                input.interact_text().into_diagnostic()
            }
        }
    }
}

/// Prompt text: title plus a dimmed hint
fn format_prompt(field: &FieldSpec) -> String {
    let hint = match field.kind {
        FieldKind::Date => "YYYY-MM-DD",
        _ => field.description,
    };
    format!("{} ({})", field.title, style(hint).dim())
}
