//! `basic-form fields` command - describe the form's fields

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{print_structured, RunContext};
use crate::cli::GlobalOpts;
use crate::form::schema::{FieldKind, FormSpec};
use crate::form::FormHandler;

#[derive(clap::Args, Debug)]
pub struct FieldsArgs {
    /// Print the JSON Schema used to check submission files
    #[arg(long)]
    pub raw: bool,
}

pub fn run(args: FieldsArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = RunContext::from_global(global)?;
    let handler = FormHandler::default();
    let form = handler.spec();

    if args.raw {
        let schema = form.to_json_schema();
        println!("{}", serde_json::to_string_pretty(&schema).into_diagnostic()?);
        return Ok(());
    }

    if !ctx.is_text() {
        return print_structured(form, ctx.format);
    }

    print!("{}", render_table(form));
    if !ctx.quiet {
        println!("\nUse --raw for the JSON Schema of submission files");
    }
    Ok(())
}

fn render_table(form: &FormSpec) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n{}\n\n", form.id, "=".repeat(form.id.len())));
    output.push_str(&format!("{}\n\n", form.description));

    let mut builder = Builder::default();
    builder.push_record(["NAME", "TITLE", "TYPE", "REQ", "DESCRIPTION"]);
    for field in form.fields {
        builder.push_record([
            field.name.as_str().to_string(),
            field.title.to_string(),
            field.kind.type_name().to_string(),
            if field.required { "yes" } else { "" }.to_string(),
            field.description.to_string(),
        ]);
    }
    output.push_str(&builder.build().with(Style::psql()).to_string());
    output.push('\n');

    let constraints: Vec<String> = form
        .fields
        .iter()
        .filter_map(|field| match field.kind {
            FieldKind::Number { min, max } => {
                Some(format!("  {}: {} to {}", field.name, min, max))
            }
            FieldKind::Select { options, .. } => {
                Some(format!("  {}: {}", field.name, options.join(", ")))
            }
            FieldKind::Date => Some(format!("  {}: YYYY-MM-DD", field.name)),
            FieldKind::Text => None,
        })
        .collect();
    if !constraints.is_empty() {
        output.push_str("\nAllowed values:\n");
        output.push_str(&constraints.join("\n"));
        output.push('\n');
    }

    output
}
