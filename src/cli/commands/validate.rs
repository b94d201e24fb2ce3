//! `basic-form validate` command - check values without submitting

use console::style;
use miette::Result;

use crate::cli::helpers::{collect_values, print_errors, print_structured, rejected, FormOutcome, RunContext};
use crate::cli::{FormInput, GlobalOpts};
use crate::form::{FormHandler, Submission};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: FormInput,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = RunContext::from_global(global)?;
    let handler = FormHandler::default();
    let values = collect_values(&args.input, handler.spec())?;

    let result = Submission::from_values(&values)
        .and_then(|submission| handler.validate(&submission, ctx.today));

    match result {
        Ok(()) => {
            if ctx.is_text() {
                if !ctx.quiet {
                    println!(
                        "{} Values are valid (ages computed against {})",
                        style("✓").green(),
                        ctx.today
                    );
                }
            } else {
                print_structured(&FormOutcome::accepted(handler.form_id(), Vec::new()), ctx.format)?;
            }
            Ok(())
        }
        Err(errors) => {
            if ctx.is_text() {
                print_errors(&errors);
            } else {
                print_structured(&FormOutcome::rejected(handler.form_id(), &errors), ctx.format)?;
            }
            Err(rejected(&errors))
        }
    }
}
