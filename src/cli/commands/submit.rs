//! `basic-form submit` command - validate and echo the entered values

use console::style;
use miette::Result;
use tracing::debug;

use crate::cli::helpers::{collect_values, print_errors, print_structured, rejected, FormOutcome, RunContext};
use crate::cli::{FormInput, GlobalOpts};
use crate::form::schema::FieldName;
use crate::form::submission::{text_value, RawValues};
use crate::form::{
    ConsoleMessenger, FormErrors, FormHandler, FormWizard, MessageLog, Messenger, ECHO_HEADING,
};

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub input: FormInput,

    /// Prompt for every field, pre-filled with any given values
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(args: SubmitArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = RunContext::from_global(global)?;
    let handler = FormHandler::default();
    let values = collect_values(&args.input, handler.spec())?;

    let prompt = args.interactive
        || (ctx.config.interactive() && console::user_attended() && has_missing(&values));
    if prompt {
        return run_interactive(&handler, &ctx, values);
    }

    let mut log = MessageLog::new();
    match handler.process(&values, ctx.today, &mut log) {
        Ok(_) => report_acceptance(&handler, &ctx, &log),
        Err(errors) => report_rejection(&handler, &ctx, &errors),
    }
}

/// Keep asking until the form is accepted or the user aborts the prompt
fn run_interactive(handler: &FormHandler, ctx: &RunContext, values: RawValues) -> Result<()> {
    let wizard = FormWizard::new(handler.spec());
    let mut previous = values;
    let mut attempt = 1;

    loop {
        debug!(attempt, "showing form");
        let entered = wizard.run(&previous)?;

        let mut log = MessageLog::new();
        match handler.process(&entered, ctx.today, &mut log) {
            Ok(_) => return report_acceptance(handler, ctx, &log),
            Err(errors) => {
                print_errors(&errors);
                eprintln!(
                    "{} Please correct the values and submit again.",
                    style("→").blue()
                );
                previous = entered;
                attempt += 1;
            }
        }
    }
}

fn report_acceptance(handler: &FormHandler, ctx: &RunContext, log: &MessageLog) -> Result<()> {
    if ctx.is_text() {
        print_echo(log, ctx.quiet);
        Ok(())
    } else {
        print_structured(&accepted_outcome(handler, log), ctx.format)
    }
}

fn accepted_outcome(handler: &FormHandler, log: &MessageLog) -> FormOutcome {
    let lines = log.messages().iter().map(|m| m.text.clone()).collect();
    FormOutcome::accepted(handler.form_id(), lines)
}

fn report_rejection(handler: &FormHandler, ctx: &RunContext, errors: &FormErrors) -> Result<()> {
    if ctx.is_text() {
        print_errors(errors);
    } else {
        print_structured(&FormOutcome::rejected(handler.form_id(), errors), ctx.format)?;
    }
    Err(rejected(errors))
}

/// Heading, then the echoed lines through the console sink
fn print_echo(log: &MessageLog, quiet: bool) {
    if !quiet {
        println!("{}", style(ECHO_HEADING).bold());
    }
    let mut console = ConsoleMessenger::new(quiet);
    for message in log.messages() {
        console.add_message(message.kind, &message.text);
    }
}

fn has_missing(values: &RawValues) -> bool {
    FieldName::all()
        .iter()
        .any(|field| text_value(values, *field).is_none())
}
