use clap::Parser;
use miette::Result;
use tracing::Level;

use basic_form::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let level = if global.verbose {
        Level::DEBUG
    } else if global.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Fields(args) => basic_form::cli::commands::fields::run(args, &global),
        Commands::Validate(args) => basic_form::cli::commands::validate::run(args, &global),
        Commands::Submit(args) => basic_form::cli::commands::submit::run(args, &global),
        Commands::Completions(args) => basic_form::cli::commands::completions::run(args),
    }
}
