//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, fields::FieldsArgs, submit::SubmitArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "basic-form")]
#[command(author, version, about = "Simple person form with age/birthdate validation")]
#[command(long_about = "Fill in a simple person form (name, age, gender, birthdate), check that the age matches the birthdate and echo the entered values.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Date to compute ages against (default: today)
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<String>,

    /// Config file (merged over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the form's fields
    Fields(FieldsArgs),

    /// Check values without submitting them
    Validate(ValidateArgs),

    /// Validate and echo the entered values
    Submit(SubmitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Values of the form's fields, from flags or a file
#[derive(clap::Args, Clone, Debug, Default)]
pub struct FormInput {
    /// Person's name
    #[arg(long)]
    pub name: Option<String>,

    /// Age in years (0-150)
    #[arg(long, allow_hyphen_values = true)]
    pub age: Option<String>,

    /// Gender: Male, Female or "Not specified"
    #[arg(long)]
    pub gender: Option<String>,

    /// Birthdate as YYYY-MM-DD
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub birthdate: Option<String>,

    /// Read values from a YAML or JSON file (flags override file values)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text, or the configured default format
    #[default]
    Auto,
    /// Human-readable text
    Text,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Parse a format name from config or environment
    pub fn from_name(name: &str) -> Option<Self> {
        <OutputFormat as ValueEnum>::from_str(name, true).ok()
    }
}
