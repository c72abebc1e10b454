//! Command-line interface: Cli, Command and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::schema::EvalSpec;

/// Score a sequence tagger against gold labels
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "tagger-eval")]
#[command(version)]
#[command(
    about = "Precision, recall, F1 and a confusion-matrix heatmap for sequence-labeling models"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Score exported predictions and plot the confusion matrix
    Evaluate(EvaluateArgs),

    /// Validate a configuration file without evaluating
    Validate(ValidateArgs),
}

/// Arguments for the evaluate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct EvaluateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override heatmap output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip writing the heatmap
    #[arg(long)]
    pub no_plot: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Parse command line arguments
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to an EvalSpec
pub fn apply_overrides(spec: &mut EvalSpec, args: &EvaluateArgs) {
    if let Some(output_dir) = &args.output_dir {
        spec.evaluator.output_dir = output_dir.clone();
    }
}
