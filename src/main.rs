//! tagger-eval CLI
//!
//! # Usage
//!
//! ```bash
//! # Score exported predictions and write model/<name>_confusion_matrix.png
//! tagger-eval evaluate eval.yaml
//!
//! # Write the heatmap elsewhere, or not at all
//! tagger-eval evaluate eval.yaml --output-dir plots
//! tagger-eval evaluate eval.yaml --no-plot
//!
//! # Validate config
//! tagger-eval validate eval.yaml
//! ```

use clap::Parser;
use std::process::ExitCode;
use tagger_eval::cli::{init_tracing, run_command, Cli, LogLevel};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.quiet, cli.verbose));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.code());
            if e.is_user_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
