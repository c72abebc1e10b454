//! CLI command implementations

mod evaluate;
mod validate;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};
use crate::error::Result;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Evaluate(args) => evaluate::run_evaluate(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    }
}
