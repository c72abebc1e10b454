//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, validate_config, EvalSpec, ValidateArgs};
use crate::error::Result;

/// Format a configuration summary as a string
pub fn format_summary(spec: &EvalSpec) -> String {
    let e = &spec.evaluator;
    let mut lines = vec![
        format!("  Model: {}", spec.model_name),
        format!("  Predictions: {}", spec.predictions.display()),
        format!("  Labels: {}", spec.labels.display()),
        format!("  Ignore label: {}", e.ignore_label),
        format!("  Output dir: {}", e.output_dir.display()),
        format!("  Device: {:?}", e.device),
        format!("  Heatmap: {}x{}", e.heatmap.width, e.heatmap.height),
    ];
    if !e.heatmap.annotate {
        lines.push("  Annotations: off".to_string());
    }
    lines.join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<()> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config)?;
    validate_config(&spec)?;

    log(level, LogLevel::Normal, "Configuration is valid");
    log(level, LogLevel::Verbose, &format_summary(&spec));
    Ok(())
}
