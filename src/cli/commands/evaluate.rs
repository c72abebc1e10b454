//! Evaluate command implementation

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_config, validate_config, EvalSpec, EvaluateArgs};
use crate::error::{Error, Result};
use crate::eval::{
    classification_report, heatmap_file_name, read_predictions, ConfusionHeatmap, LabelMap,
    PerformanceReport, ScoreAccumulator,
};

pub fn run_evaluate(args: EvaluateArgs, level: LogLevel) -> Result<()> {
    log(
        level,
        LogLevel::Verbose,
        &format!("Loading config: {}", args.config.display()),
    );

    let mut spec = load_config(&args.config)?;
    apply_overrides(&mut spec, &args);
    validate_config(&spec)?;

    let cwd = std::env::current_dir().map_err(|e| Error::io("resolving working directory", e))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    evaluate_spec(&spec, &cwd, !args.no_plot, level, &mut out)?;
    Ok(())
}

/// Score `spec.predictions`, write the report to `out` and, if `plot`, save the heatmap
///
/// A relative `output_dir` is resolved against `base`. Returns the heatmap path when one was written.
pub(crate) fn evaluate_spec<W: Write>(
    spec: &EvalSpec,
    base: &Path,
    plot: bool,
    level: LogLevel,
    out: &mut W,
) -> Result<Option<PathBuf>> {
    let idx2label = LabelMap::load(&spec.labels)?;
    let mut acc = ScoreAccumulator::new(spec.evaluator.ignore_label);
    let sequences = read_predictions(&spec.predictions, &mut acc)?;
    tracing::info!(
        model = %spec.model_name,
        sequences,
        positions = acc.len(),
        "scoring predictions"
    );

    let scores = acc.finish()?;
    let report = PerformanceReport::new(&scores, &idx2label, spec.evaluator.ignore_label)?;
    if level != LogLevel::Quiet {
        write!(out, "{report}").map_err(|e| Error::io("writing report", e))?;
    }

    if level == LogLevel::Verbose {
        let (predictions, labels) = acc.pairs();
        let detail = classification_report(predictions, labels, Some(&idx2label))?;
        writeln!(out, "\n{detail}").map_err(|e| Error::io("writing report", e))?;
    }

    if !plot {
        return Ok(None);
    }
    let path = base
        .join(&spec.evaluator.output_dir)
        .join(heatmap_file_name(&spec.model_name));
    ConfusionHeatmap::new(spec.evaluator.heatmap.clone()).save(&scores.confusion, &path)?;
    log(
        level,
        LogLevel::Normal,
        &format!("Confusion matrix saved to {}", path.display()),
    );
    Ok(Some(path))
}
