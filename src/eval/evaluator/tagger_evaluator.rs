//! Evaluator for running a tagger over a held-out set

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::config::EvaluatorConfig;
use crate::error::{Error, Result};
use crate::eval::batch::BatchSource;
use crate::eval::heatmap::ConfusionHeatmap;
use crate::eval::labels::LabelMap;
use crate::eval::scores::{PerformanceReport, ScoreAccumulator, Scores};
use crate::eval::tagger::{argmax_last_axis, SequenceTagger};

/// File name of the heatmap written for `model_name`
pub fn heatmap_file_name(model_name: &str) -> String {
    format!("{model_name}_confusion_matrix.png")
}

/// Scores a [`SequenceTagger`] against a [`BatchSource`]
///
/// The model is switched to inference mode on construction. Scores from
/// the latest run are kept and available through [`Evaluator::scores`].
pub struct Evaluator<M, D> {
    model: M,
    dataset: D,
    config: EvaluatorConfig,
    scores: Option<Scores>,
}

impl<M: SequenceTagger, D: BatchSource> Evaluator<M, D> {
    /// Create an evaluator with default configuration
    pub fn new(model: M, dataset: D) -> Self {
        Self::with_config(model, dataset, EvaluatorConfig::default())
    }

    pub fn with_config(mut model: M, dataset: D, config: EvaluatorConfig) -> Self {
        model.set_inference_mode();
        Self {
            model,
            dataset,
            config,
            scores: None,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Scores of the latest run, if any
    pub fn scores(&self) -> Option<&Scores> {
        self.scores.as_ref()
    }

    /// Run inference over the whole dataset and score it
    pub fn compute_scores(&mut self) -> Result<&Scores> {
        let scores = self.run()?;
        Ok(self.scores.insert(scores))
    }

    fn run(&mut self) -> Result<Scores> {
        let device = self.config.device.resolve();
        info!(model = self.model.name(), %device, "predicting held-out batches");
        self.model.to_device(device)?;

        let start = Instant::now();
        let progress = self.progress_bar();
        let mut acc = ScoreAccumulator::new(self.config.ignore_label);

        for (step, batch) in self.dataset.batches().enumerate() {
            let batch = batch?;
            let logits = self.model.forward(&batch.inputs, &batch.pos)?;
            let predictions = argmax_last_axis(&logits, batch.outputs.dim())?;
            acc.push_batch(&predictions, &batch.outputs)?;

            progress.inc(1);
            debug!(step, scored = acc.len(), "batch done");
        }
        progress.finish_and_clear();

        let scores = acc.finish()?;
        info!(
            positions = scores.n_scored(),
            classes = scores.confusion.n_classes(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scoring complete"
        );
        Ok(scores)
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }
        let pb = match self.dataset.len_hint() {
            Some(n) => ProgressBar::new(n as u64),
            None => ProgressBar::new_spinner(),
        };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Predicting batches of data");
        pb
    }

    /// Where the heatmap goes: `<cwd>/<output_dir>/<model>_confusion_matrix.png`
    pub fn heatmap_path(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::io("resolving working directory", e))?;
        Ok(cwd
            .join(&self.config.output_dir)
            .join(heatmap_file_name(self.model.name())))
    }

    /// Score the dataset, print the report to stdout and save the heatmap
    pub fn check_performance(&mut self, idx2label: &LabelMap) -> Result<PerformanceReport> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.check_performance_to(idx2label, &mut out)
    }

    /// Like [`Evaluator::check_performance`], writing the report to `out`
    pub fn check_performance_to<W: Write>(
        &mut self,
        idx2label: &LabelMap,
        out: &mut W,
    ) -> Result<PerformanceReport> {
        let scores = self.run()?;
        let report = PerformanceReport::new(&scores, idx2label, self.config.ignore_label)?;
        write!(out, "{report}").map_err(|e| Error::io("writing report", e))?;

        let path = self.heatmap_path()?;
        ConfusionHeatmap::new(self.config.heatmap.clone()).save(&scores.confusion, &path)?;

        self.scores = Some(scores);
        Ok(report)
    }
}
