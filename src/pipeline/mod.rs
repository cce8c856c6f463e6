//! The batch preprocessing pipeline.
//!
//! This module combines line synthesis, image normalization, and label
//! budgeting into a single `process` call that turns a loader batch into a
//! trainer batch. The pipeline is a pure function of its configuration and
//! input: construction fixes the configuration (and the line-assembly
//! variant), and every call allocates a fresh output batch.

use crate::core::batch::{ImageBatch, TensorBatch};
use crate::core::config::PreprocessorConfig;
use crate::core::errors::PreprocessResult;
use crate::processors::{ImageNormalizer, LineSynthesizer, truncate_label};
use tracing::debug;

/// The recognizer's convolutional stack collapses this many input columns
/// into one CTC output step; the label budget is the first tensor's
/// leading dimension divided by this.
const WIDTH_DOWNSAMPLE_FACTOR: usize = 4;

/// Line assembly stage, resolved from the configuration at construction.
#[derive(Debug)]
enum AssemblyStage {
    /// Word mode: batches flow through unchanged.
    Passthrough,
    /// Line mode: word samples are composited into synthetic lines.
    Synthesize(LineSynthesizer),
}

/// The batch preprocessing pipeline.
///
/// Constructed once per training run from a validated
/// [`PreprocessorConfig`], then fed one [`ImageBatch`] per step. Processing
/// needs `&mut self` because line-mode layout advances the owned random
/// generator; for concurrent preprocessing give each worker thread its own
/// instance (the configuration itself is freely shareable).
#[derive(Debug)]
pub struct Preprocessor {
    assembly: AssemblyStage,
    normalizer: ImageNormalizer,
}

impl Preprocessor {
    /// Creates a pipeline from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PreprocessError::ConfigError` if the configuration is
    /// invalid (see [`PreprocessorConfig::validate`]); nothing is processed
    /// in that case.
    pub fn new(config: PreprocessorConfig) -> PreprocessResult<Self> {
        config.validate()?;

        let normalizer = ImageNormalizer::new(&config);
        let assembly = if config.line_mode {
            AssemblyStage::Synthesize(LineSynthesizer::new(&config))
        } else {
            AssemblyStage::Passthrough
        };

        Ok(Self {
            assembly,
            normalizer,
        })
    }

    /// Processes one training batch.
    ///
    /// In line mode the batch is first replaced by synthesized line images
    /// and concatenated transcripts. Every image is then normalized into a
    /// width-major tensor, and every transcript is truncated against a
    /// batch-wide label budget derived from the first tensor's leading
    /// dimension. The input batch is never mutated, and the output batch
    /// size always equals the input batch size.
    ///
    /// # Errors
    ///
    /// Returns an error if synthesis or normalization fails; the
    /// missing-image case is not an error and is recovered internally.
    pub fn process(&mut self, batch: &ImageBatch) -> PreprocessResult<TensorBatch> {
        let assembled;
        let current = match &mut self.assembly {
            AssemblyStage::Passthrough => batch,
            AssemblyStage::Synthesize(synthesizer) => {
                assembled = synthesizer.synthesize(batch)?;
                &assembled
            }
        };

        let tensors = self.normalizer.normalize_batch(current.images())?;

        // The budget comes from the first tensor alone and applies to the
        // whole batch; batches are non-empty by construction.
        let max_text_len = tensors[0].shape()[0] / WIDTH_DOWNSAMPLE_FACTOR;

        let texts = current
            .texts()
            .iter()
            .map(|text| truncate_label(text, max_text_len).to_owned())
            .collect();

        debug!(
            "preprocessed batch: size={}, max_text_len={}",
            current.batch_size(),
            max_text_len
        );

        TensorBatch::new(tensors, texts)
    }
}
