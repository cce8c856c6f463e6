//! Batch types for the preprocessing pipeline.
//!
//! This module provides the structures that carry batched training data
//! through the pipeline: the raw word images paired with their ground-truth
//! transcripts on the way in, and the normalized tensors paired with
//! length-bounded transcripts on the way out. Both types enforce the
//! positional pairing invariant at construction, so a batch with mismatched
//! image and text counts cannot exist.

use crate::core::errors::{PreprocessError, PreprocessResult};
use image::GrayImage;

/// A 2-dimensional tensor represented as a 2D array of f32 values.
///
/// Pipeline output tensors are width-major: element `[x, y]` holds the
/// normalized intensity of the input pixel at column `x`, row `y`.
pub type Tensor2D = ndarray::Array2<f32>;

/// A batch of grayscale word images positionally paired with transcripts.
///
/// Produced by an external dataset loader once per training step. An entry
/// of `None` marks a sample whose source file was missing or corrupt; the
/// pipeline recovers such samples by substituting a blank canvas instead of
/// surfacing an error.
#[derive(Debug, Clone)]
pub struct ImageBatch {
    images: Vec<Option<GrayImage>>,
    texts: Vec<String>,
}

impl ImageBatch {
    /// Creates a new batch from images and their ground-truth transcripts.
    ///
    /// # Errors
    ///
    /// Returns `PreprocessError::InvalidInput` if the image and text counts
    /// differ, or if the batch is empty. The label-length cap is derived
    /// from the first sample, so an empty batch has no defined output.
    pub fn new(images: Vec<Option<GrayImage>>, texts: Vec<String>) -> PreprocessResult<Self> {
        if images.len() != texts.len() {
            return Err(PreprocessError::invalid_input(format!(
                "image and text counts must match: {} images vs {} texts",
                images.len(),
                texts.len()
            )));
        }
        if images.is_empty() {
            return Err(PreprocessError::invalid_input(
                "batch must contain at least one sample",
            ));
        }
        Ok(Self { images, texts })
    }

    /// Returns the number of samples in the batch.
    pub fn batch_size(&self) -> usize {
        self.images.len()
    }

    /// Returns the word images in batch order.
    pub fn images(&self) -> &[Option<GrayImage>] {
        &self.images
    }

    /// Returns the ground-truth transcripts in batch order.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }
}

/// A preprocessed batch: normalized tensors paired with truncated transcripts.
///
/// This is what the pipeline hands to the trainer. The batch size always
/// matches the input batch the tensors were derived from.
#[derive(Debug, Clone)]
pub struct TensorBatch {
    tensors: Vec<Tensor2D>,
    texts: Vec<String>,
}

impl TensorBatch {
    /// Creates a new tensor batch.
    ///
    /// # Errors
    ///
    /// Returns `PreprocessError::InvalidInput` if the tensor and text
    /// counts differ or if the batch is empty.
    pub fn new(tensors: Vec<Tensor2D>, texts: Vec<String>) -> PreprocessResult<Self> {
        if tensors.len() != texts.len() {
            return Err(PreprocessError::invalid_input(format!(
                "tensor and text counts must match: {} tensors vs {} texts",
                tensors.len(),
                texts.len()
            )));
        }
        if tensors.is_empty() {
            return Err(PreprocessError::invalid_input(
                "batch must contain at least one sample",
            ));
        }
        Ok(Self { tensors, texts })
    }

    /// Returns the number of samples in the batch.
    pub fn batch_size(&self) -> usize {
        self.tensors.len()
    }

    /// Returns the normalized tensors in batch order.
    pub fn tensors(&self) -> &[Tensor2D] {
        &self.tensors
    }

    /// Returns the truncated transcripts in batch order.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Consumes the batch and returns its tensors and transcripts.
    pub fn into_parts(self) -> (Vec<Tensor2D>, Vec<String>) {
        (self.tensors, self.texts)
    }
}
