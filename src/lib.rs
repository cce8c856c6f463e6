//! # HTR Preprocess
//!
//! Batch preprocessing for training CTC-based handwritten text recognizers.
//!
//! The crate turns raw (image, transcript) training pairs produced by a
//! dataset loader into normalized `f32` tensors and length-bounded labels
//! that a CTC loss can align against. It covers three concerns:
//!
//! - **Line synthesis**: compositing isolated word samples into synthetic
//!   multi-word line images, with fixed or randomized layout
//! - **Normalization**: converting grayscale pixel intensities into
//!   width-major tensors in the `[-0.5, 0.5]` range
//! - **Label budgeting**: truncating transcripts to the maximum length the
//!   CTC loss can map onto the recognizer's output sequence
//!
//! ## Modules
//!
//! * [`core`] - Batch types, configuration, and error handling
//! * [`processors`] - Line synthesis, normalization, and label truncation
//! * [`pipeline`] - The batch preprocessing pipeline
//!
//! ## Quick Start
//!
//! ```rust
//! use htr_preprocess::prelude::*;
//! use image::{GrayImage, Luma};
//!
//! # fn main() -> Result<(), PreprocessError> {
//! let config = PreprocessorConfig::default()
//!     .with_line_mode(true)
//!     .with_rng_seed(7);
//! let mut preprocessor = Preprocessor::new(config)?;
//!
//! let images = vec![Some(GrayImage::from_pixel(64, 32, Luma([180])))];
//! let texts = vec!["word".to_string()];
//! let batch = ImageBatch::new(images, texts)?;
//!
//! let processed = preprocessor.process(&batch)?;
//! assert_eq!(processed.batch_size(), 1);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod pipeline;
pub mod processors;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use htr_preprocess::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        ImageBatch, PreprocessError, PreprocessResult, PreprocessorConfig, Tensor2D, TensorBatch,
    };
    pub use crate::pipeline::Preprocessor;
}
