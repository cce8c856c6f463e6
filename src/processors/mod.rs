//! Image and label processing for recognizer training batches.
//!
//! This module provides the leaf transformations the pipeline is composed
//! of: synthetic text-line assembly, photometric normalization, and
//! CTC-aware label truncation.
//!
//! # Modules
//!
//! * `label_budget` - Truncating transcripts to a CTC-alignable length
//! * `line_synthesis` - Compositing word samples into synthetic line images
//! * `normalization` - Converting grayscale samples into training tensors

mod label_budget;
mod line_synthesis;
mod normalization;

pub use label_budget::truncate_label;
pub use line_synthesis::LineSynthesizer;
pub use normalization::ImageNormalizer;
