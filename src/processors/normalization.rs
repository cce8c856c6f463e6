//! Photometric normalization of grayscale samples into training tensors.
//!
//! The recognizer consumes width-major `f32` tensors with intensities in
//! `[-0.5, 0.5]`. The transform here is deliberately narrow: transpose plus
//! intensity rescaling, nothing else. No resizing, cropping, or noise
//! injection happens at this stage.

use crate::core::batch::Tensor2D;
use crate::core::config::PreprocessorConfig;
use crate::core::errors::{PreprocessError, PreprocessResult, ProcessingStage};
use image::GrayImage;
use rayon::prelude::*;

/// Creates the blank canvas substituted for a missing or corrupt sample.
///
/// The canvas is solid minimum intensity (black) at the configured target
/// size; after normalization every element is -0.5.
pub(crate) fn fallback_canvas(size: (u32, u32)) -> GrayImage {
    let (width, height) = size;
    // GrayImage::new zero-fills
    GrayImage::new(width, height)
}

/// Normalizes grayscale word and line samples into recognizer input tensors.
///
/// # Example
///
/// ```rust
/// use htr_preprocess::core::PreprocessorConfig;
/// use htr_preprocess::processors::ImageNormalizer;
/// use image::{GrayImage, Luma};
///
/// let normalizer = ImageNormalizer::new(&PreprocessorConfig::default());
/// let img = GrayImage::from_pixel(4, 2, Luma([255]));
/// let tensor = normalizer.normalize(Some(&img)).unwrap();
/// assert_eq!(tensor.shape(), &[4, 2]);
/// assert_eq!(tensor[[0, 0]], 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    target_size: (u32, u32),
}

impl ImageNormalizer {
    /// Creates a normalizer whose fallback canvas uses the configured
    /// target size.
    pub fn new(config: &PreprocessorConfig) -> Self {
        Self {
            target_size: config.target_size,
        }
    }

    /// Normalizes a single sample into a width-major tensor.
    ///
    /// A missing sample (`None`, the loader's marker for a damaged source
    /// file) is silently replaced by the blank fallback canvas before
    /// normalization; no error reaches the caller for that case.
    ///
    /// # Errors
    ///
    /// Returns a `Processing` error if the tensor cannot be built from the
    /// pixel buffer.
    pub fn normalize(&self, image: Option<&GrayImage>) -> PreprocessResult<Tensor2D> {
        match image {
            Some(img) => self.to_tensor(img),
            None => self.to_tensor(&fallback_canvas(self.target_size)),
        }
    }

    /// Normalizes a batch of samples, preserving order.
    pub fn normalize_batch(
        &self,
        images: &[Option<GrayImage>],
    ) -> PreprocessResult<Vec<Tensor2D>> {
        if images.len() <= 1 {
            // Avoid rayon overhead for single-image batches
            images.iter().map(|img| self.normalize(img.as_ref())).collect()
        } else {
            images
                .par_iter()
                .map(|img| self.normalize(img.as_ref()))
                .collect()
        }
    }

    /// Transposes the image into width-major order and rescales intensity
    /// from `[0, 255]` to `[-0.5, 0.5]`.
    fn to_tensor(&self, img: &GrayImage) -> PreprocessResult<Tensor2D> {
        let (width, height) = img.dimensions();

        let mut values = Vec::with_capacity((width as usize) * (height as usize));
        for x in 0..width {
            for y in 0..height {
                values.push(f32::from(img.get_pixel(x, y)[0]) / 255.0 - 0.5);
            }
        }

        Tensor2D::from_shape_vec((width as usize, height as usize), values).map_err(|e| {
            PreprocessError::processing(
                ProcessingStage::Normalization,
                format!("failed to build {width}x{height} tensor"),
                e,
            )
        })
    }
}
