//! Configuration for the preprocessing pipeline.

use crate::core::errors::{PreprocessError, PreprocessResult};
use serde::{Deserialize, Serialize};

/// Configuration for the batch preprocessor.
///
/// Created once per pipeline instance and read-only thereafter. Invalid
/// flag combinations are rejected by [`validate`](Self::validate), which
/// the pipeline runs at construction before any batch is processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Target image size as (width, height), used for the blank canvas
    /// substituted for missing images.
    pub target_size: (u32, u32),
    /// Horizontal padding in pixels; requires `dynamic_width`.
    pub padding: u32,
    /// Let the output width follow the input instead of a fixed width.
    pub dynamic_width: bool,
    /// Randomize line layout (word count and separator widths) during
    /// synthesis.
    pub data_augmentation: bool,
    /// Composite word samples into synthetic multi-word line images.
    pub line_mode: bool,
    /// Seed for the layout RNG; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            target_size: (128, 32),
            padding: 0,
            dynamic_width: false,
            data_augmentation: false,
            line_mode: false,
            rng_seed: None,
        }
    }
}

impl PreprocessorConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target image size as (width, height).
    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_size = (width, height);
        self
    }

    /// Sets the horizontal padding in pixels.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Enables or disables dynamic output width.
    pub fn with_dynamic_width(mut self, dynamic_width: bool) -> Self {
        self.dynamic_width = dynamic_width;
        self
    }

    /// Enables or disables layout randomization.
    pub fn with_data_augmentation(mut self, data_augmentation: bool) -> Self {
        self.data_augmentation = data_augmentation;
        self
    }

    /// Enables or disables synthetic line assembly.
    pub fn with_line_mode(mut self, line_mode: bool) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Seeds the layout RNG for reproducible synthesis.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PreprocessError::ConfigError` if:
    /// * `dynamic_width` and `data_augmentation` are both enabled
    /// * `padding` is non-zero while `dynamic_width` is disabled
    /// * either dimension of `target_size` is zero
    pub fn validate(&self) -> PreprocessResult<()> {
        if self.dynamic_width && self.data_augmentation {
            return Err(PreprocessError::config_error(
                "dynamic width is only supported without data augmentation",
            ));
        }
        if self.padding > 0 && !self.dynamic_width {
            return Err(PreprocessError::config_error(
                "padding requires dynamic width to be enabled",
            ));
        }
        let (width, height) = self.target_size;
        if width == 0 || height == 0 {
            return Err(PreprocessError::config_error(format!(
                "target size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PreprocessorConfig::default().validate().is_ok());
    }

    #[test]
    fn dynamic_width_excludes_augmentation() {
        let config = PreprocessorConfig::default()
            .with_dynamic_width(true)
            .with_data_augmentation(true);
        assert!(config.validate().is_err());

        let config = PreprocessorConfig::default().with_dynamic_width(true);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn padding_requires_dynamic_width() {
        let config = PreprocessorConfig::default().with_padding(1);
        assert!(config.validate().is_err());

        let config = PreprocessorConfig::default()
            .with_padding(1)
            .with_dynamic_width(true);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_target_size_is_rejected() {
        let config = PreprocessorConfig::default().with_target_size(0, 32);
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_roundtrip_preserves_fields() {
        let config = PreprocessorConfig::default()
            .with_target_size(256, 32)
            .with_line_mode(true)
            .with_rng_seed(42);

        let json = serde_json::to_string(&config).expect("should serialize to JSON");
        let restored: PreprocessorConfig =
            serde_json::from_str(&json).expect("should deserialize from JSON");

        assert_eq!(restored.target_size, (256, 32));
        assert!(restored.line_mode);
        assert_eq!(restored.rng_seed, Some(42));
        assert!(restored.validate().is_ok());
    }
}
