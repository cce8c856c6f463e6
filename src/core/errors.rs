//! Error types for the preprocessing pipeline.
//!
//! This module defines the errors that can occur while preparing training
//! batches, including configuration errors, invalid batch inputs, and
//! processing failures with chained sources. Configuration errors are fatal
//! and surface at pipeline construction; data-level recovery (the blank
//! canvas substituted for a corrupt image) is a defined policy and does not
//! go through these types.

use thiserror::Error;

/// Enum representing different stages of batch preprocessing.
///
/// Used to identify which stage of the pipeline a processing error
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Error occurred while synthesizing line images.
    LineSynthesis,
    /// Error occurred during image normalization.
    Normalization,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::LineSynthesis => write!(f, "line synthesis"),
            ProcessingStage::Normalization => write!(f, "normalization"),
        }
    }
}

/// Enum representing the errors that can occur in the preprocessing pipeline.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error occurred during processing.
    #[error("{stage} failed: {context}")]
    Processing {
        /// The stage of the pipeline where the error occurred.
        stage: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Convenient result alias for preprocessing operations.
pub type PreprocessResult<T> = Result<T, PreprocessError>;

impl PreprocessError {
    /// Creates a configuration error with the given message.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates an invalid-input error with the given message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a processing error for the given stage with a chained source.
    pub fn processing(
        stage: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            stage,
            context: context.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_stage_and_context() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad shape");
        let err = PreprocessError::processing(ProcessingStage::Normalization, "tensor build", source);
        let message = err.to_string();
        assert!(message.contains("normalization"));
        assert!(message.contains("tensor build"));
    }

    #[test]
    fn config_error_carries_message() {
        let err = PreprocessError::config_error("padding requires dynamic width");
        assert!(err.to_string().contains("padding requires dynamic width"));
    }
}
