//! The core module of the preprocessing pipeline.
//!
//! This module contains the fundamental building blocks shared by the
//! pipeline, including:
//! - Batch types carrying positionally paired images and transcripts
//! - Configuration management
//! - Error handling
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod batch;
pub mod config;
pub mod errors;

pub use batch::{ImageBatch, Tensor2D, TensorBatch};
pub use config::PreprocessorConfig;
pub use errors::{PreprocessError, PreprocessResult, ProcessingStage};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter and formatting
/// layer. Typically called once at the start of a training run to enable
/// logging; the library itself never installs a subscriber.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
