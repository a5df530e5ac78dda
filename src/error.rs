//! Error types for the extraction pipeline.
//!
//! Each stage returns a `PipelineError` so the driver can report it and keep
//! going. "No text found" is not an error: it is an `Ok` with an empty string.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image path '{}' does not exist.", .0.display())]
    PathNotFound(PathBuf),

    #[error("Could not read image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Tesseract could not be started ({}): {source}", .program.display())]
    EngineUnavailable {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tesseract failed ({status}): {stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error("Speech engine '{program}' could not be started: {source}")]
    SpeechUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Speech engine '{program}' failed ({status})")]
    SpeechFailed { program: String, status: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// True when an external engine (OCR or speech) was the cause.
    pub fn is_integration(&self) -> bool {
        matches!(
            self,
            Self::EngineUnavailable { .. }
                | Self::EngineFailed { .. }
                | Self::SpeechUnavailable { .. }
                | Self::SpeechFailed { .. }
        )
    }
}
