use image::GrayImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, resolve_executable};
use crate::config::OcrConfig;
use crate::error::PipelineError;

/// Anything that turns a binarized image into text.
pub trait TextRecognizer {
    /// Returns the recognized text. An image without legible text gives an
    /// empty (or whitespace-only) string, not an error.
    fn recognize(&self, img: &GrayImage) -> Result<String, PipelineError>;
}

/// Tesseract driven through its command-line interface.
#[derive(Debug, Clone)]
pub struct Tesseract {
    executable: PathBuf,
    tessdata_dir: Option<PathBuf>,
    language: String,
    page_segmentation_mode: Option<u8>,
}

impl Tesseract {
    /// Builds an engine from configuration, resolving the executable for this OS.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            executable: resolve_executable(config),
            tessdata_dir: find_tessdata_dir(config),
            language: config.language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
        }
    }

    /// Arguments after the input image path.
    fn args(&self) -> Vec<String> {
        let mut args = vec!["stdout".to_string(), "-l".to_string(), self.language.clone()];
        if let Some(psm) = self.page_segmentation_mode {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".to_string());
            args.push(dir.to_string_lossy().to_string());
        }
        args
    }
}

impl TextRecognizer for Tesseract {
    fn recognize(&self, img: &GrayImage) -> Result<String, PipelineError> {
        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path()).map_err(|source| PipelineError::Output {
            path: temp_input.path().to_path_buf(),
            source,
        })?;

        let output = Command::new(&self.executable)
            .arg(temp_input.path())
            .args(self.args())
            .output()
            .map_err(|source| PipelineError::EngineUnavailable {
                program: self.executable.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PipelineError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
