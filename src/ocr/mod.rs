pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::{Tesseract, TextRecognizer};
pub use preprocess::load_and_binarize;
pub use setup::check_tesseract;

use std::path::Path;
use std::time::Instant;

use crate::error::PipelineError;
use crate::output::{write_outputs, OutputPaths};

/// Result of one extraction run.
#[derive(Debug)]
pub struct Extraction {
    pub text: String,
    pub outputs: OutputPaths,
}

/// High-level function: image file → binarized image → text → output files.
///
/// Outputs are only written once recognition succeeded.
pub fn extract_text(
    image_path: &Path,
    recognizer: &dyn TextRecognizer,
    output_dir: &Path,
) -> Result<Extraction, PipelineError> {
    let started = Instant::now();

    let binary = load_and_binarize(image_path)?;
    crate::log(&format!(
        "Preprocessed {} ({}x{})",
        image_path.display(),
        binary.width(),
        binary.height()
    ));

    let text = recognizer.recognize(&binary)?;
    crate::log(&format!(
        "OCR finished in {} ms ({} chars)",
        started.elapsed().as_millis(),
        text.chars().count()
    ));

    let outputs = write_outputs(output_dir, &binary, &text)?;

    Ok(Extraction {
        text,
        outputs,
    })
}
