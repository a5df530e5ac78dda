//! Output writer for extraction results.
//!
//! Writes the preprocessed image and the extracted text into a fixed
//! directory. Each run replaces the previous run's files.

use image::GrayImage;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

pub const IMAGE_FILE_NAME: &str = "preprocessed_image.jpg";
pub const TEXT_FILE_NAME: &str = "extracted_text.txt";

/// Where the outputs of one run were written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub image: PathBuf,
    pub text: PathBuf,
}

/// Creates `dir` if needed and writes both output files, overwriting any
/// previous contents. Empty text still produces an (empty) text file.
pub fn write_outputs(dir: &Path, img: &GrayImage, text: &str) -> Result<OutputPaths, PipelineError> {
    fs::create_dir_all(dir)?;

    let paths = OutputPaths {
        image: dir.join(IMAGE_FILE_NAME),
        text: dir.join(TEXT_FILE_NAME),
    };

    img.save(&paths.image).map_err(|source| PipelineError::Output {
        path: paths.image.clone(),
        source,
    })?;
    fs::write(&paths.text, text.as_bytes())?;

    crate::log(&format!("Saved outputs to {}", dir.display()));
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use tempfile::tempdir;

    #[test]
    fn test_creates_directory_and_files() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("ocr_outputs");
        let img = GrayImage::from_pixel(16, 8, Luma([255]));

        let paths = write_outputs(&out, &img, "Grüße, world").unwrap();

        assert_eq!(paths.image, out.join("preprocessed_image.jpg"));
        assert_eq!(fs::read_to_string(&paths.text).unwrap(), "Grüße, world");
        let saved = image::open(&paths.image).unwrap();
        assert_eq!((saved.width(), saved.height()), (16, 8));
    }

    #[test]
    fn test_existing_directory_is_fine() {
        let dir = tempdir().unwrap();
        let img = GrayImage::from_pixel(4, 4, Luma([0]));

        write_outputs(dir.path(), &img, "a").unwrap();
        write_outputs(dir.path(), &img, "b").unwrap();
    }

    #[test]
    fn test_second_run_overwrites() {
        let dir = tempdir().unwrap();
        let img = GrayImage::from_pixel(4, 4, Luma([0]));

        write_outputs(dir.path(), &img, "first run with a long line of text").unwrap();
        let paths = write_outputs(dir.path(), &img, "second").unwrap();

        assert_eq!(fs::read_to_string(&paths.text).unwrap(), "second");
        assert_eq!(fs::metadata(&paths.text).unwrap().len(), "second".len() as u64);
    }

    #[test]
    fn test_empty_text_creates_empty_file() {
        let dir = tempdir().unwrap();
        let img = GrayImage::from_pixel(4, 4, Luma([255]));

        let paths = write_outputs(dir.path(), &img, "").unwrap();

        assert!(paths.text.exists());
        assert_eq!(fs::metadata(&paths.text).unwrap().len(), 0);
    }
}
