use image::GrayImage;
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::stats::histogram;
use std::path::Path;

use crate::error::PipelineError;

/// Loads an image from disk and binarizes it for OCR.
///
/// Grayscale conversion followed by an inverse Otsu threshold. The pipeline
/// is fixed; nothing here is configurable.
pub fn load_and_binarize(path: &Path) -> Result<GrayImage, PipelineError> {
    let img = image::open(path).map_err(|source| PipelineError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let gray = img.to_luma8();
    Ok(binarize_otsu_inverted(&gray))
}

/// Applies an inverse binary threshold at the Otsu level.
///
/// Pixels brighter than the level become black (0), everything else becomes
/// white (255). The result has the input's dimensions and at most two values.
pub fn binarize_otsu_inverted(gray: &GrayImage) -> GrayImage {
    let level = otsu_level_wide(gray);
    threshold(gray, level, ThresholdType::BinaryInverted)
}

/// Otsu's threshold: the level `t` maximizing between-class variance, with
/// class 0 holding intensities `<= t`. Ties keep the lowest level.
///
/// Accumulates in u64/f64 so pages with tens of millions of pixels in one
/// intensity bin do not overflow.
pub fn otsu_level_wide(gray: &GrayImage) -> u8 {
    let hist = &histogram(gray).channels[0];

    let total: u64 = hist.iter().map(|&h| u64::from(h)).sum();
    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(t, &h)| t as f64 * f64::from(h))
        .sum();

    let mut weight_below = 0u64;
    let mut sum_below = 0f64;
    let mut best_variance = 0f64;
    let mut best_level = 0u8;

    for (t, &h) in hist.iter().enumerate() {
        weight_below += u64::from(h);
        sum_below += t as f64 * f64::from(h);
        if weight_below == 0 {
            continue;
        }
        let weight_above = total - weight_below;
        if weight_above == 0 {
            break;
        }

        let mean_below = sum_below / weight_below as f64;
        let mean_above = (sum_all - sum_below) / weight_above as f64;
        let variance = weight_below as f64 * weight_above as f64 * (mean_below - mean_above).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_level = t as u8;
        }
    }

    best_level
}
