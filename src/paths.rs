use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::PipelineError;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Directory (relative to the working directory) that receives the outputs.
pub const OUTPUT_DIR: &str = "ocr_outputs";

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the logs directory: `<exe_dir>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_exe_dir().join("logs")
}

/// Returns the output directory: `./ocr_outputs/`
pub fn get_output_dir() -> PathBuf {
    PathBuf::from(OUTPUT_DIR)
}

/// Ensures the logs directory exists. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())
}

/// Expands a leading `~` to the user's home directory.
///
/// Only `~` on its own or followed by a separator is expanded; `~user` forms
/// and paths without a home directory are returned unchanged.
pub fn expand_home(input: &str) -> PathBuf {
    let rest = if input == "~" {
        Some("")
    } else {
        input
            .strip_prefix("~/")
            .or_else(|| input.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    }
}

/// Expands and validates a user-entered image path.
///
/// Returns the absolute path when something exists there, otherwise
/// `PipelineError::PathNotFound` carrying the expanded path.
pub fn resolve_image_path(input: &str) -> Result<PathBuf, PipelineError> {
    let expanded = expand_home(input.trim());
    if expanded.as_os_str().is_empty() {
        return Err(PipelineError::PathNotFound(expanded));
    }

    let absolute = std::path::absolute(&expanded).unwrap_or(expanded);
    if !exists(&absolute) {
        return Err(PipelineError::PathNotFound(absolute));
    }
    Ok(absolute)
}

fn exists(path: &Path) -> bool {
    std::fs::metadata(path).is_ok()
}
