//! Configuration types.
//!
//! Loads settings from config.json at startup. Every field has a default, so a
//! missing or partial file is fine. The loaded config is handed to the OCR and
//! speech components explicitly.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default Tesseract location per OS family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutablePaths {
    pub windows: PathBuf,
    pub macos: PathBuf,
    pub linux: PathBuf,
}

impl Default for ExecutablePaths {
    fn default() -> Self {
        Self {
            windows: PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe"),
            macos: PathBuf::from("/usr/local/bin/tesseract"),
            linux: PathBuf::from("/usr/bin/tesseract"),
        }
    }
}

/// OCR engine settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Explicit executable; overrides the per-OS table when set
    pub executable: Option<PathBuf>,
    /// Per-OS executable table
    pub executables: ExecutablePaths,
    /// Tesseract language code (`-l`)
    pub language: String,
    /// Page segmentation mode (`--psm`); Tesseract's own default when unset
    pub page_segmentation_mode: Option<u8>,
    /// Directory holding `<language>.traineddata`
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            executable: None,
            executables: ExecutablePaths::default(),
            language: "eng".to_string(),
            page_segmentation_mode: None,
            tessdata_dir: None,
        }
    }
}

/// Speech synthesis settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speaking rate in words per minute
    pub rate: u32,
    /// Volume from 0.0 to 1.0
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 150,
            volume: 1.0,
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ocr: OcrConfig,
    pub speech: SpeechConfig,
}

/// Returns the config.json location: next to the executable if present there,
/// otherwise in the working directory.
pub fn config_path() -> PathBuf {
    let beside_exe = crate::paths::get_exe_dir().join("config.json");
    if beside_exe.exists() {
        beside_exe
    } else {
        Path::new("config.json").to_path_buf()
    }
}

/// Loads configuration from `path` or returns defaults.
pub fn load_config(path: &Path) -> AppConfig {
    crate::log(&format!("Looking for config at: {}", path.display()));

    if !path.exists() {
        crate::log("config.json not found. Using default config.");
        return AppConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                crate::log("Config loaded from config.json");
                config
            }
            Err(e) => {
                crate::warn(&format!(
                    "Failed to parse config.json: {}. Using defaults.",
                    e
                ));
                AppConfig::default()
            }
        },
        Err(e) => {
            crate::warn(&format!(
                "Failed to read config.json: {}. Using defaults.",
                e
            ));
            AppConfig::default()
        }
    }
}
