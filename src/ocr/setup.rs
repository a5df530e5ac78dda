use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{ExecutablePaths, OcrConfig};
use crate::error::PipelineError;
use crate::{log, warn};

/// Bare command name used when the OS is not in the lookup table.
pub const FALLBACK_EXECUTABLE: &str = "tesseract";

/// Looks up the Tesseract executable for an OS family (`std::env::consts::OS`).
pub fn executable_for_os(table: &ExecutablePaths, os: &str) -> PathBuf {
    match os {
        "windows" => table.windows.clone(),
        "macos" => table.macos.clone(),
        "linux" => table.linux.clone(),
        _ => PathBuf::from(FALLBACK_EXECUTABLE),
    }
}

/// Resolves the executable to run.
///
/// An explicit override wins. Otherwise the table entry for the current OS is
/// used if it exists on disk, falling back to `tesseract` on PATH.
pub fn resolve_executable(config: &OcrConfig) -> PathBuf {
    if let Some(exe) = &config.executable {
        return exe.clone();
    }

    let candidate = executable_for_os(&config.executables, std::env::consts::OS);
    if candidate.is_absolute() && !candidate.exists() {
        return PathBuf::from(FALLBACK_EXECUTABLE);
    }
    candidate
}

/// Runs `<exe> --version` and returns the first line of its report.
pub fn probe_version(executable: &Path) -> Result<String, PipelineError> {
    let output = Command::new(executable)
        .arg("--version")
        .output()
        .map_err(|source| PipelineError::EngineUnavailable {
            program: executable.to_path_buf(),
            source,
        })?;

    if !output.status.success() {
        return Err(PipelineError::EngineFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    // Older builds print the version banner on stderr
    let report = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };
    Ok(String::from_utf8_lossy(&report)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string())
}

/// Finds the tessdata directory holding `<language>.traineddata`.
///
/// Checks the configured directory, then `TESSDATA_PREFIX` and its `tessdata`
/// child. `None` leaves the choice to Tesseract.
pub fn find_tessdata_dir(config: &OcrConfig) -> Option<PathBuf> {
    if let Some(dir) = &config.tessdata_dir {
        return Some(dir.clone());
    }

    let prefix = PathBuf::from(std::env::var_os("TESSDATA_PREFIX")?);
    tessdata_candidate(&prefix, &config.language)
}

fn tessdata_candidate(prefix: &Path, language: &str) -> Option<PathBuf> {
    let traineddata = format!("{}.traineddata", language);
    [prefix.to_path_buf(), prefix.join("tessdata")]
        .into_iter()
        .find(|dir| dir.join(&traineddata).exists())
}

/// Checks that Tesseract can be started. Logs the outcome; never fatal.
pub fn check_tesseract(config: &OcrConfig) -> Result<String, PipelineError> {
    let executable = resolve_executable(config);
    match probe_version(&executable) {
        Ok(version) => {
            log(&format!("Tesseract found at {}: {}", executable.display(), version));
            Ok(version)
        }
        Err(e) => {
            warn(&format!(
                "{}. Install Tesseract-OCR or set \"ocr.executable\" in config.json.",
                e
            ));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_executable_for_known_os() {
        let table = ExecutablePaths::default();
        assert_eq!(
            executable_for_os(&table, "windows"),
            PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe")
        );
        assert_eq!(
            executable_for_os(&table, "macos"),
            PathBuf::from("/usr/local/bin/tesseract")
        );
        assert_eq!(executable_for_os(&table, "linux"), PathBuf::from("/usr/bin/tesseract"));
    }

    #[test]
    fn test_executable_for_unknown_os_is_bare_command() {
        let table = ExecutablePaths::default();
        assert_eq!(executable_for_os(&table, "freebsd"), PathBuf::from("tesseract"));
    }

    #[test]
    fn test_override_wins() {
        let config = OcrConfig {
            executable: Some(PathBuf::from("/opt/ocr/bin/tesseract")),
            ..OcrConfig::default()
        };
        assert_eq!(resolve_executable(&config), PathBuf::from("/opt/ocr/bin/tesseract"));
    }

    #[test]
    fn test_missing_table_entry_falls_back_to_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("tesseract");
        let config = OcrConfig {
            executables: ExecutablePaths {
                windows: missing.clone(),
                macos: missing.clone(),
                linux: missing,
            },
            ..OcrConfig::default()
        };
        assert_eq!(resolve_executable(&config), PathBuf::from(FALLBACK_EXECUTABLE));
    }

    #[test]
    fn test_probe_missing_executable() {
        let dir = tempdir().unwrap();
        let result = probe_version(&dir.path().join("no-such-tesseract"));
        assert!(matches!(result, Err(PipelineError::EngineUnavailable { .. })));
    }

    #[test]
    fn test_tessdata_candidate() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("tessdata");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("eng.traineddata"), b"").unwrap();

        assert_eq!(tessdata_candidate(dir.path(), "eng"), Some(nested));
        assert_eq!(tessdata_candidate(dir.path(), "jpn"), None);
    }

    #[test]
    fn test_configured_tessdata_dir_wins() {
        let config = OcrConfig {
            tessdata_dir: Some(PathBuf::from("/data/tessdata")),
            ..OcrConfig::default()
        };
        assert_eq!(find_tessdata_dir(&config), Some(PathBuf::from("/data/tessdata")));
    }
}
