//! img-to-text
//!
//! Interactive command-line tool: reads an image, binarizes it, extracts the
//! printed text with Tesseract, saves both to `ocr_outputs/`, and can read the
//! text aloud.

mod cli;
mod config;
mod error;
mod ocr;
mod output;
mod paths;
mod speech;

use anyhow::Result;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

const LOG_FILE_NAME: &str = "img_to_text.log";

/// Appends a timestamped message to the log file.
///
/// The console belongs to the interactive prompts, so diagnostics only go to
/// `<exe_dir>/logs/img_to_text.log`. Use `warn` for things the user must see.
pub fn log(msg: &str) {
    let _ = append_log_line(&paths::get_logs_dir().join(LOG_FILE_NAME), msg);
}

/// Shows a warning on the console and records it in the log file.
pub fn warn(msg: &str) {
    println!("Warning: {}", msg);
    log(&format!("Warning: {}", msg));
}

fn append_log_line(log_path: &Path, msg: &str) -> std::io::Result<()> {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    file.write_all(line.as_bytes())
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}", location, msg);
        eprintln!("{}", log_msg);
        log(&log_msg);
    }));

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Warning: could not create logs directory: {}", e);
    }

    let config = config::load_config(&config::config_path());

    // Missing Tesseract is reported now but only fails the run at extraction
    let _ = ocr::check_tesseract(&config.ocr);

    let recognizer = ocr::Tesseract::from_config(&config.ocr);
    let speaker = speech::SystemSpeaker::new(&config.speech);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut driver = cli::Driver::new(
        stdin.lock(),
        stdout.lock(),
        &recognizer,
        &speaker,
        paths::get_output_dir(),
    );

    match driver.run()? {
        cli::Outcome::Extracted { spoken } => log(&format!("Finished: text extracted (spoken: {})", spoken)),
        other => log(&format!("Finished: {:?}", other)),
    }
    Ok(())
}
