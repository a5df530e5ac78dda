//! Text-to-speech through the platform's speech synthesizer.
//!
//! - Linux and other unix: `espeak`
//! - macOS: `say`
//! - Windows: PowerShell with `System.Speech`
//!
//! The text is piped on stdin so it never has to be quoted into a command
//! line. Playback blocks until the synthesizer exits.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::SpeechConfig;
use crate::error::PipelineError;

/// Anything that can read text aloud.
pub trait Speaker {
    fn speak(&self, text: &str) -> Result<(), PipelineError>;
}

/// A fully built synthesizer invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Text written to the child's stdin
    pub input: String,
}

/// Speaks through the OS synthesizer with fixed rate and volume.
#[derive(Debug, Clone)]
pub struct SystemSpeaker {
    rate: u32,
    volume: f32,
}

impl SystemSpeaker {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            rate: config.rate,
            volume: config.volume.clamp(0.0, 1.0),
        }
    }

    /// Builds the invocation for the current OS.
    pub fn command(&self, text: &str) -> SpeechCommand {
        command_for_os(std::env::consts::OS, self.rate, self.volume, text)
    }
}

/// Builds the synthesizer invocation for an OS family.
pub fn command_for_os(os: &str, rate: u32, volume: f32, text: &str) -> SpeechCommand {
    match os {
        "macos" => {
            // `say` has no volume flag; use its embedded volume command instead
            let input = if volume < 1.0 {
                format!("[[volm {:.2}]] {}", volume, text)
            } else {
                text.to_string()
            };
            SpeechCommand {
                program: "say".to_string(),
                args: vec!["-r".to_string(), rate.to_string(), "-f".to_string(), "-".to_string()],
                input,
            }
        }
        "windows" => {
            let script = format!(
                "Add-Type -AssemblyName System.Speech; \
                 $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
                 $s.Rate = {}; $s.Volume = {}; \
                 $s.Speak([Console]::In.ReadToEnd())",
                sapi_rate(rate),
                (volume * 100.0).round() as u32
            );
            SpeechCommand {
                program: "powershell".to_string(),
                args: vec!["-NoProfile".to_string(), "-Command".to_string(), script],
                input: text.to_string(),
            }
        }
        _ => SpeechCommand {
            program: "espeak".to_string(),
            args: vec![
                "-s".to_string(),
                rate.to_string(),
                "-a".to_string(),
                // espeak amplitude: 100 is the normal level
                ((volume * 100.0).round() as u32).to_string(),
                "--stdin".to_string(),
            ],
            input: text.to_string(),
        },
    }
}

/// Maps words per minute onto the SAPI -10..=10 scale, 150 wpm being 0.
fn sapi_rate(wpm: u32) -> i32 {
    ((i64::from(wpm) - 150) / 15).clamp(-10, 10) as i32
}

impl Speaker for SystemSpeaker {
    fn speak(&self, text: &str) -> Result<(), PipelineError> {
        let cmd = self.command(text);
        crate::log(&format!("Speaking {} chars with {}", text.chars().count(), cmd.program));
        run_speech_command(&cmd)
    }
}

/// Spawns the synthesizer, feeds it the text and waits for it to exit.
///
/// The child is always reaped, even when writing its stdin fails.
pub fn run_speech_command(cmd: &SpeechCommand) -> Result<(), PipelineError> {
    let mut child = Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|source| PipelineError::SpeechUnavailable {
            program: cmd.program.clone(),
            source,
        })?;

    // stdin is dropped at the end of this block so the child sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(cmd.input.as_bytes()),
        None => Ok(()),
    };

    let status = child.wait().map_err(|source| PipelineError::SpeechUnavailable {
        program: cmd.program.clone(),
        source,
    })?;

    if let Err(e) = written {
        return Err(PipelineError::SpeechFailed {
            program: cmd.program.clone(),
            status: format!("{}; could not send text: {}", status, e),
        });
    }
    if !status.success() {
        return Err(PipelineError::SpeechFailed {
            program: cmd.program.clone(),
            status: status.to_string(),
        });
    }
    Ok(())
}
