//! Interactive driver.
//!
//! Walks the user through one extraction:
//! AwaitingPath → Extracting → AwaitingSpeechChoice → Done.
//! Reads answers from any `BufRead` and prints to any `Write`, so the whole
//! conversation can be scripted in tests.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::ocr::{extract_text, TextRecognizer};
use crate::paths::resolve_image_path;
use crate::speech::Speaker;

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The user declined to retry after a bad path (or input ended)
    Declined,
    /// Preprocessing, OCR or writing outputs failed
    Failed,
    /// The engine ran but found no text
    NoText,
    /// Text was extracted; `spoken` is true when it was read aloud
    Extracted { spoken: bool },
}

enum State {
    AwaitingPath,
    Extracting(PathBuf),
    AwaitingSpeechChoice(String),
    Done(Outcome),
}

pub struct Driver<'a, R, W> {
    input: R,
    output: W,
    recognizer: &'a dyn TextRecognizer,
    speaker: &'a dyn Speaker,
    output_dir: PathBuf,
}

impl<'a, R: BufRead, W: Write> Driver<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        recognizer: &'a dyn TextRecognizer,
        speaker: &'a dyn Speaker,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            input,
            output,
            recognizer,
            speaker,
            output_dir,
        }
    }

    /// Runs the conversation to completion.
    pub fn run(&mut self) -> io::Result<Outcome> {
        writeln!(self.output, "OCR Text Extraction Tool")?;
        writeln!(self.output, "------------------------------")?;

        let mut state = State::AwaitingPath;
        loop {
            state = match state {
                State::AwaitingPath => self.await_path()?,
                State::Extracting(path) => self.extract(path)?,
                State::AwaitingSpeechChoice(text) => self.offer_speech(&text)?,
                State::Done(outcome) => return Ok(outcome),
            };
        }
    }

    fn await_path(&mut self) -> io::Result<State> {
        let Some(answer) = self.prompt("Enter the full path to the image: ")? else {
            return Ok(State::Done(Outcome::Declined));
        };

        match resolve_image_path(&answer) {
            Ok(path) => Ok(State::Extracting(path)),
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                if self.confirm("Would you like to try again? (y/n): ")? {
                    Ok(State::AwaitingPath)
                } else {
                    Ok(State::Done(Outcome::Declined))
                }
            }
        }
    }

    fn extract(&mut self, path: PathBuf) -> io::Result<State> {
        match extract_text(&path, self.recognizer, &self.output_dir) {
            Ok(extraction) if extraction.text.trim().is_empty() => {
                writeln!(self.output, "No text could be extracted.")?;
                writeln!(self.output, "Preprocessed image saved to {}", extraction.outputs.image.display())?;
                Ok(State::Done(Outcome::NoText))
            }
            Ok(extraction) => {
                writeln!(self.output)?;
                writeln!(self.output, "--- Extracted Text ---")?;
                writeln!(self.output, "{}", extraction.text)?;
                writeln!(self.output, "Saved to {}", extraction.outputs.text.display())?;
                Ok(State::AwaitingSpeechChoice(extraction.text))
            }
            Err(e) => {
                crate::log(&format!("Extraction failed for {}: {}", path.display(), e));
                writeln!(self.output, "Error in text extraction: {}", e)?;
                if e.is_integration() {
                    writeln!(
                        self.output,
                        "Check that Tesseract is installed or set \"ocr.executable\" in config.json."
                    )?;
                }
                writeln!(self.output, "No text could be extracted.")?;
                Ok(State::Done(Outcome::Failed))
            }
        }
    }

    fn offer_speech(&mut self, text: &str) -> io::Result<State> {
        if !self.confirm("Would you like to hear the text? (y/n): ")? {
            return Ok(State::Done(Outcome::Extracted { spoken: false }));
        }

        writeln!(self.output)?;
        writeln!(self.output, "Speaking the extracted text...")?;
        self.output.flush()?;

        let spoken = match self.speaker.speak(text) {
            Ok(()) => true,
            Err(e) => {
                writeln!(self.output, "Text-to-speech error: {}", e)?;
                false
            }
        };
        Ok(State::Done(Outcome::Extracted { spoken }))
    }

    /// Prints `message` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Yes only for `y`/`Y`; anything else, including end of input, is no.
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        Ok(self
            .prompt(message)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }
}
