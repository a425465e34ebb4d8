//! Text recognition of the schedule image.
//!
//! Recognition is delegated to the `tesseract` binary; its stdout is the
//! recognized text. Pre-recognized text can be supplied instead, from a file
//! or from stdin.

use anyhow::{Context, Result};
use gradecal_core::{GradeCalError, GradeCalResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::OcrConfig;

/// Where the grid text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Image to run through OCR
    Image(PathBuf),
    /// Already-recognized text file
    Text(PathBuf),
    /// Already-recognized text on stdin
    Stdin,
}

impl Source {
    /// `--text` wins over the image; `--text -` reads stdin.
    pub fn from_args(image: &str, text: Option<&str>) -> Self {
        match text {
            Some("-") => Source::Stdin,
            Some(path) => Source::Text(crate::config::expand_path(path)),
            None => Source::Image(crate::config::expand_path(image)),
        }
    }

    pub async fn read(&self, config: &OcrConfig) -> Result<String> {
        match self {
            Source::Image(path) => {
                check_image(path)?;
                let tesseract = Tesseract::new(config)?;
                Ok(tesseract.recognize(path).await?)
            }
            Source::Text(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read text file at {}", path.display())),
            Source::Stdin => {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .context("Failed to read text from stdin")?;
                Ok(text)
            }
        }
    }
}

fn check_image(image: &Path) -> GradeCalResult<()> {
    if !image.is_file() {
        return Err(GradeCalError::Ocr(format!(
            "Image '{}' not found or not a file",
            image.display()
        )));
    }
    Ok(())
}

/// A tesseract installation found in PATH.
pub struct Tesseract {
    binary_path: PathBuf,
    language: String,
    psm: u8,
}

impl Tesseract {
    pub fn new(config: &OcrConfig) -> GradeCalResult<Self> {
        let binary_path = which::which(&config.binary)
            .map_err(|_| GradeCalError::OcrNotInstalled(config.binary.clone()))?;

        Ok(Tesseract {
            binary_path,
            language: config.language.clone(),
            psm: config.psm,
        })
    }

    pub async fn recognize(&self, image: &Path) -> GradeCalResult<String> {
        check_image(image)?;

        info!(image = %image.display(), language = %self.language, "running OCR");

        let psm = self.psm.to_string();
        let output = Command::new(&self.binary_path)
            .arg(image)
            .arg("stdout")
            .args(["-l", self.language.as_str(), "--psm", psm.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                GradeCalError::Ocr(format!(
                    "Failed to spawn {}: {}",
                    self.binary_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(GradeCalError::Ocr(format!(
                "tesseract exited with status {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|_| GradeCalError::Ocr("tesseract output is not valid UTF-8".into()))?;

        debug!(lines = text.lines().count(), "OCR finished");
        Ok(text)
    }
}
