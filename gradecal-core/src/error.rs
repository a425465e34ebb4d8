//! Error types for gradecal.

use thiserror::Error;

/// Errors that can occur in gradecal operations.
#[derive(Error, Debug)]
pub enum GradeCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid time range '{0}': expected two times separated by a dash")]
    InvalidTimeRange(String),

    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Time range {start}-{end} ends before it starts")]
    EmptyTimeRange { start: String, end: String },

    #[error("Invalid date '{0}': expected dd/mm/yyyy")]
    InvalidDate(String),

    #[error("Date window starts on {start} but ends on {end}")]
    InvalidWindow { start: String, end: String },

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Local time {datetime} does not exist in {tzid}")]
    NonexistentLocalTime { datetime: String, tzid: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("OCR engine '{0}' not found in PATH")]
    OcrNotInstalled(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gradecal operations.
pub type GradeCalResult<T> = Result<T, GradeCalError>;
