//! Error types for the untcc-core library.

use thiserror::Error;

/// Main error type for the untcc library.
#[derive(Error, Debug)]
pub enum UntccError {
    /// Text extraction error from the external converter.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Report date could not be parsed from the filename.
    #[error("filename error: {0}")]
    Filename(#[from] FilenameError),

    /// Document format could not be determined.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failures of the external text-extraction tool.
///
/// All variants are recoverable at the batch level: the document
/// contributes zero records and is counted in the error tally.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The converter binary could not be found.
    #[error("converter not found: {0}")]
    ToolMissing(String),

    /// The converter exited with a non-zero status.
    #[error("converter failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },

    /// The converter exited cleanly but produced no text.
    #[error("converter produced no output for {0}")]
    NoOutput(String),

    /// The converter did not finish within the configured deadline.
    #[error("converter timed out after {0}s")]
    Timeout(u64),

    /// Failed to spawn or communicate with the converter.
    #[error("converter I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Report filename does not match the required pattern.
#[derive(Error, Debug)]
pub enum FilenameError {
    /// Filename does not match `UN_country_contributions_<YYYY>_<MM>.pdf`.
    #[error("filename does not match expected pattern: {0}")]
    Pattern(String),

    /// The month component is outside 01-12.
    #[error("invalid month {month:02} in filename: {filename}")]
    Month { filename: String, month: u32 },
}

/// Document format identification failures.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Neither content signatures nor the filename year identified a format.
    #[error("unknown document format: {0}")]
    Unknown(String),
}

/// Result type for the untcc library.
pub type Result<T> = std::result::Result<T, UntccError>;
