//! Error types for the meterbill-core library.
//!
//! Field extraction itself never fails: an unmatched pattern is an unset
//! field. These errors cover the layers around it.

use thiserror::Error;

/// Main error type for the meterbill library.
#[derive(Error, Debug)]
pub enum BillError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// CSV or chart export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to writing records out.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writer produced bytes that are not UTF-8.
    #[error("invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Failed to flush the in-memory writer.
    #[error("failed to finish writer: {0}")]
    IntoInner(String),

    /// The configured date format is not a valid strftime pattern.
    #[error("invalid date format: {0}")]
    DateFormat(String),
}

/// Result type for the meterbill library.
pub type Result<T> = std::result::Result<T, BillError>;
