// src/utils/error.rs
use thiserror::Error;

// One error type per pipeline stage, folded into AppError at the top
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Input document not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Trigger keyword must not be empty")]
    EmptyKeyword,
}

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Summarization endpoint rejected the API key")]
    Unauthorized,

    #[error("Summarization response contained no choices")]
    EmptyResponse,

    #[error("No API key configured for summarization")]
    MissingApiKey,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reading document failed: {0}")]
    Source(#[from] SourceError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Summarization failed: {0}")]
    Summarize(#[from] SummarizeError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}
