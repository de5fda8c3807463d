//! Error types for the payable-core library.

use thiserror::Error;

/// Main error type for the payable library.
#[derive(Error, Debug)]
pub enum PayableError {
    /// Annotation extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed JSON payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading fields out of an annotation tree.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A date-typed datapoint did not hold a `YYYY-MM-DD` date.
    #[error("invalid date in {field}: {value:?}")]
    InvalidDate { field: String, value: String },

    /// The export payload carried no results.
    #[error("export contains no results")]
    EmptyExport,
}

/// Errors raised while rendering XML.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The underlying writer failed.
    #[error("failed to write XML: {0}")]
    Write(#[from] std::io::Error),

    /// Rendered bytes were not valid UTF-8.
    #[error("rendered XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors related to configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No annotation to process was configured.
    #[error("document ID is required (set DOCUMENT_ID or document_id)")]
    MissingDocumentId,
}

/// Result type for the payable library.
pub type Result<T> = std::result::Result<T, PayableError>;
