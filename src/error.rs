//! Error types for pdfriffle.

use std::io;
use thiserror::Error;

/// Result type alias for pdfriffle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while interleaving or splitting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading, writing or deleting files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing or serializing the PDF structure.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The page tree is malformed (cycles, missing nodes, too deep).
    #[error("Corrupted page tree: {0}")]
    Corrupted(String),

    /// The page count is odd, so the document has no two equal halves.
    #[error("Page count {0} is not divisible by 2")]
    OddPageCount(usize),

    /// Fewer than two pairs of pages.
    #[error("Document has too few pages: {0} (at least 4 required)")]
    TooFewPages(usize),

    /// The post-interleave cardinality check failed.
    #[error("Unexpected page count after interleave: expected {expected}, found {actual}")]
    UnexpectedPageCount {
        /// `3 * (original / 2)`
        expected: usize,
        /// Count actually observed
        actual: usize,
    },

    /// Page index is out of range.
    #[error("Page index {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// Invalid split parameters.
    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    /// The split step did not yield exactly one document.
    #[error("Split produced {0} documents, expected exactly one")]
    UnexpectedSplit(usize),

    /// Error serializing a report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is one of the interleave preconditions or its
    /// post-condition, as opposed to an I/O or format failure.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::OddPageCount(_) | Error::TooFewPages(_) | Error::UnexpectedPageCount { .. }
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Pdf(err.to_string()),
        }
    }
}
